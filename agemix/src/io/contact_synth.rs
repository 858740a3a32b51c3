//! Synthetic mixing matrix generator for testing.
//!
//! This is NOT meant to be realistic, only to exercise re-binning while a
//! survey matrix is not at hand.
//!
//! Contacts decay exponentially with the distance between groups, with a
//! small drift towards older rows so the matrix is not symmetric.

use crate::error::Result;
use crate::model::age_group::AgeGroup;
use crate::model::matrix::MixingMatrix;

pub fn synthetic_mixing_matrix(groups: Vec<AgeGroup>) -> Result<MixingMatrix> {
    MixingMatrix::from_fn(groups, |i, j| {
        let d = (i as f64 - j as f64).abs();
        10.0 * (-0.4 * d).exp() + 0.1 * i as f64
    })
}

/// Consecutive groups of `width` years covering `0..n_groups * width`.
pub fn uniform_age_groups(n_groups: u32, width: u32) -> Result<Vec<AgeGroup>> {
    (0..n_groups)
        .map(|k| AgeGroup::parse(&format!("{}-{}", k * width, (k + 1) * width - 1)))
        .collect()
}
