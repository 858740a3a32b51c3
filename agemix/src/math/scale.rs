use tracing::debug;

use crate::error::Result;
use crate::model::matrix::MixingMatrix;
use crate::model::proportions::AgeProportions;

/// Weight every cell by the population share of its row group and column group.
///
/// A cell with contact rate `c` between groups `a` and `b` becomes
/// `share(a) * share(b) * c`. Unlike per-capita rates, the weighted values are
/// additive over sub-groups, which is what lets [`crate::math::rebin::rebin`]
/// aggregate by summation.
pub fn scale_by_population(raw: &MixingMatrix, proportions: &AgeProportions) -> Result<MixingMatrix> {
    let shares = raw
        .groups()
        .iter()
        .map(|g| g.population_share(proportions))
        .collect::<Result<Vec<f64>>>()?;
    debug!(groups = shares.len(), share_sum = shares.iter().sum::<f64>(), "computed group population shares");

    MixingMatrix::from_fn(raw.groups().to_vec(), |i, j| shares[i] * shares[j] * raw.at(i, j))
}
