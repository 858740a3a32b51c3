use tracing::info;

use crate::config::MixingConfig;
use crate::error::Result;
use crate::io::contact::load_mixing_matrix_csv;
use crate::io::population::load_age_proportions_csv;
use crate::math::rebin::{rebin, rebin_checked};
use crate::math::scale::scale_by_population;
use crate::model::age_group::AgeGroup;
use crate::model::matrix::MixingMatrix;
use crate::model::proportions::AgeProportions;

/// Source mixing data together with its population-scaled form.
#[derive(Debug, Clone)]
pub struct AgeMixing {
    raw: MixingMatrix,
    proportions: AgeProportions,
    scaled: MixingMatrix,
}

impl AgeMixing {
    pub fn new(raw: MixingMatrix, proportions: AgeProportions) -> Result<Self> {
        let scaled = scale_by_population(&raw, &proportions)?;
        Ok(Self { raw, proportions, scaled })
    }

    /// Load both source tables named in `cfg`.
    pub fn load(cfg: &MixingConfig) -> Result<Self> {
        let raw = load_mixing_matrix_csv(&cfg.mixing_path)?;
        let proportions = load_age_proportions_csv(&cfg.population_path, &cfg.estimate_column)?;
        let mixing = Self::new(raw, proportions)?;
        info!(
            groups = mixing.raw.len(),
            scaled_total = mixing.scaled.total(),
            "scaled mixing matrix by population"
        );
        Ok(mixing)
    }

    pub fn raw(&self) -> &MixingMatrix {
        &self.raw
    }

    pub fn proportions(&self) -> &AgeProportions {
        &self.proportions
    }

    pub fn scaled(&self) -> &MixingMatrix {
        &self.scaled
    }

    /// Re-bin the scaled matrix into `groups`, dropping source groups that no
    /// target contains.
    pub fn new_matrix(&self, groups: &[AgeGroup]) -> Result<MixingMatrix> {
        rebin(&self.scaled, groups)
    }

    /// Re-bin, rejecting target groups that do not tile the source groups.
    pub fn new_matrix_checked(&self, groups: &[AgeGroup]) -> Result<MixingMatrix> {
        rebin_checked(&self.scaled, groups)
    }
}
