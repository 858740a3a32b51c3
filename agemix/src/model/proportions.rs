use std::collections::BTreeMap;

use crate::error::{MixingError, Result};

/// Fraction of the total population at each single year of age.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeProportions {
    by_age: BTreeMap<u32, f64>,
}

impl AgeProportions {
    /// Normalize raw head counts by the all-ages total.
    pub fn from_counts(counts: BTreeMap<u32, f64>, total: f64) -> Result<Self> {
        if !(total.is_finite() && total > 0.0) {
            return Err(MixingError::data_format(format!(
                "population total must be positive, got {}",
                total
            )));
        }
        let by_age = counts
            .into_iter()
            .map(|(age, count)| (age, count / total))
            .collect();
        Ok(Self { by_age })
    }

    /// Wrap proportions that are already normalized.
    pub fn from_proportions(by_age: BTreeMap<u32, f64>) -> Self {
        Self { by_age }
    }

    pub fn get(&self, age: u32) -> Option<f64> {
        self.by_age.get(&age).copied()
    }

    pub fn ages(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_age.keys().copied()
    }

    /// Lowest and highest age present, if any.
    pub fn age_span(&self) -> Option<(u32, u32)> {
        let first = *self.by_age.keys().next()?;
        let last = *self.by_age.keys().next_back()?;
        Some((first, last))
    }

    /// Sum over every age present; 1.0 for a table built from a complete census.
    pub fn total(&self) -> f64 {
        self.by_age.values().sum()
    }

    pub fn len(&self) -> usize {
        self.by_age.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_age.is_empty()
    }
}
