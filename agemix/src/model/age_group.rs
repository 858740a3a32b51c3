use std::fmt;
use std::str::FromStr;

use crate::error::{MixingError, Result};
use crate::model::proportions::AgeProportions;

/// An inclusive age range such as "5-10", keyed by its label.
///
/// Equality and hashing follow the label, so "05-10" and "5-10" are distinct
/// groups even though they cover the same ages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AgeGroup {
    label: String,
    min: u32,
    max: u32,
}

impl AgeGroup {
    /// Parse a label like "0-5" into the range (0, 5).
    pub fn parse(label: &str) -> Result<Self> {
        let (lower, upper) = label
            .split_once('-')
            .ok_or_else(|| MixingError::parse(label, "expected 'L-U'"))?;
        let min = parse_bound(label, lower)?;
        let max = parse_bound(label, upper)?;
        if min > max {
            return Err(MixingError::parse(
                label,
                format!("lower bound {} exceeds upper bound {}", min, max),
            ));
        }
        Ok(Self {
            label: label.to_string(),
            min,
            max,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn range(&self) -> (u32, u32) {
        (self.min, self.max)
    }

    /// Is `self` (e.g. "5-10") inside `outer` (e.g. "0-15")?
    pub fn is_within(&self, outer: &AgeGroup) -> bool {
        self.min >= outer.min && self.max <= outer.max
    }

    /// True if the two ranges share at least one year of age.
    pub fn overlaps(&self, other: &AgeGroup) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Fraction of the population whose age falls in this group.
    pub fn population_share(&self, proportions: &AgeProportions) -> Result<f64> {
        let mut share = 0.0;
        for age in self.min..=self.max {
            share += proportions.get(age).ok_or_else(|| MixingError::Lookup {
                age,
                group: self.label.clone(),
            })?;
        }
        Ok(share)
    }
}

fn parse_bound(label: &str, part: &str) -> Result<u32> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MixingError::parse(
            label,
            format!("'{}' is not a non-negative integer", part),
        ));
    }
    part.parse::<u32>()
        .map_err(|e| MixingError::parse(label, e.to_string()))
}

/// Free-function form of [`AgeGroup::is_within`].
pub fn contains(inner: &AgeGroup, outer: &AgeGroup) -> bool {
    inner.is_within(outer)
}

/// Parse a list of labels, failing on the first bad one.
pub fn parse_groups<S: AsRef<str>>(labels: &[S]) -> Result<Vec<AgeGroup>> {
    labels.iter().map(|l| AgeGroup::parse(l.as_ref())).collect()
}

impl FromStr for AgeGroup {
    type Err = MixingError;

    fn from_str(s: &str) -> Result<Self> {
        AgeGroup::parse(s)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
