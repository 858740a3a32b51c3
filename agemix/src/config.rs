use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MixingError, Result};
use crate::io::population::DEFAULT_ESTIMATE_COLUMN;
use crate::model::age_group::{parse_groups, AgeGroup};

pub const DEFAULT_MIXING_PATH: &str = "Age-Mixing.csv";
pub const DEFAULT_POPULATION_PATH: &str = "US-Age-Sex-Distribution.csv";
pub const DEFAULT_TARGET_GROUPS: [&str; 3] = ["0-20", "21-64", "65-100"];

/// Inputs for one re-binning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MixingConfig {
    pub mixing_path: PathBuf,
    pub population_path: PathBuf,
    /// Census column holding the population counts
    pub estimate_column: String,
    pub target_groups: Vec<String>,
    /// Reject target groups that leave gaps, straddle or overlap
    pub strict: bool,
}

impl Default for MixingConfig {
    fn default() -> Self {
        Self {
            mixing_path: PathBuf::from(DEFAULT_MIXING_PATH),
            population_path: PathBuf::from(DEFAULT_POPULATION_PATH),
            estimate_column: DEFAULT_ESTIMATE_COLUMN.to_string(),
            target_groups: DEFAULT_TARGET_GROUPS.iter().map(|s| s.to_string()).collect(),
            strict: false,
        }
    }
}

impl MixingConfig {
    /// Read a TOML config file; absent keys take their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MixingError::data_format(format!("invalid config: {}", e)))
    }

    pub fn check(&self) -> Result<()> {
        if self.estimate_column.trim().is_empty() {
            return Err(MixingError::data_format("estimate_column must not be empty"));
        }
        self.parsed_target_groups().map(|_| ())
    }

    /// Target groups parsed and checked for emptiness and duplicates.
    pub fn parsed_target_groups(&self) -> Result<Vec<AgeGroup>> {
        if self.target_groups.is_empty() {
            return Err(MixingError::data_format("target_groups must not be empty"));
        }
        let groups = parse_groups(&self.target_groups)?;
        let mut seen = HashSet::new();
        for g in &groups {
            if !seen.insert(g.label()) {
                return Err(MixingError::data_format(format!("target group '{}' listed twice", g)));
            }
        }
        Ok(groups)
    }
}
