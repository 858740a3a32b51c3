//! Error types for loading, scaling and re-binning mixing matrices.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, MixingError>;

#[derive(Error, Debug)]
pub enum MixingError {
    /// Age-group label is not of the form "L-U" with L <= U
    #[error("invalid age group '{label}': {reason}")]
    Parse { label: String, reason: String },

    /// Source table is missing a column, a sentinel row, or has non-numeric data
    #[error("data format error: {0}")]
    DataFormat(String),

    /// An age inside a group has no entry in the proportion table
    #[error("age {age} of group '{group}' is missing from the age proportion table")]
    Lookup { age: u32, group: String },

    /// Target groups do not tile the source groups (strict mode only)
    #[error("target age groups do not tile the source groups: {0}")]
    Tiling(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MixingError {
    pub(crate) fn parse(label: &str, reason: impl Into<String>) -> Self {
        MixingError::Parse {
            label: label.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn data_format(msg: impl Into<String>) -> Self {
        MixingError::DataFormat(msg.into())
    }
}
