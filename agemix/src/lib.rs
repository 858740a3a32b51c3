//! Re-bin age-structured social contact matrices into coarser age groups.
//!
//! A survey contact matrix over narrow age groups is weighted by each group's
//! share of the population and then summed into caller-chosen wider groups.

pub mod config;
pub mod error;
pub mod io;
pub mod math;
pub mod mixing;
pub mod model;

pub use config::MixingConfig;
pub use error::{MixingError, Result};
pub use io::matrix_out::format_matrix;
pub use mixing::AgeMixing;
pub use model::age_group::AgeGroup;
pub use model::matrix::MixingMatrix;
pub use model::proportions::AgeProportions;
