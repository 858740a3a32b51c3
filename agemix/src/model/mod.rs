pub mod age_group;
pub mod matrix;
pub mod proportions;
