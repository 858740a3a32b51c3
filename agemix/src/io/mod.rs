pub mod contact;
pub mod contact_synth;
pub mod matrix_out;
pub mod population;

/// Header of the label column in mixing tables, read and written.
pub const AGE_GROUP_HEADER: &str = "Age group";
