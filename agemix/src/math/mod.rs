pub mod rebin;
pub mod scale;
