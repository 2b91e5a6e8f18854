//! Quality and recovery metrics for comparing methods

pub mod quality;

pub use quality::{bit_error_rate, QualityReport};
