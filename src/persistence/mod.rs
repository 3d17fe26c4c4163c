//! Flat-file persistence
//!
//! - CSV encoding/decoding for the tabular files
//! - Append-only prediction log
//! - Read-only evaluation results table

pub mod csv;
pub mod evaluation_results;
pub mod prediction_log;

pub use evaluation_results::EvaluationResults;
pub use prediction_log::PredictionLog;
