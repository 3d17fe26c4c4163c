pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ml;
pub mod persistence;
pub mod services;
pub mod validation;

pub use crate::api::{create_router, AppState};
pub use crate::config::AppConfig;
pub use crate::domain::{EvaluationTable, PredictionOutcome, PredictionRecord, PredictionRequest};
pub use crate::error::{PricerError, Result};
pub use crate::ml::Predictor;
