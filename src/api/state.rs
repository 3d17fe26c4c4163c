use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::ml::Predictor;
use crate::persistence::{EvaluationResults, PredictionLog};
use crate::services::PredictionService;

/// Shared application state for API handlers
///
/// Built once at startup; everything inside is read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Predict flow over the loaded model and the prediction log
    pub predictions: Arc<PredictionService>,

    /// Evaluation results table reader
    pub results: Arc<EvaluationResults>,

    /// Display name of the served model
    pub model_label: Arc<str>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: &AppConfig, predictor: Arc<dyn Predictor>) -> Self {
        let log = PredictionLog::new(&config.paths.prediction_log);
        Self {
            predictions: Arc::new(PredictionService::new(predictor, log)),
            results: Arc::new(EvaluationResults::new(&config.paths.results)),
            model_label: Arc::from(config.model_label.as_str()),
            start_time: Utc::now(),
        }
    }

    /// Get system uptime in seconds
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}
