//! The predict flow: parse, validate, infer, clamp, log.
//!
//! Every failure is folded into a [`PredictionOutcome`]; nothing here can
//! take the server down.

use chrono::Local;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::{clamp_price, format_currency, PredictionForm, PredictionOutcome, PredictionRecord};
use crate::error::{PricerError, Result};
use crate::ml::Predictor;
use crate::persistence::PredictionLog;
use crate::validation::{parse_form, validate_positive};

pub struct PredictionService {
    predictor: Arc<dyn Predictor>,
    log: PredictionLog,
}

impl PredictionService {
    pub fn new(predictor: Arc<dyn Predictor>, log: PredictionLog) -> Self {
        Self { predictor, log }
    }

    /// Run the predict flow for one form submission.
    pub async fn predict(&self, form: &PredictionForm) -> PredictionOutcome {
        match self.try_predict(form).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "prediction failed");
                PredictionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_predict(&self, form: &PredictionForm) -> Result<PredictionOutcome> {
        let request = parse_form(form)?;

        if let Err(e) = validate_positive(&request) {
            info!(reason = %e, "rejected prediction request");
            return Ok(PredictionOutcome::Rejected);
        }

        let raw = self.predictor.predict(&request.features())?;
        if !raw.is_finite() {
            return Err(PricerError::Model(format!("model returned non-finite value {raw}")));
        }
        let price = clamp_price(raw);

        let record = PredictionRecord::new(request, price, Local::now().naive_local());
        self.log.append(&record).await?;

        info!(
            raw_prediction = raw,
            predicted_price = price,
            clamped = raw < 0.0,
            "served prediction"
        );
        Ok(PredictionOutcome::Predicted {
            formatted: format_currency(price),
            record,
        })
    }
}
