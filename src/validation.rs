//! Input validation for prediction form submissions
//!
//! Parsing and sign checks only; the model's domain has no stated upper
//! bounds, so none are enforced here.

use crate::domain::{PredictionForm, PredictionRequest};
use crate::error::{PricerError, Result};

/// Parse one submitted value as a finite real number.
///
/// Surrounding whitespace is ignored. The error names the offending value,
/// never the field.
pub fn parse_number(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PricerError::Parse(raw.to_string())),
    }
}

/// Parse all five form fields into a request, in feature order.
pub fn parse_form(form: &PredictionForm) -> Result<PredictionRequest> {
    let mut features = [0.0_f64; 5];
    for (slot, (name, value)) in features.iter_mut().zip(form.fields()) {
        let raw = value.ok_or_else(|| PricerError::MissingField(name.to_string()))?;
        *slot = parse_number(raw)?;
    }
    Ok(PredictionRequest::from_features(features))
}

/// Reject requests with any value ≤ 0
///
/// # Returns
/// * `Ok(())` if every field is strictly positive
/// * `Err` listing the non-positive fields
pub fn validate_positive(request: &PredictionRequest) -> Result<()> {
    let offending: Vec<&str> = ["avg_income", "house_age", "rooms", "bedrooms", "population"]
        .into_iter()
        .zip(request.features())
        .filter(|(_, value)| *value <= 0.0)
        .map(|(name, _)| name)
        .collect();

    if offending.is_empty() {
        Ok(())
    } else {
        Err(PricerError::Validation(format!(
            "non-positive values for: {}",
            offending.join(", ")
        )))
    }
}
