//! Dense network inference from a JSON artifact (CPU-only).
//!
//! A fitted linear regression is a single `linear` layer with one output;
//! small MLP regressors load through the same format.
//!
//! ```json
//! {
//!   "input_dim": 5,
//!   "feature_names": ["Avg. Area Income", "..."],
//!   "layers": [{ "weights": [[21.6, 165000.0, 120000.0, 2000.0, 15.2]], "bias": [-2630000.0] }],
//!   "metadata": { "name": "LinearRegression" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::Predictor;
use crate::domain::FEATURE_COLUMNS;
use crate::error::{PricerError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Tanh,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Self::Linear => x,
            Self::Relu => x.max(0.0),
            Self::Tanh => x.tanh(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    /// Weights shape: [out_dim][in_dim]
    pub weights: Vec<Vec<f64>>,
    /// Bias shape: [out_dim]
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    fn out_dim(&self) -> usize {
        self.weights.len()
    }

    fn forward(&self, x: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                let sum = row.iter().zip(x).fold(*b, |acc, (w, v)| acc + w * v);
                self.activation.apply(sum)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseNetwork {
    /// Expected input dimension.
    pub input_dim: usize,

    /// Training-time column order; checked against the served feature order when present.
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,

    /// Optional z-score normalization.
    #[serde(default)]
    pub input_mean: Option<Vec<f64>>,
    #[serde(default)]
    pub input_std: Option<Vec<f64>>,

    pub layers: Vec<DenseLayer>,

    /// Optional free-form metadata (model name, training info, etc).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl DenseNetwork {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let model: Self = serde_json::from_str(&content)?;
        model.validate().map_err(PricerError::Model)?;
        Ok(model)
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.input_dim != FEATURE_COLUMNS.len() {
            return Err(format!(
                "input_dim {} does not match the {} served features",
                self.input_dim,
                FEATURE_COLUMNS.len()
            ));
        }
        if let Some(names) = &self.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_COLUMNS) {
                return Err(format!(
                    "feature_names {names:?} do not match expected order {FEATURE_COLUMNS:?}"
                ));
            }
        }
        if self.layers.is_empty() {
            return Err("layers must not be empty".to_string());
        }

        match (&self.input_mean, &self.input_std) {
            (Some(mean), Some(std)) => {
                if mean.len() != self.input_dim || std.len() != self.input_dim {
                    return Err(format!(
                        "input_mean/input_std lengths ({}, {}) != input_dim {}",
                        mean.len(),
                        std.len(),
                        self.input_dim
                    ));
                }
                if std.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                    return Err("input_std must be finite and > 0".to_string());
                }
            }
            (None, None) => {}
            _ => return Err("input_mean and input_std must be provided together".to_string()),
        }

        let mut expected_in = self.input_dim;
        for (idx, layer) in self.layers.iter().enumerate() {
            if layer.out_dim() == 0 {
                return Err(format!("layer[{idx}] out_dim must be > 0"));
            }
            if layer.bias.len() != layer.out_dim() {
                return Err(format!(
                    "layer[{idx}] bias len {} != out_dim {}",
                    layer.bias.len(),
                    layer.out_dim()
                ));
            }
            if let Some((r, row)) = layer
                .weights
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != expected_in)
            {
                return Err(format!(
                    "layer[{idx}] weights row {r} len {} != expected in_dim {expected_in}",
                    row.len()
                ));
            }
            let all_finite = layer.weights.iter().flatten().chain(&layer.bias).all(|v| v.is_finite());
            if !all_finite {
                return Err(format!("layer[{idx}] contains non-finite parameters"));
            }
            expected_in = layer.out_dim();
        }

        if expected_in != 1 {
            return Err(format!("regressor must have one output, got {expected_in}"));
        }
        Ok(())
    }

    /// Model name from `metadata.name`, if the artifact carries one.
    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(serde_json::Value::as_str)
    }

    pub fn forward(&self, input: &[f64]) -> Result<f64> {
        if input.len() != self.input_dim {
            return Err(PricerError::Model(format!(
                "input dim mismatch: got {}, expected {}",
                input.len(),
                self.input_dim
            )));
        }

        let mut x: Vec<f64> = match (&self.input_mean, &self.input_std) {
            (Some(mean), Some(std)) => input
                .iter()
                .zip(mean.iter().zip(std))
                .map(|(v, (m, s))| (v - m) / s.max(1e-12))
                .collect(),
            _ => input.to_vec(),
        };

        for layer in &self.layers {
            x = layer.forward(&x);
        }

        x.first()
            .copied()
            .ok_or_else(|| PricerError::Model("network produced no output".to_string()))
    }
}

impl Predictor for DenseNetwork {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        self.forward(features)
    }
}
