//! Predictor adapter over the pre-trained regression artifact.
//!
//! The artifact is loaded once at startup and shared read-only between
//! request handlers.

pub mod dense;

pub use dense::{Activation, DenseLayer, DenseNetwork};

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::error::{PricerError, Result};

/// A fitted regression model.
#[cfg_attr(test, mockall::automock)]
pub trait Predictor: Send + Sync {
    /// Predict one value from features in `FEATURE_COLUMNS` order.
    fn predict(&self, features: &[f64]) -> Result<f64>;
}

/// Load the model artifact, failing if it is absent or malformed.
pub fn load_predictor<P: AsRef<Path>>(path: P) -> Result<Arc<dyn Predictor>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PricerError::ModelNotFound(path.display().to_string()));
    }

    let network = DenseNetwork::from_file(path)?;
    info!(
        path = %path.display(),
        name = network.name().unwrap_or("unnamed"),
        layers = network.layers.len(),
        "loaded model artifact"
    );
    Ok(Arc::new(network))
}
