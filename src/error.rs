use thiserror::Error;

/// Main error type for the prediction service
#[derive(Error, Debug)]
pub enum PricerError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Form input errors
    #[error("could not convert string to float: '{0}'")]
    Parse(String),

    #[error("missing form field: {0}")]
    MissingField(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Model errors
    #[error("Model error: {0}")]
    Model(String),

    #[error("Model artifact not found at {0}")]
    ModelNotFound(String),

    // Evaluation table errors
    #[error("Evaluation results error: {0}")]
    Evaluation(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for PricerError
pub type Result<T> = std::result::Result<T, PricerError>;
