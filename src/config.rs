use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    /// Display name of the served model
    #[serde(default = "default_model_label")]
    pub model_label: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "0.0.0.0")
    pub host: String,
    /// HTTP port (default: 5000)
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Serialized predictor artifact, loaded once at startup
    pub model: PathBuf,
    /// Evaluation results table produced by the offline evaluation run
    pub results: PathBuf,
    /// Append-only log of served predictions
    pub prediction_log: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for daily rolling log files (console only when unset)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_label() -> String {
    "Best Model (LinearRegression)".to_string()
}

impl AppConfig {
    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("paths.model", "models/best_model.json")?
            .set_default("paths.results", "results/model_evaluation_results.csv")?
            .set_default("paths.prediction_log", "data/predictions_log.csv")?
            .set_default("model_label", default_model_label())?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("PRICER_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (PRICER_SERVER__PORT, etc.)
            .add_source(
                Environment::with_prefix("PRICER")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Configuration matching the fixed deployment layout
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            paths: PathsConfig {
                model: PathBuf::from("models/best_model.json"),
                results: PathBuf::from("results/model_evaluation_results.csv"),
                prediction_log: PathBuf::from("data/predictions_log.csv"),
            },
            model_label: default_model_label(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }
        if self.server.host.trim().is_empty() {
            errors.push("server.host must not be empty".to_string());
        }

        for (name, path) in [
            ("paths.model", &self.paths.model),
            ("paths.results", &self.paths.results),
            ("paths.prediction_log", &self.paths.prediction_log),
        ] {
            if path.as_os_str().is_empty() {
                errors.push(format!("{name} must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
