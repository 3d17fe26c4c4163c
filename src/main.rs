mod main_runtime;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use pricer::adapters::start_api_server;
use pricer::api::AppState;
use pricer::cli::Cli;
use pricer::config::AppConfig;
use pricer::ml::load_predictor;
use tracing::{error, info};

/// Load layered configuration, apply CLI overrides and validate.
fn prepare_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load_from(&cli.config_dir).with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config_dir.display()
        )
    })?;
    cli.apply(&mut config);
    config
        .validate()
        .map_err(|errors| anyhow!("invalid configuration: {}", errors.join("; ")))?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = prepare_config(&cli)?;

    let _log_guard = main_runtime::init_logging(&config.logging);

    // The model is loaded exactly once; without it the process does not start.
    let predictor = match load_predictor(&config.paths.model) {
        Ok(predictor) => predictor,
        Err(e) => {
            error!(path = %config.paths.model.display(), "failed to load model: {}", e);
            return Err(e).with_context(|| {
                format!("failed to load model from {}", config.paths.model.display())
            });
        }
    };

    info!(
        model = %config.model_label,
        results = %config.paths.results.display(),
        prediction_log = %config.paths.prediction_log.display(),
        "starting pricer"
    );

    let state = AppState::new(&config, predictor);
    start_api_server(state, &config.server)
        .await
        .context("web server failed")
}
