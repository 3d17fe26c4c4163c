use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "pricer")]
#[command(version = "0.1.0")]
#[command(about = "House price prediction web form and model evaluation viewer", long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and environment overrides
    #[arg(short, long, env = "PRICER_CONFIG_DIR", default_value = "config")]
    pub config_dir: PathBuf,

    /// Interface to bind
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Model artifact path
    #[arg(short, long)]
    pub model: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(model) = &self.model {
            config.paths.model = model.clone();
        }
    }
}
