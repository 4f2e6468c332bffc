//! Subcommand implementations.

pub mod chickens;
pub mod config;
pub mod dashboard;
pub mod eggs;
pub mod import;
pub mod purchases;

use std::path::{Path, PathBuf};

use tracing::debug;

use eggledger_core::{LedgerConfig, Store};

/// Output format for listings.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain text
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("eggledger")
        .join("config.json")
}

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LedgerConfig> {
    if let Some(path) = config_path {
        return Ok(LedgerConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("loading config from {}", default_path.display());
        Ok(LedgerConfig::from_file(&default_path)?)
    } else {
        Ok(LedgerConfig::default())
    }
}

pub fn open_store(config: &LedgerConfig) -> anyhow::Result<Store> {
    Ok(Store::from_config(&config.paths)?)
}
