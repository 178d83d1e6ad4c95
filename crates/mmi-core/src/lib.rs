//! Shared configuration and reference data for the market mood dashboard.

mod app_config;
mod config;
pub mod symbols;

use std::path::PathBuf;

use thiserror::Error;

pub use app_config::{AppConfig, DirectoryConfig, Environment, UnknownLabelPolicy};
pub use config::{load_app_config, load_app_config_from_env, load_directory_config};
pub use symbols::{Symbol, SymbolDirectory};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no ticker found for \"{0}\"")]
    TickerNotFound(String),

    #[error("failed to read symbol file {path}: {source}")]
    SymbolFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
