//! Configuration loading.
//!
//! Settings come from environment variables (a `.env` file is honored by the
//! binary), grouped by concern: Exchange, Notifier and Scanner. Detector
//! thresholds live in an optional TOML file named by `DETECTOR_CONFIG_PATH`.

mod detector_file;
mod exchange_config;
mod notifier_config;
mod scanner_config;

pub use detector_file::{load_detector_config, parse_detector_config};
pub use exchange_config::ExchangeEnvConfig;
pub use notifier_config::NotifierEnvConfig;
pub use scanner_config::ScannerEnvConfig;

use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;
use std::str::FromStr;

/// Variable lookup, `std::env::var` in production and a map in tests.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub(crate) fn parse_var<T>(lookup: Lookup<'_>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Failed to parse {}", key)),
        None => Ok(default),
    }
}

pub(crate) fn parse_bool(lookup: Lookup<'_>, key: &str, default: bool) -> Result<bool> {
    match lookup(key) {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            other => anyhow::bail!("Failed to parse {}: '{}' is not a boolean", key, other),
        },
        None => Ok(default),
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub exchange: ExchangeEnvConfig,
    pub notifier: NotifierEnvConfig,
    pub scanner: ScannerEnvConfig,
    pub detector_config_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        Ok(Self {
            exchange: ExchangeEnvConfig::from_lookup(lookup)
                .context("Failed to load exchange config")?,
            notifier: NotifierEnvConfig::from_lookup(lookup),
            scanner: ScannerEnvConfig::from_lookup(lookup)
                .context("Failed to load scanner config")?,
            detector_config_path: lookup("DETECTOR_CONFIG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}
