//! Detector thresholds loaded from a TOML file.

use crate::domain::signals::DetectorConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Parses and validates detector settings. Keys absent from the document
/// keep their defaults.
pub fn parse_detector_config(content: &str) -> Result<DetectorConfig> {
    let config: DetectorConfig =
        toml::from_str(content).context("Failed to parse detector config")?;
    config.validate().context("Invalid detector config")?;
    Ok(config)
}

/// Defaults when `path` is `None`, otherwise the file's contents.
pub fn load_detector_config(path: Option<&Path>) -> Result<DetectorConfig> {
    let Some(path) = path else {
        return Ok(DetectorConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read detector config {}", path.display()))?;
    let config = parse_detector_config(&content)
        .with_context(|| format!("Detector config {}", path.display()))?;

    info!("Loaded detector config from {}", path.display());
    Ok(config)
}
