//! Scan loop settings.

use super::{Lookup, parse_bool, parse_var};
use crate::domain::market::Timeframe;
use anyhow::Result;

/// Scan scheduling environment configuration
#[derive(Debug, Clone)]
pub struct ScannerEnvConfig {
    pub scan_interval_secs: u64,
    pub top_gainer_pct: f64,
    pub symbol_pause_ms: u64,
    pub daily_timeframe: Timeframe,
    pub weekly_timeframe: Timeframe,
    pub confluence_enabled: bool,
    pub squeeze_enabled: bool,
    pub startup_notice: bool,
}

impl ScannerEnvConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let scan_interval_secs = parse_var(lookup, "SCAN_INTERVAL_SECS", 60)?;
        if scan_interval_secs == 0 {
            anyhow::bail!("SCAN_INTERVAL_SECS must be greater than zero");
        }

        Ok(Self {
            scan_interval_secs,
            top_gainer_pct: parse_var(lookup, "TOP_GAINER_PCT", 10.0)?,
            symbol_pause_ms: parse_var(lookup, "SYMBOL_PAUSE_MS", 300)?,
            daily_timeframe: parse_var(lookup, "DAILY_TIMEFRAME", Timeframe::Day1)?,
            weekly_timeframe: parse_var(lookup, "WEEKLY_TIMEFRAME", Timeframe::Week1)?,
            confluence_enabled: parse_bool(lookup, "CONFLUENCE_ENABLED", true)?,
            squeeze_enabled: parse_bool(lookup, "SQUEEZE_ENABLED", true)?,
            startup_notice: parse_bool(lookup, "STARTUP_NOTICE", true)?,
        })
    }
}
