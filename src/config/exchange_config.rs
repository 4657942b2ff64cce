//! Exchange connection settings.

use super::{Lookup, parse_var};
use crate::infrastructure::core::HttpSettings;
use crate::infrastructure::mexc::{DEFAULT_KLINE_LIMIT, DEFAULT_MEXC_BASE_URL};
use anyhow::Result;
use std::time::Duration;

/// MEXC endpoint and HTTP client configuration
#[derive(Debug, Clone)]
pub struct ExchangeEnvConfig {
    pub base_url: String,
    pub kline_limit: usize,
    pub http_timeout_secs: u64,
    pub http_max_retries: u32,
}

impl ExchangeEnvConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self> {
        let kline_limit = parse_var(lookup, "KLINE_LIMIT", DEFAULT_KLINE_LIMIT)?;
        if kline_limit == 0 {
            anyhow::bail!("KLINE_LIMIT must be greater than zero");
        }

        Ok(Self {
            base_url: lookup("MEXC_BASE_URL").unwrap_or_else(|| DEFAULT_MEXC_BASE_URL.to_string()),
            kline_limit,
            http_timeout_secs: parse_var(lookup, "HTTP_TIMEOUT_SECS", 10)?,
            http_max_retries: parse_var(lookup, "HTTP_MAX_RETRIES", 3)?,
        })
    }

    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            timeout: Duration::from_secs(self.http_timeout_secs.max(1)),
            max_retries: self.http_max_retries,
        }
    }
}
