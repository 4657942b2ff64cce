//! MEXC Market Data Service
//!
//! Polls the public contract endpoints:
//! - 24h tickers for the gainer scan
//! - Historical klines per symbol and interval

use super::payload::{parse_klines, parse_tickers};
use crate::domain::errors::MarketDataError;
use crate::domain::market::{Candle, Ticker, Timeframe};
use crate::domain::ports::MarketDataService;
use crate::infrastructure::core::http_client_factory::{
    HttpClientFactory, HttpSettings, build_url_with_query,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use tracing::{debug, info};

pub const DEFAULT_MEXC_BASE_URL: &str = "https://contract.mexc.com";
pub const DEFAULT_KLINE_LIMIT: usize = 300;

const TICKER_PATH: &str = "/api/v1/contract/ticker";
const KLINE_PATH: &str = "/api/v1/contract/kline";

pub struct MexcMarketDataService {
    client: ClientWithMiddleware,
    base_url: String,
    kline_limit: usize,
}

impl MexcMarketDataService {
    pub fn builder() -> MexcMarketDataServiceBuilder {
        MexcMarketDataServiceBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, url: &str, endpoint: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to reach MEXC {}", endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::HttpStatus {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body,
            }
            .into());
        }

        response
            .json::<Value>()
            .await
            .with_context(|| format!("Failed to decode MEXC {} response", endpoint))
    }
}

#[derive(Default)]
pub struct MexcMarketDataServiceBuilder {
    base_url: Option<String>,
    kline_limit: Option<usize>,
    http: Option<HttpSettings>,
}

impl MexcMarketDataServiceBuilder {
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn kline_limit(mut self, kline_limit: usize) -> Self {
        self.kline_limit = Some(kline_limit);
        self
    }

    pub fn http(mut self, http: HttpSettings) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> MexcMarketDataService {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_MEXC_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        MexcMarketDataService {
            client: HttpClientFactory::create_client(self.http.unwrap_or_default()),
            base_url,
            kline_limit: self.kline_limit.unwrap_or(DEFAULT_KLINE_LIMIT),
        }
    }
}

#[async_trait]
impl MarketDataService for MexcMarketDataService {
    async fn get_tickers(&self) -> Result<Vec<Ticker>> {
        let url = format!("{}{}", self.base_url, TICKER_PATH);
        let body = self.get_json(&url, TICKER_PATH).await?;
        let tickers = parse_tickers(&body, TICKER_PATH)?;

        info!("MexcMarketDataService: Fetched {} tickers", tickers.len());
        Ok(tickers)
    }

    async fn get_candles(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        let endpoint = format!("{}/{}", KLINE_PATH, symbol);
        let url = build_url_with_query(
            &format!("{}{}", self.base_url, endpoint),
            &[
                ("interval", timeframe.to_mexc_string().to_string()),
                ("limit", self.kline_limit.to_string()),
            ],
        )?;

        let body = self.get_json(&url, &endpoint).await?;
        let candles = parse_klines(&body, symbol);

        debug!(
            "MexcMarketDataService: {} {} -> {} candles",
            symbol,
            timeframe,
            candles.len()
        );
        Ok(candles)
    }
}
