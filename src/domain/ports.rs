use crate::domain::market::{Candle, Ticker, Timeframe, closes};
use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait MarketDataService: Send + Sync {
    async fn get_tickers(&self) -> Result<Vec<Ticker>>;

    /// Candles for `symbol`, oldest first. An unknown symbol yields an empty
    /// vector rather than an error.
    async fn get_candles(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>>;

    /// Close series for `symbol`. Never fails: fetch errors are logged and
    /// surface as an empty series, which detectors read as insufficient data.
    async fn fetch_closes(&self, symbol: &str, timeframe: Timeframe) -> Vec<f64> {
        match self.get_candles(symbol, timeframe).await {
            Ok(candles) => closes(&candles),
            Err(e) => {
                warn!(
                    "MarketData: Failed to fetch {} candles for {}: {:#}",
                    timeframe, symbol, e
                );
                Vec::new()
            }
        }
    }
}

/// Best-effort outbound channel for alert text.
///
/// `send` has no error path: implementations log delivery failures and
/// return, so a broken sink can never stop the scan loop.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn send(&self, text: &str);
}
