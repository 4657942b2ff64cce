//! In-memory collaborators for dry runs and tests.

use crate::domain::market::{Candle, Ticker, Timeframe};
use crate::domain::ports::{AlertSink, MarketDataService};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Serves canned tickers and close series.
#[derive(Default)]
pub struct MockMarketDataService {
    tickers: Vec<Ticker>,
    series: HashMap<(String, Timeframe), Vec<Candle>>,
    fail_tickers: bool,
    failing_symbols: HashSet<String>,
    candle_requests: AtomicUsize,
}

impl MockMarketDataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticker(mut self, symbol: &str, rise_fall_rate: f64) -> Self {
        self.tickers.push(Ticker {
            symbol: symbol.to_string(),
            last_price: 1.0,
            rise_fall_rate,
        });
        self
    }

    /// Registers a close series; candles get sequential open times.
    pub fn with_closes(mut self, symbol: &str, timeframe: Timeframe, closes: &[f64]) -> Self {
        let period = timeframe.to_minutes() as i64 * 60;
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                open_time: i as i64 * period,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect();
        self.series.insert((symbol.to_string(), timeframe), candles);
        self
    }

    pub fn with_failing_tickers(mut self) -> Self {
        self.fail_tickers = true;
        self
    }

    pub fn with_failing_symbol(mut self, symbol: &str) -> Self {
        self.failing_symbols.insert(symbol.to_string());
        self
    }

    pub fn candle_requests(&self) -> usize {
        self.candle_requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl MarketDataService for MockMarketDataService {
    async fn get_tickers(&self) -> Result<Vec<Ticker>> {
        if self.fail_tickers {
            anyhow::bail!("mock ticker endpoint unavailable");
        }
        Ok(self.tickers.clone())
    }

    async fn get_candles(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>> {
        self.candle_requests.fetch_add(1, Ordering::Relaxed);
        if self.failing_symbols.contains(symbol) {
            anyhow::bail!("mock kline endpoint unavailable for {}", symbol);
        }
        Ok(self
            .series
            .get(&(symbol.to_string(), timeframe))
            .cloned()
            .unwrap_or_default())
    }
}

/// Keeps every alert it receives.
#[derive(Default)]
pub struct RecordingAlertSink {
    sent: Mutex<Vec<String>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<String> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl AlertSink for RecordingAlertSink {
    async fn send(&self, text: &str) {
        self.sent.lock().await.push(text.to_string());
    }
}
