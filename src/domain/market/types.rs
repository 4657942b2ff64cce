use serde::{Deserialize, Serialize};

/// One OHLCV period as delivered by the exchange.
///
/// Only `close` feeds the indicators; the other fields are carried through
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Period open timestamp as reported by the exchange
    pub open_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// 24h ticker snapshot for one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    pub last_price: f64,
    /// 24h change as a fraction (0.12 = +12%)
    pub rise_fall_rate: f64,
}

impl Ticker {
    pub fn change_pct(&self) -> f64 {
        self.rise_fall_rate * 100.0
    }
}

/// A ticker that passed the gainer filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Gainer {
    pub symbol: String,
    pub change_pct: f64,
}

/// Extracts the close series, oldest first.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Keeps tickers whose 24h change is at least `min_change_pct` percent and
/// sorts them by change, strongest first.
pub fn select_gainers(tickers: &[Ticker], min_change_pct: f64) -> Vec<Gainer> {
    let mut gainers: Vec<Gainer> = tickers
        .iter()
        .filter(|t| t.change_pct() >= min_change_pct)
        .map(|t| Gainer {
            symbol: t.symbol.clone(),
            change_pct: t.change_pct(),
        })
        .collect();

    gainers.sort_by(|a, b| {
        b.change_pct
            .partial_cmp(&a.change_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    gainers
}
