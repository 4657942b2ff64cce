//! Decoding of MEXC contract API responses.
//!
//! The kline endpoint has been observed to answer in three shapes: a list of
//! positional rows `[t, o, h, l, c, v]`, a list of objects `{t, o, h, l, c, v}`,
//! or a single columnar object `{time: [], open: [], ..., vol: []}`. Numbers
//! may arrive as JSON numbers or as strings. All three are accepted.

use crate::domain::errors::MarketDataError;
use crate::domain::market::{Candle, Ticker};
use serde_json::Value;
use tracing::{debug, warn};

/// Reads a float from a JSON number or a numeric string.
fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn lenient_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn envelope_rejected(body: &Value) -> Option<i64> {
    match body.get("success") {
        Some(Value::Bool(false)) => Some(body.get("code").and_then(Value::as_i64).unwrap_or(-1)),
        _ => None,
    }
}

pub fn parse_tickers(body: &Value, endpoint: &str) -> Result<Vec<Ticker>, MarketDataError> {
    if let Some(code) = envelope_rejected(body) {
        return Err(MarketDataError::Rejected {
            endpoint: endpoint.to_string(),
            code,
        });
    }

    let rows = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| MarketDataError::Malformed {
            endpoint: endpoint.to_string(),
            reason: "missing ticker list in `data`".to_string(),
        })?;

    let tickers: Vec<Ticker> = rows
        .iter()
        .filter_map(|row| {
            Some(Ticker {
                symbol: row.get("symbol")?.as_str()?.to_string(),
                last_price: row.get("lastPrice").and_then(lenient_f64).unwrap_or(0.0),
                rise_fall_rate: row.get("riseFallRate").and_then(lenient_f64)?,
            })
        })
        .collect();

    if tickers.len() < rows.len() {
        debug!(
            "MEXC: Skipped {} ticker rows without symbol or riseFallRate",
            rows.len() - tickers.len()
        );
    }
    Ok(tickers)
}

fn candle_from_values(t: &Value, o: &Value, h: &Value, l: &Value, c: &Value, v: &Value) -> Option<Candle> {
    Some(Candle {
        open_time: lenient_i64(t)?,
        open: lenient_f64(o)?,
        high: lenient_f64(h)?,
        low: lenient_f64(l)?,
        close: lenient_f64(c)?,
        volume: lenient_f64(v).unwrap_or(0.0),
    })
}

fn candle_from_row(row: &Value) -> Option<Candle> {
    match row {
        Value::Array(cols) if cols.len() >= 6 => {
            candle_from_values(&cols[0], &cols[1], &cols[2], &cols[3], &cols[4], &cols[5])
        }
        Value::Object(map) => candle_from_values(
            map.get("t")?,
            map.get("o")?,
            map.get("h")?,
            map.get("l")?,
            map.get("c")?,
            map.get("v").unwrap_or(&Value::Null),
        ),
        _ => None,
    }
}

fn candles_from_columns(data: &Value) -> Vec<Candle> {
    let column = |key: &str| data.get(key).and_then(Value::as_array);

    let (Some(time), Some(open), Some(high), Some(low), Some(close)) = (
        column("time"),
        column("open"),
        column("high"),
        column("low"),
        column("close"),
    ) else {
        return Vec::new();
    };
    let empty = Vec::new();
    let vol = column("vol").unwrap_or(&empty);

    (0..time.len())
        .filter_map(|i| {
            candle_from_values(
                &time[i],
                open.get(i)?,
                high.get(i)?,
                low.get(i)?,
                close.get(i)?,
                vol.get(i).unwrap_or(&Value::Null),
            )
        })
        .collect()
}

/// Decodes a kline response into candles sorted oldest first.
///
/// A missing or null `data` field, or a rejected envelope (unknown symbol),
/// is an empty history rather than an error.
pub fn parse_klines(body: &Value, symbol: &str) -> Vec<Candle> {
    if let Some(code) = envelope_rejected(body) {
        debug!("MEXC: Kline request for {} rejected with code {}", symbol, code);
        return Vec::new();
    }

    let mut candles = match body.get("data") {
        Some(Value::Array(rows)) => {
            let parsed: Vec<Candle> = rows.iter().filter_map(candle_from_row).collect();
            if parsed.len() < rows.len() {
                warn!(
                    "MEXC: Dropped {} unreadable kline rows for {}",
                    rows.len() - parsed.len(),
                    symbol
                );
            }
            parsed
        }
        Some(data @ Value::Object(_)) => candles_from_columns(data),
        _ => Vec::new(),
    };

    candles.sort_by_key(|c| c.open_time);
    candles
}
