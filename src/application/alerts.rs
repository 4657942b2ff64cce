//! Markdown alert templates.

use crate::domain::signals::{ConfluenceResult, DetectorConfig, SqueezeResult};
use chrono::{DateTime, Utc};

pub const STARTUP_MESSAGE: &str = "🤖 MEXC HTF scanner started";

fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M UTC").to_string()
}

pub fn format_confluence_alert(
    symbol: &str,
    result: &ConfluenceResult,
    config: &DetectorConfig,
    now: DateTime<Utc>,
) -> String {
    let price = result.price.unwrap_or_default();
    let distance = result.weekly_distance_pct.unwrap_or_default();
    let spread = result.spread_pct.unwrap_or_default();

    format!(
        "🔥 *HTF CONFLUENCE ALERT*\n\n\
         Symbol: `{}`\n\
         Price: `{}`\n\
         - EMA{}/{}/{} + Boll({},{}) daily and weekly levels overlap (spread {:.2}%).\n\
         - Price is near weekly resistance (~{:.2}%).\n\
         👉 Check SHORT.\n\
         _{}_",
        symbol,
        price,
        config.ema_fast,
        config.ema_mid,
        config.ema_slow,
        config.boll_len,
        config.boll_dev,
        spread,
        distance,
        timestamp(now)
    )
}

pub fn format_squeeze_alert(
    symbol: &str,
    price: f64,
    result: &SqueezeResult,
    now: DateTime<Utc>,
) -> String {
    format!(
        "🧨 *DAILY BOLLINGER SQUEEZE*\n\n\
         Symbol: `{}`\n\
         Price: `{}`\n\
         - Band width {:.2}% of price.\n\
         - {:.2}% of its historical average width.\n\
         _{}_",
        symbol,
        price,
        result.width_abs_pct.unwrap_or_default(),
        result.width_rel_pct.unwrap_or_default(),
        timestamp(now)
    )
}
