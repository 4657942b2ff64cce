use super::series::{bollinger_bands, ema};
use crate::domain::signals::config::DetectorConfig;

/// Latest EMA and upper Bollinger values of one price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelSet {
    pub ema_fast: f64,
    pub ema_mid: f64,
    pub ema_slow: f64,
    pub boll_upper: f64,
}

impl LevelSet {
    pub fn values(&self) -> [f64; 4] {
        [self.ema_fast, self.ema_mid, self.ema_slow, self.boll_upper]
    }
}

/// Computes the level set at the most recent close.
///
/// Returns `None` unless every component has enough history, so a partial
/// level set is never observable.
pub fn compute_levels(closes: &[f64], config: &DetectorConfig) -> Option<LevelSet> {
    let ema_fast = ema(closes, config.ema_fast);
    let ema_mid = ema(closes, config.ema_mid);
    let ema_slow = ema(closes, config.ema_slow);
    let bands = bollinger_bands(closes, config.boll_len, config.boll_dev);

    Some(LevelSet {
        ema_fast: *ema_fast.last()?,
        ema_mid: *ema_mid.last()?,
        ema_slow: *ema_slow.last()?,
        boll_upper: *bands.upper.last()?,
    })
}
