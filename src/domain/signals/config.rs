use crate::domain::errors::DetectorConfigError;
use serde::{Deserialize, Serialize};

/// Window lengths and thresholds shared by the level aggregator and both
/// detectors.
///
/// Ratios (`spread_htf_max`, `weekly_dist_max`, `squeeze_*_max`) are fractions
/// of price, not percentages. Missing keys in a TOML file fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub ema_fast: usize,
    pub ema_mid: usize,
    pub ema_slow: usize,
    pub boll_len: usize,
    pub boll_dev: f64,

    /// Max dispersion of all 8 daily + weekly levels
    pub spread_htf_max: f64,
    /// Max distance from price to the nearest weekly level
    pub weekly_dist_max: f64,

    pub squeeze_abs_max: f64,
    pub squeeze_rel_max: f64,
    /// Minimum history, in Bollinger windows, before a squeeze is evaluated
    pub squeeze_lookback_multiplier: usize,
    /// Number of most recent window end positions left out of the historical
    /// sweep. 1 drops only the current window, `boll_len` drops every window
    /// overlapping it.
    pub squeeze_history_guard: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            ema_fast: 34,
            ema_mid: 89,
            ema_slow: 200,
            boll_len: 21,
            boll_dev: 2.0,
            spread_htf_max: 0.01,
            weekly_dist_max: 0.005,
            squeeze_abs_max: 0.08,
            squeeze_rel_max: 0.50,
            squeeze_lookback_multiplier: 4,
            squeeze_history_guard: 1,
        }
    }
}

impl DetectorConfig {
    /// Closes required before the squeeze detector looks at a series.
    pub fn squeeze_lookback(&self) -> usize {
        self.boll_len * self.squeeze_lookback_multiplier
    }

    /// Longest window the level aggregator needs.
    pub fn level_history(&self) -> usize {
        [self.ema_fast, self.ema_mid, self.ema_slow, self.boll_len]
            .into_iter()
            .max()
            .unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), DetectorConfigError> {
        for (name, length) in [
            ("ema_fast", self.ema_fast),
            ("ema_mid", self.ema_mid),
            ("ema_slow", self.ema_slow),
            ("boll_len", self.boll_len),
            ("squeeze_lookback_multiplier", self.squeeze_lookback_multiplier),
            ("squeeze_history_guard", self.squeeze_history_guard),
        ] {
            if length == 0 {
                return Err(DetectorConfigError::ZeroLength { name });
            }
        }

        for (name, value) in [
            ("boll_dev", self.boll_dev),
            ("spread_htf_max", self.spread_htf_max),
            ("weekly_dist_max", self.weekly_dist_max),
            ("squeeze_abs_max", self.squeeze_abs_max),
            ("squeeze_rel_max", self.squeeze_rel_max),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DetectorConfigError::NonPositive { name, value });
            }
        }

        Ok(())
    }
}
