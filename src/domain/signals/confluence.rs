use super::config::DetectorConfig;
use super::{DetectorKind, SignalReport};
use crate::domain::indicators::levels::{LevelSet, compute_levels};
use tracing::debug;

/// Outcome of the daily + weekly confluence check.
///
/// Metrics are filled in as far as the evaluation got: `spread_pct` is `None`
/// when a level set was missing, `weekly_distance_pct` is `None` when the
/// spread gate already rejected the setup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfluenceResult {
    pub triggered: bool,
    pub price: Option<f64>,
    pub spread_pct: Option<f64>,
    pub weekly_distance_pct: Option<f64>,
    pub detail: String,
}

impl SignalReport for ConfluenceResult {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Confluence
    }

    fn triggered(&self) -> bool {
        self.triggered
    }

    fn message(&self) -> &str {
        &self.detail
    }
}

/// Checks whether the daily and weekly EMA/Bollinger levels converge near the
/// current daily close.
pub fn detect_confluence(
    daily_closes: &[f64],
    weekly_closes: &[f64],
    config: &DetectorConfig,
) -> ConfluenceResult {
    let (Some(daily), Some(weekly)) = (
        compute_levels(daily_closes, config),
        compute_levels(weekly_closes, config),
    ) else {
        debug!(
            daily_len = daily_closes.len(),
            weekly_len = weekly_closes.len(),
            "Confluence: insufficient history for level sets"
        );
        return ConfluenceResult::default();
    };

    match daily_closes.last() {
        Some(&price) => evaluate_confluence(&daily, &weekly, price, config),
        None => ConfluenceResult::default(),
    }
}

/// Applies the spread and weekly-distance gates to precomputed level sets.
pub fn evaluate_confluence(
    daily: &LevelSet,
    weekly: &LevelSet,
    price: f64,
    config: &DetectorConfig,
) -> ConfluenceResult {
    let mut result = ConfluenceResult {
        price: Some(price),
        ..Default::default()
    };

    if price <= 0.0 {
        return result;
    }

    let levels = daily.values().into_iter().chain(weekly.values());
    let (lowest, highest) = levels.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), lv| {
        (lo.min(lv), hi.max(lv))
    });

    let spread = (highest - lowest) / price;
    result.spread_pct = Some(spread * 100.0);
    if spread > config.spread_htf_max {
        return result;
    }

    let best_dist = weekly
        .values()
        .into_iter()
        .map(|lv| (price - lv).abs() / price)
        .fold(f64::INFINITY, f64::min);
    result.weekly_distance_pct = Some(best_dist * 100.0);
    if best_dist > config.weekly_dist_max {
        return result;
    }

    result.triggered = true;
    result.detail = format!(
        "Price {} is {:.2}% from the nearest weekly level; daily + weekly levels span {:.2}%",
        price,
        best_dist * 100.0,
        spread * 100.0
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(value: f64) -> LevelSet {
        LevelSet {
            ema_fast: value,
            ema_mid: value,
            ema_slow: value,
            boll_upper: value,
        }
    }

    #[test]
    fn test_levels_at_price_trigger() {
        let result = evaluate_confluence(&flat(100.0), &flat(100.0), 100.0, &Default::default());
        assert!(result.triggered);
        assert_eq!(result.spread_pct, Some(0.0));
        assert_eq!(result.weekly_distance_pct, Some(0.0));
        assert!(result.message().contains("100"));
        assert!(result.message().contains("0.00%"));
    }

    #[test]
    fn test_spread_gate_fires_before_distance() {
        let levels = LevelSet {
            ema_fast: 100.0,
            ema_mid: 101.0,
            ema_slow: 99.0,
            boll_upper: 100.5,
        };
        let result = evaluate_confluence(&levels, &levels, 100.0, &Default::default());

        assert!(!result.triggered);
        let spread = result.spread_pct.expect("spread computed");
        assert!((spread - 2.0).abs() < 1e-9);
        assert_eq!(result.weekly_distance_pct, None);
        assert!(result.message().is_empty());
    }

    #[test]
    fn test_tight_cluster_far_from_price_is_rejected() {
        // Levels span 0.8% of price but the nearest weekly level is 0.6% away
        let daily = LevelSet {
            ema_fast: 100.6,
            ema_mid: 100.8,
            ema_slow: 101.0,
            boll_upper: 101.4,
        };
        let weekly = flat(100.6);
        let result = evaluate_confluence(&daily, &weekly, 100.0, &Default::default());

        assert!(!result.triggered);
        let dist = result.weekly_distance_pct.expect("distance computed");
        assert!((dist - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_only_weekly_levels_count_for_distance() {
        // Daily level sits exactly at price, weekly levels 0.4% away
        let daily = flat(100.0);
        let weekly = flat(100.4);
        let result = evaluate_confluence(&daily, &weekly, 100.0, &Default::default());

        assert!(result.triggered);
        let dist = result.weekly_distance_pct.expect("distance computed");
        assert!((dist - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_thresholds_come_from_config() {
        let levels = LevelSet {
            ema_fast: 100.0,
            ema_mid: 101.0,
            ema_slow: 99.0,
            boll_upper: 100.5,
        };
        let loose = DetectorConfig {
            spread_htf_max: 0.03,
            ..Default::default()
        };
        assert!(evaluate_confluence(&levels, &levels, 100.0, &loose).triggered);
    }

    /// Gates of exactly 1/128, so boundary ratios are exact at price 128.
    fn binary_gates() -> DetectorConfig {
        DetectorConfig {
            spread_htf_max: 0.0078125,
            weekly_dist_max: 0.0078125,
            ..Default::default()
        }
    }

    #[test]
    fn test_gates_are_inclusive_at_threshold() {
        let result = evaluate_confluence(&flat(128.0), &flat(129.0), 128.0, &binary_gates());

        assert!(result.triggered);
        assert_eq!(result.spread_pct, Some(0.78125));
        assert_eq!(result.weekly_distance_pct, Some(0.78125));
    }

    #[test]
    fn test_spread_just_past_threshold_is_rejected() {
        let daily = LevelSet {
            ema_fast: 127.75,
            ..flat(128.0)
        };
        let result = evaluate_confluence(&daily, &flat(129.0), 128.0, &binary_gates());

        assert!(!result.triggered);
        assert_eq!(result.spread_pct, Some(0.9765625));
        assert_eq!(result.weekly_distance_pct, None);
    }

    #[test]
    fn test_distance_just_past_threshold_is_rejected() {
        let result = evaluate_confluence(&flat(129.25), &flat(129.25), 128.0, &binary_gates());

        assert!(!result.triggered);
        assert_eq!(result.spread_pct, Some(0.0));
        assert_eq!(result.weekly_distance_pct, Some(0.9765625));
    }

    #[test]
    fn test_zero_price_is_not_triggered() {
        let result = evaluate_confluence(&flat(0.0), &flat(0.0), 0.0, &Default::default());
        assert!(!result.triggered);
        assert_eq!(result.spread_pct, None);
    }

    #[test]
    fn test_detect_needs_both_timeframes() {
        let config = DetectorConfig::default();
        let daily = vec![100.0; 250];

        let result = detect_confluence(&daily, &[100.0; 150], &config);
        assert!(!result.triggered);
        assert_eq!(result.price, None);

        let result = detect_confluence(&daily, &daily, &config);
        assert!(result.triggered);
        assert_eq!(result.price, Some(100.0));
    }
}
