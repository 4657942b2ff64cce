use super::config::DetectorConfig;
use super::{DetectorKind, SignalReport};
use crate::domain::indicators::series::window_stats;
use tracing::debug;

/// Outcome of the Bollinger squeeze check on a daily series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqueezeResult {
    pub triggered: bool,
    /// Current band width as a percentage of the current basis
    pub width_abs_pct: Option<f64>,
    /// Current band width as a percentage of the historical average width
    pub width_rel_pct: Option<f64>,
    pub detail: String,
}

impl SignalReport for SqueezeResult {
    fn kind(&self) -> DetectorKind {
        DetectorKind::Squeeze
    }

    fn triggered(&self) -> bool {
        self.triggered
    }

    fn message(&self) -> &str {
        &self.detail
    }
}

/// Detects a band that is narrow relative to price and relative to its own
/// history.
///
/// The current window and every historical window go through the same
/// [`window_stats`] helper. The historical sweep covers windows ending at
/// `boll_len - 1` up to the last position before the guard band.
pub fn detect_squeeze(closes: &[f64], config: &DetectorConfig) -> SqueezeResult {
    let len = config.boll_len;
    let mut result = SqueezeResult::default();

    if len == 0 || closes.len() < config.squeeze_lookback() {
        return result;
    }

    let last = closes.len() - 1;
    let Some(current) = window_stats(closes, len, last) else {
        return result;
    };
    if current.mean == 0.0 {
        return result;
    }

    let width_now = current.band_width(config.boll_dev);
    let width_abs = width_now / current.mean;
    result.width_abs_pct = Some(width_abs * 100.0);

    let sweep_end = match last.checked_sub(config.squeeze_history_guard) {
        Some(end) if end + 1 >= len => end,
        _ => return result,
    };

    let (sum, count) = (len - 1..=sweep_end)
        .filter_map(|end| window_stats(closes, len, end))
        .filter(|stats| stats.mean != 0.0)
        .map(|stats| stats.band_width(config.boll_dev))
        .fold((0.0, 0usize), |(sum, count), width| (sum + width, count + 1));

    if count == 0 {
        return result;
    }

    let avg_width_hist = sum / count as f64;
    if avg_width_hist == 0.0 {
        return result;
    }

    let width_rel = width_now / avg_width_hist;
    result.width_rel_pct = Some(width_rel * 100.0);

    debug!(
        width_abs,
        width_rel,
        history_windows = count,
        "Squeeze: band width computed"
    );

    if width_abs <= config.squeeze_abs_max && width_rel <= config.squeeze_rel_max {
        result.triggered = true;
        result.detail = format!(
            "Band width is {:.2}% of price and {:.2}% of its historical average",
            width_abs * 100.0,
            width_rel * 100.0
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 63 swinging closes followed by 21 nearly flat ones.
    fn compressed_series() -> Vec<f64> {
        let mut closes: Vec<f64> = (0..63)
            .map(|i| if i % 2 == 0 { 90.0 } else { 110.0 })
            .collect();
        closes.extend((0..21).map(|i| if i % 2 == 0 { 99.5 } else { 100.5 }));
        closes
    }

    #[test]
    fn test_short_history_not_evaluated() {
        let closes = compressed_series();
        let result = detect_squeeze(&closes[1..], &DetectorConfig::default());
        assert!(!result.triggered);
        assert_eq!(result.width_abs_pct, None);
    }

    #[test]
    fn test_compression_after_expansion_triggers() {
        let result = detect_squeeze(&compressed_series(), &DetectorConfig::default());

        assert!(result.triggered);
        let abs = result.width_abs_pct.expect("abs width");
        let rel = result.width_rel_pct.expect("rel width");
        assert!(abs > 1.9 && abs < 2.1, "abs width {abs}");
        assert!(rel < 50.0, "rel width {rel}");
        assert!(result.message().contains('%'));
    }

    #[test]
    fn test_uniformly_tight_series_fails_relative_gate() {
        let closes: Vec<f64> = (0..84)
            .map(|i| if i % 2 == 0 { 99.0 } else { 101.0 })
            .collect();
        let result = detect_squeeze(&closes, &DetectorConfig::default());

        assert!(!result.triggered);
        let abs = result.width_abs_pct.expect("abs width");
        let rel = result.width_rel_pct.expect("rel width");
        assert!(abs <= 8.0);
        assert!((rel - 100.0).abs() < 1e-6);
        assert!(result.message().is_empty());
    }

    #[test]
    fn test_flat_series_hits_zero_average_guard() {
        let result = detect_squeeze(&[100.0; 84], &DetectorConfig::default());

        assert!(!result.triggered);
        assert_eq!(result.width_abs_pct, Some(0.0));
        assert_eq!(result.width_rel_pct, None);
    }

    #[test]
    fn test_zero_mean_current_window() {
        let mut closes = vec![5.0; 63];
        closes.extend([0.0; 21]);
        let result = detect_squeeze(&closes, &DetectorConfig::default());
        assert!(!result.triggered);
        assert_eq!(result.width_abs_pct, None);
    }

    #[test]
    fn test_guard_band_excludes_overlapping_windows() {
        // Windows straddling the swing/flat boundary are narrower than the
        // fully swinging ones; a full guard band drops them from the average.
        let closes = compressed_series();

        let default_guard = detect_squeeze(&closes, &DetectorConfig::default());
        let full_guard = detect_squeeze(
            &closes,
            &DetectorConfig {
                squeeze_history_guard: 21,
                ..Default::default()
            },
        );

        let rel_default = default_guard.width_rel_pct.expect("rel width");
        let rel_full = full_guard.width_rel_pct.expect("rel width");
        assert!(rel_full < rel_default);
        assert_eq!(default_guard.width_abs_pct, full_guard.width_abs_pct);
    }

    #[test]
    fn test_guard_larger_than_history_yields_no_windows() {
        let config = DetectorConfig {
            squeeze_history_guard: 80,
            ..Default::default()
        };
        let result = detect_squeeze(&compressed_series(), &config);
        assert!(!result.triggered);
        assert!(result.width_abs_pct.is_some());
        assert_eq!(result.width_rel_pct, None);
    }

    /// 85 flat closes with a single 121 at index 20 and another at the end.
    /// Every window holding one spike has mean 101 and width 4 * sqrt(20).
    fn single_spike_series() -> Vec<f64> {
        let mut closes = vec![100.0; 85];
        closes[20] = 121.0;
        closes[84] = 121.0;
        closes
    }

    #[test]
    fn test_sweep_covers_first_window_up_to_the_one_before_current() {
        let result = detect_squeeze(&single_spike_series(), &DetectorConfig::default());

        // Windows ending at 20..=83 are swept: the 21 ending at 20..=40 hold
        // the early spike, the remaining 43 are flat.
        let expected_rel = 64.0 / 21.0;
        let rel = result.width_rel_pct.expect("rel width") / 100.0;
        assert!((rel - expected_rel).abs() < 1e-9, "rel width {rel}");

        let expected_abs = 4.0 * 20f64.sqrt() / 101.0;
        let abs = result.width_abs_pct.expect("abs width") / 100.0;
        assert!((abs - expected_abs).abs() < 1e-9, "abs width {abs}");
    }

    #[test]
    fn test_full_guard_sweep_stops_before_overlapping_windows() {
        let config = DetectorConfig {
            squeeze_history_guard: 21,
            ..Default::default()
        };
        let result = detect_squeeze(&single_spike_series(), &config);

        // Windows ending at 20..=63
        let rel = result.width_rel_pct.expect("rel width") / 100.0;
        assert!((rel - 44.0 / 21.0).abs() < 1e-9, "rel width {rel}");
    }
}
