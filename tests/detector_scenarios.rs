//! End-to-end detector behaviour on hand-built close series.
//!
//! Run with: cargo test --test detector_scenarios

use htf_scanner::domain::indicators::{LevelSet, bollinger_bands, compute_levels, ema};
use htf_scanner::domain::signals::{
    DetectorConfig, SignalReport, detect_confluence, detect_squeeze, evaluate_confluence,
};

fn alternating(low: f64, high: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| if i % 2 == 0 { low } else { high }).collect()
}

fn population_std_dev(window: &[f64]) -> f64 {
    let mean = window.iter().sum::<f64>() / window.len() as f64;
    (window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / window.len() as f64).sqrt()
}

#[test]
fn test_ema_on_constant_input() {
    let values = vec![42.0; 60];
    let out = ema(&values, 34);
    assert_eq!(out.len(), 27);
    assert!(out.iter().all(|v| (v - 42.0).abs() < 1e-12));
    assert!(ema(&values[..33], 34).is_empty());
}

#[test]
fn test_bollinger_upper_offset_matches_population_deviation() {
    let values: Vec<f64> = (0..40).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();

    for deviations in [0.5, 2.0, 3.0] {
        let bands = bollinger_bands(&values, 21, deviations);
        assert_eq!(bands.len(), 20);

        for (i, (basis, upper)) in bands.basis.iter().zip(&bands.upper).enumerate() {
            let sd = population_std_dev(&values[i..i + 21]);
            assert!((upper - basis - deviations * sd).abs() < 1e-9);
            assert!((basis - bands.lower[i] - deviations * sd).abs() < 1e-9);
        }
    }
}

#[test]
fn test_levels_need_the_longest_window() {
    let config = DetectorConfig::default();
    let closes: Vec<f64> = (1..=200).map(f64::from).collect();

    assert!(compute_levels(&closes[..199], &config).is_none());
    let levels = compute_levels(&closes, &config).unwrap();
    assert!(levels.ema_fast > levels.ema_mid);
    assert!(levels.ema_mid > levels.ema_slow);
    assert!(levels.boll_upper > 190.0);
}

#[test]
fn test_flat_market_is_a_confluence() {
    let config = DetectorConfig::default();
    let daily = vec![3.25; 260];
    let weekly = vec![3.25; 210];

    let result = detect_confluence(&daily, &weekly, &config);
    assert!(result.triggered());
    assert_eq!(result.price, Some(3.25));
    assert_eq!(result.spread_pct, Some(0.0));
    assert_eq!(result.weekly_distance_pct, Some(0.0));
    assert!(result.message().contains("3.25"));
}

#[test]
fn test_trending_market_fails_spread_gate() {
    let config = DetectorConfig::default();
    let daily: Vec<f64> = (0..300).map(|i| 100.0 + i as f64).collect();
    let weekly: Vec<f64> = (0..250).map(|i| 50.0 + 2.0 * i as f64).collect();

    let result = detect_confluence(&daily, &weekly, &config);
    assert!(!result.triggered());
    assert!(result.spread_pct.unwrap() > 1.0);
    assert!(result.message().is_empty());
}

#[test]
fn test_short_weekly_history_is_not_triggered() {
    let config = DetectorConfig::default();
    let result = detect_confluence(&vec![1.0; 300], &vec![1.0; 120], &config);
    assert!(!result.triggered());
    assert_eq!(result.spread_pct, None);
}

#[test]
fn test_spread_gate_with_two_percent_dispersion() {
    let config = DetectorConfig::default();
    let levels = LevelSet {
        ema_fast: 100.0,
        ema_mid: 101.0,
        ema_slow: 99.0,
        boll_upper: 100.5,
    };

    let result = evaluate_confluence(&levels, &levels, 100.0, &config);
    assert!(!result.triggered);
    assert!((result.spread_pct.unwrap() - 2.0).abs() < 1e-9);
    assert_eq!(result.weekly_distance_pct, None);
}

#[test]
fn test_distance_gate_rejects_price_away_from_weekly() {
    let config = DetectorConfig::default();
    let daily = LevelSet {
        ema_fast: 100.0,
        ema_mid: 100.2,
        ema_slow: 100.4,
        boll_upper: 100.6,
    };
    let weekly = LevelSet {
        ema_fast: 100.6,
        ema_mid: 100.6,
        ema_slow: 100.6,
        boll_upper: 100.6,
    };

    let result = evaluate_confluence(&daily, &weekly, 99.5, &config);
    assert!(!result.triggered);
    assert!(result.spread_pct.unwrap() <= 1.0);
    assert!(result.weekly_distance_pct.unwrap() > 0.5);
}

#[test]
fn test_confluence_gates_include_their_thresholds() {
    let config = DetectorConfig {
        spread_htf_max: 1.0 / 128.0,
        weekly_dist_max: 1.0 / 128.0,
        ..Default::default()
    };
    let level = |value: f64| LevelSet {
        ema_fast: value,
        ema_mid: value,
        ema_slow: value,
        boll_upper: value,
    };

    // Spread and distance both land exactly on 1/128 of price
    assert!(evaluate_confluence(&level(128.0), &level(129.0), 128.0, &config).triggered);

    let wide = LevelSet {
        ema_slow: 127.75,
        ..level(128.0)
    };
    assert!(!evaluate_confluence(&wide, &level(129.0), 128.0, &config).triggered);
    assert!(!evaluate_confluence(&level(129.25), &level(129.25), 128.0, &config).triggered);
}

#[test]
fn test_squeeze_after_expansion() {
    let config = DetectorConfig::default();
    let mut closes = alternating(90.0, 110.0, 63);
    closes.extend(alternating(99.5, 100.5, 21));

    let result = detect_squeeze(&closes, &config);
    assert!(result.triggered());
    assert!(result.width_abs_pct.unwrap() <= 8.0);
    assert!(result.width_rel_pct.unwrap() <= 50.0);
    assert!(!result.message().is_empty());
}

#[test]
fn test_uniformly_narrow_band_is_not_a_squeeze() {
    let config = DetectorConfig::default();
    let closes = alternating(99.0, 101.0, 84);

    let result = detect_squeeze(&closes, &config);
    assert!(!result.triggered());
    assert!(result.width_abs_pct.unwrap() <= 8.0);
    assert!(result.width_rel_pct.unwrap() > 50.0);
}

#[test]
fn test_constant_series_hits_zero_width_guard() {
    let config = DetectorConfig::default();
    let result = detect_squeeze(&vec![100.0; 84], &config);

    assert!(!result.triggered());
    assert_eq!(result.width_abs_pct, Some(0.0));
    assert_eq!(result.width_rel_pct, None);
}

#[test]
fn test_detectors_leave_input_untouched() {
    let config = DetectorConfig::default();
    let mut closes = alternating(90.0, 110.0, 240);
    closes.extend(alternating(99.5, 100.5, 21));
    let snapshot = closes.clone();

    let first = (
        detect_confluence(&closes, &closes, &config),
        detect_squeeze(&closes, &config),
    );
    let second = (
        detect_confluence(&closes, &closes, &config),
        detect_squeeze(&closes, &config),
    );

    assert_eq!(first, second);
    assert_eq!(closes, snapshot);
}
