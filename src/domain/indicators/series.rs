//! Indicator primitives over an ordered price series.
//!
//! Every function here is pure and works on a borrowed slice of closes,
//! oldest first. A series shorter than the requested window is not an error:
//! the functions return an empty vector (or `None`) and callers treat that
//! as "insufficient data".

use statrs::statistics::Statistics;

/// Mean and population standard deviation of one fixed-length window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl WindowStats {
    /// Distance between the upper and lower band for `deviations` sigmas.
    pub fn band_width(&self, deviations: f64) -> f64 {
        2.0 * deviations * self.std_dev
    }

    pub fn upper(&self, deviations: f64) -> f64 {
        self.mean + deviations * self.std_dev
    }

    pub fn lower(&self, deviations: f64) -> f64 {
        self.mean - deviations * self.std_dev
    }
}

/// Statistics of the `length` values ending at index `end` (inclusive).
///
/// Returns `None` when the window does not fit inside `values`.
pub fn window_stats(values: &[f64], length: usize, end: usize) -> Option<WindowStats> {
    if length == 0 || end >= values.len() || end + 1 < length {
        return None;
    }

    let window = &values[end + 1 - length..=end];
    Some(WindowStats {
        mean: window.iter().mean(),
        // Population deviation: sum of squares divided by `length`, not `length - 1`
        std_dev: window.iter().population_std_dev(),
    })
}

/// Exponential moving average seeded with the simple average of the first
/// `length` values.
///
/// The result holds `values.len() - length + 1` points, the last one being the
/// most recent EMA value.
pub fn ema(values: &[f64], length: usize) -> Vec<f64> {
    if length == 0 || values.len() < length {
        return Vec::new();
    }

    let k = 2.0 / (length as f64 + 1.0);
    let seed = values[..length].iter().sum::<f64>() / length as f64;

    let mut out = Vec::with_capacity(values.len() - length + 1);
    out.push(seed);

    let mut prev = seed;
    for &value in &values[length..] {
        prev += k * (value - prev);
        out.push(prev);
    }
    out
}

/// Rolling Bollinger Bands, one entry per window.
///
/// All three vectors are aligned to input indices `[length - 1 ..]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BollingerSeries {
    pub basis: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl BollingerSeries {
    pub fn is_empty(&self) -> bool {
        self.basis.is_empty()
    }

    pub fn len(&self) -> usize {
        self.basis.len()
    }
}

pub fn bollinger_bands(values: &[f64], length: usize, deviations: f64) -> BollingerSeries {
    if length == 0 || values.len() < length {
        return BollingerSeries::default();
    }

    let capacity = values.len() - length + 1;
    let mut bands = BollingerSeries {
        basis: Vec::with_capacity(capacity),
        upper: Vec::with_capacity(capacity),
        lower: Vec::with_capacity(capacity),
    };

    for stats in (length - 1..values.len()).filter_map(|end| window_stats(values, length, end)) {
        bands.basis.push(stats.mean);
        bands.upper.push(stats.upper(deviations));
        bands.lower.push(stats.lower(deviations));
    }
    bands
}
