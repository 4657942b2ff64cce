// Indicator primitives
pub mod levels;
pub mod series;

pub use levels::{LevelSet, compute_levels};
pub use series::{BollingerSeries, WindowStats, bollinger_bands, ema, window_stats};
