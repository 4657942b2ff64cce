// Market data domain
pub mod timeframe;
pub mod types;

pub use timeframe::Timeframe;
pub use types::{Candle, Gainer, Ticker, closes, select_gainers};
