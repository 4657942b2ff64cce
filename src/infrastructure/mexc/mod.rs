pub mod market_data;
pub mod payload;

pub use market_data::{
    DEFAULT_KLINE_LIMIT, DEFAULT_MEXC_BASE_URL, MexcMarketDataService, MexcMarketDataServiceBuilder,
};
