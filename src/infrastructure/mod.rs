pub mod core;
pub mod mexc;
pub mod mock;
pub mod notifications;
pub mod observability;

pub use mexc::MexcMarketDataService;
pub use mock::{MockMarketDataService, RecordingAlertSink};
pub use notifications::{LogAlertSink, TelegramAlertSink};
pub use observability::ScanMetrics;
