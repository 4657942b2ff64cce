pub mod log_sink;
pub mod telegram;

pub use log_sink::LogAlertSink;
pub use telegram::{DEFAULT_TELEGRAM_API_URL, TelegramAlertSink};
