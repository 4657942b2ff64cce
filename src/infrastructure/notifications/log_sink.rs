use crate::domain::ports::AlertSink;
use async_trait::async_trait;
use tracing::info;

/// Writes alerts to the log instead of delivering them.
///
/// Used for dry runs and when no Telegram credentials are configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlertSink;

#[async_trait]
impl AlertSink for LogAlertSink {
    async fn send(&self, text: &str) {
        info!("ALERT (not delivered):\n{}", text);
    }
}
