use crate::domain::errors::AlertError;
use crate::domain::ports::AlertSink;
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, HttpSettings};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Delivers alerts through the Telegram Bot API `sendMessage` call.
pub struct TelegramAlertSink {
    client: Client,
    api_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramAlertSink {
    pub fn new(api_url: String, bot_token: String, chat_id: String, http: HttpSettings) -> Self {
        Self {
            client: HttpClientFactory::create_plain_client(http),
            api_url: api_url.trim_end_matches('/').to_string(),
            bot_token,
            chat_id,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.bot_token)
    }

    /// Single delivery attempt with the failure reported to the caller.
    pub async fn try_send(&self, text: &str) -> Result<(), AlertError> {
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            // Strip the URL: it carries the bot token
            .map_err(|e| AlertError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AlertError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AlertSink for TelegramAlertSink {
    async fn send(&self, text: &str) {
        match self.try_send(text).await {
            Ok(()) => debug!("TelegramAlertSink: Delivered {} chars", text.len()),
            Err(e) => warn!("TelegramAlertSink: Alert dropped: {}", e),
        }
    }
}
