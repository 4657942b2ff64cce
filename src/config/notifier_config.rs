//! Alert delivery settings.

use super::Lookup;
use crate::infrastructure::notifications::DEFAULT_TELEGRAM_API_URL;

/// Telegram credentials; both token and chat id are needed to deliver.
#[derive(Debug, Clone)]
pub struct NotifierEnvConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
    pub api_url: String,
}

impl NotifierEnvConfig {
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            bot_token: non_empty("TELEGRAM_BOT_TOKEN"),
            chat_id: non_empty("TELEGRAM_CHAT_ID"),
            api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
        }
    }

    /// `(token, chat_id)` when Telegram delivery is fully configured
    pub fn telegram_credentials(&self) -> Option<(&str, &str)> {
        match (&self.bot_token, &self.chat_id) {
            (Some(token), Some(chat)) => Some((token.as_str(), chat.as_str())),
            _ => None,
        }
    }
}
