//! Telegram Bot API notifier.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::TelegramConfig;

use super::{Channel, Notifier};

/// Sends operator messages through a Telegram bot, one chat per channel.
pub struct TelegramNotifier {
    client: Client,
    config: TelegramConfig,
    api_base: String,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            api_base: "https://api.telegram.org".to_string(),
        }
    }

    /// Override the API base URL (useful for testing).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn chat_id(&self, channel: Channel) -> &str {
        match channel {
            Channel::Success => &self.config.success_chat_id,
            Channel::Warning => &self.config.warning_chat_id,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str, channel: Channel) {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.config.bot_token
        );

        let body = json!({
            "chat_id": self.chat_id(channel),
            "text": text,
        });

        match self.client.post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(?channel, "Telegram notification delivered");
            }
            Ok(response) => {
                warn!(
                    ?channel,
                    status = %response.status(),
                    "Telegram notification rejected"
                );
            }
            Err(e) => {
                warn!(?channel, error = %e, "Telegram notification failed");
            }
        }
    }
}
