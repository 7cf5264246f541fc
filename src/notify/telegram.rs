// src/notify/telegram.rs
use std::time::Duration;

use reqwest::blocking::Client;

use super::Notifier;
use crate::config::TelegramConfig;
use crate::config::consts::NOTIFY_TIMEOUT_SECS;
use crate::error::{Result, WatchError};

/// Telegram Bot API `sendMessage`.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(NOTIFY_TIMEOUT_SECS))
            .build()
            .map_err(|e| WatchError::Notify(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_base: s!(config.api_base.trim_end_matches('/')),
            bot_token: config.bot_token.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str { "telegram" }

    fn send(&self, destination: &str, text: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.endpoint())
            .form(&[("chat_id", destination), ("text", text)])
            .send()
            // the URL carries the bot token; keep it out of logs
            .map_err(|e| WatchError::Notify(format!("request failed: {}", e.without_url())))?;

        let status = resp.status();
        if status.as_u16() != 200 {
            let body = resp.text().unwrap_or_default();
            return Err(WatchError::Notify(format!("Telegram API error {}: {}", status.as_u16(), body)));
        }
        Ok(())
    }
}
