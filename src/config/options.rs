// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use super::consts::*;
use crate::error::{Result, WatchError};

/// Which new alarms are pushed as messages. Logging always covers all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NotifyFilter {
    #[default]
    All,
    /// Only rows whose transition reads "occurred".
    OccurredOnly,
}

/// What to do when there is no last seen alarm yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FirstRunPolicy {
    /// Everything in the table is new; the per-cycle cap still applies.
    #[default]
    NotifyAll,
    /// Log the rows and remember the newest one, notify nothing.
    SeedOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalsConfig {
    /// Page path relative to the base URL, e.g. `/S.htm`.
    pub path: String,
    pub log_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatcherConfig {
    /// Controller root, no trailing slash.
    pub base_url: String,
    pub username: String,
    pub password: String,
    pub login_form_name: String,
    /// Form slots the credentials go into: (user, password).
    pub credential_fields: (String, String),
    pub request_timeout: Duration,
    pub poll_interval: Duration,
    pub max_notifications_per_cycle: usize,
    pub subject_prefix: String,
    pub filter: NotifyFilter,
    pub first_run: FirstRunPolicy,
    pub signals: Option<SignalsConfig>,
    pub alarm_log_path: PathBuf,
    pub state_path: PathBuf,
    pub telegram: TelegramConfig,
}

impl WatcherConfig {
    /// Config with defaults for everything but the controller and Telegram credentials.
    pub fn new(base_url: &str, username: &str, password: &str, bot_token: &str, chat_id: &str) -> Self {
        Self {
            base_url: s!(base_url.trim_end_matches('/')),
            username: s!(username),
            password: s!(password),
            login_form_name: s!(LOGIN_FORM_NAME),
            credential_fields: (s!(USER_FIELD), s!(PASSWORD_FIELD)),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(POLL_SECS),
            max_notifications_per_cycle: MAX_NOTIFICATIONS_PER_CYCLE,
            subject_prefix: s!(SUBJECT_PREFIX),
            filter: NotifyFilter::All,
            first_run: FirstRunPolicy::NotifyAll,
            signals: None,
            alarm_log_path: PathBuf::from(ALARM_LOG_CSV),
            state_path: PathBuf::from(STATE_FILE),
            telegram: TelegramConfig {
                bot_token: s!(bot_token),
                chat_id: s!(chat_id),
                api_base: s!(TELEGRAM_API_BASE),
            },
        }
    }

    /// Startup check. Anything failing here aborts before the loop starts.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("PLC_BASE_URL", &self.base_url),
            ("PLC_USERNAME", &self.username),
            ("PLC_PASSWORD", &self.password),
            ("TELEGRAM_BOT_TOKEN", &self.telegram.bot_token),
            ("TELEGRAM_CHAT_ID", &self.telegram.chat_id),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if !missing.is_empty() {
            return Err(WatchError::Config(format!("missing settings: {}", missing.join(", "))));
        }

        Url::parse(&self.base_url)
            .map_err(|e| WatchError::Config(format!("invalid base url {}: {e}", self.base_url)))?;

        if let Some(sig) = &self.signals {
            if sig.path.trim().is_empty() || sig.log_path.as_os_str().is_empty() {
                return Err(WatchError::Config(s!("signal logging needs both SIGNALS_PATH and SIGNALS_LOG_CSV")));
            }
        }
        if self.max_notifications_per_cycle == 0 {
            logw!("max notifications per cycle is 0; alarms will only be logged");
        }
        Ok(())
    }

    pub fn page_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
