// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser, ValueEnum};

use crate::clock::SystemClock;
use crate::config::consts::*;
use crate::config::{FirstRunPolicy, NotifyFilter, SignalsConfig, WatcherConfig};
use crate::core::net::ReqwestConnector;
use crate::error::Result;
use crate::notify::TelegramNotifier;
use crate::runner::Watcher;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FirstRun {
    /// Notify everything found on the very first cycle (cap applies)
    NotifyAll,
    /// Only remember the newest alarm on the first cycle
    Seed,
}

/// Watch the boiler controller's alarm page and push new alarms to Telegram.
#[derive(Debug, Parser)]
#[command(name = "plc_watch", version, about)]
pub struct Args {
    #[arg(long, env = "PLC_BASE_URL", default_value = "")]
    pub base_url: String,
    #[arg(long, env = "PLC_USERNAME", default_value = "")]
    pub username: String,
    #[arg(long, env = "PLC_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN", default_value = "", hide_env_values = true)]
    pub telegram_bot_token: String,
    /// Group and channel ids are negative, e.g. -100123
    #[arg(long, env = "TELEGRAM_CHAT_ID", default_value = "", allow_hyphen_values = true)]
    pub telegram_chat_id: String,
    #[arg(long, env = "TELEGRAM_API_BASE", default_value = TELEGRAM_API_BASE)]
    pub telegram_api_base: String,

    #[arg(long, env = "SUBJECT_PREFIX", default_value = SUBJECT_PREFIX)]
    pub subject_prefix: String,
    /// Notify only "occurred" transitions (all are still logged)
    #[arg(long, env = "ONLY_OCCURRED", default_value_t = false, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub only_occurred: bool,
    #[arg(long, env = "FIRST_RUN", value_enum, default_value_t = FirstRun::NotifyAll)]
    pub first_run: FirstRun,

    /// Per-request timeout, seconds
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,
    /// Seconds between cycles
    #[arg(long, env = "POLL_SECONDS", default_value_t = POLL_SECS)]
    pub poll_seconds: u64,
    #[arg(long, env = "MAX_NOTIFICATIONS_PER_CYCLE", default_value_t = MAX_NOTIFICATIONS_PER_CYCLE)]
    pub max_notifications: usize,

    #[arg(long, env = "STATE_FILE", default_value = STATE_FILE)]
    pub state_file: PathBuf,
    #[arg(long, env = "ALARM_LOG_CSV", default_value = ALARM_LOG_CSV)]
    pub alarm_log: PathBuf,

    #[arg(long, env = "LOG_SIGNALS", default_value_t = false, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    pub log_signals: bool,
    /// Sensor page path, e.g. /S.htm
    #[arg(long, env = "SIGNALS_PATH")]
    pub signals_path: Option<String>,
    #[arg(long, env = "SIGNALS_LOG_CSV")]
    pub signals_log: Option<PathBuf>,

    /// Write process logs to this file instead of stderr
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
    /// Run one cycle and exit
    #[arg(long)]
    pub once: bool,
}

impl Args {
    pub fn to_config(&self) -> Result<WatcherConfig> {
        let mut cfg = WatcherConfig::new(
            &self.base_url,
            &self.username,
            &self.password,
            &self.telegram_bot_token,
            &self.telegram_chat_id,
        );
        cfg.telegram.api_base = self.telegram_api_base.clone();
        cfg.subject_prefix = self.subject_prefix.clone();
        cfg.filter = if self.only_occurred { NotifyFilter::OccurredOnly } else { NotifyFilter::All };
        cfg.first_run = match self.first_run {
            FirstRun::NotifyAll => FirstRunPolicy::NotifyAll,
            FirstRun::Seed => FirstRunPolicy::SeedOnly,
        };
        cfg.request_timeout = Duration::from_secs(self.request_timeout);
        cfg.poll_interval = Duration::from_secs(self.poll_seconds);
        cfg.max_notifications_per_cycle = self.max_notifications;
        cfg.state_path = self.state_file.clone();
        cfg.alarm_log_path = self.alarm_log.clone();
        if self.log_signals {
            cfg.signals = Some(SignalsConfig {
                path: self.signals_path.clone().unwrap_or_default(),
                log_path: self.signals_log.clone().unwrap_or_default(),
            });
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Bootstrap: `.env`, flags, logging, then the loop. Only startup errors return.
pub fn run() -> Result<()> {
    // a missing .env is fine; real env and flags still apply
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    crate::log::init(args.log_file.as_deref())?;

    let config = args.to_config()?;
    let connector = ReqwestConnector { timeout: config.request_timeout };
    let notifier = TelegramNotifier::new(&config.telegram)?;
    let clock = SystemClock;

    logf!("Watcher started (Telegram only).");
    let watcher = Watcher::new(&config, &connector, &notifier, &clock);
    if args.once {
        watcher.run_cycle()?;
    } else {
        watcher.run(None);
    }
    Ok(())
}
