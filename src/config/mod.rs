// src/config/mod.rs
pub mod consts;
pub mod options;

pub use options::{FirstRunPolicy, NotifyFilter, SignalsConfig, TelegramConfig, WatcherConfig};
