// src/notify/mod.rs
//! Outbound messaging. The watcher only needs "send this text to that chat".

pub mod telegram;

use crate::error::Result;

pub use telegram::TelegramNotifier;

/// A push-messaging transport.
pub trait Notifier {
    fn name(&self) -> &'static str;

    /// Deliver `text` to `destination` (chat id, channel, ...).
    /// Anything but a confirmed delivery is a `WatchError::Notify`.
    fn send(&self, destination: &str, text: &str) -> Result<()>;
}
