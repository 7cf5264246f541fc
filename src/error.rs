// src/error.rs
use thiserror::Error;

/// Everything a watch cycle can fail with.
///
/// There is no state variant: a missing or corrupt state file is read as
/// "no last alarm" by `store::StateStore::load`.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Login form missing, token not recoverable.
    #[error("auth error: {0}")]
    Auth(String),

    /// Expected page structure missing or malformed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The notification transport refused a message.
    #[error("notify error: {0}")]
    Notify(String),

    /// Network failure, timeout or non-2xx answer.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration (startup only).
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for WatchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            WatchError::Transport(format!("timed out: {e}"))
        } else {
            WatchError::Transport(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
