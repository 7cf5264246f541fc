// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod clock;
pub mod config;
pub mod core;
pub mod csv;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod file;
pub mod notify;
pub mod runner;
pub mod session;
pub mod specs;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Result, WatchError};
