// src/clock.rs
use std::time::Duration;

use chrono::{DateTime, Local, SecondsFormat};

/// Wall time and sleeping, injected so cycles can run on a fixed clock in tests.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
    fn sleep(&self, d: Duration);

    /// `2026-01-31T08:15:00+01:00`, second precision.
    fn stamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> { Local::now() }
    fn sleep(&self, d: Duration) { std::thread::sleep(d) }
}
