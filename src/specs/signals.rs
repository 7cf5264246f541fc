// src/specs/signals.rs
//! Sensor page (e.g. `/S.htm`).
//!
//! Columns: `code | label | value | unit | (unused) | alarm`.

use crate::config::consts::SIGNAL_COLUMNS;
use crate::engine::table::extract_table;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalRecord {
    pub code: String,
    pub label: String,
    pub value: String,
    pub unit: String,
    pub alarm_flag: String,
}

impl SignalRecord {
    /// Column title used in the signal log.
    pub fn header(&self) -> String {
        format!("{} {} [{}]", self.code, self.label, self.unit).trim().to_string()
    }

    /// Numeric part of an `S<digits>` code.
    pub fn code_number(&self) -> Option<u64> {
        let c = self.code.trim().to_ascii_uppercase();
        let digits = c.strip_prefix('S')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

pub fn map_row(cells: &[String]) -> Option<SignalRecord> {
    let [code, label, value, unit, _, alarm, ..] = cells else { return None };
    Some(SignalRecord {
        code: code.clone(),
        label: label.clone(),
        value: value.clone(),
        unit: unit.clone(),
        alarm_flag: alarm.clone(),
    })
}

/// S1, S2, ..., S10 by number; anything else after them in page order.
pub fn sort_by_code(signals: &mut [SignalRecord]) {
    signals.sort_by_key(|s| s.code_number().map_or((1, 0), |n| (0, n)));
}

/// Signal rows of the page, sorted for logging.
pub fn parse(doc: &str) -> Result<Vec<SignalRecord>> {
    let mut signals = extract_table(doc, SIGNAL_COLUMNS, map_row)?;
    sort_by_code(&mut signals);
    Ok(signals)
}
