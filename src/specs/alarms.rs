// src/specs/alarms.rs
//! Alarm history page (`/alarms.htm`).
//!
//! Columns: `ref | label | type | value | time | transition | state`.
//! The controller renders the most recent entry first; records keep that order.

use crate::config::consts::ALARM_COLUMNS;
use crate::engine::table::extract_table;
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlarmRecord {
    /// `ref|time|transition|value|label`
    pub id: String,
    pub reference: String,
    pub label: String,
    pub kind: String,
    pub value: String,
    /// Time as shown by the controller, not parsed.
    pub timestamp_text: String,
    pub transition: String,
    pub state: String,
    /// Page this row was read from.
    pub source_url: String,
}

impl AlarmRecord {
    pub fn new(
        reference: &str, label: &str, kind: &str, value: &str,
        timestamp_text: &str, transition: &str, state: &str, source_url: &str,
    ) -> Self {
        Self {
            id: alarm_id(reference, timestamp_text, transition, value, label),
            reference: s!(reference),
            label: s!(label),
            kind: s!(kind),
            value: s!(value),
            timestamp_text: s!(timestamp_text),
            transition: s!(transition),
            state: s!(state),
            source_url: s!(source_url),
        }
    }

    pub fn transition_kind(&self) -> Transition {
        Transition::classify(&self.transition)
    }
}

/// Composite key. Two events rendering identically at the same second collide.
pub fn alarm_id(reference: &str, timestamp_text: &str, transition: &str, value: &str, label: &str) -> String {
    format!("{reference}|{timestamp_text}|{transition}|{value}|{label}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Occurred,
    Cleared,
    Other,
}

impl Transition {
    /// The controller speaks Spanish ("Ocurrido"/"Eliminado"); English kept for other firmware.
    pub fn classify(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "ocurrido" | "occurred" => Transition::Occurred,
            "eliminado" | "cleared" => Transition::Cleared,
            _ => Transition::Other,
        }
    }
}

/// Row mapper for the alarm table.
pub fn map_row(cells: &[String], source_url: &str) -> Option<AlarmRecord> {
    let [reference, label, kind, value, time, transition, state, ..] = cells else { return None };
    Some(AlarmRecord::new(reference, label, kind, value, time, transition, state, source_url))
}

/// All alarm rows of the page, most recent first.
pub fn parse(doc: &str, source_url: &str) -> Result<Vec<AlarmRecord>> {
    extract_table(doc, ALARM_COLUMNS, |cells| map_row(cells, source_url))
}
