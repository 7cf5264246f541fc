// src/engine/detect.rs
use crate::specs::alarms::AlarmRecord;

/// Alarms newer than `last_seen_id`, oldest first.
///
/// `current` is most-recent-first, as the controller renders it. The walk
/// stops at the row whose id is `last_seen_id`; that row and everything
/// older is already known. If the id is absent, or has scrolled out of the
/// controller's history, every row counts as new.
pub fn detect_new(current: &[AlarmRecord], last_seen_id: Option<&str>) -> Vec<AlarmRecord> {
    let mut fresh: Vec<AlarmRecord> = current
        .iter()
        .take_while(|a| Some(a.id.as_str()) != last_seen_id)
        .cloned()
        .collect();
    fresh.reverse();
    fresh
}
