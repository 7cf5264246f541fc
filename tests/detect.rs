// tests/detect.rs
mod common;

use common::*;
use plc_watch::engine::detect_new;
use plc_watch::specs::alarms::AlarmRecord;

fn refs(v: &[AlarmRecord]) -> Vec<&str> {
    v.iter().map(|a| a.reference.as_str()).collect()
}

#[test]
fn prefix_before_last_seen_comes_back_oldest_first() {
    let current = records_desc(6); // A06 .. A01
    for seen in 1..=6 {
        let last = record(seen).id;
        let fresh = detect_new(&current, Some(&last));
        let expected: Vec<String> = (seen + 1..=6).map(|n| format!("A{n:02}")).collect();
        assert_eq!(refs(&fresh), expected, "last seen A{seen:02}");
    }
}

#[test]
fn three_rows_last_seen_in_the_middle() {
    let current = vec![
        AlarmRecord::new("R1", "l", "k", "v", "t3", "Ocurrido", "s", "u"),
        AlarmRecord::new("R2", "l", "k", "v", "t2", "Ocurrido", "s", "u"),
        AlarmRecord::new("R3", "l", "k", "v", "t1", "Ocurrido", "s", "u"),
    ];
    let fresh = detect_new(&current, Some(&current[1].id));
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].reference, "R1");
    assert_eq!(fresh[0].timestamp_text, "t3");
}

#[test]
fn newest_already_seen_means_nothing_new() {
    let current = records_desc(3);
    assert!(detect_new(&current, Some(&current[0].id)).is_empty());
}

#[test]
fn absent_id_takes_everything_reversed() {
    let current = records_desc(4);
    let fresh = detect_new(&current, None);
    assert_eq!(refs(&fresh), ["A01", "A02", "A03", "A04"]);
    // pure: same inputs, same answer
    assert_eq!(detect_new(&current, None), fresh);
}

#[test]
fn scrolled_out_id_takes_everything() {
    let current = records_desc(3);
    let gone = record(99).id;
    let fresh = detect_new(&current, Some(&gone));
    assert_eq!(refs(&fresh), ["A01", "A02", "A03"]);
    assert_eq!(detect_new(&current, Some(&gone)), fresh);
}

#[test]
fn empty_table() {
    assert!(detect_new(&[], None).is_empty());
    assert!(detect_new(&[], Some("x")).is_empty());
}

#[test]
fn id_is_built_from_display_fields_not_url() {
    let a = AlarmRecord::new("R1", "Label", "k", "5", "t", "Ocurrido", "Activo", "http://a");
    let b = AlarmRecord::new("R1", "Label", "other kind", "5", "t", "Ocurrido", "Inactivo", "http://b");
    assert_eq!(a.id, "R1|t|Ocurrido|5|Label");
    assert_eq!(a.id, b.id);
}
