// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{at, create_test_entry, day};
use crate::{Assignment, AssignmentId, AssignmentKind, FlightHourLedger, SlotId, Timeline};
use time::Duration;

#[test]
fn test_insert_keeps_entries_sorted_by_start() {
    let mut timeline: Timeline = Timeline::new();
    timeline.insert(create_test_entry("B", AssignmentKind::Trn, at(7, 8, 0), at(7, 12, 0), Some("MDE")));
    timeline.insert(create_test_entry("A", AssignmentKind::Free, at(5, 0, 0), at(5, 23, 59), None));
    timeline.insert(create_test_entry("C", AssignmentKind::Trn, at(7, 8, 0), at(7, 9, 0), Some("MDE")));

    let order: Vec<&str> = timeline
        .iter()
        .map(|entry: &Assignment| entry.id.as_str())
        .collect();
    assert_eq!(order, vec!["A", "B", "C"]);
}

#[test]
fn test_remove_by_slot_returns_the_entry() {
    let mut timeline: Timeline = Timeline::new();
    let mut entry: Assignment =
        create_test_entry("A", AssignmentKind::Rot, at(5, 6, 0), at(5, 9, 0), Some("MDE"));
    entry.slot_id = Some(SlotId::new("ROT-001-CAP-1"));
    timeline.insert(entry);

    let removed: Option<Assignment> = timeline.remove_by_slot(&SlotId::new("ROT-001-CAP-1"));

    assert_eq!(removed.map(|entry: Assignment| entry.id), Some(AssignmentId::new("A")));
    assert!(timeline.is_empty());
    assert!(timeline.remove_by_slot(&SlotId::new("ROT-001-CAP-1")).is_none());
}

#[test]
fn test_last_ending_prefers_earliest_on_ties() {
    let mut timeline: Timeline = Timeline::new();
    timeline.insert(create_test_entry("A", AssignmentKind::Trn, at(5, 6, 0), at(5, 18, 0), Some("MDE")));
    timeline.insert(create_test_entry("B", AssignmentKind::Trn, at(5, 12, 0), at(5, 18, 0), Some("BOG")));

    assert_eq!(
        timeline.last_ending().map(|entry: &Assignment| entry.id.as_str()),
        Some("A")
    );
}

#[test]
fn test_conflicts_with_detects_shared_calendar_day() {
    let entry: Assignment =
        create_test_entry("A", AssignmentKind::Trn, at(5, 6, 0), at(5, 8, 0), Some("MDE"));

    assert!(entry.conflicts_with(at(5, 20, 0), at(5, 22, 0)));
    assert!(entry.conflicts_with(at(4, 22, 0), at(5, 1, 0)));
    assert!(!entry.conflicts_with(at(6, 6, 0), at(6, 9, 0)));
}

#[test]
fn test_has_entry_on_spans_every_covered_day() {
    let mut timeline: Timeline = Timeline::new();
    timeline.insert(create_test_entry("A", AssignmentKind::Vac, at(5, 0, 0), at(7, 23, 59), None));

    assert!(timeline.has_entry_on(day(6)));
    assert!(!timeline.has_entry_on(day(8)));
}

#[test]
fn test_ledger_debit_restores_credit_exactly() {
    let mut ledger: FlightHourLedger = FlightHourLedger::new();
    ledger.credit(day(10), Duration::minutes(200));
    let before: FlightHourLedger = ledger.clone();

    ledger.credit(day(12), Duration::minutes(95));
    ledger.debit(day(12), Duration::minutes(95));

    assert_eq!(ledger, before);
    assert_eq!(ledger.month_total(day(20)), Duration::minutes(200));
    assert_eq!(ledger.fortnight_total(day(20)), Duration::ZERO);
}

#[test]
fn test_ledger_debit_never_goes_negative() {
    let mut ledger: FlightHourLedger = FlightHourLedger::new();
    ledger.credit(day(3), Duration::hours(2));

    ledger.debit(day(3), Duration::hours(5));

    assert_eq!(ledger.month_total(day(3)), Duration::ZERO);
    assert_eq!(ledger.total(), Duration::ZERO);
}
