// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_roster;
use crate::{
    ApiError, CommandRequest, CommandResponse, EventRecord, ListSlotsResponse, apply_command,
    slots_view,
};
use flex_crew::RosterState;

fn deadhead_event(date: &str, from: &str, to: &str) -> EventRecord {
    EventRecord {
        kind: String::from("DH"),
        start_date: date.to_string(),
        start_time: Some(String::from("08:00")),
        end_date: None,
        end_time: Some(String::from("10:00")),
        origin: Some(from.to_string()),
        destination: Some(to.to_string()),
        flight_time_hours: None,
        duty_time_hours: None,
        notes: None,
    }
}

#[test]
fn test_command_request_reads_action_tag() {
    let json: &str = r#"{"action": "assign_slot", "pilot_id": "P1", "slot_id": "ROT-001-CAP-1"}"#;

    let request: CommandRequest = serde_json::from_str(json).unwrap();

    assert_eq!(
        request,
        CommandRequest::AssignSlot {
            pilot_id: String::from("P1"),
            slot_id: String::from("ROT-001-CAP-1"),
        }
    );
}

#[test]
fn test_assign_slot_fills_the_slot() {
    let mut state: RosterState = create_test_roster();
    let request: CommandRequest = CommandRequest::AssignSlot {
        pilot_id: String::from("P1"),
        slot_id: String::from("ROT-001-CAP-1"),
    };

    let response: CommandResponse = apply_command(&mut state, request).unwrap();

    assert_eq!(response.action, "AssignSlot");
    assert_eq!(response.added.len(), 1);
    assert!(response.removed.is_empty());
    assert_eq!(response.deadhead, None);
    let slots: ListSlotsResponse = slots_view(&state);
    let captain = slots
        .slots
        .iter()
        .find(|slot| slot.slot_id == "ROT-001-CAP-1")
        .unwrap();
    assert_eq!(captain.pilot_id.as_deref(), Some("P1"));
    assert_eq!(captain.pilot_name.as_deref(), Some("Pilot P1"));
}

#[test]
fn test_assign_slot_with_wrong_role_names_the_rule() {
    let mut state: RosterState = create_test_roster();
    let request: CommandRequest = CommandRequest::AssignSlot {
        pilot_id: String::from("P2"),
        slot_id: String::from("ROT-001-CAP-1"),
    };

    let err: ApiError = apply_command(&mut state, request).unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "role_compatibility"
    ));
}

#[test]
fn test_unknown_slot_is_not_found() {
    let mut state: RosterState = create_test_roster();
    let request: CommandRequest = CommandRequest::UnassignSlot {
        slot_id: String::from("ROT-404-CAP-1"),
    };

    let err: ApiError = apply_command(&mut state, request).unwrap_err();

    assert_eq!(
        err,
        ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: String::from("Slot 'ROT-404-CAP-1' does not exist"),
        }
    );
}

#[test]
fn test_add_event_books_a_deadhead() {
    let mut state: RosterState = create_test_roster();
    let request: CommandRequest = CommandRequest::AddEvent {
        pilot_id: String::from("P1"),
        event: deadhead_event("2026-01-10", "MDE", "BOG"),
    };

    let response: CommandResponse = apply_command(&mut state, request).unwrap();

    assert_eq!(response.action, "AddEvent");
    assert_eq!(response.added.len(), 1);
}

#[test]
fn test_add_event_with_bad_time_names_the_field() {
    let mut state: RosterState = create_test_roster();
    let mut event: EventRecord = deadhead_event("2026-01-10", "MDE", "BOG");
    event.start_time = Some(String::from("8h00"));
    let request: CommandRequest = CommandRequest::AddEvent {
        pilot_id: String::from("P1"),
        event,
    };

    let err: ApiError = apply_command(&mut state, request).unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "start_time"
    ));
}

#[test]
fn test_add_slot_rejects_unknown_role() {
    let mut state: RosterState = create_test_roster();
    let request: CommandRequest = CommandRequest::AddSlot {
        rotation_id: String::from("ROT-001"),
        role: String::from("PURSER"),
    };

    let err: ApiError = apply_command(&mut state, request).unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidInput { ref field, .. } if field == "role"
    ));
}

#[test]
fn test_add_slot_reports_the_new_slot() {
    let mut state: RosterState = create_test_roster();
    let request: CommandRequest = serde_json::from_str(
        r#"{"action": "add_slot", "rotation_id": "ROT-001", "role": "crp"}"#,
    )
    .unwrap();

    let response: CommandResponse = apply_command(&mut state, request).unwrap();

    assert_eq!(response.slot_id.as_deref(), Some("ROT-001-CRP-1"));
}

#[test]
fn test_remove_unknown_event_is_not_found() {
    let mut state: RosterState = create_test_roster();
    let request: CommandRequest = CommandRequest::RemoveEvent {
        pilot_id: String::from("P1"),
        assignment_id: String::from("ASG-999999"),
    };

    let err: ApiError = apply_command(&mut state, request).unwrap_err();

    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Assignment"
    ));
}

#[test]
fn test_rejected_command_leaves_roster_untouched() {
    let mut state: RosterState = create_test_roster();
    apply_command(
        &mut state,
        CommandRequest::AssignSlot {
            pilot_id: String::from("P1"),
            slot_id: String::from("ROT-001-CAP-1"),
        },
    )
    .unwrap();

    let err: ApiError = apply_command(
        &mut state,
        CommandRequest::DeleteRotation {
            rotation_id: String::from("ROT-009"),
        },
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
    assert_eq!(state.rotations().count(), 1);
    assert_eq!(state.unassigned_slots().len(), 1);
}
