// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    SECOND_TAIL, at, create_test_bogota_trip, create_test_crew, create_test_leg,
    create_test_pilot, create_test_roster, create_test_round_trip, create_test_round_trip_on, day,
    pilot_id, rotation_id, slot_id, station,
};
use crate::{ApplyOutcome, Command, CoreError, EventRequest, RosterState, apply};
use flex_crew_domain::{
    Advisory, Assignment, AssignmentKind, FlightLeg, Pilot, Role, RuleViolation, Timeline,
};
use time::Duration;

fn assign(state: &mut RosterState, pilot: &str, slot: (u32, &str)) -> Result<ApplyOutcome, CoreError> {
    apply(
        state,
        Command::AssignSlot {
            pilot_id: pilot_id(pilot),
            slot_id: slot_id(slot.0, slot.1, 1),
        },
    )
}

#[test]
fn test_assign_slot_registers_the_rotation() {
    let mut state: RosterState = create_test_roster(create_test_crew(), &create_test_round_trip(1));

    let outcome: ApplyOutcome = assign(&mut state, "P1", (1, "CAP")).unwrap();

    assert_eq!(outcome.action, "AssignSlot");
    assert_eq!(outcome.added.len(), 1);
    assert_eq!(outcome.deadhead, None);
    assert_eq!(
        state.slot(&slot_id(1, "CAP", 1)).unwrap().occupant,
        Some(pilot_id("P1"))
    );
}

#[test]
fn test_assign_slot_positions_the_pilot_first() {
    let mut state: RosterState =
        create_test_roster(create_test_crew(), &create_test_bogota_trip(5));

    let outcome: ApplyOutcome = assign(&mut state, "P1", (1, "CAP")).unwrap();

    assert!(outcome.deadhead.is_some());
    assert_eq!(outcome.added.len(), 2);
    assert_eq!(outcome.added[0], outcome.deadhead.clone().unwrap());
    let timeline: &Timeline = state.timeline(&pilot_id("P1")).unwrap();
    let deadhead: &Assignment = timeline.get(&outcome.added[0]).unwrap();
    assert_eq!(deadhead.kind, AssignmentKind::Dh);
    assert_eq!(deadhead.start.date(), day(4));
    assert_eq!(deadhead.rotation_id, Some(rotation_id(1)));
}

#[test]
fn test_assign_slot_without_a_deadhead_route_warns() {
    let pilots: Vec<Pilot> = vec![create_test_pilot("P1", "CLO", Role::Captain, 10)];
    let mut state: RosterState = create_test_roster(pilots, &create_test_round_trip(1));

    let outcome: ApplyOutcome = assign(&mut state, "P1", (1, "CAP")).unwrap();

    assert_eq!(outcome.deadhead, None);
    assert_eq!(
        outcome.warnings,
        vec![Advisory::LocationMismatch {
            location: station("CLO"),
            origin: station("MDE"),
        }]
    );
}

#[test]
fn test_rejected_assignment_leaves_roster_untouched() {
    let mut state: RosterState = create_test_roster(create_test_crew(), &create_test_round_trip(1));

    let result: Result<ApplyOutcome, CoreError> = assign(&mut state, "P2", (1, "CAP"));

    assert_eq!(
        result.unwrap_err(),
        CoreError::AssignmentRejected {
            pilot_id: pilot_id("P2"),
            slot_id: slot_id(1, "CAP", 1),
            violations: vec![RuleViolation::RoleIncompatible {
                role: Role::Captain
            }],
        }
    );
    assert!(state.timeline(&pilot_id("P2")).unwrap().is_empty());
    assert!(!state.slot(&slot_id(1, "CAP", 1)).unwrap().is_occupied());
}

#[test]
fn test_assign_filled_slot_fails() {
    let mut state: RosterState = create_test_roster(create_test_crew(), &create_test_round_trip(1));
    assign(&mut state, "P1", (1, "CAP")).unwrap();

    assert_eq!(
        assign(&mut state, "P1", (1, "CAP")).unwrap_err(),
        CoreError::SlotAlreadyFilled {
            slot_id: slot_id(1, "CAP", 1),
            pilot_id: pilot_id("P1"),
        }
    );
}

#[test]
fn test_monthly_cap_blocks_a_rotation_past_ninety_hours() {
    let mut state: RosterState = create_test_roster(
        create_test_crew(),
        &[
            create_test_leg("MDE", "BOG", at(20, 6, 0), at(20, 7, 30)),
            create_test_leg("BOG", "MDE", at(20, 8, 0), at(20, 9, 30)),
        ],
    );
    for day_of_month in 1..=10_u8 {
        let (from, to) = if day_of_month % 2 == 1 {
            ("MDE", "BOG")
        } else {
            ("BOG", "MDE")
        };
        let event: EventRequest = EventRequest::new(
            AssignmentKind::Dh,
            at(day_of_month, 8, 0),
            at(day_of_month, 17, 0),
        )
        .between(station(from), station(to))
        .with_flight_time(Duration::minutes(534));
        apply(
            &mut state,
            Command::AddEvent {
                pilot_id: pilot_id("P1"),
                event,
            },
        )
        .unwrap();
    }
    assert_eq!(
        state.pilot_state(&pilot_id("P1")).unwrap().ledger.total(),
        Duration::hours(89)
    );

    let result: Result<ApplyOutcome, CoreError> = assign(&mut state, "P1", (1, "CAP"));

    let Err(CoreError::AssignmentRejected { violations, .. }) = result else {
        panic!("expected the monthly cap to reject the assignment");
    };
    assert_eq!(
        violations,
        vec![RuleViolation::MonthlyHoursExceeded {
            projected: Duration::hours(92),
            limit: Duration::hours(90),
        }]
    );
    assert_eq!(violations[0].to_string(), "Exceeds 90h per month (92h)");
}

#[test]
fn test_move_assignment_hands_the_slot_over() {
    let pilots: Vec<Pilot> = vec![
        create_test_pilot("P1", "MDE", Role::Captain, 10),
        create_test_pilot("P3", "MDE", Role::Captain, 30),
    ];
    let mut state: RosterState = create_test_roster(pilots, &create_test_round_trip(1));
    assign(&mut state, "P1", (1, "CAP")).unwrap();

    let outcome: ApplyOutcome = apply(
        &mut state,
        Command::MoveAssignment {
            slot_id: slot_id(1, "CAP", 1),
            to_pilot: pilot_id("P3"),
        },
    )
    .unwrap();

    assert_eq!(outcome.removed.len(), 1);
    assert_eq!(outcome.added.len(), 1);
    assert!(state.timeline(&pilot_id("P1")).unwrap().is_empty());
    assert_eq!(
        state.slot(&slot_id(1, "CAP", 1)).unwrap().occupant,
        Some(pilot_id("P3"))
    );
    assert_eq!(
        state.pilot_state(&pilot_id("P1")).unwrap().ledger.total(),
        Duration::ZERO
    );
}

#[test]
fn test_move_to_an_ineligible_pilot_keeps_the_occupant() {
    let mut state: RosterState = create_test_roster(create_test_crew(), &create_test_round_trip(1));
    assign(&mut state, "P1", (1, "CAP")).unwrap();

    let result: Result<ApplyOutcome, CoreError> = apply(
        &mut state,
        Command::MoveAssignment {
            slot_id: slot_id(1, "CAP", 1),
            to_pilot: pilot_id("P2"),
        },
    );

    assert!(matches!(result, Err(CoreError::AssignmentRejected { .. })));
    assert_eq!(
        state.slot(&slot_id(1, "CAP", 1)).unwrap().occupant,
        Some(pilot_id("P1"))
    );
}

#[test]
fn test_move_needs_an_occupied_slot() {
    let mut state: RosterState = create_test_roster(create_test_crew(), &create_test_round_trip(1));

    let result: Result<ApplyOutcome, CoreError> = apply(
        &mut state,
        Command::MoveAssignment {
            slot_id: slot_id(1, "CAP", 1),
            to_pilot: pilot_id("P1"),
        },
    );

    assert_eq!(result.unwrap_err(), CoreError::SlotNotOccupied(slot_id(1, "CAP", 1)));
}

#[test]
fn test_unassign_slot_reports_the_removed_entry() {
    let mut state: RosterState = create_test_roster(create_test_crew(), &create_test_round_trip(1));
    assign(&mut state, "P2", (1, "COP")).unwrap();

    let outcome: ApplyOutcome = apply(
        &mut state,
        Command::UnassignSlot {
            slot_id: slot_id(1, "COP", 1),
        },
    )
    .unwrap();

    assert_eq!(outcome.removed.len(), 1);
    assert_eq!(outcome.removed[0].slot_id, Some(slot_id(1, "COP", 1)));
}

#[test]
fn test_add_and_remove_event_through_commands() {
    let mut state: RosterState = create_test_roster(create_test_crew(), &[]);
    let added: ApplyOutcome = apply(
        &mut state,
        Command::AddEvent {
            pilot_id: pilot_id("P2"),
            event: EventRequest::new(AssignmentKind::Trn, at(3, 8, 0), at(3, 18, 0)),
        },
    )
    .unwrap();
    let training: &Assignment = state
        .timeline(&pilot_id("P2"))
        .unwrap()
        .get(&added.added[0])
        .unwrap();
    assert_eq!(training.rest_at_base, Duration::hours(12));

    let removed: ApplyOutcome = apply(
        &mut state,
        Command::RemoveEvent {
            pilot_id: pilot_id("P2"),
            assignment_id: added.added[0].clone(),
        },
    )
    .unwrap();

    assert_eq!(removed.removed[0].kind, AssignmentKind::Trn);
    assert!(state.timeline(&pilot_id("P2")).unwrap().is_empty());
}

#[test]
fn test_manual_deadhead_over_the_daily_ceiling_is_rejected() {
    let mut state: RosterState = create_test_roster(create_test_crew(), &[]);

    let result: Result<ApplyOutcome, CoreError> = apply(
        &mut state,
        Command::AddEvent {
            pilot_id: pilot_id("P1"),
            event: EventRequest::new(AssignmentKind::Dh, at(3, 8, 0), at(3, 12, 0))
                .between(station("MDE"), station("BOG"))
                .with_flight_time(Duration::hours(10)),
        },
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::EventRejected {
            pilot_id: pilot_id("P1"),
            violation: RuleViolation::DailyFlightTimeExceeded {
                projected: Duration::hours(10),
                limit: Duration::hours(9),
                crew_size: 2,
            },
        }
    );
}

#[test]
fn test_clear_pilot_and_delete_rotation_commands() {
    let mut legs: Vec<FlightLeg> = create_test_round_trip(1);
    legs.extend(create_test_round_trip_on(SECOND_TAIL, 2));
    let mut state: RosterState = create_test_roster(create_test_crew(), &legs);
    assign(&mut state, "P1", (1, "CAP")).unwrap();
    assign(&mut state, "P1", (2, "CAP")).unwrap();
    assign(&mut state, "P2", (2, "COP")).unwrap();

    let cleared: ApplyOutcome = apply(
        &mut state,
        Command::ClearPilot {
            pilot_id: pilot_id("P1"),
        },
    )
    .unwrap();
    let deleted: ApplyOutcome = apply(
        &mut state,
        Command::DeleteRotation {
            rotation_id: rotation_id(2),
        },
    )
    .unwrap();

    assert_eq!(cleared.removed.len(), 2);
    assert_eq!(deleted.removed.len(), 1);
    assert!(state.timeline(&pilot_id("P2")).unwrap().is_empty());
    assert_eq!(state.rotations().count(), 1);
}

#[test]
fn test_slot_edit_commands_report_what_changed() {
    let mut state: RosterState = create_test_roster(create_test_crew(), &create_test_round_trip(1));

    let added: ApplyOutcome = apply(
        &mut state,
        Command::AddSlot {
            rotation_id: rotation_id(1),
            role: Role::Relief,
        },
    )
    .unwrap();
    assert_eq!(added.slot, Some(slot_id(1, "CRP", 1)));
    assert_eq!(added.rotation, Some(rotation_id(1)));

    let removed: ApplyOutcome = apply(
        &mut state,
        Command::RemoveSlot {
            slot_id: slot_id(1, "CRP", 1),
        },
    )
    .unwrap();
    assert_eq!(removed.rotation, Some(rotation_id(1)));
    assert_eq!(state.slots().count(), 2);
}

#[test]
fn test_rotation_edit_commands_refuse_staffed_rotations() {
    let mut legs: Vec<FlightLeg> = create_test_round_trip(1);
    legs.extend(create_test_bogota_trip(5));
    let mut state: RosterState = create_test_roster(create_test_crew(), &legs);
    assign(&mut state, "P1", (1, "CAP")).unwrap();

    let merge: Result<ApplyOutcome, CoreError> = apply(
        &mut state,
        Command::MergeRotations {
            first: rotation_id(1),
            second: rotation_id(2),
        },
    );
    let replace: Result<ApplyOutcome, CoreError> = apply(
        &mut state,
        Command::ReplaceLegs {
            rotation_id: rotation_id(1),
            legs: create_test_round_trip(3),
        },
    );

    assert_eq!(merge.unwrap_err(), CoreError::RotationHasAssignments(rotation_id(1)));
    assert_eq!(replace.unwrap_err(), CoreError::RotationHasAssignments(rotation_id(1)));

    let replaced: ApplyOutcome = apply(
        &mut state,
        Command::ReplaceLegs {
            rotation_id: rotation_id(2),
            legs: create_test_bogota_trip(6),
        },
    )
    .unwrap();
    assert_eq!(replaced.rotation, Some(rotation_id(2)));
}
