// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Assignment, AssignmentId, AssignmentKind, FlightLeg, Pilot, PilotId, PilotState, Role,
    RosterConfig, Rotation, RotationId, Station, Tail,
};
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

pub const TEST_TAIL: &str = "HK5500";

pub fn station(code: &str) -> Station {
    Station::parse(code).unwrap()
}

pub fn day(day_of_month: u8) -> Date {
    Date::from_calendar_date(2026, Month::January, day_of_month).unwrap()
}

pub fn at(day_of_month: u8, hour: u8, minute: u8) -> PrimitiveDateTime {
    PrimitiveDateTime::new(day(day_of_month), Time::from_hms(hour, minute, 0).unwrap())
}

pub fn create_test_config() -> RosterConfig {
    RosterConfig::default()
}

pub fn create_test_leg(
    tail: &str,
    from: &str,
    to: &str,
    departure: PrimitiveDateTime,
    arrival: PrimitiveDateTime,
) -> FlightLeg {
    FlightLeg::new(
        Tail::new(tail),
        station(from),
        station(to),
        departure,
        arrival,
        "9321",
    )
    .unwrap()
}

/// MDE-BOG-MDE on the given day, 06:00 to 09:00, two hours of flying.
pub fn create_test_rotation(day_of_month: u8) -> Rotation {
    let legs: Vec<FlightLeg> = vec![
        create_test_leg(
            TEST_TAIL,
            "MDE",
            "BOG",
            at(day_of_month, 6, 0),
            at(day_of_month, 7, 0),
        ),
        create_test_leg(
            TEST_TAIL,
            "BOG",
            "MDE",
            at(day_of_month, 8, 0),
            at(day_of_month, 9, 0),
        ),
    ];
    Rotation::from_legs(
        RotationId::new(&format!("ROT-{day_of_month:03}")),
        legs,
        &create_test_config(),
    )
    .unwrap()
}

pub fn create_test_pilot(id: &str, base: &str, roles: Vec<Role>) -> Pilot {
    Pilot::new(PilotId::new(id), "Test Pilot", station(base), roles)
        .with_qualified_tails([Tail::new(TEST_TAIL)])
}

pub fn create_test_state(pilot: &Pilot) -> PilotState {
    PilotState::at_base(pilot.base.clone())
}

pub fn create_test_entry(
    id: &str,
    kind: AssignmentKind,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    destination: Option<&str>,
) -> Assignment {
    let mut entry: Assignment =
        Assignment::day_entry(AssignmentId::new(id), kind, start, end);
    if kind.is_operational() {
        entry.origin = destination.map(station);
        entry.destination = destination.map(station);
        entry.duty_time = end - start;
        entry.rest_at_base = Duration::hours(10);
        entry.rest_away = Duration::hours(12);
    }
    entry
}
