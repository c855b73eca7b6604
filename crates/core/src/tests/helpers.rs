// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::RosterState;
use flex_crew_domain::{
    FlightLeg, Pilot, PilotId, Role, RosterConfig, RotationId, SlotId, Station, Tail,
};
use time::{Date, Month, PrimitiveDateTime, Time};

pub const TEST_TAIL: &str = "HK5500";
pub const SECOND_TAIL: &str = "HK5501";

pub fn station(code: &str) -> Station {
    Station::parse(code).unwrap()
}

pub fn day(day_of_month: u8) -> Date {
    Date::from_calendar_date(2026, Month::January, day_of_month).unwrap()
}

pub fn at(day_of_month: u8, hour: u8, minute: u8) -> PrimitiveDateTime {
    PrimitiveDateTime::new(day(day_of_month), Time::from_hms(hour, minute, 0).unwrap())
}

pub fn create_test_leg(
    from: &str,
    to: &str,
    departure: PrimitiveDateTime,
    arrival: PrimitiveDateTime,
) -> FlightLeg {
    create_test_leg_on(TEST_TAIL, from, to, departure, arrival)
}

pub fn create_test_leg_on(
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

/// MDE-BOG-MDE, 06:00 to 09:00 with two hours of flying.
pub fn create_test_round_trip(day_of_month: u8) -> Vec<FlightLeg> {
    create_test_round_trip_on(TEST_TAIL, day_of_month)
}

/// The same round trip on another aircraft. Back-to-back trips on one tail
/// chain into a single rotation.
pub fn create_test_round_trip_on(tail: &str, day_of_month: u8) -> Vec<FlightLeg> {
    vec![
        create_test_leg_on(tail, "MDE", "BOG", at(day_of_month, 6, 0), at(day_of_month, 7, 0)),
        create_test_leg_on(tail, "BOG", "MDE", at(day_of_month, 8, 0), at(day_of_month, 9, 0)),
    ]
}

/// BOG-CLO-BOG, 08:00 to 11:00 with two hours of flying.
pub fn create_test_bogota_trip(day_of_month: u8) -> Vec<FlightLeg> {
    vec![
        create_test_leg("BOG", "CLO", at(day_of_month, 8, 0), at(day_of_month, 9, 0)),
        create_test_leg("CLO", "BOG", at(day_of_month, 10, 0), at(day_of_month, 11, 0)),
    ]
}

pub fn create_test_pilot(id: &str, base: &str, role: Role, seniority: u32) -> Pilot {
    Pilot::new(PilotId::new(id), &format!("Pilot {id}"), station(base), vec![role])
        .with_seniority(seniority)
        .with_qualified_tails([Tail::new(TEST_TAIL), Tail::new(SECOND_TAIL)])
}

/// A captain and a first officer based in MDE.
pub fn create_test_crew() -> Vec<Pilot> {
    vec![
        create_test_pilot("P1", "MDE", Role::Captain, 10),
        create_test_pilot("P2", "MDE", Role::FirstOfficer, 20),
    ]
}

pub fn create_test_roster(pilots: Vec<Pilot>, legs: &[FlightLeg]) -> RosterState {
    let mut state: RosterState = RosterState::new(RosterConfig::default(), pilots).unwrap();
    state.load_rotations(legs);
    state
}

pub fn pilot_id(id: &str) -> PilotId {
    PilotId::new(id)
}

pub fn rotation_id(sequence: u32) -> RotationId {
    RotationId::new(&format!("ROT-{sequence:03}"))
}

pub fn slot_id(sequence: u32, role: &str, ordinal: u8) -> SlotId {
    SlotId::new(&format!("ROT-{sequence:03}-{role}-{ordinal}"))
}
