// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{FlightLegRecord, ListField, PilotRecord, RosterBundle, load_roster};
use flex_crew::RosterState;

pub fn create_test_leg(date: &str, from: &str, to: &str, dep: &str, arr: &str) -> FlightLegRecord {
    FlightLegRecord {
        tail: String::from("HK5500"),
        departure_station: from.to_string(),
        arrival_station: to.to_string(),
        date: date.to_string(),
        departure_time: dep.to_string(),
        arrival_time: arr.to_string(),
        arrival_date: None,
        flight_designator: String::from("9321"),
    }
}

/// MDE-BOG-MDE on the given date, two hours of flying.
pub fn create_test_round_trip(date: &str) -> Vec<FlightLegRecord> {
    vec![
        create_test_leg(date, "MDE", "BOG", "06:00", "07:00"),
        create_test_leg(date, "BOG", "MDE", "08:00", "09:00"),
    ]
}

pub fn create_test_pilot(id: &str, base: &str, role: &str, seniority: u32) -> PilotRecord {
    PilotRecord {
        id: id.to_string(),
        name: format!("Pilot {id}"),
        base: base.to_string(),
        role: role.to_string(),
        qualified_tails: ListField::Joined(String::from("HK5500")),
        relief_tails: ListField::default(),
        free_days: ListField::default(),
        absence_days: ListField::default(),
        training_days: ListField::default(),
        seniority: Some(seniority),
    }
}

pub fn create_test_bundle() -> RosterBundle {
    RosterBundle {
        config: None,
        pilots: vec![
            create_test_pilot("P1", "MDE", "CAP", 10),
            create_test_pilot("P2", "MDE", "COP", 20),
        ],
        legs: create_test_round_trip("2026-01-05"),
    }
}

pub fn create_test_roster() -> RosterState {
    load_roster(&create_test_bundle(), None).unwrap()
}
