// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flex_crew_domain::{
    Assignment, AssignmentId, AssignmentKind, Pilot, PilotId, Role, Station, Timeline,
};
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

pub fn station(code: &str) -> Station {
    Station::parse(code).unwrap()
}

pub fn at(day_of_month: u8, hour: u8, minute: u8) -> PrimitiveDateTime {
    let date: Date = Date::from_calendar_date(2026, Month::January, day_of_month).unwrap();
    PrimitiveDateTime::new(date, Time::from_hms(hour, minute, 0).unwrap())
}

pub fn create_test_pilot(id: &str, base: &str) -> Pilot {
    Pilot::new(PilotId::new(id), "Audit Pilot", station(base), vec![Role::Captain])
}

/// Operational entry owing 10h rest at base and 12h away.
pub fn create_test_duty(
    id: &str,
    kind: AssignmentKind,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    origin: &str,
    destination: &str,
) -> Assignment {
    let mut entry: Assignment = Assignment::day_entry(AssignmentId::new(id), kind, start, end);
    entry.origin = Some(station(origin));
    entry.destination = Some(station(destination));
    entry.duty_time = end - start;
    entry.rest_at_base = Duration::hours(10);
    entry.rest_away = Duration::hours(12);
    entry
}

pub fn create_test_day_off(id: &str, kind: AssignmentKind, day_of_month: u8) -> Assignment {
    Assignment::day_entry(
        AssignmentId::new(id),
        kind,
        at(day_of_month, 0, 0),
        at(day_of_month, 23, 59),
    )
}

pub fn create_test_timeline(entries: Vec<Assignment>) -> Timeline {
    let mut timeline: Timeline = Timeline::new();
    for entry in entries {
        timeline.insert(entry);
    }
    timeline
}
