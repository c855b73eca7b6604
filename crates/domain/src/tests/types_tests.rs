// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_pilot, day};
use crate::{AssignmentKind, DomainError, Pilot, Role, Station, StationPair, Tail};

#[test]
fn test_station_is_normalized() {
    let station: Station = Station::parse(" mde ").unwrap();
    assert_eq!(station.code(), "MDE");
}

#[test]
fn test_station_rejects_empty_and_punctuation() {
    assert!(matches!(Station::parse("  "), Err(DomainError::InvalidStation(_))));
    assert!(matches!(Station::parse("MD-E"), Err(DomainError::InvalidStation(_))));
}

#[test]
fn test_station_pair_display_round_trips() {
    let pair: StationPair = "bog-mia".parse().unwrap();
    assert_eq!(pair.to_string(), "BOG-MIA");
    assert!(pair.connects(&Station::parse("BOG").unwrap(), &Station::parse("MIA").unwrap()));
    assert!(matches!(
        "BOGMIA".parse::<StationPair>(),
        Err(DomainError::InvalidStationPair(_))
    ));
}

#[test]
fn test_role_codes() {
    assert_eq!("cap".parse::<Role>().unwrap(), Role::Captain);
    assert_eq!(Role::Relief.to_string(), "CRP");
    assert!(matches!("FO".parse::<Role>(), Err(DomainError::InvalidRole(_))));
}

#[test]
fn test_assignment_kind_classification() {
    assert!(AssignmentKind::Ofi.is_operational());
    assert!(!AssignmentKind::Inc.is_operational());
    assert!(AssignmentKind::Dh.counts_for_daily_duty());
    assert!(!AssignmentKind::Trn.counts_for_daily_duty());
    assert_eq!("l".parse::<AssignmentKind>().unwrap(), AssignmentKind::Off);
}

#[test]
fn test_assignment_kind_serializes_as_code() {
    let json: String = serde_json::to_string(&AssignmentKind::Free).unwrap();
    assert_eq!(json, "\"FREE\"");
}

#[test]
fn test_pilot_unavailability_covers_free_absence_and_training() {
    let pilot: Pilot = create_test_pilot("P1", "MDE", vec![Role::Captain])
        .with_free_days([day(3)])
        .with_absence_days([day(4)])
        .with_training_days([day(5)]);

    assert!(pilot.is_unavailable_on(day(3)));
    assert!(pilot.is_unavailable_on(day(4)));
    assert!(pilot.is_unavailable_on(day(5)));
    assert!(!pilot.is_unavailable_on(day(6)));
    assert!(pilot.qualified_tails.contains(&Tail::new("hk5500")));
}
