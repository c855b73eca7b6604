// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TEST_TAIL, at, create_test_config, create_test_leg, create_test_rotation, station,
};
use crate::{
    CrewDistribution, DomainError, FlightLeg, Role, RosterConfig, Rotation, RotationId, Station,
    Tail, build_rotations, merge_rotations,
};
use time::Duration;
use time::macros::{date, time};

#[test]
fn test_round_trip_between_bases_forms_one_rotation() {
    let config: RosterConfig = create_test_config();
    let legs: Vec<FlightLeg> = vec![
        create_test_leg(TEST_TAIL, "BOG", "MDE", at(5, 8, 0), at(5, 9, 0)),
        create_test_leg(TEST_TAIL, "MDE", "BOG", at(5, 6, 0), at(5, 7, 0)),
    ];

    let rotations: Vec<Rotation> = build_rotations(&legs, &config);

    assert_eq!(rotations.len(), 1);
    let rotation: &Rotation = &rotations[0];
    assert_eq!(rotation.id, RotationId::new("ROT-001"));
    assert_eq!(rotation.route(), "MDE-BOG-MDE");
    assert_eq!(rotation.flight_time, Duration::hours(2));
    // three hours elapsed plus the international add-on for MDE-MDE
    assert_eq!(rotation.service_time, Duration::minutes(270));
    assert_eq!(rotation.crew_size, 2);
    assert_eq!(rotation.distribution, CrewDistribution::new(1, 1, 0));
    assert_eq!(rotation.rest_at_base, Duration::hours(8));
    assert_eq!(rotation.rest_away, Duration::hours(10));
    assert!(rotation.in_day_window);
    assert!(!rotation.is_night);
}

#[test]
fn test_domestic_pair_uses_domestic_add_on() {
    let config: RosterConfig = create_test_config();
    let legs: Vec<FlightLeg> = vec![create_test_leg(
        TEST_TAIL,
        "MDE",
        "BOG",
        at(5, 6, 0),
        at(5, 7, 0),
    )];

    let rotations: Vec<Rotation> = build_rotations(&legs, &config);

    assert_eq!(rotations.len(), 1);
    assert_eq!(rotations[0].service_time, Duration::hours(2));
}

#[test]
fn test_chain_ending_away_from_base_is_dropped() {
    let config: RosterConfig = create_test_config();
    let legs: Vec<FlightLeg> = vec![
        create_test_leg("HK1000", "MDE", "CLO", at(5, 6, 0), at(5, 7, 0)),
        create_test_leg("HK2000", "BOG", "MDE", at(5, 8, 0), at(5, 9, 0)),
    ];

    let rotations: Vec<Rotation> = build_rotations(&legs, &config);

    assert_eq!(rotations.len(), 1);
    assert_eq!(rotations[0].origin, station("BOG"));
    assert_eq!(rotations[0].id, RotationId::new("ROT-001"));
}

#[test]
fn test_station_gap_breaks_the_chain() {
    let config: RosterConfig = create_test_config();
    let legs: Vec<FlightLeg> = vec![
        create_test_leg(TEST_TAIL, "MDE", "BOG", at(5, 6, 0), at(5, 7, 0)),
        create_test_leg(TEST_TAIL, "MIA", "MDE", at(5, 9, 0), at(5, 12, 0)),
    ];

    let rotations: Vec<Rotation> = build_rotations(&legs, &config);

    assert_eq!(rotations.len(), 2);
    assert_eq!(rotations[0].route(), "MDE-BOG");
    assert_eq!(rotations[1].route(), "MIA-MDE");
    assert_eq!(rotations[1].id, RotationId::new("ROT-002"));
}

#[test]
fn test_ignored_designators_are_filtered() {
    let config: RosterConfig = create_test_config();
    let mut maintenance: FlightLeg =
        create_test_leg(TEST_TAIL, "MDE", "BOG", at(5, 6, 0), at(5, 7, 0));
    maintenance.designator = String::from("W100");

    let rotations: Vec<Rotation> = build_rotations(&[maintenance], &config);

    assert!(rotations.is_empty());
}

#[test]
fn test_overnight_at_base_keeps_the_chain_in_one_rotation() {
    let config: RosterConfig = create_test_config();
    let legs: Vec<FlightLeg> = vec![
        create_test_leg(TEST_TAIL, "MDE", "BOG", at(5, 18, 0), at(5, 19, 0)),
        create_test_leg(TEST_TAIL, "BOG", "MDE", at(6, 7, 0), at(6, 8, 0)),
    ];

    let rotations: Vec<Rotation> = build_rotations(&legs, &config);

    assert_eq!(rotations.len(), 1);
    let rotation: &Rotation = &rotations[0];
    assert_eq!(rotation.route(), "MDE-BOG-MDE");
    assert_eq!(rotation.start.date(), date!(2026 - 01 - 05));
    assert_eq!(rotation.end.date(), date!(2026 - 01 - 06));
    assert!(rotation.is_night);
}

#[test]
fn test_overnight_away_from_base_keeps_rotation_open() {
    let config: RosterConfig = create_test_config();
    let legs: Vec<FlightLeg> = vec![
        create_test_leg(TEST_TAIL, "BOG", "CLO", at(5, 18, 0), at(5, 19, 0)),
        create_test_leg(TEST_TAIL, "CLO", "BOG", at(6, 7, 0), at(6, 8, 0)),
    ];

    let rotations: Vec<Rotation> = build_rotations(&legs, &config);

    assert_eq!(rotations.len(), 1);
    let rotation: &Rotation = &rotations[0];
    assert_eq!(rotation.route(), "BOG-CLO-BOG");
    assert!(rotation.is_night);
    assert!(!rotation.in_day_window);
    // 14h elapsed plus 1.5h exceeds the two-pilot night ceiling
    assert_eq!(rotation.service_time, Duration::minutes(930));
    assert_eq!(rotation.crew_size, 3);
    assert_eq!(rotation.distribution, CrewDistribution::new(1, 1, 1));
}

#[test]
fn test_rotation_metrics_match_their_definitions() {
    let config: RosterConfig = create_test_config();
    let rotation: Rotation = create_test_rotation(12);

    let summed: Duration = rotation.legs.iter().map(FlightLeg::flight_time).sum();
    assert_eq!(rotation.flight_time, summed);
    assert_eq!(
        rotation.service_time,
        (rotation.end - rotation.start) + config.service_addition(&rotation.origin, &rotation.destination)
    );
    assert_eq!(rotation.is_night, rotation.start.date() != rotation.end.date());
    assert!(config.is_home_base(&rotation.destination));
}

#[test]
fn test_arrival_before_departure_rolls_to_next_day() {
    let leg: FlightLeg = FlightLeg::from_clock_times(
        Tail::new(TEST_TAIL),
        station("BOG"),
        station("MIA"),
        date!(2026 - 01 - 05),
        time!(23:00),
        time!(01:30),
        "9320",
    )
    .unwrap();

    assert_eq!(leg.arrival.date(), date!(2026 - 01 - 06));
    assert_eq!(leg.flight_time(), Duration::minutes(150));
}

#[test]
fn test_oversized_duty_falls_back_to_largest_crew() {
    let config: RosterConfig = create_test_config();
    let legs: Vec<FlightLeg> = vec![create_test_leg(
        TEST_TAIL,
        "EZE",
        "MDE",
        at(5, 0, 0),
        at(5, 18, 0),
    )];

    let rotations: Vec<Rotation> = build_rotations(&legs, &config);

    assert_eq!(rotations[0].crew_size, 4);
    assert_eq!(rotations[0].distribution, CrewDistribution::new(2, 2, 0));
    assert_eq!(rotations[0].rest_at_base, Duration::hours(16));
    assert_eq!(rotations[0].rest_away, Duration::hours(24));
}

#[test]
fn test_rotation_at_two_pilot_ceilings_keeps_two_pilots() {
    let config: RosterConfig = create_test_config();
    let at_limit: Vec<FlightLeg> = vec![
        create_test_leg(TEST_TAIL, "MDE", "MIA", at(5, 6, 0), at(5, 10, 30)),
        create_test_leg(TEST_TAIL, "MIA", "MDE", at(5, 12, 30), at(5, 17, 0)),
    ];
    let minute_over: Vec<FlightLeg> = vec![
        create_test_leg(TEST_TAIL, "MDE", "MIA", at(5, 6, 0), at(5, 10, 30)),
        create_test_leg(TEST_TAIL, "MIA", "MDE", at(5, 12, 31), at(5, 17, 1)),
    ];

    let fits: Rotation = Rotation::from_legs(RotationId::new("ROT-001"), at_limit, &config).unwrap();
    let over: Rotation =
        Rotation::from_legs(RotationId::new("ROT-002"), minute_over, &config).unwrap();

    // nine hours flown, eleven elapsed plus the 1.5h international add-on
    assert_eq!(fits.flight_time, Duration::hours(9));
    assert_eq!(fits.service_time, Duration::minutes(750));
    assert!(fits.in_day_window);
    assert_eq!(fits.crew_size, 2);
    assert_eq!(over.flight_time, Duration::hours(9));
    assert_eq!(over.service_time, Duration::minutes(751));
    assert_eq!(over.crew_size, 3);
    assert_eq!(over.distribution, CrewDistribution::new(1, 1, 1));
}

#[test]
fn test_from_legs_rejects_empty_input() {
    let result: Result<Rotation, DomainError> =
        Rotation::from_legs(RotationId::new("ROT-900"), Vec::new(), &create_test_config());
    assert_eq!(result, Err(DomainError::EmptyRotation));
}

#[test]
fn test_merge_keeps_earlier_id_and_recomputes() {
    let config: RosterConfig = create_test_config();
    let first: Rotation = create_test_rotation(5);
    let second: Rotation = create_test_rotation(6);

    let merged: Rotation = merge_rotations(&second, &first, &config).unwrap();

    assert_eq!(merged.id, first.id);
    assert_eq!(merged.route(), "MDE-BOG-MDE-BOG-MDE");
    assert_eq!(merged.legs.len(), 4);
    assert_eq!(merged.flight_time, Duration::hours(4));
    assert_eq!(merged.end, second.end);
    // 27h elapsed plus 1.5h only fits the largest crew
    assert_eq!(merged.service_time, Duration::minutes(1710));
    assert_eq!(merged.crew_size, 4);
}

#[test]
fn test_merge_rejects_same_rotation() {
    let config: RosterConfig = create_test_config();
    let rotation: Rotation = create_test_rotation(5);

    let result: Result<Rotation, DomainError> = merge_rotations(&rotation, &rotation, &config);

    assert!(matches!(result, Err(DomainError::InvalidMerge(_))));
}

#[test]
fn test_crew_distribution_parses_and_sums_terms() {
    let parsed: CrewDistribution = "1 CAP, 1 COP, 1 CRP".parse().unwrap();
    assert_eq!(parsed, CrewDistribution::new(1, 1, 1));

    let compact: CrewDistribution = "2CAP,2 cop".parse().unwrap();
    assert_eq!(compact, CrewDistribution::new(2, 2, 0));

    let repeated: CrewDistribution = "1 CAP, 1 CAP, 1 COP".parse().unwrap();
    assert_eq!(repeated.count(Role::Captain), 2);
    assert_eq!(repeated.total(), 3);
}

#[test]
fn test_crew_distribution_rejects_unknown_terms() {
    assert!("1 FO".parse::<CrewDistribution>().is_err());
    assert!("CAP".parse::<CrewDistribution>().is_err());
}

#[test]
fn test_crew_distribution_display_omits_absent_reliefs() {
    assert_eq!(CrewDistribution::new(2, 2, 0).to_string(), "2 CAP, 2 COP");
    assert_eq!(
        CrewDistribution::new(1, 1, 1).to_string(),
        "1 CAP, 1 COP, 1 CRP"
    );
}

#[test]
fn test_replace_legs_keeps_id() {
    let config: RosterConfig = create_test_config();
    let mut rotation: Rotation = create_test_rotation(5);
    let legs: Vec<FlightLeg> = vec![create_test_leg(
        TEST_TAIL,
        "BOG",
        "MDE",
        at(7, 10, 0),
        at(7, 11, 0),
    )];

    rotation.replace_legs(legs, &config).unwrap();

    assert_eq!(rotation.id, RotationId::new("ROT-005"));
    assert_eq!(rotation.origin, Station::parse("BOG").unwrap());
    assert_eq!(rotation.flight_time, Duration::hours(1));
}
