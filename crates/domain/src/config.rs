// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator-tunable rostering parameters.
//!
//! Every value has a default matching current operations, so an empty
//! configuration document deserializes into a usable [`RosterConfig`].
//! Hour values are fractional in the document and held as [`Hours`], so
//! they are converted and range-checked once, on deserialization.

use crate::calendar::{Hours, minute_of_day, start_of_day};
use crate::error::DomainError;
use crate::rotation::CrewDistribution;
use crate::types::Station;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Duration, PrimitiveDateTime, Time};

/// An ordered origin/destination pair, written `MDE-BOG`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationPair {
    /// Departure station.
    pub origin: Station,
    /// Arrival station.
    pub destination: Station,
}

impl StationPair {
    /// Creates a pair from two stations.
    #[must_use]
    pub const fn new(origin: Station, destination: Station) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Returns whether the pair connects `origin` to `destination`.
    #[must_use]
    pub fn connects(&self, origin: &Station, destination: &Station) -> bool {
        &self.origin == origin && &self.destination == destination
    }
}

impl FromStr for StationPair {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (origin, destination) = s
            .split_once('-')
            .ok_or_else(|| DomainError::InvalidStationPair(s.to_string()))?;
        let origin: Station =
            Station::parse(origin).map_err(|_| DomainError::InvalidStationPair(s.to_string()))?;
        let destination: Station = Station::parse(destination)
            .map_err(|_| DomainError::InvalidStationPair(s.to_string()))?;
        Ok(Self::new(origin, destination))
    }
}

impl TryFrom<String> for StationPair {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StationPair> for String {
    fn from(pair: StationPair) -> Self {
        pair.to_string()
    }
}

impl std::fmt::Display for StationPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.origin, self.destination)
    }
}

/// Clock window, in hours after midnight, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// First hour of the window.
    pub start_hours: Hours,
    /// Last hour of the window.
    pub end_hours: Hours,
}

impl DayWindow {
    /// Returns whether a clock time falls inside the window.
    #[must_use]
    pub fn contains(&self, time: Time) -> bool {
        let minute: i64 = minute_of_day(time);
        minute >= self.start_hours.duration().whole_minutes()
            && minute <= self.end_hours.duration().whole_minutes()
    }
}

/// Duty ceilings and cockpit composition for one crew size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewTier {
    /// Number of pilots in the crew.
    pub crew_size: u8,
    /// Maximum flight time.
    pub max_flight_hours: Hours,
    /// Maximum service time for duty starting inside the day window.
    pub max_service_day_hours: Hours,
    /// Maximum service time for duty starting outside the day window.
    pub max_service_night_hours: Hours,
    /// Positions the crew is made of.
    pub distribution: CrewDistribution,
}

impl CrewTier {
    /// Flight-time ceiling.
    #[must_use]
    pub const fn flight_limit(&self) -> Duration {
        self.max_flight_hours.duration()
    }

    /// Service-time ceiling for a duty starting inside or outside the day window.
    #[must_use]
    pub const fn service_limit(&self, in_day_window: bool) -> Duration {
        if in_day_window {
            self.max_service_day_hours.duration()
        } else {
            self.max_service_night_hours.duration()
        }
    }

    /// Whether a duty of the given flight and service time fits this tier.
    #[must_use]
    pub fn accommodates(
        &self,
        flight_time: Duration,
        service_time: Duration,
        in_day_window: bool,
    ) -> bool {
        flight_time <= self.flight_limit() && service_time <= self.service_limit(in_day_window)
    }
}

/// One row of a rest table: flight time up to `max_flight_hours` needs `rest_hours`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestBreakpoint {
    /// Upper bound of flight time, inclusive.
    pub max_flight_hours: Hours,
    /// Required rest.
    pub rest_hours: Hours,
}

/// Step function from flight time to required rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestTable {
    /// Rows in ascending `max_flight_hours` order.
    pub breakpoints: Vec<RestBreakpoint>,
    /// Rest required beyond the last row.
    pub beyond_hours: Hours,
}

impl RestTable {
    /// Rest required after a duty with the given flight time.
    #[must_use]
    pub fn rest_for(&self, flight_time: Duration) -> Duration {
        self.breakpoints
            .iter()
            .find(|row: &&RestBreakpoint| flight_time <= row.max_flight_hours.duration())
            .map_or(self.beyond_hours, |row: &RestBreakpoint| row.rest_hours)
            .duration()
    }

    fn validate(&self, field: &'static str) -> Result<(), DomainError> {
        let ascending: bool = self
            .breakpoints
            .windows(2)
            .all(|pair: &[RestBreakpoint]| pair[0].max_flight_hours < pair[1].max_flight_hours);
        if !ascending {
            return Err(DomainError::InvalidConfig {
                field,
                reason: String::from("breakpoints must be strictly ascending"),
            });
        }
        Ok(())
    }
}

/// Timing and rest defaults for deadheads the engine schedules itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadheadWindow {
    /// Clock hour the deadhead duty begins.
    pub start_hours: Hours,
    /// Clock hour the deadhead duty ends.
    pub end_hours: Hours,
    /// Rest required after the deadhead when it lands at home base.
    pub rest_at_base_hours: Hours,
    /// Rest required after the deadhead when it lands away.
    pub rest_away_hours: Hours,
}

impl DeadheadWindow {
    /// Start and end of a deadhead flown on `date`.
    #[must_use]
    pub fn span_on(&self, date: Date) -> Option<(PrimitiveDateTime, PrimitiveDateTime)> {
        let midnight: PrimitiveDateTime = start_of_day(date);
        let start: PrimitiveDateTime = midnight.checked_add(self.start_hours.duration())?;
        let end: PrimitiveDateTime = midnight.checked_add(self.end_hours.duration())?;
        Some((start, end))
    }

    /// Rest owed after the deadhead at base.
    #[must_use]
    pub const fn rest_at_base(&self) -> Duration {
        self.rest_at_base_hours.duration()
    }

    /// Rest owed after the deadhead away from base.
    #[must_use]
    pub const fn rest_away(&self) -> Duration {
        self.rest_away_hours.duration()
    }
}

/// All tunable parameters of the rostering engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Stations a rotation may start and end at.
    pub home_bases: Vec<Station>,
    /// Origin/destination pairs treated as domestic for the service-time add-on.
    pub domestic_routes: Vec<StationPair>,
    /// Routes a pilot may be positioned on as a passenger.
    pub deadhead_routes: Vec<StationPair>,
    /// Designator prefixes excluded from rotation building.
    pub ignored_designator_prefixes: Vec<String>,
    /// Service-time add-on for domestic rotations.
    pub service_addition_domestic_hours: Hours,
    /// Service-time add-on for all other rotations.
    pub service_addition_international_hours: Hours,
    /// Departure window selecting the day service-time ceilings.
    pub day_window: DayWindow,
    /// Crew tiers in ascending size order.
    pub crew_tiers: [CrewTier; 3],
    /// Rest after a duty ending at home base.
    pub rest_at_base: RestTable,
    /// Rest after a duty ending away from home base.
    pub rest_away: RestTable,
    /// Flight-hour cap per calendar month.
    pub max_monthly_hours: Hours,
    /// Flight-hour cap per half month.
    pub max_fortnight_hours: Hours,
    /// Consecutive duty days before an advisory is raised.
    pub max_continuous_days: i64,
    /// Consecutive days away from home base before an advisory is raised.
    pub max_away_days: i64,
    /// A duty on a later day may not start before this hour after midnight.
    pub next_day_start_cutoff_hours: Hours,
    /// How many days before a rotation a positioning deadhead may be placed.
    pub max_deadhead_lookback_days: i64,
    /// Timing of engine-scheduled deadheads.
    pub deadhead_window: DeadheadWindow,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            home_bases: ["MDE", "BOG", "MIA", "VCP", "SCL", "EZE"]
                .iter()
                .filter_map(|code: &&str| Station::parse(code).ok())
                .collect(),
            domestic_routes: parse_pairs(&[
                "MDE-BOG", "BOG-MDE", "BOG-CLO", "CLO-BOG", "BOG-BAQ", "BAQ-BOG",
            ]),
            deadhead_routes: parse_pairs(&[
                "MDE-BOG", "BOG-MDE", "MDE-MIA", "MIA-MDE", "BOG-SCL", "SCL-BOG", "BOG-VCP",
                "VCP-BOG", "BOG-EZE", "EZE-BOG", "BOG-JFK", "JFK-BOG", "MDE-SCL", "SCL-MDE",
                "MDE-JFK", "JFK-MDE", "MDE-VCP", "VCP-MDE", "MDE-EZE", "EZE-MDE", "MIA-BOG",
                "BOG-MIA",
            ]),
            ignored_designator_prefixes: ["W", "M", "L", "A"]
                .iter()
                .map(|prefix: &&str| (*prefix).to_string())
                .collect(),
            service_addition_domestic_hours: Hours::whole(1),
            service_addition_international_hours: Hours::hm(1, 30),
            day_window: DayWindow {
                start_hours: Hours::hm(4, 30),
                end_hours: Hours::hm(16, 30),
            },
            crew_tiers: [
                CrewTier {
                    crew_size: 2,
                    max_flight_hours: Hours::whole(9),
                    max_service_day_hours: Hours::hm(12, 30),
                    max_service_night_hours: Hours::hm(11, 30),
                    distribution: CrewDistribution::new(1, 1, 0),
                },
                CrewTier {
                    crew_size: 3,
                    max_flight_hours: Hours::whole(14),
                    max_service_day_hours: Hours::whole(17),
                    max_service_night_hours: Hours::whole(16),
                    distribution: CrewDistribution::new(1, 1, 1),
                },
                CrewTier {
                    crew_size: 4,
                    max_flight_hours: Hours::whole(17),
                    max_service_day_hours: Hours::whole(20),
                    max_service_night_hours: Hours::whole(19),
                    distribution: CrewDistribution::new(2, 2, 0),
                },
            ],
            rest_at_base: RestTable {
                breakpoints: rest_rows(&[(4, 8), (9, 10), (12, 12), (14, 14)]),
                beyond_hours: Hours::whole(16),
            },
            rest_away: RestTable {
                breakpoints: rest_rows(&[(4, 10), (9, 12), (12, 18)]),
                beyond_hours: Hours::whole(24),
            },
            max_monthly_hours: Hours::whole(90),
            max_fortnight_hours: Hours::whole(50),
            max_continuous_days: 6,
            max_away_days: 6,
            next_day_start_cutoff_hours: Hours::hm(1, 30),
            max_deadhead_lookback_days: 3,
            deadhead_window: DeadheadWindow {
                start_hours: Hours::whole(6),
                end_hours: Hours::whole(20),
                rest_at_base_hours: Hours::whole(10),
                rest_away_hours: Hours::whole(12),
            },
        }
    }
}

fn parse_pairs(pairs: &[&str]) -> Vec<StationPair> {
    pairs
        .iter()
        .filter_map(|pair: &&str| pair.parse().ok())
        .collect()
}

fn rest_rows(rows: &[(i64, i64)]) -> Vec<RestBreakpoint> {
    rows.iter()
        .map(|&(max_flight_hours, rest_hours)| RestBreakpoint {
            max_flight_hours: Hours::whole(max_flight_hours),
            rest_hours: Hours::whole(rest_hours),
        })
        .collect()
}

impl RosterConfig {
    /// Checks the configuration for values the rules cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.home_bases.is_empty() {
            return Err(DomainError::InvalidConfig {
                field: "home_bases",
                reason: String::from("at least one home base is required"),
            });
        }
        validate_clock_window(
            "day_window",
            self.day_window.start_hours,
            self.day_window.end_hours,
        )?;
        validate_clock_window(
            "deadhead_window",
            self.deadhead_window.start_hours,
            self.deadhead_window.end_hours,
        )?;
        if self.next_day_start_cutoff_hours >= Hours::whole(24) {
            return Err(DomainError::InvalidConfig {
                field: "next_day_start_cutoff_hours",
                reason: String::from("must be within a day"),
            });
        }
        for (field, days) in [
            ("max_continuous_days", self.max_continuous_days),
            ("max_away_days", self.max_away_days),
            ("max_deadhead_lookback_days", self.max_deadhead_lookback_days),
        ] {
            if days < 1 {
                return Err(DomainError::InvalidConfig {
                    field,
                    reason: format!("{days} must be at least one day"),
                });
            }
        }
        let mut previous_size: u8 = 0;
        for tier in &self.crew_tiers {
            if tier.crew_size <= previous_size {
                return Err(DomainError::InvalidConfig {
                    field: "crew_tiers",
                    reason: String::from("crew sizes must be strictly ascending"),
                });
            }
            if usize::from(tier.crew_size) != tier.distribution.total() {
                return Err(DomainError::InvalidConfig {
                    field: "crew_tiers",
                    reason: format!(
                        "distribution '{}' does not add up to a crew of {}",
                        tier.distribution, tier.crew_size
                    ),
                });
            }
            previous_size = tier.crew_size;
        }
        self.rest_at_base.validate("rest_at_base")?;
        self.rest_away.validate("rest_away")?;
        Ok(())
    }

    /// Returns whether the station is a configured home base.
    #[must_use]
    pub fn is_home_base(&self, station: &Station) -> bool {
        self.home_bases.contains(station)
    }

    /// Returns whether an origin/destination pair is domestic.
    #[must_use]
    pub fn is_domestic(&self, origin: &Station, destination: &Station) -> bool {
        self.domestic_routes
            .iter()
            .any(|pair: &StationPair| pair.connects(origin, destination))
    }

    /// Returns whether a pilot may deadhead from `origin` to `destination`.
    #[must_use]
    pub fn allows_deadhead(&self, origin: &Station, destination: &Station) -> bool {
        self.deadhead_routes
            .iter()
            .any(|pair: &StationPair| pair.connects(origin, destination))
    }

    /// Returns whether a flight designator is excluded from rotation building.
    #[must_use]
    pub fn is_ignored_designator(&self, designator: &str) -> bool {
        let designator: String = designator.trim().to_uppercase();
        self.ignored_designator_prefixes
            .iter()
            .filter(|prefix: &&String| !prefix.is_empty())
            .any(|prefix: &String| designator.starts_with(&prefix.to_uppercase()))
    }

    /// Service-time add-on for a rotation from `origin` to `destination`.
    #[must_use]
    pub fn service_addition(&self, origin: &Station, destination: &Station) -> Duration {
        if self.is_domestic(origin, destination) {
            self.service_addition_domestic_hours.duration()
        } else {
            self.service_addition_international_hours.duration()
        }
    }

    /// The smallest tier whose ceilings accommodate the duty.
    ///
    /// When no tier fits, the largest tier is returned anyway; the
    /// resulting rotation exceeds even the largest crew's ceilings.
    #[must_use]
    pub fn select_crew_tier(
        &self,
        flight_time: Duration,
        service_time: Duration,
        in_day_window: bool,
    ) -> &CrewTier {
        let [smallest, middle, largest] = &self.crew_tiers;
        [smallest, middle]
            .into_iter()
            .find(|tier: &&CrewTier| tier.accommodates(flight_time, service_time, in_day_window))
            .unwrap_or(largest)
    }

    /// The tier describing a crew of the given size.
    ///
    /// Sizes between tiers use the largest tier not exceeding the size;
    /// sizes below the smallest tier use the smallest.
    #[must_use]
    pub fn tier_for_size(&self, crew_size: u8) -> &CrewTier {
        let [smallest, ..] = &self.crew_tiers;
        self.crew_tiers
            .iter()
            .rev()
            .find(|tier: &&CrewTier| tier.crew_size <= crew_size)
            .unwrap_or(smallest)
    }

    /// Rest required after a duty of the given flight time ending at home base.
    #[must_use]
    pub fn rest_at_base_for(&self, flight_time: Duration) -> Duration {
        self.rest_at_base.rest_for(flight_time)
    }

    /// Rest required after a duty of the given flight time ending away.
    #[must_use]
    pub fn rest_away_for(&self, flight_time: Duration) -> Duration {
        self.rest_away.rest_for(flight_time)
    }

    /// Monthly flight-hour cap.
    #[must_use]
    pub const fn monthly_limit(&self) -> Duration {
        self.max_monthly_hours.duration()
    }

    /// Fortnightly flight-hour cap.
    #[must_use]
    pub const fn fortnight_limit(&self) -> Duration {
        self.max_fortnight_hours.duration()
    }

    /// Earliest minute after midnight a next-day duty may start, exclusive of midnight itself.
    #[must_use]
    pub const fn next_day_start_cutoff(&self) -> i64 {
        self.next_day_start_cutoff_hours.duration().whole_minutes()
    }
}

fn validate_clock_window(field: &'static str, start: Hours, end: Hours) -> Result<(), DomainError> {
    if end > Hours::whole(24) || start > end {
        return Err(DomainError::InvalidConfig {
            field,
            reason: format!("{start}..{end} is not a window within one day"),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    #[test]
    fn test_default_config_is_valid() {
        assert!(RosterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_document_deserializes_to_defaults() {
        let config: RosterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RosterConfig::default());
    }

    #[test]
    fn test_partial_document_overrides_only_named_fields() {
        let config: RosterConfig =
            serde_json::from_str(r#"{"home_bases": ["mde"], "max_monthly_hours": 80}"#).unwrap();
        assert_eq!(config.home_bases, vec![Station::parse("MDE").unwrap()]);
        assert_eq!(config.monthly_limit(), Duration::hours(80));
        assert_eq!(config.fortnight_limit(), Duration::hours(50));
    }

    #[test]
    fn test_station_pair_rejects_missing_separator() {
        let result: Result<RosterConfig, _> =
            serde_json::from_str(r#"{"deadhead_routes": ["MDEBOG"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_empty_home_bases() {
        let config: RosterConfig = RosterConfig {
            home_bases: Vec::new(),
            ..RosterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidConfig {
                field: "home_bases",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_unordered_rest_table() {
        let mut config: RosterConfig = RosterConfig::default();
        config.rest_away.breakpoints.reverse();
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidConfig {
                field: "rest_away",
                ..
            })
        ));
    }

    #[test]
    fn test_day_window_is_inclusive() {
        let config: RosterConfig = RosterConfig::default();
        assert!(config.day_window.contains(time!(04:30)));
        assert!(config.day_window.contains(time!(16:30)));
        assert!(!config.day_window.contains(time!(04:29)));
        assert!(!config.day_window.contains(time!(16:31)));
    }

    #[test]
    fn test_rest_tables_step_at_breakpoints() {
        let config: RosterConfig = RosterConfig::default();
        assert_eq!(config.rest_at_base_for(Duration::hours(4)), Duration::hours(8));
        assert_eq!(
            config.rest_at_base_for(Duration::minutes(241)),
            Duration::hours(10)
        );
        assert_eq!(config.rest_at_base_for(Duration::hours(15)), Duration::hours(16));
        assert_eq!(config.rest_away_for(Duration::hours(12)), Duration::hours(18));
        assert_eq!(config.rest_away_for(Duration::hours(13)), Duration::hours(24));
    }

    #[test]
    fn test_select_crew_tier_falls_back_to_largest() {
        let config: RosterConfig = RosterConfig::default();
        let tier: &CrewTier = config.select_crew_tier(Duration::hours(18), Duration::hours(21), true);
        assert_eq!(tier.crew_size, 4);
    }

    #[test]
    fn test_select_crew_tier_ceilings_are_inclusive() {
        let config: RosterConfig = RosterConfig::default();
        let at_limit: &CrewTier =
            config.select_crew_tier(Duration::hours(9), Duration::minutes(750), true);
        let service_over: &CrewTier =
            config.select_crew_tier(Duration::hours(9), Duration::minutes(751), true);
        let flight_over: &CrewTier =
            config.select_crew_tier(Duration::minutes(541), Duration::hours(10), true);

        assert_eq!(at_limit.crew_size, 2);
        assert_eq!(service_over.crew_size, 3);
        assert_eq!(flight_over.crew_size, 3);
    }

    #[test]
    fn test_select_crew_tier_falls_back_past_either_largest_ceiling() {
        let config: RosterConfig = RosterConfig::default();
        let at_largest: &CrewTier =
            config.select_crew_tier(Duration::hours(17), Duration::hours(20), true);
        let flight_over: &CrewTier =
            config.select_crew_tier(Duration::minutes(1021), Duration::hours(18), true);
        let night_over: &CrewTier =
            config.select_crew_tier(Duration::hours(15), Duration::minutes(1141), false);

        assert_eq!(at_largest.crew_size, 4);
        assert_eq!(flight_over.crew_size, 4);
        assert_eq!(night_over.crew_size, 4);
    }

    #[test]
    fn test_hours_are_range_checked_on_deserialization() {
        let negative: Result<RosterConfig, _> =
            serde_json::from_str(r#"{"max_monthly_hours": -5}"#);
        let huge: Result<RosterConfig, _> =
            serde_json::from_str(r#"{"max_fortnight_hours": 1e300}"#);
        let fractional: RosterConfig =
            serde_json::from_str(r#"{"next_day_start_cutoff_hours": 2.25}"#).unwrap();

        assert!(negative.is_err());
        assert!(huge.is_err());
        assert_eq!(fractional.next_day_start_cutoff(), 135);
    }

    #[test]
    fn test_validate_rejects_cutoff_past_midnight() {
        let config: RosterConfig = RosterConfig {
            next_day_start_cutoff_hours: Hours::whole(24),
            ..RosterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidConfig {
                field: "next_day_start_cutoff_hours",
                ..
            })
        ));
    }

    #[test]
    fn test_night_window_tightens_service_ceiling() {
        let config: RosterConfig = RosterConfig::default();
        let service: Duration = Duration::hours(12);
        assert_eq!(
            config.select_crew_tier(Duration::hours(8), service, true).crew_size,
            2
        );
        assert_eq!(
            config.select_crew_tier(Duration::hours(8), service, false).crew_size,
            3
        );
    }

    #[test]
    fn test_designator_prefixes_are_case_insensitive() {
        let config: RosterConfig = RosterConfig::default();
        assert!(config.is_ignored_designator("w123"));
        assert!(config.is_ignored_designator("M4410"));
        assert!(!config.is_ignored_designator("9321"));
    }

    #[test]
    fn test_deadhead_window_spans_the_working_day() {
        let window: DeadheadWindow = RosterConfig::default().deadhead_window;

        let (start, end) = window.span_on(date!(2026 - 01 - 09)).unwrap();

        assert_eq!(start, datetime!(2026 - 01 - 09 06:00));
        assert_eq!(end, datetime!(2026 - 01 - 09 20:00));
        assert_eq!(window.rest_away(), Duration::hours(12));
    }
}
