// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::days_inclusive;
use crate::config::{CrewTier, RosterConfig};
use crate::error::DomainError;
use crate::types::{FlightLeg, Role, RotationId, Station, Tail};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Duration, PrimitiveDateTime};

/// How many pilots of each role a rotation needs, e.g. `1 CAP, 1 COP, 1 CRP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CrewDistribution {
    captains: u8,
    first_officers: u8,
    reliefs: u8,
}

impl CrewDistribution {
    /// Creates a distribution from per-role counts.
    #[must_use]
    pub const fn new(captains: u8, first_officers: u8, reliefs: u8) -> Self {
        Self {
            captains,
            first_officers,
            reliefs,
        }
    }

    /// Number of positions for a role.
    #[must_use]
    pub const fn count(&self, role: Role) -> u8 {
        match role {
            Role::Captain => self.captains,
            Role::FirstOfficer => self.first_officers,
            Role::Relief => self.reliefs,
        }
    }

    /// Returns a copy with the count for `role` replaced.
    #[must_use]
    pub const fn with_count(mut self, role: Role, count: u8) -> Self {
        match role {
            Role::Captain => self.captains = count,
            Role::FirstOfficer => self.first_officers = count,
            Role::Relief => self.reliefs = count,
        }
        self
    }

    /// Total number of positions.
    #[must_use]
    pub fn total(&self) -> usize {
        usize::from(self.captains) + usize::from(self.first_officers) + usize::from(self.reliefs)
    }
}

impl FromStr for CrewDistribution {
    type Err = DomainError;

    /// Parses comma-separated `<count> <role>` terms. Repeated roles add up.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut distribution: Self = Self::default();
        for term in s.split(',').map(str::trim).filter(|term: &&str| !term.is_empty()) {
            let digits_end: usize = term
                .find(|c: char| !c.is_ascii_digit())
                .ok_or_else(|| DomainError::InvalidCrewDistribution(s.to_string()))?;
            let (count, role) = term.split_at(digits_end);
            let count: u8 = count
                .parse()
                .map_err(|_| DomainError::InvalidCrewDistribution(s.to_string()))?;
            let role: Role = role
                .parse()
                .map_err(|_| DomainError::InvalidCrewDistribution(s.to_string()))?;
            let combined: u8 = distribution
                .count(role)
                .checked_add(count)
                .ok_or_else(|| DomainError::InvalidCrewDistribution(s.to_string()))?;
            distribution = distribution.with_count(role, combined);
        }
        Ok(distribution)
    }
}

impl TryFrom<String> for CrewDistribution {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CrewDistribution> for String {
    fn from(distribution: CrewDistribution) -> Self {
        distribution.to_string()
    }
}

impl std::fmt::Display for CrewDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} CAP, {} COP", self.captains, self.first_officers)?;
        if self.reliefs > 0 {
            write!(f, ", {} CRP", self.reliefs)?;
        }
        Ok(())
    }
}

/// A base-to-base sequence of legs flown by one crew on one aircraft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotation {
    /// Identifier, `ROT-001` onwards.
    pub id: RotationId,
    /// Aircraft of the first leg.
    pub tail: Tail,
    /// First departure station.
    pub origin: Station,
    /// Final arrival station.
    pub destination: Station,
    /// Stations visited, origin first.
    pub path: Vec<Station>,
    /// Legs in departure order.
    pub legs: Vec<FlightLeg>,
    /// First departure.
    pub start: PrimitiveDateTime,
    /// Last arrival.
    pub end: PrimitiveDateTime,
    /// Sum of leg block times.
    pub flight_time: Duration,
    /// Elapsed duty plus the route's service add-on.
    pub service_time: Duration,
    /// Whether the first departure falls in the day window.
    pub in_day_window: bool,
    /// Whether the rotation ends on a later calendar day than it starts.
    pub is_night: bool,
    /// Pilots required.
    pub crew_size: u8,
    /// Positions required.
    pub distribution: CrewDistribution,
    /// Rest owed after the rotation when it ends at home base.
    pub rest_at_base: Duration,
    /// Rest owed after the rotation when it ends away.
    pub rest_away: Duration,
}

impl Rotation {
    /// Builds a rotation from its legs, deriving every computed field.
    ///
    /// Legs are ordered by departure before the path is read off them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyRotation` if `legs` is empty.
    pub fn from_legs(
        id: RotationId,
        mut legs: Vec<FlightLeg>,
        config: &RosterConfig,
    ) -> Result<Self, DomainError> {
        legs.sort_by_key(|leg: &FlightLeg| leg.departure);
        let first: &FlightLeg = legs.first().ok_or(DomainError::EmptyRotation)?;
        let mut path: Vec<Station> = vec![first.departure_station.clone()];
        path.extend(legs.iter().map(|leg: &FlightLeg| leg.arrival_station.clone()));
        Self::assemble(id, path, legs, config)
    }

    fn assemble(
        id: RotationId,
        path: Vec<Station>,
        legs: Vec<FlightLeg>,
        config: &RosterConfig,
    ) -> Result<Self, DomainError> {
        let (Some(first), Some(last)) = (legs.first(), legs.last()) else {
            return Err(DomainError::EmptyRotation);
        };
        let start: PrimitiveDateTime = first.departure;
        let end: PrimitiveDateTime = legs
            .iter()
            .map(|leg: &FlightLeg| leg.arrival)
            .max()
            .unwrap_or(last.arrival);
        let origin: Station = first.departure_station.clone();
        let destination: Station = last.arrival_station.clone();
        let flight_time: Duration = legs.iter().map(FlightLeg::flight_time).sum();
        let service_time: Duration = (end - start) + config.service_addition(&origin, &destination);
        let in_day_window: bool = config.day_window.contains(start.time());
        let tier: &CrewTier = config.select_crew_tier(flight_time, service_time, in_day_window);

        Ok(Self {
            id,
            tail: first.tail.clone(),
            origin,
            destination,
            path,
            start,
            end,
            flight_time,
            service_time,
            in_day_window,
            is_night: end.date() != start.date(),
            crew_size: tier.crew_size,
            distribution: tier.distribution,
            rest_at_base: config.rest_at_base_for(flight_time),
            rest_away: config.rest_away_for(flight_time),
            legs,
        })
    }

    /// Replaces the legs and re-derives every computed field, keeping the id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyRotation` if `legs` is empty.
    pub fn replace_legs(
        &mut self,
        legs: Vec<FlightLeg>,
        config: &RosterConfig,
    ) -> Result<(), DomainError> {
        *self = Self::from_legs(self.id.clone(), legs, config)?;
        Ok(())
    }

    /// Overrides the crew composition after a manual slot edit.
    pub fn set_distribution(&mut self, distribution: CrewDistribution) {
        self.distribution = distribution;
        self.crew_size = u8::try_from(distribution.total()).unwrap_or(u8::MAX);
    }

    /// The stations visited, joined with dashes.
    #[must_use]
    pub fn route(&self) -> String {
        self.path
            .iter()
            .map(Station::code)
            .collect::<Vec<&str>>()
            .join("-")
    }

    /// Every calendar date the rotation touches.
    pub fn dates(&self) -> impl Iterator<Item = Date> {
        days_inclusive(self.start.date(), self.end.date())
    }
}

/// Combines two rotations into one.
///
/// The earlier rotation absorbs the later one: it keeps its id, and its
/// path is extended by the later path minus that path's first station.
/// Service time is recomputed from the combined elapsed time, and crew and
/// rest are re-derived from the combined totals.
///
/// # Errors
///
/// Returns `DomainError::InvalidMerge` if both rotations share an id.
pub fn merge_rotations(
    first: &Rotation,
    second: &Rotation,
    config: &RosterConfig,
) -> Result<Rotation, DomainError> {
    if first.id == second.id {
        return Err(DomainError::InvalidMerge(format!(
            "{} cannot be merged with itself",
            first.id
        )));
    }
    let (earlier, later): (&Rotation, &Rotation) = if second.start < first.start {
        (second, first)
    } else {
        (first, second)
    };
    let mut path: Vec<Station> = earlier.path.clone();
    path.extend(later.path.iter().skip(1).cloned());
    let mut legs: Vec<FlightLeg> = earlier.legs.clone();
    legs.extend(later.legs.iter().cloned());
    legs.sort_by_key(|leg: &FlightLeg| leg.departure);
    Rotation::assemble(earlier.id.clone(), path, legs, config)
}

/// Walks a month of legs and groups them into rotations.
///
/// Legs with an ignored designator are dropped, the rest are ordered by tail
/// then departure. A leg continues the current rotation when it departs from
/// the station the previous leg arrived at on the same tail, whatever the
/// date. When the chain breaks, the current rotation is kept only if it
/// ended at a home base.
#[must_use]
pub fn build_rotations(legs: &[FlightLeg], config: &RosterConfig) -> Vec<Rotation> {
    let mut ordered: Vec<&FlightLeg> = legs
        .iter()
        .filter(|leg: &&FlightLeg| !config.is_ignored_designator(&leg.designator))
        .collect();
    ordered.sort_by(|a: &&FlightLeg, b: &&FlightLeg| {
        a.tail
            .cmp(&b.tail)
            .then_with(|| a.departure.cmp(&b.departure))
    });

    let mut rotations: Vec<Rotation> = Vec::new();
    let mut current: Vec<FlightLeg> = Vec::new();
    for leg in ordered {
        let extends: bool = current
            .last()
            .is_some_and(|previous: &FlightLeg| continues_rotation(previous, leg));
        if !extends {
            close_rotation(&mut current, &mut rotations, config);
        }
        current.push(leg.clone());
    }
    close_rotation(&mut current, &mut rotations, config);
    rotations
}

fn continues_rotation(previous: &FlightLeg, next: &FlightLeg) -> bool {
    next.tail == previous.tail && next.departure_station == previous.arrival_station
}

fn close_rotation(current: &mut Vec<FlightLeg>, rotations: &mut Vec<Rotation>, config: &RosterConfig) {
    let legs: Vec<FlightLeg> = std::mem::take(current);
    let closable: bool = legs
        .last()
        .is_some_and(|leg: &FlightLeg| config.is_home_base(&leg.arrival_station));
    if !closable {
        return;
    }
    let id: RotationId = RotationId::new(&format!("ROT-{:03}", rotations.len() + 1));
    if let Ok(rotation) = Rotation::from_legs(id, legs, config) {
        rotations.push(rotation);
    }
}
