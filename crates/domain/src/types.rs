// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::{Date, Duration, PrimitiveDateTime, Time};

/// Seniority assigned to pilots whose records carry none.
pub const DEFAULT_SENIORITY: u32 = 9999;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from its textual form.
            #[must_use]
            pub fn new(value: &str) -> Self {
                Self(value.trim().to_string())
            }

            /// Returns the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifies a pilot across imports, timelines and audit findings.
    PilotId
);
string_id!(
    /// Identifies a rotation, e.g. `ROT-001`.
    RotationId
);
string_id!(
    /// Identifies a slot, e.g. `ROT-001-CAP-1`.
    SlotId
);
string_id!(
    /// Identifies a timeline entry, e.g. `ASG-000001`.
    AssignmentId
);

/// A station (airport) code.
///
/// Codes are trimmed and upper-cased so `mde` and `MDE` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Station(String);

impl Station {
    /// Parses a station code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or contains anything other
    /// than ASCII letters and digits.
    pub fn parse(code: &str) -> Result<Self, DomainError> {
        let normalized: String = code.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidStation(String::from(
                "station code cannot be empty",
            )));
        }
        if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidStation(normalized));
        }
        Ok(Self(normalized))
    }

    /// Returns the station code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Station {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Station> for String {
    fn from(station: Station) -> Self {
        station.0
    }
}

impl FromStr for Station {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An aircraft registration. May be empty when a leg carries no tail.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tail(String);

impl Tail {
    /// Creates a tail from its registration, upper-cased.
    #[must_use]
    pub fn new(registration: &str) -> Self {
        Self(registration.trim().to_uppercase())
    }

    /// Returns the registration.
    #[must_use]
    pub fn registration(&self) -> &str {
        &self.0
    }

    /// Returns whether the tail is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Tail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cockpit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Captain.
    #[serde(rename = "CAP")]
    Captain,
    /// First officer.
    #[serde(rename = "COP")]
    FirstOfficer,
    /// Relief pilot.
    #[serde(rename = "CRP")]
    Relief,
}

impl Role {
    /// Slot emission order within a rotation.
    pub const ALL: [Self; 3] = [Self::Captain, Self::FirstOfficer, Self::Relief];

    /// Returns the short role code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Captain => "CAP",
            Self::FirstOfficer => "COP",
            Self::Relief => "CRP",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CAP" => Ok(Self::Captain),
            "COP" => Ok(Self::FirstOfficer),
            "CRP" => Ok(Self::Relief),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssignmentKind {
    /// Flying a rotation.
    Rot,
    /// Deadhead positioning as a passenger.
    Dh,
    /// Training.
    Trn,
    /// Office duty.
    Ofi,
    /// Requested free day.
    Free,
    /// Scheduled day off.
    Off,
    /// Vacation.
    Vac,
    /// Unpaid leave.
    Lus,
    /// Incapacity.
    Inc,
}

impl AssignmentKind {
    /// Returns the short kind code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rot => "ROT",
            Self::Dh => "DH",
            Self::Trn => "TRN",
            Self::Ofi => "OFI",
            Self::Free => "FREE",
            Self::Off => "OFF",
            Self::Vac => "VAC",
            Self::Lus => "LUS",
            Self::Inc => "INC",
        }
    }

    /// Returns whether this kind is duty (counts for overlap, rest and streaks).
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        matches!(self, Self::Rot | Self::Dh | Self::Trn | Self::Ofi)
    }

    /// Returns whether this kind counts towards the daily duty ceiling.
    #[must_use]
    pub const fn counts_for_daily_duty(&self) -> bool {
        matches!(self, Self::Rot | Self::Dh)
    }
}

impl FromStr for AssignmentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ROT" => Ok(Self::Rot),
            "DH" => Ok(Self::Dh),
            "TRN" => Ok(Self::Trn),
            "OFI" => Ok(Self::Ofi),
            "FREE" => Ok(Self::Free),
            "OFF" | "L" => Ok(Self::Off),
            "VAC" => Ok(Self::Vac),
            "LUS" => Ok(Self::Lus),
            "INC" => Ok(Self::Inc),
            _ => Err(DomainError::InvalidAssignmentKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One scheduled flight sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLeg {
    /// Aircraft operating the leg.
    pub tail: Tail,
    /// Station the leg departs from.
    pub departure_station: Station,
    /// Station the leg arrives at.
    pub arrival_station: Station,
    /// Departure instant.
    pub departure: PrimitiveDateTime,
    /// Arrival instant.
    pub arrival: PrimitiveDateTime,
    /// Flight designator, e.g. `AV9321`.
    pub designator: String,
}

impl FlightLeg {
    /// Creates a leg from absolute departure and arrival instants.
    ///
    /// # Errors
    ///
    /// Returns an error if the arrival is earlier than the departure.
    pub fn new(
        tail: Tail,
        departure_station: Station,
        arrival_station: Station,
        departure: PrimitiveDateTime,
        arrival: PrimitiveDateTime,
        designator: &str,
    ) -> Result<Self, DomainError> {
        if arrival < departure {
            return Err(DomainError::InvalidLeg {
                designator: designator.to_string(),
                reason: format!("arrival {arrival} is before departure {departure}"),
            });
        }
        Ok(Self {
            tail,
            departure_station,
            arrival_station,
            departure,
            arrival,
            designator: designator.trim().to_string(),
        })
    }

    /// Creates a leg from clock times on a departure date.
    ///
    /// An arrival clock time earlier than the departure clock time lands on
    /// the following day.
    ///
    /// # Errors
    ///
    /// Returns an error if the rolled-over arrival date is out of range.
    pub fn from_clock_times(
        tail: Tail,
        departure_station: Station,
        arrival_station: Station,
        date: Date,
        departure_time: Time,
        arrival_time: Time,
        designator: &str,
    ) -> Result<Self, DomainError> {
        let arrival_date: Date = if arrival_time < departure_time {
            date.next_day()
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: format!("rolling leg {designator} over to the next day"),
                })?
        } else {
            date
        };
        Self::new(
            tail,
            departure_station,
            arrival_station,
            PrimitiveDateTime::new(date, departure_time),
            PrimitiveDateTime::new(arrival_date, arrival_time),
            designator,
        )
    }

    /// Returns the block time of the leg.
    #[must_use]
    pub fn flight_time(&self) -> Duration {
        self.arrival - self.departure
    }
}

/// A pilot and the static facts the rules need about them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    /// Unique identifier.
    pub id: PilotId,
    /// Display name.
    pub name: String,
    /// Home base.
    pub base: Station,
    /// Positions the pilot may fill.
    pub roles: Vec<Role>,
    /// Tails the pilot is qualified to fly.
    pub qualified_tails: BTreeSet<Tail>,
    /// Tails the pilot may fly as relief.
    pub relief_tails: BTreeSet<Tail>,
    /// Lower values are more senior.
    pub seniority: u32,
    /// Requested free days.
    pub free_days: BTreeSet<Date>,
    /// Days the pilot is absent.
    pub absence_days: BTreeSet<Date>,
    /// Days the pilot is in training.
    pub training_days: BTreeSet<Date>,
}

impl Pilot {
    /// Creates a pilot with no tail qualifications or calendar restrictions.
    #[must_use]
    pub fn new(id: PilotId, name: &str, base: Station, roles: Vec<Role>) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            base,
            roles,
            qualified_tails: BTreeSet::new(),
            relief_tails: BTreeSet::new(),
            seniority: DEFAULT_SENIORITY,
            free_days: BTreeSet::new(),
            absence_days: BTreeSet::new(),
            training_days: BTreeSet::new(),
        }
    }

    /// Sets the seniority number.
    #[must_use]
    pub const fn with_seniority(mut self, seniority: u32) -> Self {
        self.seniority = seniority;
        self
    }

    /// Sets the tails the pilot is qualified on.
    #[must_use]
    pub fn with_qualified_tails<I: IntoIterator<Item = Tail>>(mut self, tails: I) -> Self {
        self.qualified_tails = tails.into_iter().collect();
        self
    }

    /// Sets the tails the pilot may fly as relief.
    #[must_use]
    pub fn with_relief_tails<I: IntoIterator<Item = Tail>>(mut self, tails: I) -> Self {
        self.relief_tails = tails.into_iter().collect();
        self
    }

    /// Sets the requested free days.
    #[must_use]
    pub fn with_free_days<I: IntoIterator<Item = Date>>(mut self, days: I) -> Self {
        self.free_days = days.into_iter().collect();
        self
    }

    /// Sets the absence days.
    #[must_use]
    pub fn with_absence_days<I: IntoIterator<Item = Date>>(mut self, days: I) -> Self {
        self.absence_days = days.into_iter().collect();
        self
    }

    /// Sets the training days.
    #[must_use]
    pub fn with_training_days<I: IntoIterator<Item = Date>>(mut self, days: I) -> Self {
        self.training_days = days.into_iter().collect();
        self
    }

    /// Returns whether the pilot may fill the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns whether the date is a requested free day, an absence or a training day.
    #[must_use]
    pub fn is_unavailable_on(&self, date: Date) -> bool {
        self.free_days.contains(&date)
            || self.absence_days.contains(&date)
            || self.training_days.contains(&date)
    }
}
