// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{PilotId, SlotId, Station};

/// Errors that can occur while building or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A station code is empty or malformed.
    InvalidStation(String),
    /// A station pair is not of the form `AAA-BBB`.
    InvalidStationPair(String),
    /// A role code is not one of `CAP`, `COP` or `CRP`.
    InvalidRole(String),
    /// An assignment kind code is not recognised.
    InvalidAssignmentKind(String),
    /// A crew distribution description could not be parsed.
    InvalidCrewDistribution(String),
    /// An hour value is negative, not a number, or implausibly large.
    InvalidHours(String),
    /// A configuration value is out of range or inconsistent.
    InvalidConfig {
        /// The offending configuration field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// A pilot identifier appears more than once in the roster input.
    DuplicatePilot(PilotId),
    /// A pilot record is missing a required value.
    InvalidPilot {
        /// The pilot the record belongs to.
        pilot_id: String,
        /// Why the record was rejected.
        reason: String,
    },
    /// A flight leg arrives before it departs or connects a station to itself.
    InvalidLeg {
        /// The flight designator of the leg.
        designator: String,
        /// Why the leg was rejected.
        reason: String,
    },
    /// A rotation cannot be built from an empty leg list.
    EmptyRotation,
    /// Two rotations cannot be merged.
    InvalidMerge(String),
    /// A slot still held by a pilot cannot be removed.
    OccupiedSlotRemoval {
        /// The occupied slot.
        slot_id: SlotId,
        /// The pilot holding the slot.
        pilot_id: PilotId,
    },
    /// A manual event has an end before its start.
    InvalidEventWindow {
        /// Description of the event window.
        window: String,
    },
    /// A deadhead connects a station to itself.
    DegenerateDeadhead(Station),
    /// Date arithmetic left the supported calendar range.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStation(msg) => write!(f, "Invalid station: {msg}"),
            Self::InvalidStationPair(msg) => {
                write!(f, "Invalid station pair '{msg}': expected ORIGIN-DESTINATION")
            }
            Self::InvalidRole(msg) => write!(f, "Invalid role: {msg}"),
            Self::InvalidAssignmentKind(msg) => write!(f, "Invalid assignment kind: {msg}"),
            Self::InvalidCrewDistribution(msg) => {
                write!(f, "Invalid crew distribution: {msg}")
            }
            Self::InvalidHours(value) => {
                write!(f, "Invalid hours: {value} is not between 0 and 9000")
            }
            Self::InvalidConfig { field, reason } => {
                write!(f, "Invalid configuration value for '{field}': {reason}")
            }
            Self::DuplicatePilot(pilot_id) => {
                write!(f, "Pilot '{pilot_id}' appears more than once")
            }
            Self::InvalidPilot { pilot_id, reason } => {
                write!(f, "Invalid pilot '{pilot_id}': {reason}")
            }
            Self::InvalidLeg { designator, reason } => {
                write!(f, "Invalid flight leg '{designator}': {reason}")
            }
            Self::EmptyRotation => write!(f, "A rotation needs at least one flight leg"),
            Self::InvalidMerge(msg) => write!(f, "Cannot merge rotations: {msg}"),
            Self::OccupiedSlotRemoval { slot_id, pilot_id } => {
                write!(
                    f,
                    "Slot {slot_id} is assigned to pilot '{pilot_id}' and cannot be removed"
                )
            }
            Self::InvalidEventWindow { window } => {
                write!(f, "Event ends before it starts: {window}")
            }
            Self::DegenerateDeadhead(station) => {
                write!(f, "Deadhead origin and destination are both {station}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
