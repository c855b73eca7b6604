// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flex_crew_domain::{
    AssignmentId, AssignmentKind, DomainError, PilotId, RotationId, RuleViolation, SlotId,
};

/// Errors that can occur while mutating the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// No pilot has this id.
    PilotNotFound(PilotId),
    /// No slot has this id.
    SlotNotFound(SlotId),
    /// No rotation has this id.
    RotationNotFound(RotationId),
    /// The pilot has no entry with this id.
    AssignmentNotFound {
        /// The pilot searched.
        pilot_id: PilotId,
        /// The missing entry.
        assignment_id: AssignmentId,
    },
    /// Validation rejected placing the pilot in the slot.
    AssignmentRejected {
        /// The candidate pilot.
        pilot_id: PilotId,
        /// The slot requested.
        slot_id: SlotId,
        /// Every hard rule the placement breaks.
        violations: Vec<RuleViolation>,
    },
    /// A manual event breaks a daily ceiling.
    EventRejected {
        /// The pilot the event was for.
        pilot_id: PilotId,
        /// The ceiling exceeded.
        violation: RuleViolation,
    },
    /// The slot is held and cannot be removed.
    SlotOccupied {
        /// The slot.
        slot_id: SlotId,
        /// Its occupant.
        pilot_id: PilotId,
    },
    /// The slot already has an occupant.
    SlotAlreadyFilled {
        /// The slot.
        slot_id: SlotId,
        /// Its occupant.
        pilot_id: PilotId,
    },
    /// The slot has no occupant to remove or move.
    SlotNotOccupied(SlotId),
    /// The rotation has occupied slots, which the edit would invalidate.
    RotationHasAssignments(RotationId),
    /// Rotation entries are only created through slot assignment.
    UnsupportedEventKind(AssignmentKind),
    /// A manual duty collides with existing duty.
    ScheduleConflict {
        /// The pilot the event was for.
        pilot_id: PilotId,
        /// The existing entry.
        with: AssignmentId,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::PilotNotFound(pilot_id) => write!(f, "Pilot {pilot_id} not found"),
            Self::SlotNotFound(slot_id) => write!(f, "Slot {slot_id} not found"),
            Self::RotationNotFound(rotation_id) => write!(f, "Rotation {rotation_id} not found"),
            Self::AssignmentNotFound {
                pilot_id,
                assignment_id,
            } => write!(f, "Pilot {pilot_id} has no entry {assignment_id}"),
            Self::AssignmentRejected {
                pilot_id,
                slot_id,
                violations,
            } => {
                let reasons: Vec<String> =
                    violations.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "Pilot {pilot_id} cannot fill {slot_id}: {}",
                    reasons.join(", ")
                )
            }
            Self::EventRejected {
                pilot_id,
                violation,
            } => write!(f, "Event rejected for pilot {pilot_id}: {violation}"),
            Self::SlotOccupied { slot_id, pilot_id } => {
                write!(f, "Slot {slot_id} is held by {pilot_id}")
            }
            Self::SlotAlreadyFilled { slot_id, pilot_id } => {
                write!(f, "Slot {slot_id} is already filled by {pilot_id}")
            }
            Self::SlotNotOccupied(slot_id) => write!(f, "Slot {slot_id} has no occupant"),
            Self::RotationHasAssignments(rotation_id) => {
                write!(f, "Rotation {rotation_id} has assigned pilots")
            }
            Self::UnsupportedEventKind(kind) => {
                write!(f, "{kind} entries are created by assigning a slot")
            }
            Self::ScheduleConflict { pilot_id, with } => {
                write!(f, "Pilot {pilot_id} already has duty {with} at that time")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
