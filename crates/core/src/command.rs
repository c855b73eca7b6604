// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::events::EventRequest;
use flex_crew_domain::{
    Advisory, Assignment, AssignmentId, FlightLeg, PilotId, Role, RotationId, SlotId,
};

/// A manual edit to the roster, expressed as data.
///
/// Commands are the only way the outside world changes a roster after it
/// is built; automatic assignment runs separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a pilot in an empty slot.
    AssignSlot {
        /// The pilot to place.
        pilot_id: PilotId,
        /// The slot to fill.
        slot_id: SlotId,
    },
    /// Hand an occupied slot to another pilot.
    MoveAssignment {
        /// The occupied slot.
        slot_id: SlotId,
        /// The pilot taking it over.
        to_pilot: PilotId,
    },
    /// Empty a slot.
    UnassignSlot {
        /// The slot to empty.
        slot_id: SlotId,
    },
    /// Add a deadhead, ground duty or day off to a pilot's timeline.
    AddEvent {
        /// The pilot the event is for.
        pilot_id: PilotId,
        /// What to add.
        event: EventRequest,
    },
    /// Remove one entry from a pilot's timeline.
    RemoveEvent {
        /// The pilot whose entry goes.
        pilot_id: PilotId,
        /// The entry.
        assignment_id: AssignmentId,
    },
    /// Drop every rotation and deadhead entry of a pilot.
    ClearPilot {
        /// The pilot to clear.
        pilot_id: PilotId,
    },
    /// Remove a rotation, unassigning its crew.
    DeleteRotation {
        /// The rotation to remove.
        rotation_id: RotationId,
    },
    /// Join two unstaffed rotations into one.
    MergeRotations {
        /// One rotation.
        first: RotationId,
        /// The other rotation.
        second: RotationId,
    },
    /// Rebuild an unstaffed rotation from new legs.
    ReplaceLegs {
        /// The rotation to rebuild.
        rotation_id: RotationId,
        /// Its new legs.
        legs: Vec<FlightLeg>,
    },
    /// Add one position to a rotation.
    AddSlot {
        /// The rotation to grow.
        rotation_id: RotationId,
        /// The position to add.
        role: Role,
    },
    /// Remove an empty position.
    RemoveSlot {
        /// The slot to remove.
        slot_id: SlotId,
    },
}

impl Command {
    /// Returns the command's name for logs and outcomes.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AssignSlot { .. } => "AssignSlot",
            Self::MoveAssignment { .. } => "MoveAssignment",
            Self::UnassignSlot { .. } => "UnassignSlot",
            Self::AddEvent { .. } => "AddEvent",
            Self::RemoveEvent { .. } => "RemoveEvent",
            Self::ClearPilot { .. } => "ClearPilot",
            Self::DeleteRotation { .. } => "DeleteRotation",
            Self::MergeRotations { .. } => "MergeRotations",
            Self::ReplaceLegs { .. } => "ReplaceLegs",
            Self::AddSlot { .. } => "AddSlot",
            Self::RemoveSlot { .. } => "RemoveSlot",
        }
    }
}

/// What a successfully applied command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// The command applied.
    pub action: &'static str,
    /// Entries created, in creation order.
    pub added: Vec<AssignmentId>,
    /// Entries taken off timelines.
    pub removed: Vec<Assignment>,
    /// A positioning deadhead registered ahead of an assignment.
    pub deadhead: Option<AssignmentId>,
    /// Advisories raised while validating the placement.
    pub warnings: Vec<Advisory>,
    /// The rotation created or kept by a rotation edit.
    pub rotation: Option<RotationId>,
    /// The slot created by `AddSlot`.
    pub slot: Option<SlotId>,
}

impl ApplyOutcome {
    pub(crate) const fn new(action: &'static str) -> Self {
        Self {
            action,
            added: Vec::new(),
            removed: Vec::new(),
            deadhead: None,
            warnings: Vec::new(),
            rotation: None,
            slot: None,
        }
    }
}
