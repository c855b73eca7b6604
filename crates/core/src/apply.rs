// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{ApplyOutcome, Command};
use crate::error::CoreError;
use crate::state::RosterState;
use flex_crew_domain::{
    AssignmentCheck, AssignmentId, DeadheadSuggestion, PilotId, Rotation, Slot, SlotId,
};
use time::Date;
use tracing::info;

/// Applies a manual edit to the roster.
///
/// Placements are validated with geographic continuity before anything
/// changes; a rejected command leaves the roster untouched.
///
/// # Errors
///
/// Returns an error if:
/// - A referenced pilot, slot, rotation or entry does not exist
/// - Validation rejects the placement
/// - The edit would orphan or overwrite an existing assignment
pub fn apply(state: &mut RosterState, command: Command) -> Result<ApplyOutcome, CoreError> {
    let mut outcome: ApplyOutcome = ApplyOutcome::new(command.name());

    match command {
        Command::AssignSlot { pilot_id, slot_id } => {
            if let Some(occupant) = &state.slot(&slot_id)?.occupant {
                return Err(CoreError::SlotAlreadyFilled {
                    slot_id,
                    pilot_id: occupant.clone(),
                });
            }
            let check: AssignmentCheck = validated(state, &pilot_id, &slot_id)?;
            place(state, &pilot_id, &slot_id, check, &mut outcome)?;
            info!(pilot_id = %pilot_id, slot_id = %slot_id, "Assigned slot");
        }
        Command::MoveAssignment { slot_id, to_pilot } => {
            let from_pilot: PilotId = state
                .slot(&slot_id)?
                .occupant
                .clone()
                .ok_or_else(|| CoreError::SlotNotOccupied(slot_id.clone()))?;
            if from_pilot == to_pilot {
                return Err(CoreError::SlotAlreadyFilled {
                    slot_id,
                    pilot_id: from_pilot,
                });
            }
            let check: AssignmentCheck = validated(state, &to_pilot, &slot_id)?;
            outcome.removed.extend(state.unassign(&slot_id)?);
            place(state, &to_pilot, &slot_id, check, &mut outcome)?;
            info!(
                slot_id = %slot_id,
                from_pilot = %from_pilot,
                to_pilot = %to_pilot,
                "Moved assignment"
            );
        }
        Command::UnassignSlot { slot_id } => {
            outcome.removed.extend(state.unassign(&slot_id)?);
            info!(slot_id = %slot_id, "Unassigned slot");
        }
        Command::AddEvent { pilot_id, event } => {
            outcome.added.push(state.add_event(&pilot_id, &event)?);
        }
        Command::RemoveEvent {
            pilot_id,
            assignment_id,
        } => {
            outcome
                .removed
                .push(state.remove_event(&pilot_id, &assignment_id)?);
            info!(pilot_id = %pilot_id, assignment_id = %assignment_id, "Removed event");
        }
        Command::ClearPilot { pilot_id } => {
            outcome.removed = state.clear_pilot(&pilot_id)?;
        }
        Command::DeleteRotation { rotation_id } => {
            outcome.removed = state.delete_rotation(&rotation_id)?;
        }
        Command::MergeRotations { first, second } => {
            outcome.rotation = Some(state.merge_rotations(&first, &second)?);
        }
        Command::ReplaceLegs { rotation_id, legs } => {
            state.replace_legs(&rotation_id, legs)?;
            info!(rotation_id = %rotation_id, "Replaced rotation legs");
            outcome.rotation = Some(rotation_id);
        }
        Command::AddSlot { rotation_id, role } => {
            let slot_id: SlotId = state.add_slot(&rotation_id, role)?;
            info!(rotation_id = %rotation_id, slot_id = %slot_id, "Added slot");
            outcome.slot = Some(slot_id);
            outcome.rotation = Some(rotation_id);
        }
        Command::RemoveSlot { slot_id } => {
            let removed: Slot = state.remove_slot(&slot_id)?;
            info!(slot_id = %slot_id, "Removed slot");
            outcome.rotation = Some(removed.rotation_id);
        }
    }

    Ok(outcome)
}

/// Validates the placement with geography, failing on any hard rule.
fn validated(
    state: &RosterState,
    pilot_id: &PilotId,
    slot_id: &SlotId,
) -> Result<AssignmentCheck, CoreError> {
    let check: AssignmentCheck = state.check_assignment(pilot_id, slot_id, true)?;
    if !check.is_valid() {
        return Err(CoreError::AssignmentRejected {
            pilot_id: pilot_id.clone(),
            slot_id: slot_id.clone(),
            violations: check.errors,
        });
    }
    Ok(check)
}

/// Registers a validated placement, positioning the pilot first when the
/// check suggests a deadhead and a day for it exists.
fn place(
    state: &mut RosterState,
    pilot_id: &PilotId,
    slot_id: &SlotId,
    check: AssignmentCheck,
    outcome: &mut ApplyOutcome,
) -> Result<(), CoreError> {
    if let Some(DeadheadSuggestion {
        origin,
        destination,
    }) = check.deadhead
    {
        let rotation: Rotation = state.rotation(&state.slot(slot_id)?.rotation_id)?.clone();
        let day: Option<Date> = state.deadhead_day(pilot_id, &rotation)?;
        if let Some(date) = day {
            let deadhead: AssignmentId =
                state.register_deadhead(pilot_id, origin, destination, date, Some(rotation.id))?;
            outcome.added.push(deadhead.clone());
            outcome.deadhead = Some(deadhead);
        }
    }
    outcome.added.push(state.register_assignment(pilot_id, slot_id)?);
    outcome.warnings = check.warnings;
    Ok(())
}
