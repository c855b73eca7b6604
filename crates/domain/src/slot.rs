// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::rotation::{CrewDistribution, Rotation};
use crate::types::{PilotId, Role, RotationId, SlotId};
use serde::{Deserialize, Serialize};

/// One cockpit position on one rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// `<rotation>-<role>-<ordinal>`.
    pub id: SlotId,
    /// Owning rotation.
    pub rotation_id: RotationId,
    /// Position to fill.
    pub role: Role,
    /// 1-based index among the rotation's slots of the same role.
    pub ordinal: u8,
    /// Pilot holding the slot, if any.
    pub occupant: Option<PilotId>,
}

impl Slot {
    /// Creates an unoccupied slot.
    #[must_use]
    pub fn new(rotation_id: &RotationId, role: Role, ordinal: u8) -> Self {
        Self {
            id: slot_id(rotation_id, role, ordinal),
            rotation_id: rotation_id.clone(),
            role,
            ordinal,
            occupant: None,
        }
    }

    /// Returns whether a pilot holds the slot.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Formats the id of a slot.
#[must_use]
pub fn slot_id(rotation_id: &RotationId, role: Role, ordinal: u8) -> SlotId {
    SlotId::new(&format!("{rotation_id}-{}-{ordinal}", role.as_str()))
}

/// Materializes the slots a rotation needs: captains, then first officers,
/// then reliefs, each numbered from 1.
#[must_use]
pub fn slots_for_rotation(rotation: &Rotation) -> Vec<Slot> {
    Role::ALL
        .iter()
        .flat_map(|&role: &Role| {
            (1..=rotation.distribution.count(role))
                .map(move |ordinal: u8| Slot::new(&rotation.id, role, ordinal))
        })
        .collect()
}

/// Counts slots per role.
#[must_use]
pub fn distribution_of(slots: &[Slot]) -> CrewDistribution {
    Role::ALL
        .iter()
        .fold(CrewDistribution::default(), |acc: CrewDistribution, &role: &Role| {
            let count: usize = slots.iter().filter(|slot: &&Slot| slot.role == role).count();
            acc.with_count(role, u8::try_from(count).unwrap_or(u8::MAX))
        })
}

/// Brings a rotation's existing slots in line with its distribution.
///
/// Only slots already belonging to `rotation` are considered, and kept
/// slots retain their ids. Occupied slots are always kept; surplus
/// unoccupied slots are dropped from the highest ordinal down, and missing
/// slots are appended after the highest ordinal in use.
///
/// # Errors
///
/// Returns `DomainError::OccupiedSlotRemoval` if the distribution asks for
/// fewer slots of a role than are currently occupied.
pub fn reconcile_slots(rotation: &Rotation, existing: &[Slot]) -> Result<Vec<Slot>, DomainError> {
    let mut reconciled: Vec<Slot> = Vec::new();
    for role in Role::ALL {
        let wanted: usize = usize::from(rotation.distribution.count(role));
        let mut same_role: Vec<&Slot> = existing
            .iter()
            .filter(|slot: &&Slot| slot.role == role && slot.rotation_id == rotation.id)
            .collect();
        same_role.sort_by_key(|slot: &&Slot| (!slot.is_occupied(), slot.ordinal));

        if let Some((slot_id, pilot_id)) =
            same_role.iter().skip(wanted).find_map(|slot: &&Slot| {
                slot.occupant
                    .as_ref()
                    .map(|pilot_id: &PilotId| (slot.id.clone(), pilot_id.clone()))
            })
        {
            return Err(DomainError::OccupiedSlotRemoval { slot_id, pilot_id });
        }

        let mut kept: Vec<Slot> = same_role.into_iter().take(wanted).cloned().collect();
        let mut next_ordinal: u8 = kept.iter().map(|slot: &Slot| slot.ordinal).max().unwrap_or(0);
        while kept.len() < wanted {
            next_ordinal = next_ordinal.saturating_add(1);
            kept.push(Slot::new(&rotation.id, role, next_ordinal));
        }
        kept.sort_by_key(|slot: &Slot| slot.ordinal);
        reconciled.extend(kept);
    }
    Ok(reconciled)
}
