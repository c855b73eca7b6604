// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_rotation;
use crate::{
    CrewDistribution, DomainError, PilotId, Role, Rotation, Slot, SlotId, distribution_of,
    reconcile_slots, slots_for_rotation,
};

fn ids(slots: &[Slot]) -> Vec<&str> {
    slots.iter().map(|slot: &Slot| slot.id.as_str()).collect()
}

#[test]
fn test_slots_follow_distribution_in_role_order() {
    let mut rotation: Rotation = create_test_rotation(5);
    rotation.set_distribution(CrewDistribution::new(1, 1, 1));

    let slots: Vec<Slot> = slots_for_rotation(&rotation);

    assert_eq!(
        ids(&slots),
        vec!["ROT-005-CAP-1", "ROT-005-COP-1", "ROT-005-CRP-1"]
    );
    assert!(slots.iter().all(|slot: &Slot| !slot.is_occupied()));
}

#[test]
fn test_four_pilot_crew_numbers_each_role_from_one() {
    let mut rotation: Rotation = create_test_rotation(5);
    rotation.set_distribution(CrewDistribution::new(2, 2, 0));

    let slots: Vec<Slot> = slots_for_rotation(&rotation);

    assert_eq!(
        ids(&slots),
        vec![
            "ROT-005-CAP-1",
            "ROT-005-CAP-2",
            "ROT-005-COP-1",
            "ROT-005-COP-2"
        ]
    );
    assert_eq!(slots.len(), rotation.distribution.total());
    assert_eq!(distribution_of(&slots), rotation.distribution);
}

#[test]
fn test_reconcile_appends_missing_slots() {
    let mut rotation: Rotation = create_test_rotation(5);
    let existing: Vec<Slot> = slots_for_rotation(&rotation);
    rotation.set_distribution(CrewDistribution::new(1, 1, 1));

    let reconciled: Vec<Slot> = reconcile_slots(&rotation, &existing).unwrap();

    assert_eq!(
        ids(&reconciled),
        vec!["ROT-005-CAP-1", "ROT-005-COP-1", "ROT-005-CRP-1"]
    );
    assert_eq!(rotation.crew_size, 3);
}

#[test]
fn test_reconcile_keeps_occupied_slot_ids() {
    let mut rotation: Rotation = create_test_rotation(5);
    rotation.set_distribution(CrewDistribution::new(2, 1, 0));
    let mut existing: Vec<Slot> = slots_for_rotation(&rotation);
    existing[1].occupant = Some(PilotId::new("P2"));
    rotation.set_distribution(CrewDistribution::new(1, 1, 0));

    let reconciled: Vec<Slot> = reconcile_slots(&rotation, &existing).unwrap();

    assert_eq!(ids(&reconciled), vec!["ROT-005-CAP-2", "ROT-005-COP-1"]);
    assert_eq!(reconciled[0].occupant, Some(PilotId::new("P2")));
}

#[test]
fn test_reconcile_rejects_removing_occupied_slot() {
    let mut rotation: Rotation = create_test_rotation(5);
    let mut existing: Vec<Slot> = slots_for_rotation(&rotation);
    existing[0].occupant = Some(PilotId::new("P1"));
    rotation.set_distribution(rotation.distribution.with_count(Role::Captain, 0));

    let result: Result<Vec<Slot>, DomainError> = reconcile_slots(&rotation, &existing);

    assert_eq!(
        result,
        Err(DomainError::OccupiedSlotRemoval {
            slot_id: SlotId::new("ROT-005-CAP-1"),
            pilot_id: PilotId::new("P1"),
        })
    );
}

#[test]
fn test_reconcile_ignores_slots_of_other_rotations() {
    let rotation: Rotation = create_test_rotation(5);
    let other: Rotation = create_test_rotation(6);
    let existing: Vec<Slot> = slots_for_rotation(&other);

    let reconciled: Vec<Slot> = reconcile_slots(&rotation, &existing).unwrap();

    assert_eq!(ids(&reconciled), vec!["ROT-005-CAP-1", "ROT-005-COP-1"]);
}
