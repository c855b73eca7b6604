// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::events::{
    EventRequest, assignment_id, assignment_sequence, check_manual_deadhead, day_off_entry,
    ground_duty_entry, manual_deadhead_entry, preloaded_entry, rotation_entry,
    scheduled_deadhead_entry,
};
use flex_crew_audit::{AuditReport, audit_roster};
use flex_crew_domain::{
    Assignment, AssignmentCheck, AssignmentId, AssignmentKind, CheckOptions, CrewDistribution,
    DailyDuty, DomainError, FlightHourLedger, FlightLeg, Pilot, PilotId, PilotSchedule, PilotState, Role, RosterConfig,
    Rotation, RotationId, Slot, SlotId, Station, Timeline, build_rotations, daily_totals,
    distribution_of, find_conflict, find_deadhead_date, merge_rotations, reconcile_slots,
    slots_for_rotation, validate_assignment,
};
use std::collections::BTreeMap;
use time::{Date, PrimitiveDateTime};
use tracing::{debug, info};

/// The rostering context: pilots, their timelines and running totals,
/// rotations and slots.
///
/// Pilots keep their import order; parallel vectors hold each pilot's state
/// and timeline. Rotations and slots are keyed by id. Every mutation goes
/// through the methods below so slot occupancy, timelines and flight-hour
/// ledgers stay in step.
#[derive(Debug, Clone)]
pub struct RosterState {
    config: RosterConfig,
    pilots: Vec<Pilot>,
    pilot_index: BTreeMap<PilotId, usize>,
    pilot_states: Vec<PilotState>,
    timelines: Vec<Timeline>,
    rotations: BTreeMap<RotationId, Rotation>,
    slots: BTreeMap<SlotId, Slot>,
    next_assignment: u32,
}

impl RosterState {
    /// Validates the configuration, indexes the pilots and seeds their
    /// free, absence and training days as preloaded entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a pilot id repeats.
    pub fn new(config: RosterConfig, pilots: Vec<Pilot>) -> Result<Self, CoreError> {
        config.validate()?;

        let mut pilot_index: BTreeMap<PilotId, usize> = BTreeMap::new();
        for (index, pilot) in pilots.iter().enumerate() {
            if pilot_index.insert(pilot.id.clone(), index).is_some() {
                return Err(DomainError::DuplicatePilot(pilot.id.clone()).into());
            }
        }

        let pilot_states: Vec<PilotState> = pilots
            .iter()
            .map(|pilot: &Pilot| PilotState::at_base(pilot.base.clone()))
            .collect();
        let timelines: Vec<Timeline> = vec![Timeline::new(); pilots.len()];

        let mut state: Self = Self {
            config,
            pilots,
            pilot_index,
            pilot_states,
            timelines,
            rotations: BTreeMap::new(),
            slots: BTreeMap::new(),
            next_assignment: 1,
        };
        for index in 0..state.pilots.len() {
            state.seed_preloaded(index);
        }
        info!(
            pilots = state.pilots.len(),
            "Roster initialised"
        );
        Ok(state)
    }

    fn seed_preloaded(&mut self, index: usize) {
        let pilot: &Pilot = &self.pilots[index];
        let mut days: Vec<(Date, AssignmentKind)> = Vec::new();
        days.extend(pilot.free_days.iter().map(|date: &Date| (*date, AssignmentKind::Free)));
        days.extend(pilot.absence_days.iter().map(|date: &Date| (*date, AssignmentKind::Off)));
        days.extend(pilot.training_days.iter().map(|date: &Date| (*date, AssignmentKind::Trn)));
        let base: Station = pilot.base.clone();

        for (date, kind) in days {
            let id: AssignmentId = self.allocate_assignment_id();
            self.timelines[index].insert(preloaded_entry(id, kind, date, &base));
        }
    }

    fn allocate_assignment_id(&mut self) -> AssignmentId {
        let id: AssignmentId = assignment_id(self.next_assignment);
        self.next_assignment += 1;
        id
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    #[must_use]
    pub const fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Pilots in import order.
    #[must_use]
    pub fn pilots(&self) -> &[Pilot] {
        &self.pilots
    }

    pub(crate) fn pilot_position(&self, pilot_id: &PilotId) -> Result<usize, CoreError> {
        self.pilot_index
            .get(pilot_id)
            .copied()
            .ok_or_else(|| CoreError::PilotNotFound(pilot_id.clone()))
    }

    /// # Errors
    ///
    /// Returns `CoreError::PilotNotFound` for an unknown id.
    pub fn pilot(&self, pilot_id: &PilotId) -> Result<&Pilot, CoreError> {
        Ok(&self.pilots[self.pilot_position(pilot_id)?])
    }

    /// # Errors
    ///
    /// Returns `CoreError::PilotNotFound` for an unknown id.
    pub fn timeline(&self, pilot_id: &PilotId) -> Result<&Timeline, CoreError> {
        Ok(&self.timelines[self.pilot_position(pilot_id)?])
    }

    /// # Errors
    ///
    /// Returns `CoreError::PilotNotFound` for an unknown id.
    pub fn pilot_state(&self, pilot_id: &PilotId) -> Result<&PilotState, CoreError> {
        Ok(&self.pilot_states[self.pilot_position(pilot_id)?])
    }

    /// Everything the validator reads about one pilot.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::PilotNotFound` for an unknown id.
    pub fn schedule(&self, pilot_id: &PilotId) -> Result<PilotSchedule<'_>, CoreError> {
        Ok(self.schedule_at(self.pilot_position(pilot_id)?))
    }

    pub(crate) fn schedule_at(&self, index: usize) -> PilotSchedule<'_> {
        PilotSchedule {
            pilot: &self.pilots[index],
            timeline: &self.timelines[index],
            state: &self.pilot_states[index],
        }
    }

    /// Every pilot with their timeline, in import order.
    pub fn rosters(&self) -> impl Iterator<Item = (&Pilot, &Timeline)> {
        self.pilots.iter().zip(self.timelines.iter())
    }

    /// Rotations in id order.
    pub fn rotations(&self) -> impl Iterator<Item = &Rotation> {
        self.rotations.values()
    }

    /// # Errors
    ///
    /// Returns `CoreError::RotationNotFound` for an unknown id.
    pub fn rotation(&self, rotation_id: &RotationId) -> Result<&Rotation, CoreError> {
        self.rotations
            .get(rotation_id)
            .ok_or_else(|| CoreError::RotationNotFound(rotation_id.clone()))
    }

    /// Slots in id order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    /// # Errors
    ///
    /// Returns `CoreError::SlotNotFound` for an unknown id.
    pub fn slot(&self, slot_id: &SlotId) -> Result<&Slot, CoreError> {
        self.slots
            .get(slot_id)
            .ok_or_else(|| CoreError::SlotNotFound(slot_id.clone()))
    }

    /// Slots belonging to one rotation.
    pub fn slots_of<'a>(&'a self, rotation_id: &'a RotationId) -> impl Iterator<Item = &'a Slot> {
        self.slots
            .values()
            .filter(move |slot: &&Slot| &slot.rotation_id == rotation_id)
    }

    /// Empty slots ordered by rotation start, then slot id.
    #[must_use]
    pub fn unassigned_slots(&self) -> Vec<&Slot> {
        let mut open: Vec<(PrimitiveDateTime, &Slot)> = self
            .slots
            .values()
            .filter(|slot: &&Slot| !slot.is_occupied())
            .filter_map(|slot: &Slot| {
                self.rotations
                    .get(&slot.rotation_id)
                    .map(|rotation: &Rotation| (rotation.start, slot))
            })
            .collect();
        open.sort_by(|left, right| left.0.cmp(&right.0).then_with(|| left.1.id.cmp(&right.1.id)));
        open.into_iter().map(|(_, slot)| slot).collect()
    }

    /// Audits every timeline.
    #[must_use]
    pub fn audit(&self) -> AuditReport {
        audit_roster(self.rosters(), &self.config)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validates placing the pilot in the slot. A slot the pilot already
    /// holds is left out of its own checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the pilot, slot or rotation does not exist.
    pub fn check_assignment(
        &self,
        pilot_id: &PilotId,
        slot_id: &SlotId,
        geography: bool,
    ) -> Result<AssignmentCheck, CoreError> {
        let index: usize = self.pilot_position(pilot_id)?;
        let slot: &Slot = self.slot(slot_id)?;
        let rotation: &Rotation = self.rotation(&slot.rotation_id)?;
        let base: CheckOptions<'_> = if geography {
            CheckOptions::full()
        } else {
            CheckOptions::without_geography()
        };
        let options: CheckOptions<'_> = if slot.occupant.as_ref() == Some(pilot_id) {
            base.excluding(slot_id)
        } else {
            base
        };
        Ok(validate_assignment(
            &self.schedule_at(index),
            rotation,
            slot.role,
            &self.config,
            options,
        ))
    }

    /// A day on which the pilot can deadhead to `rotation`'s origin and
    /// still be rested for it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::PilotNotFound` for an unknown id.
    pub fn deadhead_day(
        &self,
        pilot_id: &PilotId,
        rotation: &Rotation,
    ) -> Result<Option<Date>, CoreError> {
        Ok(self.deadhead_day_at(self.pilot_position(pilot_id)?, rotation))
    }

    pub(crate) fn deadhead_day_at(&self, index: usize, rotation: &Rotation) -> Option<Date> {
        find_deadhead_date(
            &self.pilots[index],
            &self.timelines[index],
            rotation,
            &self.config,
        )
    }

    // ========================================================================
    // Rotations and slots
    // ========================================================================

    /// Replaces every rotation and slot with ones built from `legs`.
    ///
    /// Rotation and deadhead entries are cleared first since they refer to
    /// the rotations being replaced.
    pub fn load_rotations(&mut self, legs: &[FlightLeg]) -> usize {
        self.reset_for_run();
        self.rotations.clear();
        self.slots.clear();
        for rotation in build_rotations(legs, &self.config) {
            for slot in slots_for_rotation(&rotation) {
                self.slots.insert(slot.id.clone(), slot);
            }
            self.rotations.insert(rotation.id.clone(), rotation);
        }
        info!(
            legs = legs.len(),
            rotations = self.rotations.len(),
            slots = self.slots.len(),
            "Built rotations"
        );
        self.rotations.len()
    }

    fn ensure_unoccupied(&self, rotation_id: &RotationId) -> Result<(), CoreError> {
        if self.slots_of(rotation_id).any(Slot::is_occupied) {
            return Err(CoreError::RotationHasAssignments(rotation_id.clone()));
        }
        Ok(())
    }

    fn replace_slots(&mut self, rotation_id: &RotationId, slots: Vec<Slot>) {
        self.slots.retain(|_, slot: &mut Slot| &slot.rotation_id != rotation_id);
        for slot in slots {
            self.slots.insert(slot.id.clone(), slot);
        }
    }

    /// Removes a rotation and its slots, unassigning every occupant first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RotationNotFound` for an unknown id.
    pub fn delete_rotation(&mut self, rotation_id: &RotationId) -> Result<Vec<Assignment>, CoreError> {
        self.rotation(rotation_id)?;
        let occupied: Vec<SlotId> = self
            .slots_of(rotation_id)
            .filter(|slot: &&Slot| slot.is_occupied())
            .map(|slot: &Slot| slot.id.clone())
            .collect();
        let mut removed: Vec<Assignment> = Vec::new();
        for slot_id in occupied {
            removed.extend(self.unassign(&slot_id)?);
        }
        self.replace_slots(rotation_id, Vec::new());
        self.rotations.remove(rotation_id);
        info!(rotation_id = %rotation_id, unassigned = removed.len(), "Deleted rotation");
        Ok(removed)
    }

    /// Merges two unassigned rotations. The earlier one absorbs the later
    /// and keeps its id; its slots are reconciled with the merged crew.
    ///
    /// # Errors
    ///
    /// Returns an error if either rotation is missing or staffed, or both ids match.
    pub fn merge_rotations(
        &mut self,
        first: &RotationId,
        second: &RotationId,
    ) -> Result<RotationId, CoreError> {
        let merged: Rotation = merge_rotations(self.rotation(first)?, self.rotation(second)?, &self.config)?;
        self.ensure_unoccupied(first)?;
        self.ensure_unoccupied(second)?;

        let absorbed: &RotationId = if &merged.id == first { second } else { first };
        self.replace_slots(absorbed, Vec::new());
        self.rotations.remove(absorbed);

        let existing: Vec<Slot> = self.slots_of(&merged.id).cloned().collect();
        let slots: Vec<Slot> = reconcile_slots(&merged, &existing)?;
        let kept: RotationId = merged.id.clone();
        self.replace_slots(&kept, slots);
        info!(rotation_id = %kept, route = %merged.route(), "Merged rotations");
        self.rotations.insert(kept.clone(), merged);
        Ok(kept)
    }

    /// Rebuilds an unassigned rotation from new legs, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the rotation is missing or staffed, or the legs are empty.
    pub fn replace_legs(&mut self, rotation_id: &RotationId, legs: Vec<FlightLeg>) -> Result<(), CoreError> {
        let mut rotation: Rotation = self.rotation(rotation_id)?.clone();
        self.ensure_unoccupied(rotation_id)?;
        rotation.replace_legs(legs, &self.config)?;

        let existing: Vec<Slot> = self.slots_of(rotation_id).cloned().collect();
        let slots: Vec<Slot> = reconcile_slots(&rotation, &existing)?;
        self.replace_slots(rotation_id, slots);
        self.rotations.insert(rotation_id.clone(), rotation);
        Ok(())
    }

    /// Adds one slot of `role` to a rotation and grows its crew.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RotationNotFound` for an unknown id.
    pub fn add_slot(&mut self, rotation_id: &RotationId, role: Role) -> Result<SlotId, CoreError> {
        let mut rotation: Rotation = self.rotation(rotation_id)?.clone();
        let existing: Vec<Slot> = self.slots_of(rotation_id).cloned().collect();
        let current: CrewDistribution = rotation.distribution;
        rotation.set_distribution(current.with_count(role, current.count(role).saturating_add(1)));

        let slots: Vec<Slot> = reconcile_slots(&rotation, &existing)?;
        let added: SlotId = slots
            .iter()
            .map(|slot: &Slot| &slot.id)
            .find(|slot_id: &&SlotId| !self.slots.contains_key(*slot_id))
            .cloned()
            .ok_or_else(|| {
                DomainError::InvalidCrewDistribution(format!("no {role} slot added to {rotation_id}"))
            })?;
        self.replace_slots(rotation_id, slots);
        self.rotations.insert(rotation_id.clone(), rotation);
        Ok(added)
    }

    /// Removes an empty slot and shrinks its rotation's crew.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is missing or occupied.
    pub fn remove_slot(&mut self, slot_id: &SlotId) -> Result<Slot, CoreError> {
        let slot: &Slot = self.slot(slot_id)?;
        if let Some(pilot_id) = &slot.occupant {
            return Err(CoreError::SlotOccupied {
                slot_id: slot_id.clone(),
                pilot_id: pilot_id.clone(),
            });
        }
        let rotation_id: RotationId = slot.rotation_id.clone();
        let mut rotation: Rotation = self.rotation(&rotation_id)?.clone();

        let removed: Slot = self
            .slots
            .remove(slot_id)
            .ok_or_else(|| CoreError::SlotNotFound(slot_id.clone()))?;
        let remaining: Vec<Slot> = self.slots_of(&rotation_id).cloned().collect();
        rotation.set_distribution(distribution_of(&remaining));
        self.rotations.insert(rotation_id, rotation);
        Ok(removed)
    }

    // ========================================================================
    // Timelines
    // ========================================================================

    /// Inserts an entry and credits its flight time. The pilot's location
    /// is re-read from the timeline, so an entry earlier than the rest does
    /// not move them.
    fn commit(&mut self, index: usize, entry: Assignment) -> AssignmentId {
        let id: AssignmentId = entry.id.clone();
        self.pilot_states[index]
            .ledger
            .credit(entry.start.date(), entry.flight_time);
        self.timelines[index].insert(entry);
        self.refresh_location(index);
        id
    }

    /// Reverses `commit` for an entry already taken off the timeline.
    fn withdraw(&mut self, index: usize, entry: &Assignment) {
        self.pilot_states[index]
            .ledger
            .debit(entry.start.date(), entry.flight_time);
        self.refresh_location(index);
    }

    /// Location after the latest-ending duty with a destination, else base.
    /// Both `commit` and `withdraw` go through here.
    fn refresh_location(&mut self, index: usize) {
        let location: Station = self.timelines[index]
            .iter()
            .filter(|entry: &&Assignment| entry.is_operational() && entry.destination.is_some())
            .fold(None, |latest: Option<&Assignment>, entry: &Assignment| match latest {
                Some(current) if entry.end <= current.end => Some(current),
                _ => Some(entry),
            })
            .and_then(|entry: &Assignment| entry.destination.clone())
            .unwrap_or_else(|| self.pilots[index].base.clone());
        self.pilot_states[index].location = location;
    }

    fn rebuild_ledger(&mut self, index: usize) {
        let state: &mut PilotState = &mut self.pilot_states[index];
        state.ledger = FlightHourLedger::new();
        for entry in &self.timelines[index] {
            state.ledger.credit(entry.start.date(), entry.flight_time);
        }
    }

    /// Places the pilot in the slot without validating.
    ///
    /// Fills the slot, inserts the rotation entry, moves the pilot to the
    /// rotation's destination and credits its flight time.
    ///
    /// # Errors
    ///
    /// Returns an error if the pilot, slot or rotation is missing, or the slot is filled.
    pub fn register_assignment(
        &mut self,
        pilot_id: &PilotId,
        slot_id: &SlotId,
    ) -> Result<AssignmentId, CoreError> {
        let index: usize = self.pilot_position(pilot_id)?;
        let slot: &Slot = self.slot(slot_id)?;
        if let Some(occupant) = &slot.occupant {
            return Err(CoreError::SlotAlreadyFilled {
                slot_id: slot_id.clone(),
                pilot_id: occupant.clone(),
            });
        }
        let rotation: Rotation = self.rotation(&slot.rotation_id)?.clone();

        let id: AssignmentId = self.allocate_assignment_id();
        let id: AssignmentId = self.commit(index, rotation_entry(id, &rotation, slot_id));
        if let Some(slot) = self.slots.get_mut(slot_id) {
            slot.occupant = Some(pilot_id.clone());
        }
        debug!(pilot_id = %pilot_id, slot_id = %slot_id, assignment_id = %id, "Registered assignment");
        Ok(id)
    }

    /// Inserts a positioning deadhead on `date` inside the configured window.
    ///
    /// # Errors
    ///
    /// Returns an error if the pilot is unknown or the stations coincide.
    pub fn register_deadhead(
        &mut self,
        pilot_id: &PilotId,
        origin: Station,
        destination: Station,
        date: Date,
        related: Option<RotationId>,
    ) -> Result<AssignmentId, CoreError> {
        let index: usize = self.pilot_position(pilot_id)?;
        let entry: Assignment = scheduled_deadhead_entry(
            assignment_id(self.next_assignment),
            origin,
            destination,
            date,
            related,
            &self.config,
        )?;
        self.next_assignment += 1;
        debug!(
            pilot_id = %pilot_id,
            origin = ?entry.origin,
            destination = ?entry.destination,
            %date,
            "Registered deadhead"
        );
        Ok(self.commit(index, entry))
    }

    /// Empties a slot: the exact inverse of `register_assignment`.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot is missing or empty.
    pub fn unassign(&mut self, slot_id: &SlotId) -> Result<Option<Assignment>, CoreError> {
        let pilot_id: PilotId = self
            .slot(slot_id)?
            .occupant
            .clone()
            .ok_or_else(|| CoreError::SlotNotOccupied(slot_id.clone()))?;
        let index: usize = self.pilot_position(&pilot_id)?;

        if let Some(slot) = self.slots.get_mut(slot_id) {
            slot.occupant = None;
        }
        let removed: Option<Assignment> = self.timelines[index].remove_by_slot(slot_id);
        if let Some(entry) = &removed {
            self.withdraw(index, entry);
        }
        debug!(pilot_id = %pilot_id, slot_id = %slot_id, "Unassigned slot");
        Ok(removed)
    }

    /// Adds a manual event to a pilot's timeline.
    ///
    /// # Errors
    ///
    /// Returns an error for rotation entries, inverted windows, deadheads
    /// missing stations or breaking the daily ceilings, and duty colliding
    /// with existing duty.
    pub fn add_event(
        &mut self,
        pilot_id: &PilotId,
        request: &EventRequest,
    ) -> Result<AssignmentId, CoreError> {
        let index: usize = self.pilot_position(pilot_id)?;
        if request.kind == AssignmentKind::Rot {
            return Err(CoreError::UnsupportedEventKind(request.kind));
        }
        request.check_window()?;

        if request.kind.is_operational()
            && let Some(existing) =
                find_conflict(&self.timelines[index], request.start, request.end, None)
        {
            return Err(CoreError::ScheduleConflict {
                pilot_id: pilot_id.clone(),
                with: existing.id.clone(),
            });
        }

        let entry: Assignment = match request.kind {
            AssignmentKind::Rot => return Err(CoreError::UnsupportedEventKind(request.kind)),
            AssignmentKind::Dh => {
                let (origin, destination) = request.deadhead_stations()?;
                let existing: DailyDuty =
                    daily_totals(&self.timelines[index], request.start.date(), None);
                check_manual_deadhead(existing, request, &self.config).map_err(
                    |violation| CoreError::EventRejected {
                        pilot_id: pilot_id.clone(),
                        violation,
                    },
                )?;
                let id: AssignmentId = self.allocate_assignment_id();
                manual_deadhead_entry(id, request, origin, destination, &self.config)
            }
            AssignmentKind::Trn | AssignmentKind::Ofi => {
                let base: Station = self.pilots[index].base.clone();
                let id: AssignmentId = self.allocate_assignment_id();
                let mut entry: Assignment =
                    ground_duty_entry(id, request.kind, request.start, request.end, &base);
                entry.notes.clone_from(&request.notes);
                entry
            }
            AssignmentKind::Free
            | AssignmentKind::Off
            | AssignmentKind::Vac
            | AssignmentKind::Lus
            | AssignmentKind::Inc => {
                let id: AssignmentId = self.allocate_assignment_id();
                let mut entry: Assignment =
                    day_off_entry(id, request.kind, request.start.date(), request.end.date());
                entry.notes.clone_from(&request.notes);
                entry
            }
        };
        info!(pilot_id = %pilot_id, kind = %request.kind, "Added event");
        Ok(self.commit(index, entry))
    }

    /// Removes one entry, emptying any slot it filled.
    ///
    /// # Errors
    ///
    /// Returns an error if the pilot or entry does not exist.
    pub fn remove_event(
        &mut self,
        pilot_id: &PilotId,
        assignment_id: &AssignmentId,
    ) -> Result<Assignment, CoreError> {
        let index: usize = self.pilot_position(pilot_id)?;
        let removed: Assignment = self.timelines[index]
            .remove_by_id(assignment_id)
            .ok_or_else(|| CoreError::AssignmentNotFound {
                pilot_id: pilot_id.clone(),
                assignment_id: assignment_id.clone(),
            })?;
        if let Some(slot_id) = &removed.slot_id {
            self.vacate(slot_id, pilot_id);
        }
        self.withdraw(index, &removed);
        Ok(removed)
    }

    fn vacate(&mut self, slot_id: &SlotId, pilot_id: &PilotId) {
        if let Some(slot) = self.slots.get_mut(slot_id)
            && slot.occupant.as_ref() == Some(pilot_id)
        {
            slot.occupant = None;
        }
    }

    /// Drops every rotation and deadhead entry of one pilot and empties
    /// their slots. Other entries stay.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::PilotNotFound` for an unknown id.
    pub fn clear_pilot(&mut self, pilot_id: &PilotId) -> Result<Vec<Assignment>, CoreError> {
        let index: usize = self.pilot_position(pilot_id)?;
        let removed: Vec<Assignment> = self.strip_flying(index);
        for slot_id in removed.iter().filter_map(|entry: &Assignment| entry.slot_id.as_ref()) {
            self.vacate(slot_id, pilot_id);
        }
        info!(pilot_id = %pilot_id, removed = removed.len(), "Cleared pilot");
        Ok(removed)
    }

    fn strip_flying(&mut self, index: usize) -> Vec<Assignment> {
        let removed: Vec<Assignment> = self.timelines[index]
            .iter()
            .filter(|entry: &&Assignment| is_flying(entry.kind))
            .cloned()
            .collect();
        self.timelines[index].retain(|entry: &Assignment| !is_flying(entry.kind));
        self.rebuild_ledger(index);
        self.refresh_location(index);
        removed
    }

    /// Returns every pilot to their starting position for an assignment run.
    ///
    /// Rotation and deadhead entries go, everything else stays, all slots
    /// are emptied and assignment numbering resumes after the highest id left.
    pub fn reset_for_run(&mut self) {
        for index in 0..self.pilots.len() {
            self.strip_flying(index);
        }
        for slot in self.slots.values_mut() {
            slot.occupant = None;
        }
        let highest: u32 = self
            .timelines
            .iter()
            .flat_map(Timeline::iter)
            .filter_map(|entry: &Assignment| assignment_sequence(&entry.id))
            .max()
            .unwrap_or(0);
        self.next_assignment = highest + 1;
    }
}

const fn is_flying(kind: AssignmentKind) -> bool {
    matches!(kind, AssignmentKind::Rot | AssignmentKind::Dh)
}
