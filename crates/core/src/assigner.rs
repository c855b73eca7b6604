// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The full-roster automatic assignment run.
//!
//! A run resets every pilot, scores each slot by how many pilots could ever
//! fill it, then fills slots from hardest to easiest. Each slot first looks
//! for pilots already at the rotation's origin and only then for pilots who
//! can be deadheaded there. Pilots left away from base at the end are sent
//! home where a route and a free, rested day allow.

use crate::error::CoreError;
use crate::state::RosterState;
use flex_crew_domain::{
    Assignment, AssignmentCheck, AssignmentId, CheckOptions, Pilot, PilotId, PilotSchedule,
    RosterConfig, Rotation, RotationId, Slot, SlotId, Station, Timeline, check_rest,
    first_unavailable_date, is_role_compatible, is_tail_qualified, location_before,
    validate_assignment,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;
use time::{Date, Duration};
use tracing::{debug, info};

/// Difficulty of a slot no pilot could ever fill. Sorts it last.
const UNFILLABLE: u32 = u32::MAX;

/// How candidates for one slot are ranked. The best candidate ranks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingStrategy {
    /// Most senior first (lowest seniority number), then fewest hours.
    Seniority,
    /// Least senior first, then fewest hours.
    ReverseSeniority,
    /// Fewest accumulated flight hours first, then most senior.
    #[default]
    FlightTime,
}

impl RankingStrategy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Seniority => "seniority",
            Self::ReverseSeniority => "reverse-seniority",
            Self::FlightTime => "flight-time",
        }
    }

    /// Orders two candidates, `Less` meaning `left` is preferred.
    fn compare(self, left: &Candidate<'_>, right: &Candidate<'_>) -> Ordering {
        let by_seniority: Ordering = left.seniority.cmp(&right.seniority);
        let by_hours: Ordering = left.flight_hours.cmp(&right.flight_hours);
        match self {
            Self::Seniority => by_seniority.then(by_hours),
            Self::ReverseSeniority => by_seniority.reverse().then(by_hours),
            Self::FlightTime => by_hours.then(by_seniority),
        }
    }
}

impl FromStr for RankingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "seniority" => Ok(Self::Seniority),
            "reverse-seniority" => Ok(Self::ReverseSeniority),
            "flight-time" | "ft-then-seniority" => Ok(Self::FlightTime),
            other => Err(format!("Unknown ranking strategy: {other}")),
        }
    }
}

impl std::fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A deadhead inserted during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadheadRecord {
    pub assignment_id: AssignmentId,
    pub pilot_id: PilotId,
    pub pilot_name: String,
    pub origin: Station,
    pub destination: Station,
    pub date: Date,
    /// The rotation the deadhead positions for. `None` for a return to base.
    pub rotation_id: Option<RotationId>,
}

/// Outcome of one automatic assignment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentRunSummary {
    pub assigned: usize,
    pub unassigned: usize,
    pub deadheads_used: usize,
    pub deadheads: Vec<DeadheadRecord>,
    /// Slots left empty, in processing order.
    pub unassigned_slots: Vec<SlotId>,
}

/// A pilot who passed validation for the slot being filled.
struct Candidate<'a> {
    index: usize,
    seniority: u32,
    flight_hours: Duration,
    positioning: Option<Positioning<'a>>,
}

/// The deadhead a phase-two candidate needs.
struct Positioning<'a> {
    origin: Station,
    destination: &'a Station,
    date: Date,
}

/// Counts pilots who could fill the slot on role, qualification and
/// availability alone.
fn difficulty(pilots: &[Pilot], slot: &Slot, rotation: &Rotation) -> u32 {
    let eligible: usize = pilots
        .iter()
        .filter(|pilot: &&Pilot| {
            is_role_compatible(pilot, slot.role)
                && is_tail_qualified(pilot, &rotation.tail, slot.role)
                && first_unavailable_date(pilot, rotation.start, rotation.end).is_none()
        })
        .count();
    match u32::try_from(eligible) {
        Ok(0) | Err(_) => UNFILLABLE,
        Ok(count) => count,
    }
}

/// Slots in processing order: fewest eligible pilots first, then by rotation
/// start, then id.
fn processing_order(state: &RosterState) -> Vec<SlotId> {
    let mut scored: Vec<(u32, &Rotation, &Slot)> = state
        .slots()
        .filter_map(|slot: &Slot| {
            state
                .rotation(&slot.rotation_id)
                .ok()
                .map(|rotation: &Rotation| (difficulty(state.pilots(), slot, rotation), rotation, slot))
        })
        .collect();
    scored.sort_by(|left, right| {
        left.0
            .cmp(&right.0)
            .then_with(|| left.1.start.cmp(&right.1.start))
            .then_with(|| left.2.id.cmp(&right.2.id))
    });
    scored
        .into_iter()
        .map(|(_, _, slot)| slot.id.clone())
        .collect()
}

/// Picks the best pilot for the slot, trying pilots already at the origin
/// before pilots who need a deadhead.
fn choose_candidate<'a>(
    state: &'a RosterState,
    slot: &Slot,
    rotation: &'a Rotation,
    strategy: RankingStrategy,
) -> Option<Candidate<'a>> {
    let mut at_origin: Vec<Candidate<'a>> = Vec::new();
    let mut needs_deadhead: Vec<Candidate<'a>> = Vec::new();

    for index in 0..state.pilots().len() {
        let schedule: PilotSchedule<'_> = state.schedule_at(index);
        let location: Station = location_before(schedule.pilot, schedule.timeline, rotation.start);
        let in_place: bool = location == rotation.origin;
        if !in_place && !state.config().allows_deadhead(&location, &rotation.origin) {
            continue;
        }

        let check: AssignmentCheck = validate_assignment(
            &schedule,
            rotation,
            slot.role,
            state.config(),
            CheckOptions::without_geography(),
        );
        if !check.is_valid() {
            continue;
        }

        let candidate = |positioning: Option<Positioning<'a>>| Candidate {
            index,
            seniority: schedule.pilot.seniority,
            flight_hours: schedule.state.ledger.total(),
            positioning,
        };
        if in_place {
            at_origin.push(candidate(None));
        } else if let Some(date) = state.deadhead_day_at(index, rotation) {
            needs_deadhead.push(candidate(Some(Positioning {
                origin: location,
                destination: &rotation.origin,
                date,
            })));
        }
    }

    let pool: Vec<Candidate<'a>> = if at_origin.is_empty() {
        needs_deadhead
    } else {
        at_origin
    };
    pool.into_iter()
        .min_by(|left, right| strategy.compare(left, right))
}

/// Runs automatic assignment over every slot to completion.
///
/// Never fails as a whole: slots without an eligible pilot stay empty and
/// are counted in the summary.
///
/// # Errors
///
/// Returns an error only if registering a chosen pilot fails, which means
/// the roster's own bookkeeping is inconsistent.
pub fn auto_assign(
    state: &mut RosterState,
    strategy: RankingStrategy,
) -> Result<AssignmentRunSummary, CoreError> {
    state.reset_for_run();
    let order: Vec<SlotId> = processing_order(state);
    info!(
        slots = order.len(),
        pilots = state.pilots().len(),
        %strategy,
        "Starting assignment run"
    );

    let mut summary: AssignmentRunSummary = AssignmentRunSummary::default();
    for slot_id in order {
        let slot: Slot = state.slot(&slot_id)?.clone();
        let rotation: Rotation = state.rotation(&slot.rotation_id)?.clone();

        let chosen: Option<(PilotId, Option<(Station, Station, Date)>)> =
            choose_candidate(state, &slot, &rotation, strategy).map(|candidate: Candidate<'_>| {
                (
                    state.pilots()[candidate.index].id.clone(),
                    candidate.positioning.map(|positioning: Positioning<'_>| {
                        (
                            positioning.origin,
                            positioning.destination.clone(),
                            positioning.date,
                        )
                    }),
                )
            });

        let Some((pilot_id, positioning)) = chosen else {
            debug!(slot_id = %slot_id, "No eligible pilot");
            summary.unassigned += 1;
            summary.unassigned_slots.push(slot_id);
            continue;
        };

        if let Some((origin, destination, date)) = positioning {
            let record: DeadheadRecord = register_deadhead(
                state,
                &pilot_id,
                origin,
                destination,
                date,
                Some(rotation.id.clone()),
            )?;
            summary.deadheads.push(record);
        }
        state.register_assignment(&pilot_id, &slot_id)?;
        debug!(slot_id = %slot_id, pilot_id = %pilot_id, "Assigned slot");
        summary.assigned += 1;
    }

    reposition_to_base(state, &mut summary)?;
    summary.deadheads_used = summary.deadheads.len();

    info!(
        assigned = summary.assigned,
        unassigned = summary.unassigned,
        deadheads = summary.deadheads_used,
        "Assignment run finished"
    );
    Ok(summary)
}

fn register_deadhead(
    state: &mut RosterState,
    pilot_id: &PilotId,
    origin: Station,
    destination: Station,
    date: Date,
    rotation_id: Option<RotationId>,
) -> Result<DeadheadRecord, CoreError> {
    let assignment_id: AssignmentId = state.register_deadhead(
        pilot_id,
        origin.clone(),
        destination.clone(),
        date,
        rotation_id.clone(),
    )?;
    Ok(DeadheadRecord {
        assignment_id,
        pilot_id: pilot_id.clone(),
        pilot_name: state.pilot(pilot_id)?.name.clone(),
        origin,
        destination,
        date,
        rotation_id,
    })
}

/// Sends pilots whose last entry leaves them away from base home on the
/// first free day they are rested for, when a route exists.
fn reposition_to_base(
    state: &mut RosterState,
    summary: &mut AssignmentRunSummary,
) -> Result<(), CoreError> {
    let mut returns: Vec<(PilotId, Station, Station, Date)> = Vec::new();
    for index in 0..state.pilots().len() {
        let schedule: PilotSchedule<'_> = state.schedule_at(index);
        let Some(last) = schedule.timeline.last_ending() else {
            continue;
        };
        let location: &Station = last.destination.as_ref().unwrap_or(&schedule.state.location);
        let pilot: &Pilot = schedule.pilot;
        if *location == pilot.base {
            continue;
        }
        if !state.config().allows_deadhead(location, &pilot.base) {
            debug!(pilot_id = %pilot.id, location = %location, "No deadhead route home");
            continue;
        }
        let Some(date) = return_day(pilot, schedule.timeline, last, state.config()) else {
            debug!(pilot_id = %pilot.id, location = %location, "No rested day to return home");
            continue;
        };
        returns.push((pilot.id.clone(), location.clone(), pilot.base.clone(), date));
    }

    for (pilot_id, origin, destination, date) in returns {
        let record: DeadheadRecord =
            register_deadhead(state, &pilot_id, origin, destination, date, None)?;
        summary.deadheads.push(record);
    }
    Ok(())
}

/// The first free day after `last`, within the deadhead lookback, on which
/// the pilot is rested by the time the deadhead window opens.
fn return_day(
    pilot: &Pilot,
    timeline: &Timeline,
    last: &Assignment,
    config: &RosterConfig,
) -> Option<Date> {
    let mut day: Date = last.end.date();
    for _ in 0..config.max_deadhead_lookback_days {
        day = day.next_day()?;
        if timeline.has_entry_on(day) {
            return None;
        }
        let (departure, _) = config.deadhead_window.span_on(day)?;
        if check_rest(pilot, timeline, departure, config, None).is_none() {
            return Some(day);
        }
    }
    None
}
