// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only projections of a roster for rendering and export.

use crate::request_response::{
    AuditFindingInfo, AuditResponse, FlightHoursResponse, ListRotationsResponse,
    ListSlotsResponse, MonthHours, PilotHoursInfo, PilotTimelineInfo, RotationInfo, SlotInfo,
    TimelineEntryInfo, TimelinesResponse, UnassignedSlotsResponse,
};
use flex_crew::RosterState;
use flex_crew_audit::{AuditFinding, AuditReport};
use flex_crew_domain::calendar::{MonthKey, duration_hours};
use flex_crew_domain::{Assignment, Pilot, PilotState, Rotation, Slot, Timeline};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, PrimitiveDateTime};

const INSTANT_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Formats an instant as `YYYY-MM-DD HH:MM`.
#[must_use]
pub fn format_instant(instant: PrimitiveDateTime) -> String {
    instant
        .format(INSTANT_FORMAT)
        .unwrap_or_else(|_| instant.to_string())
}

/// Hours rounded to two decimals.
fn hours(duration: Duration) -> f64 {
    (duration_hours(duration) * 100.0).round() / 100.0
}

fn rotation_info(rotation: &Rotation) -> RotationInfo {
    RotationInfo {
        rotation_id: rotation.id.to_string(),
        tail: rotation.tail.to_string(),
        route: rotation.route(),
        start: format_instant(rotation.start),
        end: format_instant(rotation.end),
        flight_time_hours: hours(rotation.flight_time),
        service_time_hours: hours(rotation.service_time),
        crew_size: rotation.crew_size,
        distribution: rotation.distribution.to_string(),
        night: rotation.is_night,
        legs: rotation.legs.len(),
    }
}

fn slot_info(state: &RosterState, slot: &Slot) -> SlotInfo {
    let pilot_name: Option<String> = slot
        .occupant
        .as_ref()
        .and_then(|pilot_id| state.pilot(pilot_id).ok())
        .map(|pilot: &Pilot| pilot.name.clone());
    SlotInfo {
        slot_id: slot.id.to_string(),
        rotation_id: slot.rotation_id.to_string(),
        role: slot.role.to_string(),
        pilot_id: slot.occupant.as_ref().map(ToString::to_string),
        pilot_name,
    }
}

fn entry_info(entry: &Assignment) -> TimelineEntryInfo {
    TimelineEntryInfo {
        assignment_id: entry.id.to_string(),
        kind: entry.kind.to_string(),
        start: format_instant(entry.start),
        end: format_instant(entry.end),
        origin: entry.origin.as_ref().map(ToString::to_string),
        destination: entry.destination.as_ref().map(ToString::to_string),
        flight_time_hours: hours(entry.flight_time),
        duty_time_hours: hours(entry.duty_time),
        rotation_id: entry.rotation_id.as_ref().map(ToString::to_string),
        slot_id: entry.slot_id.as_ref().map(ToString::to_string),
        preloaded: entry.preloaded,
        notes: entry.notes.clone(),
    }
}

fn finding_info(finding: &AuditFinding) -> AuditFindingInfo {
    AuditFindingInfo {
        severity: finding.severity().to_string(),
        pilot_id: finding.pilot_id.to_string(),
        pilot_name: finding.pilot_name.clone(),
        date: finding.date.to_string(),
        assignment_id: finding.assignment_id.to_string(),
        message: finding.kind.to_string(),
    }
}

/// Rotations in start order.
#[must_use]
pub fn rotations_view(state: &RosterState) -> ListRotationsResponse {
    let mut rotations: Vec<&Rotation> = state.rotations().collect();
    rotations.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    ListRotationsResponse {
        rotations: rotations.into_iter().map(rotation_info).collect(),
    }
}

/// Every slot with its occupant.
#[must_use]
pub fn slots_view(state: &RosterState) -> ListSlotsResponse {
    ListSlotsResponse {
        slots: state
            .slots()
            .map(|slot: &Slot| slot_info(state, slot))
            .collect(),
    }
}

/// Empty slots, earliest rotation first.
#[must_use]
pub fn unassigned_view(state: &RosterState) -> UnassignedSlotsResponse {
    UnassignedSlotsResponse {
        slots: state
            .unassigned_slots()
            .into_iter()
            .map(|slot: &Slot| slot_info(state, slot))
            .collect(),
    }
}

/// Every pilot's timeline in import order.
#[must_use]
pub fn timelines_view(state: &RosterState) -> TimelinesResponse {
    let pilots: Vec<PilotTimelineInfo> = state
        .rosters()
        .map(|(pilot, timeline): (&Pilot, &Timeline)| PilotTimelineInfo {
            pilot_id: pilot.id.to_string(),
            pilot_name: pilot.name.clone(),
            base: pilot.base.to_string(),
            location: state
                .pilot_state(&pilot.id)
                .map_or_else(|_| pilot.base.to_string(), |s: &PilotState| s.location.to_string()),
            entries: timeline.iter().map(entry_info).collect(),
        })
        .collect();
    TimelinesResponse { pilots }
}

/// Every pilot's credited flight hours, by month.
#[must_use]
pub fn flight_hours_view(state: &RosterState) -> FlightHoursResponse {
    let pilots: Vec<PilotHoursInfo> = state
        .pilots()
        .iter()
        .filter_map(|pilot: &Pilot| {
            let pilot_state: &PilotState = state.pilot_state(&pilot.id).ok()?;
            Some(PilotHoursInfo {
                pilot_id: pilot.id.to_string(),
                pilot_name: pilot.name.clone(),
                seniority: pilot.seniority,
                total_hours: hours(pilot_state.ledger.total()),
                months: pilot_state
                    .ledger
                    .months()
                    .map(|(key, total): (MonthKey, Duration)| MonthHours {
                        month: format!("{}-{:02}", key.year, key.month),
                        hours: hours(total),
                    })
                    .collect(),
            })
        })
        .collect();
    FlightHoursResponse { pilots }
}

/// Renders an audit report.
#[must_use]
pub fn audit_view(report: &AuditReport) -> AuditResponse {
    AuditResponse::new(
        report.summary,
        report.errors.iter().map(finding_info).collect(),
        report.warnings.iter().map(finding_info).collect(),
    )
}
