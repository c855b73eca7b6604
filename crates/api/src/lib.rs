// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Import boundary for the flex crew rostering engine.
//!
//! Callers hand over loosely formatted records; this crate parses them into
//! domain values, drives the engine, and renders results as plain DTOs.

mod csv_import;
mod error;
mod handlers;
mod parse;
mod request_response;
mod views;

#[cfg(test)]
mod tests;

pub use csv_import::{ItineraryImport, import_itinerary_csv};
pub use error::{ApiError, rule_name, translate_core_error, translate_domain_error};
pub use handlers::{
    apply_command, audit_roster, load_itinerary, load_roster, parse_legs, parse_pilots,
    roster_overview, run_assignment, to_command,
};
pub use parse::{
    RecordParseError, parse_clock_time, parse_date, parse_date_list, parse_event, parse_hours,
    parse_leg, parse_pilot, parse_roles,
};
pub use request_response::{
    AssignmentRunResponse, AuditFindingInfo, AuditResponse, CommandRequest, CommandResponse,
    DeadheadInfo, EventRecord, FlightHoursResponse, FlightLegRecord, ListField,
    ListRotationsResponse, ListSlotsResponse, LoadRosterResponse, MonthHours, PilotHoursInfo,
    PilotRecord, PilotTimelineInfo, RosterBundle, RotationInfo, SlotInfo, TimelineEntryInfo,
    TimelinesResponse, UnassignedSlotsResponse,
};
pub use views::{
    audit_view, flight_hours_view, format_instant, rotations_view, slots_view, timelines_view,
    unassigned_view,
};
