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
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assignment;
pub mod calendar;
mod config;
mod error;
mod rotation;
mod slot;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use assignment::{Assignment, FlightHourLedger, PilotState, Timeline};
pub use calendar::Hours;
pub use config::{
    CrewTier, DayWindow, DeadheadWindow, RestBreakpoint, RestTable, RosterConfig, StationPair,
};
pub use error::DomainError;
pub use rotation::{CrewDistribution, Rotation, build_rotations, merge_rotations};
pub use slot::{Slot, distribution_of, reconcile_slots, slot_id, slots_for_rotation};
pub use types::{
    AssignmentId, AssignmentKind, DEFAULT_SENIORITY, FlightLeg, Pilot, PilotId, Role, RotationId,
    SlotId, Station, Tail,
};
pub use validation::{
    Advisory, AssignmentCheck, CheckOptions, DailyDuty, DeadheadSuggestion, GeographicContinuity,
    PilotSchedule, RuleViolation, away_from_base_advisory, check_daily_duty,
    check_flight_hour_caps, check_rest, continuous_days_advisory, daily_totals,
    find_conflict, find_deadhead_date, first_unavailable_date, geographic_continuity,
    had_non_operational_day_before, is_role_compatible, is_tail_qualified, location_before,
    previous_operational, starts_before_cutoff, validate_assignment,
};
