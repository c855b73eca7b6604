// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::parse::RecordParseError;
use flex_crew::CoreError;
use flex_crew_domain::{DomainError, RuleViolation};

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A CSV file is not shaped like an itinerary export.
    InvalidCsvFormat {
        /// Why the file was rejected.
        reason: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidCsvFormat { reason } => write!(f, "Invalid CSV format: {reason}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RecordParseError> for ApiError {
    fn from(err: RecordParseError) -> Self {
        match err {
            RecordParseError::Domain { field, source } => match translate_domain_error(source) {
                Self::InvalidInput { message, .. } => Self::InvalidInput {
                    field: field.to_string(),
                    message,
                },
                other => other,
            },
            other => Self::InvalidInput {
                field: other.field().to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Short machine-readable name of a hard rule.
#[must_use]
pub const fn rule_name(violation: &RuleViolation) -> &'static str {
    match violation {
        RuleViolation::RoleIncompatible { .. } => "role_compatibility",
        RuleViolation::TailNotQualified { .. } => "tail_qualification",
        RuleViolation::Unavailable { .. } => "availability",
        RuleViolation::ScheduleConflict { .. } => "schedule_conflict",
        RuleViolation::InsufficientRest { .. } => "minimum_rest",
        RuleViolation::EarlyStart { .. } => "next_day_start",
        RuleViolation::MonthlyHoursExceeded { .. } => "monthly_flight_hours",
        RuleViolation::FortnightHoursExceeded { .. } => "fortnight_flight_hours",
        RuleViolation::DailyFlightTimeExceeded { .. } => "daily_flight_time",
        RuleViolation::DailyDutyExceeded { .. } => "daily_service_time",
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStation(msg) => ApiError::InvalidInput {
            field: String::from("station"),
            message: msg,
        },
        DomainError::InvalidStationPair(msg) => ApiError::InvalidInput {
            field: String::from("station_pair"),
            message: format!("'{msg}' is not of the form ORIGIN-DESTINATION"),
        },
        DomainError::InvalidRole(msg) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("'{msg}' is not one of CAP, COP or CRP"),
        },
        DomainError::InvalidAssignmentKind(msg) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("'{msg}' is not a known event kind"),
        },
        DomainError::InvalidCrewDistribution(msg) => ApiError::InvalidInput {
            field: String::from("distribution"),
            message: msg,
        },
        DomainError::InvalidHours(value) => ApiError::InvalidInput {
            field: String::from("hours"),
            message: format!("{value} is not between 0 and 9000 hours"),
        },
        DomainError::InvalidConfig { field, reason } => ApiError::InvalidInput {
            field: format!("config.{field}"),
            message: reason,
        },
        DomainError::DuplicatePilot(pilot_id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_pilot_id"),
            message: format!("Pilot '{pilot_id}' appears more than once"),
        },
        DomainError::InvalidPilot { pilot_id, reason } => ApiError::InvalidInput {
            field: String::from("pilot"),
            message: format!("{pilot_id}: {reason}"),
        },
        DomainError::InvalidLeg { designator, reason } => ApiError::InvalidInput {
            field: String::from("leg"),
            message: format!("{designator}: {reason}"),
        },
        DomainError::EmptyRotation => ApiError::InvalidInput {
            field: String::from("legs"),
            message: String::from("A rotation needs at least one flight leg"),
        },
        DomainError::InvalidMerge(msg) => ApiError::DomainRuleViolation {
            rule: String::from("rotation_merge"),
            message: msg,
        },
        err @ DomainError::OccupiedSlotRemoval { .. } => ApiError::DomainRuleViolation {
            rule: String::from("occupied_slot"),
            message: err.to_string(),
        },
        DomainError::InvalidEventWindow { window } => ApiError::InvalidInput {
            field: String::from("end"),
            message: format!("Event ends before it starts: {window}"),
        },
        DomainError::DegenerateDeadhead(station) => ApiError::InvalidInput {
            field: String::from("destination"),
            message: format!("Deadhead origin and destination are both {station}"),
        },
        err @ DomainError::DateArithmeticOverflow { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::PilotNotFound(pilot_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Pilot"),
            message: format!("Pilot '{pilot_id}' does not exist"),
        },
        CoreError::SlotNotFound(slot_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: format!("Slot '{slot_id}' does not exist"),
        },
        CoreError::RotationNotFound(rotation_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Rotation"),
            message: format!("Rotation '{rotation_id}' does not exist"),
        },
        CoreError::AssignmentNotFound {
            pilot_id,
            assignment_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Assignment"),
            message: format!("Pilot '{pilot_id}' has no entry '{assignment_id}'"),
        },
        CoreError::AssignmentRejected {
            pilot_id,
            slot_id,
            violations,
        } => ApiError::DomainRuleViolation {
            rule: violations
                .first()
                .map_or("assignment", rule_name)
                .to_string(),
            message: format!(
                "Pilot '{pilot_id}' cannot fill {slot_id}: {}",
                violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<String>>()
                    .join("; ")
            ),
        },
        CoreError::EventRejected {
            pilot_id,
            violation,
        } => ApiError::DomainRuleViolation {
            rule: rule_name(&violation).to_string(),
            message: format!("Event rejected for pilot '{pilot_id}': {violation}"),
        },
        err @ (CoreError::SlotOccupied { .. } | CoreError::SlotAlreadyFilled { .. }) => {
            ApiError::DomainRuleViolation {
                rule: String::from("slot_occupancy"),
                message: err.to_string(),
            }
        }
        err @ CoreError::SlotNotOccupied(_) => ApiError::DomainRuleViolation {
            rule: String::from("slot_occupancy"),
            message: err.to_string(),
        },
        err @ CoreError::RotationHasAssignments(_) => ApiError::DomainRuleViolation {
            rule: String::from("staffed_rotation"),
            message: err.to_string(),
        },
        err @ CoreError::UnsupportedEventKind(_) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: err.to_string(),
        },
        err @ CoreError::ScheduleConflict { .. } => ApiError::DomainRuleViolation {
            rule: String::from("schedule_conflict"),
            message: err.to_string(),
        },
    }
}
