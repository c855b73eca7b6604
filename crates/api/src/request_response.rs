// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use flex_crew::{AssignmentRunSummary, DeadheadRecord};
use flex_crew_audit::AuditSummary;
use flex_crew_domain::RosterConfig;
use serde::{Deserialize, Serialize};

// ============================================================================
// Import records
// ============================================================================

/// A list that may arrive as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    /// `["A", "B"]`
    Items(Vec<String>),
    /// `"A, B"`
    Joined(String),
}

impl Default for ListField {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

impl ListField {
    /// Non-blank entries, trimmed.
    pub fn entries(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Self::Items(items) => Box::new(
                items
                    .iter()
                    .flat_map(|item: &String| item.split(','))
                    .map(str::trim)
                    .filter(|entry: &&str| !entry.is_empty()),
            ),
            Self::Joined(text) => Box::new(
                text.split(',')
                    .map(str::trim)
                    .filter(|entry: &&str| !entry.is_empty()),
            ),
        }
    }
}

/// One flight leg as exported by the scheduling system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLegRecord {
    /// Aircraft registration. May be blank.
    #[serde(default)]
    pub tail: String,
    pub departure_station: String,
    pub arrival_station: String,
    /// Departure date.
    pub date: String,
    /// `H:MM` or `HH:MM`.
    pub departure_time: String,
    /// `H:MM` or `HH:MM`.
    pub arrival_time: String,
    /// Arrival date, when it differs from the departure date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
    #[serde(default)]
    pub flight_designator: String,
}

/// One pilot as exported by the crew management system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub base: String,
    /// One or more of `CAP`, `COP`, `CRP`, separated by `/` or `,`.
    pub role: String,
    #[serde(default)]
    pub qualified_tails: ListField,
    #[serde(default)]
    pub relief_tails: ListField,
    #[serde(default)]
    pub free_days: ListField,
    #[serde(default)]
    pub absence_days: ListField,
    #[serde(default)]
    pub training_days: ListField,
    /// Lower is more senior. Missing means least senior.
    #[serde(default)]
    pub seniority: Option<u32>,
}

/// Everything needed to build a roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterBundle {
    /// Overrides the default rules when present.
    #[serde(default)]
    pub config: Option<RosterConfig>,
    pub pilots: Vec<PilotRecord>,
    #[serde(default)]
    pub legs: Vec<FlightLegRecord>,
}

/// A manual timeline event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// `DH`, `TRN`, `OFI`, `FREE`, `OFF`, `VAC`, `LUS` or `INC`.
    pub kind: String,
    pub start_date: String,
    /// Required for duty kinds.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Defaults to the start date.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Required for duty kinds.
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub flight_time_hours: Option<f64>,
    #[serde(default)]
    pub duty_time_hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

// ============================================================================
// Commands
// ============================================================================

/// A manual edit, keyed by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CommandRequest {
    AssignSlot {
        pilot_id: String,
        slot_id: String,
    },
    MoveAssignment {
        slot_id: String,
        to_pilot: String,
    },
    UnassignSlot {
        slot_id: String,
    },
    AddEvent {
        pilot_id: String,
        event: EventRecord,
    },
    RemoveEvent {
        pilot_id: String,
        assignment_id: String,
    },
    ClearPilot {
        pilot_id: String,
    },
    DeleteRotation {
        rotation_id: String,
    },
    MergeRotations {
        first: String,
        second: String,
    },
    ReplaceLegs {
        rotation_id: String,
        legs: Vec<FlightLegRecord>,
    },
    AddSlot {
        rotation_id: String,
        role: String,
    },
    RemoveSlot {
        slot_id: String,
    },
}

// ============================================================================
// Responses
// ============================================================================

/// What loading a roster produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRosterResponse {
    pub pilots: usize,
    pub rotations: usize,
    pub slots: usize,
    pub message: String,
}

/// A rotation as shown to planners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationInfo {
    pub rotation_id: String,
    pub tail: String,
    pub route: String,
    pub start: String,
    pub end: String,
    pub flight_time_hours: f64,
    pub service_time_hours: f64,
    pub crew_size: u8,
    /// Distribution description, e.g. `1 CAP, 1 COP`.
    pub distribution: String,
    pub night: bool,
    pub legs: usize,
}

/// All rotations in start order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRotationsResponse {
    pub rotations: Vec<RotationInfo>,
}

/// A slot with its occupant, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    pub slot_id: String,
    pub rotation_id: String,
    pub role: String,
    pub pilot_id: Option<String>,
    pub pilot_name: Option<String>,
}

/// Slots in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSlotsResponse {
    pub slots: Vec<SlotInfo>,
}

/// Empty slots, earliest rotation first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignedSlotsResponse {
    pub slots: Vec<SlotInfo>,
}

/// One timeline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntryInfo {
    pub assignment_id: String,
    pub kind: String,
    pub start: String,
    pub end: String,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub flight_time_hours: f64,
    pub duty_time_hours: f64,
    pub rotation_id: Option<String>,
    pub slot_id: Option<String>,
    pub preloaded: bool,
    pub notes: Option<String>,
}

/// One pilot's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotTimelineInfo {
    pub pilot_id: String,
    pub pilot_name: String,
    pub base: String,
    pub location: String,
    pub entries: Vec<TimelineEntryInfo>,
}

/// Every pilot's timeline in import order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinesResponse {
    pub pilots: Vec<PilotTimelineInfo>,
}

/// Flight hours credited to one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthHours {
    /// `YYYY-MM`.
    pub month: String,
    pub hours: f64,
}

/// One pilot's credited flight hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotHoursInfo {
    pub pilot_id: String,
    pub pilot_name: String,
    pub seniority: u32,
    pub total_hours: f64,
    pub months: Vec<MonthHours>,
}

/// Every pilot's credited flight hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightHoursResponse {
    pub pilots: Vec<PilotHoursInfo>,
}

/// A deadhead the automatic run booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadheadInfo {
    pub assignment_id: String,
    pub pilot_id: String,
    pub pilot_name: String,
    pub route: String,
    pub date: String,
    /// Absent for the trip home after the last duty.
    pub rotation_id: Option<String>,
}

impl From<&DeadheadRecord> for DeadheadInfo {
    fn from(record: &DeadheadRecord) -> Self {
        Self {
            assignment_id: record.assignment_id.to_string(),
            pilot_id: record.pilot_id.to_string(),
            pilot_name: record.pilot_name.clone(),
            route: format!("{}-{}", record.origin, record.destination),
            date: record.date.to_string(),
            rotation_id: record.rotation_id.as_ref().map(ToString::to_string),
        }
    }
}

/// Outcome of an automatic assignment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRunResponse {
    pub strategy: String,
    pub assigned: usize,
    pub unassigned: usize,
    pub deadheads_used: usize,
    pub deadheads: Vec<DeadheadInfo>,
    pub unassigned_slots: Vec<String>,
}

impl AssignmentRunResponse {
    pub(crate) fn from_summary(strategy: &str, summary: &AssignmentRunSummary) -> Self {
        Self {
            strategy: strategy.to_string(),
            assigned: summary.assigned,
            unassigned: summary.unassigned,
            deadheads_used: summary.deadheads_used,
            deadheads: summary.deadheads.iter().map(DeadheadInfo::from).collect(),
            unassigned_slots: summary
                .unassigned_slots
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// What a manual edit changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub action: String,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub deadhead: Option<String>,
    pub warnings: Vec<String>,
    pub rotation_id: Option<String>,
    pub slot_id: Option<String>,
}

/// One audit finding, rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFindingInfo {
    pub severity: String,
    pub pilot_id: String,
    pub pilot_name: String,
    pub date: String,
    pub assignment_id: String,
    pub message: String,
}

/// The audit of the current roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResponse {
    pub compliant: bool,
    pub total_entries: usize,
    pub valid_entries: usize,
    pub entries_with_warnings: usize,
    pub entries_with_errors: usize,
    pub errors: Vec<AuditFindingInfo>,
    pub warnings: Vec<AuditFindingInfo>,
}

impl AuditResponse {
    pub(crate) fn new(
        summary: AuditSummary,
        errors: Vec<AuditFindingInfo>,
        warnings: Vec<AuditFindingInfo>,
    ) -> Self {
        Self {
            compliant: errors.is_empty(),
            total_entries: summary.total_entries,
            valid_entries: summary.valid_entries,
            entries_with_warnings: summary.entries_with_warnings,
            entries_with_errors: summary.entries_with_errors,
            errors,
            warnings,
        }
    }
}
