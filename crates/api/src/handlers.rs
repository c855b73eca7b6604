// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handlers translating between import records and the roster engine.

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::parse::{parse_event, parse_leg, parse_pilot};
use crate::request_response::{
    AssignmentRunResponse, AuditResponse, CommandRequest, CommandResponse, FlightLegRecord,
    LoadRosterResponse, PilotRecord, RosterBundle,
};
use crate::views::audit_view;
use flex_crew::{
    ApplyOutcome, AssignmentRunSummary, Command, EventRequest, RankingStrategy, RosterState,
    apply, auto_assign,
};
use flex_crew_domain::{
    Assignment, AssignmentId, FlightLeg, Pilot, PilotId, Role, RosterConfig, RotationId, SlotId,
};
use tracing::info;

/// Parses leg records, naming the offending leg on failure.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for the first record that does not parse.
pub fn parse_legs(records: &[FlightLegRecord]) -> Result<Vec<FlightLeg>, ApiError> {
    records
        .iter()
        .enumerate()
        .map(|(idx, record): (usize, &FlightLegRecord)| {
            parse_leg(record).map_err(|err| match ApiError::from(err) {
                ApiError::InvalidInput { field, message } => ApiError::InvalidInput {
                    field: format!("legs[{idx}].{field}"),
                    message,
                },
                other => other,
            })
        })
        .collect()
}

/// Parses pilot records, naming the offending pilot on failure.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for the first record that does not parse.
pub fn parse_pilots(records: &[PilotRecord]) -> Result<Vec<Pilot>, ApiError> {
    records
        .iter()
        .map(|record: &PilotRecord| {
            parse_pilot(record).map_err(|err| match ApiError::from(err) {
                ApiError::InvalidInput { field, message } => ApiError::InvalidInput {
                    field: format!("pilots[{}].{field}", record.id.trim()),
                    message,
                },
                other => other,
            })
        })
        .collect()
}

/// Builds a roster from a bundle: pilots with their preloaded days, then
/// rotations and slots from the legs.
///
/// `config_override` wins over the bundle's own `config`; with neither,
/// the default rules apply.
///
/// # Errors
///
/// Returns an error if a record does not parse, the configuration is
/// invalid, or a pilot id repeats.
pub fn load_roster(
    bundle: &RosterBundle,
    config_override: Option<RosterConfig>,
) -> Result<RosterState, ApiError> {
    let config: RosterConfig = config_override
        .or_else(|| bundle.config.clone())
        .unwrap_or_default();

    let pilots: Vec<Pilot> = parse_pilots(&bundle.pilots)?;
    let legs: Vec<FlightLeg> = parse_legs(&bundle.legs)?;

    let mut state: RosterState = RosterState::new(config, pilots).map_err(translate_core_error)?;
    let rotations: usize = state.load_rotations(&legs);
    info!(
        pilots = state.pilots().len(),
        legs = legs.len(),
        rotations,
        "Loaded roster"
    );
    Ok(state)
}

/// Replaces every rotation with those built from a new itinerary.
///
/// Flying assignments are discarded; ground duty and days off stay.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a leg record does not parse.
pub fn load_itinerary(
    state: &mut RosterState,
    records: &[FlightLegRecord],
) -> Result<LoadRosterResponse, ApiError> {
    let legs: Vec<FlightLeg> = parse_legs(records)?;
    let rotations: usize = state.load_rotations(&legs);
    info!(legs = legs.len(), rotations, "Loaded itinerary");
    Ok(roster_overview(state))
}

/// Counts of what a roster holds.
#[must_use]
pub fn roster_overview(state: &RosterState) -> LoadRosterResponse {
    let pilots: usize = state.pilots().len();
    let rotations: usize = state.rotations().count();
    let slots: usize = state.slots().count();
    LoadRosterResponse {
        pilots,
        rotations,
        slots,
        message: format!("{pilots} pilots, {rotations} rotations, {slots} slots"),
    }
}

/// Runs automatic assignment with the named ranking strategy.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown strategy.
pub fn run_assignment(
    state: &mut RosterState,
    strategy: &str,
) -> Result<AssignmentRunResponse, ApiError> {
    let strategy: RankingStrategy =
        strategy
            .parse()
            .map_err(|message: String| ApiError::InvalidInput {
                field: String::from("strategy"),
                message,
            })?;
    let summary: AssignmentRunSummary =
        auto_assign(state, strategy).map_err(translate_core_error)?;
    info!(
        strategy = %strategy,
        assigned = summary.assigned,
        unassigned = summary.unassigned,
        "Handled assignment run"
    );
    Ok(AssignmentRunResponse::from_summary(strategy.as_str(), &summary))
}

/// Translates a command request into a core command.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if an embedded event, leg or role does not parse.
pub fn to_command(request: CommandRequest) -> Result<Command, ApiError> {
    let command: Command = match request {
        CommandRequest::AssignSlot { pilot_id, slot_id } => Command::AssignSlot {
            pilot_id: PilotId::new(&pilot_id),
            slot_id: SlotId::new(&slot_id),
        },
        CommandRequest::MoveAssignment { slot_id, to_pilot } => Command::MoveAssignment {
            slot_id: SlotId::new(&slot_id),
            to_pilot: PilotId::new(&to_pilot),
        },
        CommandRequest::UnassignSlot { slot_id } => Command::UnassignSlot {
            slot_id: SlotId::new(&slot_id),
        },
        CommandRequest::AddEvent { pilot_id, event } => {
            let event: EventRequest = parse_event(&event)?;
            Command::AddEvent {
                pilot_id: PilotId::new(&pilot_id),
                event,
            }
        }
        CommandRequest::RemoveEvent {
            pilot_id,
            assignment_id,
        } => Command::RemoveEvent {
            pilot_id: PilotId::new(&pilot_id),
            assignment_id: AssignmentId::new(&assignment_id),
        },
        CommandRequest::ClearPilot { pilot_id } => Command::ClearPilot {
            pilot_id: PilotId::new(&pilot_id),
        },
        CommandRequest::DeleteRotation { rotation_id } => Command::DeleteRotation {
            rotation_id: RotationId::new(&rotation_id),
        },
        CommandRequest::MergeRotations { first, second } => Command::MergeRotations {
            first: RotationId::new(&first),
            second: RotationId::new(&second),
        },
        CommandRequest::ReplaceLegs { rotation_id, legs } => Command::ReplaceLegs {
            rotation_id: RotationId::new(&rotation_id),
            legs: parse_legs(&legs)?,
        },
        CommandRequest::AddSlot { rotation_id, role } => {
            let role: Role = role.parse().map_err(translate_domain_error)?;
            Command::AddSlot {
                rotation_id: RotationId::new(&rotation_id),
                role,
            }
        }
        CommandRequest::RemoveSlot { slot_id } => Command::RemoveSlot {
            slot_id: SlotId::new(&slot_id),
        },
    };
    Ok(command)
}

/// Applies a manual edit to the roster.
///
/// # Errors
///
/// Returns an error if the request does not parse or the roster rejects
/// the edit; a rejected edit changes nothing.
pub fn apply_command(
    state: &mut RosterState,
    request: CommandRequest,
) -> Result<CommandResponse, ApiError> {
    let command: Command = to_command(request)?;
    let outcome: ApplyOutcome = apply(state, command).map_err(translate_core_error)?;
    info!(
        action = outcome.action,
        added = outcome.added.len(),
        removed = outcome.removed.len(),
        "Handled command"
    );

    Ok(CommandResponse {
        action: outcome.action.to_string(),
        added: outcome.added.iter().map(ToString::to_string).collect(),
        removed: outcome
            .removed
            .iter()
            .map(|entry: &Assignment| entry.id.to_string())
            .collect(),
        deadhead: outcome.deadhead.as_ref().map(ToString::to_string),
        warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
        rotation_id: outcome.rotation.as_ref().map(ToString::to_string),
        slot_id: outcome.slot.as_ref().map(ToString::to_string),
    })
}

/// Audits every timeline in the roster.
#[must_use]
pub fn audit_roster(state: &RosterState) -> AuditResponse {
    let response: AuditResponse = audit_view(&state.audit());
    info!(
        errors = response.errors.len(),
        warnings = response.warnings.len(),
        "Handled audit"
    );
    response
}
