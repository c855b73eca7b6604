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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use flex_crew::RosterState;
use flex_crew_api::{
    ApiError, AssignmentRunResponse, AuditResponse, CommandRequest, CommandResponse,
    FlightHoursResponse, ItineraryImport, ListRotationsResponse, ListSlotsResponse,
    LoadRosterResponse, RosterBundle, TimelinesResponse, UnassignedSlotsResponse, apply_command,
    audit_roster, flight_hours_view, import_itinerary_csv, load_itinerary, load_roster,
    roster_overview, rotations_view, run_assignment, slots_view, timelines_view, unassigned_view,
};
use flex_crew_domain::RosterConfig;
use live::{LiveEvent, LiveEventBroadcaster, handle_live_events};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Flex Crew Server - HTTP server for the crew rostering engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON rules file applied to every roster, overriding any rules a
    /// roster bundle carries.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The roster being planned. Empty until one is loaded.
    roster: Arc<Mutex<Option<RosterState>>>,
    /// Rules from `--config`, if given.
    config: Option<RosterConfig>,
    /// Change notifications for live clients.
    events: Arc<LiveEventBroadcaster>,
}

impl AppState {
    fn new(config: Option<RosterConfig>) -> Self {
        Self {
            roster: Arc::new(Mutex::new(None)),
            config,
            events: Arc::new(LiveEventBroadcaster::new()),
        }
    }
}

/// API request for an automatic assignment run.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct AssignApiRequest {
    /// Ranking strategy; `flight-time` when absent.
    #[serde(default)]
    strategy: Option<String>,
}

/// API response for an itinerary upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItineraryApiResponse {
    /// Counts after the rebuild.
    #[serde(flatten)]
    overview: LoadRosterResponse,
    /// Data rows left out for missing a day, a time or a station.
    skipped_rows: Vec<usize>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } | ApiError::InvalidCsvFormat { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// The error returned before any roster has been loaded.
fn no_roster() -> HttpError {
    HttpError::from(ApiError::ResourceNotFound {
        resource_type: String::from("Roster"),
        message: String::from("No roster has been loaded"),
    })
}

/// Runs a read-only view against the loaded roster.
async fn read_roster<T>(
    app_state: &AppState,
    view: impl FnOnce(&RosterState) -> T,
) -> Result<Json<T>, HttpError> {
    let roster = app_state.roster.lock().await;
    let state: &RosterState = roster.as_ref().ok_or_else(no_roster)?;
    Ok(Json(view(state)))
}

/// Handler for POST `/roster` endpoint.
///
/// Replaces the roster with one built from a bundle.
async fn handle_load_roster(
    AxumState(app_state): AxumState<AppState>,
    Json(bundle): Json<RosterBundle>,
) -> Result<Json<LoadRosterResponse>, HttpError> {
    info!(
        pilots = bundle.pilots.len(),
        legs = bundle.legs.len(),
        "Handling load_roster request"
    );

    let state: RosterState = load_roster(&bundle, app_state.config.clone())?;
    let response: LoadRosterResponse = roster_overview(&state);
    *app_state.roster.lock().await = Some(state);

    app_state.events.broadcast(&LiveEvent::RosterLoaded {
        pilots: response.pilots,
        rotations: response.rotations,
        slots: response.slots,
    });
    Ok(Json(response))
}

/// Handler for POST `/itinerary` endpoint.
///
/// Rebuilds the rotations from an itinerary CSV sent as the request body.
async fn handle_load_itinerary(
    AxumState(app_state): AxumState<AppState>,
    body: String,
) -> Result<Json<ItineraryApiResponse>, HttpError> {
    info!(bytes = body.len(), "Handling load_itinerary request");

    let import: ItineraryImport = import_itinerary_csv(body.as_bytes())?;
    let mut roster = app_state.roster.lock().await;
    let state: &mut RosterState = roster.as_mut().ok_or_else(no_roster)?;
    let overview: LoadRosterResponse = load_itinerary(state, &import.legs)?;
    drop(roster);

    app_state.events.broadcast(&LiveEvent::ItineraryLoaded {
        rotations: overview.rotations,
        slots: overview.slots,
    });
    Ok(Json(ItineraryApiResponse {
        overview,
        skipped_rows: import.skipped_rows,
    }))
}

/// Handler for GET `/rotations` endpoint.
async fn handle_list_rotations(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListRotationsResponse>, HttpError> {
    info!("Handling list_rotations request");
    read_roster(&app_state, rotations_view).await
}

/// Handler for GET `/slots` endpoint.
async fn handle_list_slots(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListSlotsResponse>, HttpError> {
    info!("Handling list_slots request");
    read_roster(&app_state, slots_view).await
}

/// Handler for GET `/slots/unassigned` endpoint.
async fn handle_list_unassigned(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<UnassignedSlotsResponse>, HttpError> {
    info!("Handling list_unassigned request");
    read_roster(&app_state, unassigned_view).await
}

/// Handler for GET `/timelines` endpoint.
async fn handle_list_timelines(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<TimelinesResponse>, HttpError> {
    info!("Handling list_timelines request");
    read_roster(&app_state, timelines_view).await
}

/// Handler for GET `/flight_hours` endpoint.
async fn handle_flight_hours(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<FlightHoursResponse>, HttpError> {
    info!("Handling flight_hours request");
    read_roster(&app_state, flight_hours_view).await
}

/// Handler for GET `/audit` endpoint.
async fn handle_audit(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<AuditResponse>, HttpError> {
    info!("Handling audit request");
    read_roster(&app_state, audit_roster).await
}

/// Handler for POST `/assign` endpoint.
///
/// Clears flying assignments and runs automatic assignment.
async fn handle_assign(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignApiRequest>,
) -> Result<Json<AssignmentRunResponse>, HttpError> {
    let strategy: String = req
        .strategy
        .unwrap_or_else(|| String::from("flight-time"));
    info!(strategy = %strategy, "Handling assign request");

    let mut roster = app_state.roster.lock().await;
    let state: &mut RosterState = roster.as_mut().ok_or_else(no_roster)?;
    let response: AssignmentRunResponse = run_assignment(state, &strategy)?;
    drop(roster);

    app_state.events.broadcast(&LiveEvent::AssignmentRunCompleted {
        strategy: response.strategy.clone(),
        assigned: response.assigned,
        unassigned: response.unassigned,
    });
    Ok(Json(response))
}

/// Handler for POST `/commands` endpoint.
///
/// Applies one manual edit. A rejected edit changes nothing.
async fn handle_command(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, HttpError> {
    info!(?req, "Handling command request");

    let mut roster = app_state.roster.lock().await;
    let state: &mut RosterState = roster.as_mut().ok_or_else(no_roster)?;
    let response: CommandResponse = apply_command(state, req)?;
    drop(roster);

    app_state.events.broadcast(&LiveEvent::CommandApplied {
        action: response.action.clone(),
        rotation_id: response.rotation_id.clone(),
        slot_id: response.slot_id.clone(),
    });
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/roster", post(handle_load_roster))
        .route("/itinerary", post(handle_load_itinerary))
        .route("/rotations", get(handle_list_rotations))
        .route("/slots", get(handle_list_slots))
        .route("/slots/unassigned", get(handle_list_unassigned))
        .route("/timelines", get(handle_list_timelines))
        .route("/flight_hours", get(handle_flight_hours))
        .route("/assign", post(handle_assign))
        .route("/commands", post(handle_command))
        .route("/audit", get(handle_audit))
        .route("/live", get(handle_live_events))
        .with_state(app_state)
}

/// Reads and validates a JSON rules file.
fn read_config(path: &PathBuf) -> Result<RosterConfig, Box<dyn std::error::Error>> {
    let text: String = std::fs::read_to_string(path)?;
    let config: RosterConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Flex Crew Server");

    let config: Option<RosterConfig> = match &args.config {
        Some(path) => {
            info!("Using rules from: {}", path.display());
            Some(read_config(path)?)
        }
        None => {
            info!("Using rules carried by each roster bundle");
            None
        }
    };

    let app: Router = build_router(AppState::new(config));

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
