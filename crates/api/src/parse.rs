// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of import records into domain values.
//!
//! Records arrive as loosely formatted text (spreadsheet exports, hand-edited
//! JSON). Everything here is strict about meaning and lenient about layout:
//! surrounding whitespace, single-digit days, months and hours, and either
//! `-` or `/` as the date separator are all accepted.

use crate::request_response::{EventRecord, FlightLegRecord, ListField, PilotRecord};
use flex_crew::EventRequest;
use flex_crew_domain::calendar::{end_of_day, start_of_day};
use flex_crew_domain::{
    AssignmentKind, DEFAULT_SENIORITY, DomainError, FlightLeg, Hours, Pilot, PilotId, Role,
    Station, Tail,
};
use std::collections::BTreeSet;
use thiserror::Error;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Duration, PrimitiveDateTime, Time};

/// Accepted date layouts, tried in order.
const DATE_FORMATS: [&[BorrowedFormatItem<'_>]; 3] = [
    format_description!("[year]-[month padding:none]-[day padding:none]"),
    format_description!("[day padding:none]-[month padding:none]-[year]"),
    format_description!("[day padding:none]/[month padding:none]/[year]"),
];

/// Accepted clock layouts, tried in order. Seconds are read and dropped.
const TIME_FORMATS: [&[BorrowedFormatItem<'_>]; 2] = [
    format_description!("[hour padding:none]:[minute]"),
    format_description!("[hour padding:none]:[minute]:[second]"),
];

/// Why a single import record could not be turned into a domain value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordParseError {
    /// A required field is absent or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A date is not `YYYY-MM-DD`, `DD-MM-YYYY` or `DD/MM/YYYY`.
    #[error("{field}: '{value}' is not a valid date")]
    InvalidDate { field: &'static str, value: String },

    /// A clock time is not `H:MM` or `HH:MM`.
    #[error("{field}: '{value}' is not a valid clock time")]
    InvalidTime { field: &'static str, value: String },

    /// An hour quantity is negative or not finite.
    #[error("{field}: {value} is not a valid number of hours")]
    InvalidHours { field: &'static str, value: String },

    /// A role list names no role at all.
    #[error("role: '{0}' names no cockpit position")]
    NoRoles(String),

    /// The value was well formed but the domain rejected it.
    #[error("{field}: {source}")]
    Domain {
        field: &'static str,
        #[source]
        source: DomainError,
    },
}

impl RecordParseError {
    /// The record field the error is about.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::InvalidDate { field, .. }
            | Self::InvalidTime { field, .. }
            | Self::InvalidHours { field, .. }
            | Self::Domain { field, .. } => field,
            Self::NoRoles(_) => "role",
        }
    }
}

fn domain(field: &'static str) -> impl FnOnce(DomainError) -> RecordParseError {
    move |source: DomainError| RecordParseError::Domain { field, source }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, RecordParseError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(RecordParseError::MissingField { field });
    }
    Ok(trimmed)
}

fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text: &&str| !text.is_empty())
}

// ============================================================================
// Dates and times
// ============================================================================

/// Parses a date in `YYYY-MM-DD`, `DD-MM-YYYY` or `DD/MM/YYYY` form.
///
/// # Errors
///
/// Returns `RecordParseError::InvalidDate` if the text is none of those or
/// names a day that does not exist.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date, RecordParseError> {
    let text: &str = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format: &&[BorrowedFormatItem<'_>]| Date::parse(text, format).ok())
        .ok_or_else(|| RecordParseError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Parses an `H:MM` or `HH:MM` clock time. Trailing seconds are ignored.
///
/// # Errors
///
/// Returns `RecordParseError::InvalidTime` for anything else.
pub fn parse_clock_time(field: &'static str, value: &str) -> Result<Time, RecordParseError> {
    let text: &str = value.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format: &&[BorrowedFormatItem<'_>]| Time::parse(text, format).ok())
        .map(|time: Time| time.replace_second(0).unwrap_or(time))
        .ok_or_else(|| RecordParseError::InvalidTime {
            field,
            value: value.to_string(),
        })
}

/// Parses every date in a list field.
///
/// # Errors
///
/// Returns the first entry that is not a valid date.
pub fn parse_date_list(
    field: &'static str,
    value: &ListField,
) -> Result<BTreeSet<Date>, RecordParseError> {
    value
        .entries()
        .map(|entry: &str| parse_date(field, entry))
        .collect()
}

/// Converts decimal hours into a `Duration`.
///
/// # Errors
///
/// Returns `RecordParseError::InvalidHours` for negative or non-finite values.
pub fn parse_hours(field: &'static str, hours: f64) -> Result<Duration, RecordParseError> {
    Hours::new(hours)
        .map(Hours::duration)
        .map_err(|_| RecordParseError::InvalidHours {
            field,
            value: hours.to_string(),
        })
}

// ============================================================================
// Roles
// ============================================================================

/// Parses a role list such as `CAP`, `COP/CRP` or `CAP, CRP`.
///
/// Order is preserved and repeats are dropped.
///
/// # Errors
///
/// Returns an error if any entry is not a role, or the list is empty.
pub fn parse_roles(value: &str) -> Result<Vec<Role>, RecordParseError> {
    let mut roles: Vec<Role> = Vec::new();
    for part in value.split(['/', ',', ' ']).filter(|part: &&str| !part.trim().is_empty()) {
        let role: Role = part.parse().map_err(domain("role"))?;
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    if roles.is_empty() {
        return Err(RecordParseError::NoRoles(value.to_string()));
    }
    Ok(roles)
}

// ============================================================================
// Records
// ============================================================================

/// Parses a flight-leg record.
///
/// Without an explicit arrival date, an arrival clock time earlier than the
/// departure lands on the following day.
///
/// # Errors
///
/// Returns an error if a station, date or time is missing or malformed, or
/// the leg would arrive before it departs.
pub fn parse_leg(record: &FlightLegRecord) -> Result<FlightLeg, RecordParseError> {
    let departure_station: Station = Station::parse(required(
        "departure_station",
        &record.departure_station,
    )?)
    .map_err(domain("departure_station"))?;
    let arrival_station: Station =
        Station::parse(required("arrival_station", &record.arrival_station)?)
            .map_err(domain("arrival_station"))?;
    let date: Date = parse_date("date", required("date", &record.date)?)?;
    let departure_time: Time =
        parse_clock_time("departure_time", required("departure_time", &record.departure_time)?)?;
    let arrival_time: Time =
        parse_clock_time("arrival_time", required("arrival_time", &record.arrival_time)?)?;
    let tail: Tail = Tail::new(&record.tail);

    match optional(record.arrival_date.as_deref()) {
        Some(arrival_date) => FlightLeg::new(
            tail,
            departure_station,
            arrival_station,
            PrimitiveDateTime::new(date, departure_time),
            PrimitiveDateTime::new(parse_date("arrival_date", arrival_date)?, arrival_time),
            &record.flight_designator,
        ),
        None => FlightLeg::from_clock_times(
            tail,
            departure_station,
            arrival_station,
            date,
            departure_time,
            arrival_time,
            &record.flight_designator,
        ),
    }
    .map_err(domain("flight_designator"))
}

/// Parses a pilot record.
///
/// # Errors
///
/// Returns an error if the id or base is missing, the role list is invalid,
/// or any listed date is malformed.
pub fn parse_pilot(record: &PilotRecord) -> Result<Pilot, RecordParseError> {
    let id: PilotId = PilotId::new(required("id", &record.id)?);
    let base: Station =
        Station::parse(required("base", &record.base)?).map_err(domain("base"))?;
    let roles: Vec<Role> = parse_roles(required("role", &record.role)?)?;

    Ok(Pilot::new(id, &record.name, base, roles)
        .with_seniority(record.seniority.unwrap_or(DEFAULT_SENIORITY))
        .with_qualified_tails(record.qualified_tails.entries().map(Tail::new))
        .with_relief_tails(record.relief_tails.entries().map(Tail::new))
        .with_free_days(parse_date_list("free_days", &record.free_days)?)
        .with_absence_days(parse_date_list("absence_days", &record.absence_days)?)
        .with_training_days(parse_date_list("training_days", &record.training_days)?))
}

/// Parses a manual event record.
///
/// Day-off kinds only need dates; a missing end date means a single day.
/// Duty kinds need both clock times.
///
/// # Errors
///
/// Returns an error if the kind is unknown, a date, time or station is
/// malformed, or an hour quantity is negative.
pub fn parse_event(record: &EventRecord) -> Result<EventRequest, RecordParseError> {
    let kind: AssignmentKind = required("kind", &record.kind)?
        .parse()
        .map_err(domain("kind"))?;
    let start_date: Date = parse_date("start_date", required("start_date", &record.start_date)?)?;
    let end_date: Date = match optional(record.end_date.as_deref()) {
        Some(end_date) => parse_date("end_date", end_date)?,
        None => start_date,
    };

    let (start, end) = if kind.is_operational() {
        let start_time: Time = parse_clock_time(
            "start_time",
            optional(record.start_time.as_deref())
                .ok_or(RecordParseError::MissingField { field: "start_time" })?,
        )?;
        let end_time: Time = parse_clock_time(
            "end_time",
            optional(record.end_time.as_deref())
                .ok_or(RecordParseError::MissingField { field: "end_time" })?,
        )?;
        (
            PrimitiveDateTime::new(start_date, start_time),
            PrimitiveDateTime::new(end_date, end_time),
        )
    } else {
        (start_of_day(start_date), end_of_day(end_date))
    };

    let mut request: EventRequest = EventRequest::new(kind, start, end);
    if let Some(origin) = optional(record.origin.as_deref()) {
        request.origin = Some(Station::parse(origin).map_err(domain("origin"))?);
    }
    if let Some(destination) = optional(record.destination.as_deref()) {
        request.destination = Some(Station::parse(destination).map_err(domain("destination"))?);
    }
    if let Some(hours) = record.flight_time_hours {
        request = request.with_flight_time(parse_hours("flight_time_hours", hours)?);
    }
    if let Some(hours) = record.duty_time_hours {
        request = request.with_duty_time(parse_hours("duty_time_hours", hours)?);
    }
    request.notes = optional(record.notes.as_deref()).map(str::to_string);
    Ok(request)
}
