// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Builders for every kind of timeline entry the roster creates.

use flex_crew_domain::calendar::{end_of_day, minute_of_day, start_of_day};
use flex_crew_domain::{
    Assignment, AssignmentId, AssignmentKind, CrewTier, DailyDuty, DomainError, RosterConfig,
    Rotation, RotationId, RuleViolation, SlotId, Station,
};
use time::{Date, Duration, PrimitiveDateTime, Time};

/// Manual duty outside this clock band counts against the night ceiling.
const MANUAL_DAY_START_MINUTE: i64 = 6 * 60;
const MANUAL_DAY_END_MINUTE: i64 = 22 * 60;

/// Crew size whose ceilings bound a manually entered deadhead.
const MANUAL_DEADHEAD_CREW: u8 = 2;

/// Ground duty longer than this owes the longer rest.
const LONG_GROUND_DUTY: Duration = Duration::hours(9);
const GROUND_REST_AT_BASE: Duration = Duration::hours(10);
const LONG_GROUND_REST_AT_BASE: Duration = Duration::hours(12);
const GROUND_AWAY_EXTRA_REST: Duration = Duration::hours(2);

/// A manually entered timeline event.
///
/// Only the fields relevant to `kind` are read: stations and times for a
/// deadhead, times for ground duty, and just the dates of `start` and `end`
/// for days off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRequest {
    pub kind: AssignmentKind,
    pub start: PrimitiveDateTime,
    pub end: PrimitiveDateTime,
    pub origin: Option<Station>,
    pub destination: Option<Station>,
    /// Flight time credited by a deadhead. Zero when absent.
    pub flight_time: Option<Duration>,
    /// Duty time of a deadhead. Elapsed time when absent.
    pub duty_time: Option<Duration>,
    pub notes: Option<String>,
}

impl EventRequest {
    /// A request of `kind` over `[start, end]` with nothing else set.
    #[must_use]
    pub const fn new(kind: AssignmentKind, start: PrimitiveDateTime, end: PrimitiveDateTime) -> Self {
        Self {
            kind,
            start,
            end,
            origin: None,
            destination: None,
            flight_time: None,
            duty_time: None,
            notes: None,
        }
    }

    /// Sets the deadhead stations.
    #[must_use]
    pub fn between(mut self, origin: Station, destination: Station) -> Self {
        self.origin = Some(origin);
        self.destination = Some(destination);
        self
    }

    /// Sets the flight time a deadhead credits.
    #[must_use]
    pub const fn with_flight_time(mut self, flight_time: Duration) -> Self {
        self.flight_time = Some(flight_time);
        self
    }

    /// Sets an explicit deadhead duty time.
    #[must_use]
    pub const fn with_duty_time(mut self, duty_time: Duration) -> Self {
        self.duty_time = Some(duty_time);
        self
    }

    /// Rejects windows that end before they start.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEventWindow` for an inverted window.
    pub fn check_window(&self) -> Result<(), DomainError> {
        if self.end < self.start {
            return Err(DomainError::InvalidEventWindow {
                window: format!("{} {} to {}", self.kind, self.start, self.end),
            });
        }
        Ok(())
    }

    /// Origin and destination of a deadhead request.
    ///
    /// # Errors
    ///
    /// Returns an error when a station is missing or both are the same.
    pub fn deadhead_stations(&self) -> Result<(Station, Station), DomainError> {
        let (Some(origin), Some(destination)) = (&self.origin, &self.destination) else {
            return Err(DomainError::InvalidStation(String::from(
                "a deadhead needs an origin and a destination",
            )));
        };
        if origin == destination {
            return Err(DomainError::DegenerateDeadhead(origin.clone()));
        }
        Ok((origin.clone(), destination.clone()))
    }
}

/// Formats the `n`th assignment id.
#[must_use]
pub fn assignment_id(sequence: u32) -> AssignmentId {
    AssignmentId::new(&format!("ASG-{sequence:06}"))
}

/// The sequence number of an engine-issued assignment id.
#[must_use]
pub fn assignment_sequence(id: &AssignmentId) -> Option<u32> {
    id.as_str()
        .strip_prefix("ASG-")
        .and_then(|digits: &str| digits.parse().ok())
}

/// The entry for a pilot flying `rotation` in `slot_id`.
#[must_use]
pub fn rotation_entry(id: AssignmentId, rotation: &Rotation, slot_id: &SlotId) -> Assignment {
    Assignment {
        id,
        kind: AssignmentKind::Rot,
        start: rotation.start,
        end: rotation.end,
        origin: Some(rotation.origin.clone()),
        destination: Some(rotation.destination.clone()),
        flight_time: rotation.flight_time,
        duty_time: rotation.service_time,
        rest_at_base: rotation.rest_at_base,
        rest_away: rotation.rest_away,
        slot_id: Some(slot_id.clone()),
        rotation_id: Some(rotation.id.clone()),
        preloaded: false,
        notes: None,
    }
}

/// A positioning deadhead inside the configured window on `date`.
///
/// # Errors
///
/// Returns an error when the stations coincide or the window leaves the calendar.
pub fn scheduled_deadhead_entry(
    id: AssignmentId,
    origin: Station,
    destination: Station,
    date: Date,
    related: Option<RotationId>,
    config: &RosterConfig,
) -> Result<Assignment, DomainError> {
    if origin == destination {
        return Err(DomainError::DegenerateDeadhead(origin));
    }
    let (start, end) =
        config
            .deadhead_window
            .span_on(date)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("deadhead window on {date}"),
            })?;
    Ok(Assignment {
        id,
        kind: AssignmentKind::Dh,
        start,
        end,
        origin: Some(origin),
        destination: Some(destination),
        flight_time: Duration::ZERO,
        duty_time: end - start,
        rest_at_base: config.deadhead_window.rest_at_base(),
        rest_away: config.deadhead_window.rest_away(),
        slot_id: None,
        rotation_id: related,
        preloaded: false,
        notes: None,
    })
}

/// A manually entered deadhead with rest taken from the flight-time tables.
#[must_use]
pub fn manual_deadhead_entry(
    id: AssignmentId,
    request: &EventRequest,
    origin: Station,
    destination: Station,
    config: &RosterConfig,
) -> Assignment {
    let flight_time: Duration = request.flight_time.unwrap_or(Duration::ZERO);
    Assignment {
        id,
        kind: AssignmentKind::Dh,
        start: request.start,
        end: request.end,
        origin: Some(origin),
        destination: Some(destination),
        flight_time,
        duty_time: manual_duty_time(request),
        rest_at_base: config.rest_at_base_for(flight_time),
        rest_away: config.rest_away_for(flight_time),
        slot_id: None,
        rotation_id: None,
        preloaded: false,
        notes: request.notes.clone(),
    }
}

fn manual_duty_time(request: &EventRequest) -> Duration {
    request
        .duty_time
        .filter(|duty: &Duration| duty.is_positive())
        .unwrap_or(request.end - request.start)
}

/// Checks a manual deadhead against the two-pilot ceilings for its start day.
///
/// # Errors
///
/// Returns the ceiling the day's totals would exceed.
pub fn check_manual_deadhead(
    existing: DailyDuty,
    request: &EventRequest,
    config: &RosterConfig,
) -> Result<(), RuleViolation> {
    let tier: &CrewTier = config.tier_for_size(MANUAL_DEADHEAD_CREW);
    let in_day_window: bool =
        within_manual_day(request.start.time()) && within_manual_day(request.end.time());
    let duty: Duration = existing.duty_time + manual_duty_time(request);
    let duty_limit: Duration = tier.service_limit(in_day_window);
    if duty > duty_limit {
        return Err(RuleViolation::DailyDutyExceeded {
            projected: duty,
            limit: duty_limit,
            in_day_window,
        });
    }
    let flight: Duration =
        existing.flight_time + request.flight_time.unwrap_or(Duration::ZERO);
    if flight > tier.flight_limit() {
        return Err(RuleViolation::DailyFlightTimeExceeded {
            projected: flight,
            limit: tier.flight_limit(),
            crew_size: tier.crew_size,
        });
    }
    Ok(())
}

fn within_manual_day(time: Time) -> bool {
    let minute: i64 = minute_of_day(time);
    (MANUAL_DAY_START_MINUTE..MANUAL_DAY_END_MINUTE).contains(&minute)
}

/// Training or office duty at home base.
#[must_use]
pub fn ground_duty_entry(
    id: AssignmentId,
    kind: AssignmentKind,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    base: &Station,
) -> Assignment {
    let duty_time: Duration = end - start;
    let rest_at_base: Duration = if duty_time > LONG_GROUND_DUTY {
        LONG_GROUND_REST_AT_BASE
    } else {
        GROUND_REST_AT_BASE
    };
    let mut entry: Assignment = Assignment::day_entry(id, kind, start, end);
    entry.origin = Some(base.clone());
    entry.destination = Some(base.clone());
    entry.duty_time = duty_time;
    entry.rest_at_base = rest_at_base;
    entry.rest_away = rest_at_base + GROUND_AWAY_EXTRA_REST;
    entry
}

/// A whole-day entry from the start of `first` to the end of `last`.
#[must_use]
pub const fn day_off_entry(
    id: AssignmentId,
    kind: AssignmentKind,
    first: Date,
    last: Date,
) -> Assignment {
    Assignment::day_entry(id, kind, start_of_day(first), end_of_day(last))
}

/// The entry a preloaded calendar day becomes.
#[must_use]
pub fn preloaded_entry(id: AssignmentId, kind: AssignmentKind, date: Date, base: &Station) -> Assignment {
    let mut entry: Assignment = if kind.is_operational() {
        ground_duty_entry(id, kind, start_of_day(date), end_of_day(date), base)
    } else {
        day_off_entry(id, kind, date, date)
    };
    entry.preloaded = true;
    entry
}
