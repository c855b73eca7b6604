// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-assignment constraint checks.
//!
//! Hard rules produce [`RuleViolation`]s and make a candidate ineligible.
//! Soft rules produce [`Advisory`] notes that never block an assignment.

use crate::assignment::{Assignment, PilotState, Timeline};
use crate::calendar::{calendar_days_spanned, days_inclusive, duration_hours, minute_of_day};
use crate::config::{CrewTier, RosterConfig};
use crate::rotation::Rotation;
use crate::types::{AssignmentId, Pilot, Role, SlotId, Station, Tail};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, PrimitiveDateTime, Time};

/// A hard rule a candidate assignment breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    /// The pilot cannot fill the slot's role.
    RoleIncompatible {
        /// The slot's role.
        role: Role,
    },
    /// The pilot is not qualified on the rotation's aircraft.
    TailNotQualified {
        /// The rotation's tail.
        tail: Tail,
    },
    /// The rotation touches a free, absence or training day.
    Unavailable {
        /// The first such day.
        date: Date,
    },
    /// The rotation shares time or a calendar day with other duty.
    ScheduleConflict {
        /// The conflicting entry.
        with: AssignmentId,
    },
    /// Not enough rest since the previous duty.
    InsufficientRest {
        /// Rest the pilot would get.
        actual: Duration,
        /// Rest owed after the previous duty.
        required: Duration,
    },
    /// Duty on a later day starts in the small hours.
    EarlyStart {
        /// Clock time the duty starts.
        start: Time,
    },
    /// The monthly flight-hour cap would be exceeded.
    MonthlyHoursExceeded {
        /// Month total including the rotation.
        projected: Duration,
        /// Cap.
        limit: Duration,
    },
    /// The fortnightly flight-hour cap would be exceeded.
    FortnightHoursExceeded {
        /// Fortnight total including the rotation.
        projected: Duration,
        /// Cap.
        limit: Duration,
    },
    /// Flight time on the start day would exceed the crew's ceiling.
    DailyFlightTimeExceeded {
        /// Day total including the rotation.
        projected: Duration,
        /// Ceiling for the crew size.
        limit: Duration,
        /// Crew size the ceiling belongs to.
        crew_size: u8,
    },
    /// Service time on the start day would exceed the crew's ceiling.
    DailyDutyExceeded {
        /// Day total including the rotation.
        projected: Duration,
        /// Ceiling for the crew size and window.
        limit: Duration,
        /// Whether the day-window ceiling applied.
        in_day_window: bool,
    },
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoleIncompatible { role } => write!(f, "Pilot cannot fly as {role}"),
            Self::TailNotQualified { tail } => write!(f, "Not qualified on {tail}"),
            Self::Unavailable { date } => {
                write!(f, "Free day, absence or training on {date}")
            }
            Self::ScheduleConflict { with } => write!(f, "Schedule conflict with {with}"),
            Self::InsufficientRest { actual, required } => write!(
                f,
                "Rest {:.1}h < {:.1}h required",
                duration_hours(*actual),
                duration_hours(*required)
            ),
            Self::EarlyStart { start } => write!(
                f,
                "Starts at {:02}:{:02}, before the next-day cutoff",
                start.hour(),
                start.minute()
            ),
            Self::MonthlyHoursExceeded { projected, limit } => write!(
                f,
                "Exceeds {:.0}h per month ({:.0}h)",
                duration_hours(*limit),
                duration_hours(*projected).round()
            ),
            Self::FortnightHoursExceeded { projected, limit } => write!(
                f,
                "Exceeds {:.0}h per fortnight ({:.0}h)",
                duration_hours(*limit),
                duration_hours(*projected).round()
            ),
            Self::DailyFlightTimeExceeded {
                projected,
                limit,
                crew_size,
            } => write!(
                f,
                "Daily flight time {:.1}h > {:.1}h (crew {crew_size})",
                duration_hours(*projected),
                duration_hours(*limit)
            ),
            Self::DailyDutyExceeded {
                projected,
                limit,
                in_day_window,
            } => write!(
                f,
                "Daily duty {:.1}h > {:.1}h ({})",
                duration_hours(*projected),
                duration_hours(*limit),
                if *in_day_window { "day" } else { "night" }
            ),
        }
    }
}

/// A soft rule a candidate assignment strains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// Too many consecutive duty days.
    ContinuousDays {
        /// Length of the streak including the rotation.
        days: i64,
        /// Recommended maximum.
        limit: i64,
    },
    /// Too many consecutive days away from home base.
    DaysAwayFromBase {
        /// Days away including the rotation.
        days: i64,
        /// Recommended maximum.
        limit: i64,
    },
    /// The pilot is elsewhere and no deadhead route reaches the origin.
    LocationMismatch {
        /// Where the pilot is.
        location: Station,
        /// Where the rotation departs.
        origin: Station,
    },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContinuousDays { days, limit } => write!(
                f,
                "{days} consecutive duty days (recommended maximum {limit})"
            ),
            Self::DaysAwayFromBase { days, limit } => write!(
                f,
                "{days} days away from base (recommended maximum {limit})"
            ),
            Self::LocationMismatch { location, origin } => {
                write!(f, "Location: {location}->{origin}")
            }
        }
    }
}

/// A positioning flight the pilot needs before a rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadheadSuggestion {
    /// Where the pilot is.
    pub origin: Station,
    /// Where the rotation departs.
    pub destination: Station,
}

/// Totals for the rotation's start day, including the rotation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDuty {
    /// Service time.
    pub duty_time: Duration,
    /// Flight time.
    pub flight_time: Duration,
}

/// Outcome of validating one pilot against one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentCheck {
    /// Hard rules broken, in check order.
    pub errors: Vec<RuleViolation>,
    /// Soft rules strained.
    pub warnings: Vec<Advisory>,
    /// Positioning the pilot needs first, when a deadhead route exists.
    pub deadhead: Option<DeadheadSuggestion>,
    /// Start-day totals, present when the daily ceilings hold.
    pub daily_duty: Option<DailyDuty>,
}

impl AssignmentCheck {
    /// Returns whether no hard rule is broken.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns whether a positioning deadhead is suggested.
    #[must_use]
    pub const fn needs_deadhead(&self) -> bool {
        self.deadhead.is_some()
    }
}

/// Where the pilot stands relative to a rotation's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeographicContinuity {
    /// Already at the origin.
    AtOrigin,
    /// Elsewhere, with a deadhead route to the origin.
    Deadhead(DeadheadSuggestion),
    /// Elsewhere, with no deadhead route to the origin.
    Mismatch {
        /// Where the pilot is.
        location: Station,
        /// Where the rotation departs.
        origin: Station,
    },
}

/// Everything about one pilot the checks read.
#[derive(Debug, Clone, Copy)]
pub struct PilotSchedule<'a> {
    /// The pilot.
    pub pilot: &'a Pilot,
    /// The pilot's entries.
    pub timeline: &'a Timeline,
    /// Location and credited hours.
    pub state: &'a PilotState,
}

/// Which optional parts of validation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions<'a> {
    /// Whether to evaluate geographic continuity.
    pub geography: bool,
    /// Entry to ignore, as when re-validating a slot the pilot already holds.
    pub exclude_slot: Option<&'a SlotId>,
}

impl<'a> CheckOptions<'a> {
    /// All checks, nothing excluded.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            geography: true,
            exclude_slot: None,
        }
    }

    /// All checks except geographic continuity.
    #[must_use]
    pub const fn without_geography() -> Self {
        Self {
            geography: false,
            exclude_slot: None,
        }
    }

    /// Ignores the entry filling `slot_id`.
    #[must_use]
    pub const fn excluding(mut self, slot_id: &'a SlotId) -> Self {
        self.exclude_slot = Some(slot_id);
        self
    }
}

fn is_excluded(entry: &Assignment, exclude_slot: Option<&SlotId>) -> bool {
    exclude_slot.is_some_and(|slot_id: &SlotId| entry.slot_id.as_ref() == Some(slot_id))
}

/// Whether the pilot may fill `role`. Relief slots accept any cockpit role.
#[must_use]
pub fn is_role_compatible(pilot: &Pilot, role: Role) -> bool {
    match role {
        Role::Captain | Role::FirstOfficer => pilot.has_role(role),
        Role::Relief => !pilot.roles.is_empty(),
    }
}

/// Whether the pilot may fly `tail` in `role`. A blank tail always passes.
#[must_use]
pub fn is_tail_qualified(pilot: &Pilot, tail: &Tail, role: Role) -> bool {
    if tail.is_empty() {
        return true;
    }
    match role {
        Role::Relief => pilot.relief_tails.contains(tail) || pilot.qualified_tails.contains(tail),
        Role::Captain | Role::FirstOfficer => pilot.qualified_tails.contains(tail),
    }
}

/// The first date in `[start, end]` the pilot is unavailable, if any.
#[must_use]
pub fn first_unavailable_date(
    pilot: &Pilot,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
) -> Option<Date> {
    days_inclusive(start.date(), end.date()).find(|date: &Date| pilot.is_unavailable_on(*date))
}

/// The first operational entry sharing time or a calendar day with `[start, end]`.
#[must_use]
pub fn find_conflict<'t>(
    timeline: &'t Timeline,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    exclude_slot: Option<&SlotId>,
) -> Option<&'t Assignment> {
    timeline.iter().find(|entry: &&Assignment| {
        entry.is_operational()
            && !is_excluded(entry, exclude_slot)
            && entry.conflicts_with(start, end)
    })
}

/// The operational entry with the latest end strictly before `before`.
#[must_use]
pub fn previous_operational<'t>(
    timeline: &'t Timeline,
    before: PrimitiveDateTime,
    exclude_slot: Option<&SlotId>,
) -> Option<&'t Assignment> {
    latest_ending_before(
        timeline
            .iter()
            .filter(|entry: &&Assignment| {
                entry.is_operational() && !is_excluded(entry, exclude_slot)
            }),
        before,
    )
}

fn latest_ending_before<'t, I>(entries: I, before: PrimitiveDateTime) -> Option<&'t Assignment>
where
    I: Iterator<Item = &'t Assignment>,
{
    entries
        .filter(|entry: &&Assignment| entry.end < before)
        .fold(None, |latest: Option<&Assignment>, entry: &Assignment| match latest {
            Some(current) if entry.end <= current.end => Some(current),
            _ => Some(entry),
        })
}

/// Where the pilot is just before `before`.
///
/// Reads the latest entry of any kind ending before `before`: its
/// destination, else its origin, else home base. Home base when no entry
/// ends before `before`.
#[must_use]
pub fn location_before(pilot: &Pilot, timeline: &Timeline, before: PrimitiveDateTime) -> Station {
    latest_ending_before(timeline.iter(), before)
        .and_then(|entry: &Assignment| entry.destination.as_ref().or(entry.origin.as_ref()))
        .unwrap_or(&pilot.base)
        .clone()
}

/// Whether the calendar day before `at` was a non-operational day.
#[must_use]
pub fn had_non_operational_day_before(
    pilot: &Pilot,
    timeline: &Timeline,
    at: PrimitiveDateTime,
) -> bool {
    let Some(previous_day) = at.date().previous_day() else {
        return false;
    };
    let day_off_entry: bool = timeline
        .iter()
        .any(|entry: &Assignment| !entry.is_operational() && entry.covers(previous_day));
    day_off_entry
        || pilot.free_days.contains(&previous_day)
        || pilot.absence_days.contains(&previous_day)
}

/// Checks rest since the previous operational entry and the next-day start cutoff.
#[must_use]
pub fn check_rest(
    pilot: &Pilot,
    timeline: &Timeline,
    start: PrimitiveDateTime,
    config: &RosterConfig,
    exclude_slot: Option<&SlotId>,
) -> Option<RuleViolation> {
    let previous: &Assignment = previous_operational(timeline, start, exclude_slot)?;
    let required: Duration = previous.rest_required(&pilot.base);
    let actual: Duration = start - previous.end;
    if actual < required {
        return Some(RuleViolation::InsufficientRest { actual, required });
    }
    if previous.end.date() != start.date() && starts_before_cutoff(start.time(), config) {
        return Some(RuleViolation::EarlyStart {
            start: start.time(),
        });
    }
    None
}

/// Whether a clock time falls after midnight but before the next-day cutoff.
#[must_use]
pub fn starts_before_cutoff(time: Time, config: &RosterConfig) -> bool {
    let minute: i64 = minute_of_day(time);
    minute > 0 && minute < config.next_day_start_cutoff()
}

/// Checks the monthly cap first, then the fortnightly cap.
#[must_use]
pub fn check_flight_hour_caps(
    state: &PilotState,
    start: PrimitiveDateTime,
    flight_time: Duration,
    config: &RosterConfig,
) -> Option<RuleViolation> {
    let date: Date = start.date();
    let monthly: Duration = state.ledger.month_total(date) + flight_time;
    if monthly > config.monthly_limit() {
        return Some(RuleViolation::MonthlyHoursExceeded {
            projected: monthly,
            limit: config.monthly_limit(),
        });
    }
    let fortnightly: Duration = state.ledger.fortnight_total(date) + flight_time;
    if fortnightly > config.fortnight_limit() {
        return Some(RuleViolation::FortnightHoursExceeded {
            projected: fortnightly,
            limit: config.fortnight_limit(),
        });
    }
    None
}

/// Flight and service time of the rotation and deadhead entries touching `date`.
#[must_use]
pub fn daily_totals(timeline: &Timeline, date: Date, exclude_slot: Option<&SlotId>) -> DailyDuty {
    timeline
        .iter()
        .filter(|entry: &&Assignment| {
            entry.kind.counts_for_daily_duty()
                && entry.covers(date)
                && !is_excluded(entry, exclude_slot)
        })
        .fold(
            DailyDuty {
                duty_time: Duration::ZERO,
                flight_time: Duration::ZERO,
            },
            |totals: DailyDuty, entry: &Assignment| DailyDuty {
                duty_time: totals.duty_time + entry.duty_time,
                flight_time: totals.flight_time + entry.flight_time,
            },
        )
}

/// Checks the crew-size ceilings for the rotation's start day, flight time first.
///
/// # Errors
///
/// Returns the first ceiling the day's totals would exceed.
pub fn check_daily_duty(
    timeline: &Timeline,
    rotation: &Rotation,
    config: &RosterConfig,
    exclude_slot: Option<&SlotId>,
) -> Result<DailyDuty, RuleViolation> {
    let tier: &CrewTier = config.tier_for_size(rotation.crew_size);
    let existing: DailyDuty = daily_totals(timeline, rotation.start.date(), exclude_slot);
    let projected: DailyDuty = DailyDuty {
        duty_time: existing.duty_time + rotation.service_time,
        flight_time: existing.flight_time + rotation.flight_time,
    };
    if projected.flight_time > tier.flight_limit() {
        return Err(RuleViolation::DailyFlightTimeExceeded {
            projected: projected.flight_time,
            limit: tier.flight_limit(),
            crew_size: rotation.crew_size,
        });
    }
    let duty_limit: Duration = tier.service_limit(rotation.in_day_window);
    if projected.duty_time > duty_limit {
        return Err(RuleViolation::DailyDutyExceeded {
            projected: projected.duty_time,
            limit: duty_limit,
            in_day_window: rotation.in_day_window,
        });
    }
    Ok(projected)
}

fn has_operational_entry_on(timeline: &Timeline, date: Date, exclude_slot: Option<&SlotId>) -> bool {
    timeline.iter().any(|entry: &Assignment| {
        entry.is_operational() && entry.covers(date) && !is_excluded(entry, exclude_slot)
    })
}

/// Warns when the duty streak ending with the rotation runs too long.
///
/// Counts operational days immediately preceding the rotation, walking
/// backward from the day before it starts, plus the days it spans.
#[must_use]
pub fn continuous_days_advisory(
    timeline: &Timeline,
    rotation: &Rotation,
    config: &RosterConfig,
    exclude_slot: Option<&SlotId>,
) -> Option<Advisory> {
    let mut streak: i64 = 0;
    let mut day: Option<Date> = rotation.start.date().previous_day();
    while let Some(current) = day {
        if !has_operational_entry_on(timeline, current, exclude_slot) {
            break;
        }
        streak += 1;
        day = current.previous_day();
    }
    let days: i64 = streak + calendar_days_spanned(rotation.start.date(), rotation.end.date());
    (days > config.max_continuous_days).then_some(Advisory::ContinuousDays {
        days,
        limit: config.max_continuous_days,
    })
}

/// Warns when the rotation would keep the pilot away from base too long.
///
/// Rotations ending at home base never warn. Otherwise walks backward
/// through operational entries that leave the pilot away to find when the
/// pilot left base.
#[must_use]
pub fn away_from_base_advisory(
    pilot: &Pilot,
    timeline: &Timeline,
    rotation: &Rotation,
    config: &RosterConfig,
    exclude_slot: Option<&SlotId>,
) -> Option<Advisory> {
    if rotation.destination == pilot.base {
        return None;
    }
    let mut away_since: Date = rotation.start.date();
    let mut day: Option<Date> = rotation.start.date().previous_day();
    while let Some(current) = day {
        let Some(entry) = timeline.iter().find(|entry: &&Assignment| {
            entry.is_operational() && entry.covers(current) && !is_excluded(entry, exclude_slot)
        }) else {
            break;
        };
        if entry.destination.as_ref() == Some(&pilot.base) {
            break;
        }
        away_since = entry.start.date();
        day = current.previous_day();
    }
    let days: i64 = calendar_days_spanned(away_since, rotation.end.date());
    (days > config.max_away_days).then_some(Advisory::DaysAwayFromBase {
        days,
        limit: config.max_away_days,
    })
}

/// Compares the pilot's location before the rotation with its origin.
#[must_use]
pub fn geographic_continuity(
    pilot: &Pilot,
    timeline: &Timeline,
    rotation: &Rotation,
    config: &RosterConfig,
) -> GeographicContinuity {
    let location: Station = location_before(pilot, timeline, rotation.start);
    if location == rotation.origin {
        return GeographicContinuity::AtOrigin;
    }
    if config.allows_deadhead(&location, &rotation.origin) {
        return GeographicContinuity::Deadhead(DeadheadSuggestion {
            origin: location,
            destination: rotation.origin.clone(),
        });
    }
    GeographicContinuity::Mismatch {
        location,
        origin: rotation.origin.clone(),
    }
}

/// A day before the rotation on which a positioning deadhead fits.
///
/// Searches backward from the day before the rotation starts, no further
/// back than the configured lookback and no earlier than the day after the
/// previous operational entry ends. A day qualifies when no entry of any
/// kind touches it, the deadhead window opens once the previous duty's rest
/// is served, and the window closes early enough to rest before the
/// rotation.
#[must_use]
pub fn find_deadhead_date(
    pilot: &Pilot,
    timeline: &Timeline,
    rotation: &Rotation,
    config: &RosterConfig,
) -> Option<Date> {
    let start_day: Date = rotation.start.date();
    let latest: Date = start_day.previous_day()?;
    let lookback_floor: Date = start_day.checked_sub(Duration::days(config.max_deadhead_lookback_days))?;
    let earliest: Date = previous_operational(timeline, rotation.start, None)
        .and_then(|previous: &Assignment| previous.end.date().next_day())
        .map_or(lookback_floor, |after_previous: Date| after_previous.max(lookback_floor));
    if earliest > latest {
        return None;
    }
    let rest_before_rotation: Duration = if rotation.origin == pilot.base {
        config.deadhead_window.rest_at_base()
    } else {
        config.deadhead_window.rest_away()
    };
    let fits = |day: Date| -> bool {
        let Some((departure, arrival)) = config.deadhead_window.span_on(day) else {
            return false;
        };
        !timeline.has_entry_on(day)
            && check_rest(pilot, timeline, departure, config, None).is_none()
            && rotation.start - arrival >= rest_before_rotation
    };
    let mut day: Date = latest;
    loop {
        if fits(day) {
            return Some(day);
        }
        if day <= earliest {
            return None;
        }
        day = day.previous_day()?;
    }
}

/// Runs every check for placing the pilot in a slot of `role` on `rotation`.
///
/// Hard rules run in a fixed order: role, tail, availability, conflicts,
/// rest, flight-hour caps, daily ceilings. Advisories follow, and geographic
/// continuity last when requested.
#[must_use]
pub fn validate_assignment(
    schedule: &PilotSchedule<'_>,
    rotation: &Rotation,
    role: Role,
    config: &RosterConfig,
    options: CheckOptions<'_>,
) -> AssignmentCheck {
    let PilotSchedule {
        pilot,
        timeline,
        state,
    } = *schedule;
    let exclude: Option<&SlotId> = options.exclude_slot;
    let mut check: AssignmentCheck = AssignmentCheck::default();

    if !is_role_compatible(pilot, role) {
        check.errors.push(RuleViolation::RoleIncompatible { role });
    }
    if !is_tail_qualified(pilot, &rotation.tail, role) {
        check.errors.push(RuleViolation::TailNotQualified {
            tail: rotation.tail.clone(),
        });
    }
    if let Some(date) = first_unavailable_date(pilot, rotation.start, rotation.end) {
        check.errors.push(RuleViolation::Unavailable { date });
    }
    if let Some(entry) = find_conflict(timeline, rotation.start, rotation.end, exclude) {
        check.errors.push(RuleViolation::ScheduleConflict {
            with: entry.id.clone(),
        });
    }
    if let Some(violation) = check_rest(pilot, timeline, rotation.start, config, exclude) {
        check.errors.push(violation);
    }
    if let Some(violation) =
        check_flight_hour_caps(state, rotation.start, rotation.flight_time, config)
    {
        check.errors.push(violation);
    }
    match check_daily_duty(timeline, rotation, config, exclude) {
        Ok(daily) => check.daily_duty = Some(daily),
        Err(violation) => check.errors.push(violation),
    }

    if let Some(advisory) = continuous_days_advisory(timeline, rotation, config, exclude) {
        check.warnings.push(advisory);
    }
    if let Some(advisory) = away_from_base_advisory(pilot, timeline, rotation, config, exclude) {
        check.warnings.push(advisory);
    }

    if options.geography {
        match geographic_continuity(pilot, timeline, rotation, config) {
            GeographicContinuity::AtOrigin => {}
            GeographicContinuity::Deadhead(suggestion) => check.deadhead = Some(suggestion),
            GeographicContinuity::Mismatch { location, origin } => {
                check
                    .warnings
                    .push(Advisory::LocationMismatch { location, origin });
            }
        }
    }

    check
}
