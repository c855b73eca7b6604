// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Second-pass compliance audit over finished timelines.
//!
//! Unlike the assignment-time checks, the audit walks each timeline once in
//! start order and judges every entry against what came before it in that
//! order. Its continuity rule also differs: it trusts an intervening deadhead
//! over the previous duty's destination, and a day off sends the pilot home
//! unless a deadhead says otherwise.

use crate::report::{AuditFinding, AuditReport, FindingKind};
use flex_crew_domain::{
    Assignment, AssignmentKind, Pilot, RosterConfig, Station, Timeline, starts_before_cutoff,
};
use time::{Date, Duration};

/// A run of consecutive days, tracked by the start date of its latest entry.
#[derive(Debug, Clone, Copy, Default)]
struct DayStreak {
    days: i64,
    last: Option<Date>,
}

impl DayStreak {
    /// Extends the streak when `date` is the same or the next day, else restarts it.
    fn advance(&mut self, date: Date) -> i64 {
        self.days = match self.last {
            Some(last) if (date - last).whole_days() <= 1 => self.days + 1,
            _ => 1,
        };
        self.last = Some(date);
        self.days
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Audits every pilot's timeline and aggregates the findings.
///
/// Never fails: every entry of every timeline is examined and counted.
#[must_use]
pub fn audit_roster<'a, I>(rosters: I, config: &RosterConfig) -> AuditReport
where
    I: IntoIterator<Item = (&'a Pilot, &'a Timeline)>,
{
    let mut report: AuditReport = AuditReport::default();
    for (pilot, timeline) in rosters {
        audit_timeline(pilot, timeline, config, &mut report);
    }
    report
}

/// Audits one pilot's timeline into `report`.
pub fn audit_timeline(
    pilot: &Pilot,
    timeline: &Timeline,
    config: &RosterConfig,
    report: &mut AuditReport,
) {
    let entries: &[Assignment] = timeline.entries();
    let mut duty_streak: DayStreak = DayStreak::default();
    let mut away_streak: DayStreak = DayStreak::default();

    for (index, current) in entries.iter().enumerate() {
        report.summary.total_entries += 1;
        let date: Date = current.start.date();
        let finding = |kind: FindingKind| AuditFinding {
            pilot_id: pilot.id.clone(),
            pilot_name: pilot.name.clone(),
            date,
            assignment_id: current.id.clone(),
            kind,
        };

        if !current.is_operational() {
            duty_streak.reset();
            away_streak.reset();
            report.summary.valid_entries += 1;
            continue;
        }

        let mut warned: bool = false;

        let duty_days: i64 = duty_streak.advance(date);
        if duty_days > config.max_continuous_days {
            report.record(finding(FindingKind::ContinuousDays {
                days: duty_days,
                limit: config.max_continuous_days,
            }));
            warned = true;
        }

        match &current.destination {
            Some(destination) if *destination != pilot.base => {
                let away_days: i64 = away_streak.advance(date);
                if away_days > config.max_away_days {
                    report.record(finding(FindingKind::DaysAwayFromBase {
                        days: away_days,
                        limit: config.max_away_days,
                        location: destination.clone(),
                    }));
                    warned = true;
                }
            }
            Some(_) => away_streak.reset(),
            None => {}
        }

        let Some(previous_index) = entries[..index]
            .iter()
            .rposition(Assignment::is_operational)
        else {
            tally(report, warned, false);
            continue;
        };
        let previous: &Assignment = &entries[previous_index];

        let required: Duration = previous.rest_required(&pilot.base);
        let actual: Duration = current.start - previous.end;
        if actual < required {
            report.record(finding(FindingKind::InsufficientRest {
                actual,
                required,
                previous_end: previous.end.date(),
            }));
            tally(report, warned, true);
            continue;
        }

        if previous.end.date() != current.start.date()
            && starts_before_cutoff(current.start.time(), config)
        {
            report.record(finding(FindingKind::EarlyStart {
                start: current.start.time(),
            }));
            tally(report, warned, true);
            continue;
        }

        if current.kind == AssignmentKind::Rot
            && let Some(origin) = &current.origin
        {
            let expected: Station =
                expected_location(pilot, &entries[previous_index..index], previous);
            if *origin != expected {
                report.record(finding(FindingKind::Continuity {
                    expected,
                    origin: origin.clone(),
                }));
                warned = true;
            }
        }

        tally(report, warned, false);
    }
}

/// Where the pilot should be after `between`, the entries from the previous
/// duty up to the one being audited.
///
/// The latest deadhead's destination wins. Without one, a day off in between
/// means home base; otherwise the previous duty's destination.
fn expected_location(pilot: &Pilot, between: &[Assignment], previous: &Assignment) -> Station {
    let last_deadhead: Option<&Station> = between
        .iter()
        .rev()
        .find(|entry: &&Assignment| entry.kind == AssignmentKind::Dh)
        .and_then(|entry: &Assignment| entry.destination.as_ref());
    let had_day_off: bool = between
        .iter()
        .any(|entry: &Assignment| !entry.is_operational());

    last_deadhead
        .or_else(|| {
            if had_day_off {
                None
            } else {
                previous.destination.as_ref()
            }
        })
        .unwrap_or(&pilot.base)
        .clone()
}

fn tally(report: &mut AuditReport, warned: bool, errored: bool) {
    if warned {
        report.summary.entries_with_warnings += 1;
    }
    if errored {
        report.summary.entries_with_errors += 1;
    } else {
        report.summary.valid_entries += 1;
    }
}
