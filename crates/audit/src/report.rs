// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flex_crew_domain::calendar::duration_hours;
use flex_crew_domain::{AssignmentId, PilotId, Station};
use serde::Serialize;
use time::{Date, Duration, Time};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Breaks a hard rule.
    Error,
    /// Advisory only.
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the auditor found wrong with one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// The duty streak is longer than recommended.
    ContinuousDays {
        /// Streak length at this entry.
        days: i64,
        /// Recommended maximum.
        limit: i64,
    },
    /// The pilot has been ending duty away from base for too long.
    DaysAwayFromBase {
        /// Days away at this entry.
        days: i64,
        /// Recommended maximum.
        limit: i64,
        /// Where this entry leaves the pilot.
        location: Station,
    },
    /// A rotation departs from somewhere other than where the pilot should be.
    Continuity {
        /// Where the pilot is expected to be.
        expected: Station,
        /// Where the rotation departs.
        origin: Station,
    },
    /// Rest since the previous duty is short.
    InsufficientRest {
        /// Rest the pilot got.
        actual: Duration,
        /// Rest owed after the previous duty.
        required: Duration,
        /// Day the previous duty ended.
        previous_end: Date,
    },
    /// Duty on a new day starts before the cutoff.
    EarlyStart {
        /// Clock time the entry starts.
        start: Time,
    },
}

impl FindingKind {
    /// Rest and early-start findings are errors, the rest are warnings.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::InsufficientRest { .. } | Self::EarlyStart { .. } => Severity::Error,
            Self::ContinuousDays { .. }
            | Self::DaysAwayFromBase { .. }
            | Self::Continuity { .. } => Severity::Warning,
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContinuousDays { days, limit } => {
                write!(f, "{days} consecutive duty days (maximum {limit})")
            }
            Self::DaysAwayFromBase {
                days,
                limit,
                location,
            } => write!(
                f,
                "{days} days away from base in {location} (maximum {limit})"
            ),
            Self::Continuity { expected, origin } => write!(
                f,
                "Continuity: pilot in {expected}, rotation departs {origin}"
            ),
            Self::InsufficientRest {
                actual,
                required,
                previous_end,
            } => write!(
                f,
                "Insufficient rest: {:.1}h < {:.1}h (since {previous_end})",
                duration_hours(*actual),
                duration_hours(*required)
            ),
            Self::EarlyStart { start } => write!(
                f,
                "Starts at {:02}:{:02}, before the next-day cutoff",
                start.hour(),
                start.minute()
            ),
        }
    }
}

/// One itemized audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditFinding {
    pub pilot_id: PilotId,
    pub pilot_name: String,
    /// Start date of the entry the finding is about.
    pub date: Date,
    pub assignment_id: AssignmentId,
    #[serde(flatten)]
    pub kind: FindingKind,
}

impl AuditFinding {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl std::fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.date, self.pilot_name, self.pilot_id, self.kind
        )
    }
}

/// Entry counts over the whole audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    /// Entries examined.
    pub total_entries: usize,
    /// Entries with no error finding.
    pub valid_entries: usize,
    /// Entries with at least one warning.
    pub entries_with_warnings: usize,
    /// Entries with an error.
    pub entries_with_errors: usize,
}

/// The complete audit of a roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub errors: Vec<AuditFinding>,
    pub warnings: Vec<AuditFinding>,
    pub summary: AuditSummary,
}

impl AuditReport {
    /// Returns whether the audit found no errors.
    #[must_use]
    pub fn is_compliant(&self) -> bool {
        self.errors.is_empty()
    }

    /// Files a finding under errors or warnings by its severity.
    pub(crate) fn record(&mut self, finding: AuditFinding) {
        match finding.severity() {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
        }
    }

    /// Findings for one pilot, errors first.
    pub fn findings_for<'a>(
        &'a self,
        pilot_id: &'a PilotId,
    ) -> impl Iterator<Item = &'a AuditFinding> + 'a {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .filter(move |finding: &&AuditFinding| &finding.pilot_id == pilot_id)
    }
}
