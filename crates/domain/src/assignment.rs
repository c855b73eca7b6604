// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::{FortnightKey, MonthKey, covers_date};
use crate::types::{AssignmentId, AssignmentKind, RotationId, SlotId, Station};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::{Date, Duration, PrimitiveDateTime};

/// One entry on a pilot's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Identifier, `ASG-000001` onwards.
    pub id: AssignmentId,
    /// What the entry is.
    pub kind: AssignmentKind,
    /// Start instant.
    pub start: PrimitiveDateTime,
    /// End instant.
    pub end: PrimitiveDateTime,
    /// Where the duty begins. Absent for non-operational entries.
    pub origin: Option<Station>,
    /// Where the duty ends. Absent for non-operational entries.
    pub destination: Option<Station>,
    /// Flight time credited.
    pub flight_time: Duration,
    /// Service (duty) time.
    pub duty_time: Duration,
    /// Rest owed afterwards when the entry ends at home base.
    pub rest_at_base: Duration,
    /// Rest owed afterwards when the entry ends away.
    pub rest_away: Duration,
    /// Slot filled by a rotation entry.
    pub slot_id: Option<SlotId>,
    /// Rotation flown, or the rotation a deadhead positions for.
    pub rotation_id: Option<RotationId>,
    /// Imported with the pilot record rather than scheduled.
    pub preloaded: bool,
    /// Free-form remark.
    pub notes: Option<String>,
}

impl Assignment {
    /// Creates a whole-day entry of a non-operational kind.
    #[must_use]
    pub const fn day_entry(
        id: AssignmentId,
        kind: AssignmentKind,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Self {
        Self {
            id,
            kind,
            start,
            end,
            origin: None,
            destination: None,
            flight_time: Duration::ZERO,
            duty_time: Duration::ZERO,
            rest_at_base: Duration::ZERO,
            rest_away: Duration::ZERO,
            slot_id: None,
            rotation_id: None,
            preloaded: false,
            notes: None,
        }
    }

    /// Returns whether the entry is duty.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        self.kind.is_operational()
    }

    /// Returns whether the entry touches the calendar date.
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        covers_date(self.start, self.end, date)
    }

    /// Returns whether the entry and `[start, end)` share any instant or calendar date.
    #[must_use]
    pub fn conflicts_with(&self, start: PrimitiveDateTime, end: PrimitiveDateTime) -> bool {
        let overlaps_in_time: bool = !(end <= self.start || start >= self.end);
        let shares_a_day: bool = self.start.date() <= end.date() && start.date() <= self.end.date();
        overlaps_in_time || shares_a_day
    }

    /// Rest owed after this entry given where the pilot is based.
    #[must_use]
    pub fn rest_required(&self, base: &Station) -> Duration {
        if self.destination.as_ref() == Some(base) {
            self.rest_at_base
        } else {
            self.rest_away
        }
    }
}

/// A pilot's entries, kept sorted by start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    entries: Vec<Assignment>,
}

impl Timeline {
    /// Creates an empty timeline.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts an entry after any entries starting at the same instant.
    pub fn insert(&mut self, assignment: Assignment) {
        let position: usize = self
            .entries
            .partition_point(|entry: &Assignment| entry.start <= assignment.start);
        self.entries.insert(position, assignment);
    }

    /// Removes the entry filling `slot_id`.
    pub fn remove_by_slot(&mut self, slot_id: &SlotId) -> Option<Assignment> {
        let position: usize = self
            .entries
            .iter()
            .position(|entry: &Assignment| entry.slot_id.as_ref() == Some(slot_id))?;
        Some(self.entries.remove(position))
    }

    /// Removes the entry with the given id.
    pub fn remove_by_id(&mut self, id: &AssignmentId) -> Option<Assignment> {
        let position: usize = self
            .entries
            .iter()
            .position(|entry: &Assignment| &entry.id == id)?;
        Some(self.entries.remove(position))
    }

    /// Keeps only the entries matching the predicate.
    pub fn retain<F: FnMut(&Assignment) -> bool>(&mut self, keep: F) {
        self.entries.retain(keep);
    }

    /// Entries in start order.
    #[must_use]
    pub fn entries(&self) -> &[Assignment] {
        &self.entries
    }

    /// Iterates entries in start order.
    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the timeline has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry with the given id.
    #[must_use]
    pub fn get(&self, id: &AssignmentId) -> Option<&Assignment> {
        self.entries.iter().find(|entry: &&Assignment| &entry.id == id)
    }

    /// The entry filling `slot_id`.
    #[must_use]
    pub fn find_by_slot(&self, slot_id: &SlotId) -> Option<&Assignment> {
        self.entries
            .iter()
            .find(|entry: &&Assignment| entry.slot_id.as_ref() == Some(slot_id))
    }

    /// Returns whether any entry of any kind touches the date.
    #[must_use]
    pub fn has_entry_on(&self, date: Date) -> bool {
        self.entries.iter().any(|entry: &Assignment| entry.covers(date))
    }

    /// The entry with the latest end; the earliest such entry on ties.
    #[must_use]
    pub fn last_ending(&self) -> Option<&Assignment> {
        self.entries
            .iter()
            .fold(None, |latest: Option<&Assignment>, entry: &Assignment| match latest {
                Some(current) if entry.end <= current.end => Some(current),
                _ => Some(entry),
            })
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Flight time credited per month and per fortnight, bucketed by duty start date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightHourLedger {
    monthly: BTreeMap<MonthKey, Duration>,
    fortnightly: BTreeMap<FortnightKey, Duration>,
}

impl FlightHourLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            monthly: BTreeMap::new(),
            fortnightly: BTreeMap::new(),
        }
    }

    /// Credits flight time to the month and fortnight containing `date`.
    pub fn credit(&mut self, date: Date, flight_time: Duration) {
        if flight_time <= Duration::ZERO {
            return;
        }
        *self.monthly.entry(MonthKey::of(date)).or_insert(Duration::ZERO) += flight_time;
        *self
            .fortnightly
            .entry(FortnightKey::of(date))
            .or_insert(Duration::ZERO) += flight_time;
    }

    /// Withdraws flight time, never dropping a bucket below zero.
    pub fn debit(&mut self, date: Date, flight_time: Duration) {
        if flight_time <= Duration::ZERO {
            return;
        }
        debit_bucket(&mut self.monthly, MonthKey::of(date), flight_time);
        debit_bucket(&mut self.fortnightly, FortnightKey::of(date), flight_time);
    }

    /// Flight time in the month containing `date`.
    #[must_use]
    pub fn month_total(&self, date: Date) -> Duration {
        self.monthly
            .get(&MonthKey::of(date))
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Flight time in the fortnight containing `date`.
    #[must_use]
    pub fn fortnight_total(&self, date: Date) -> Duration {
        self.fortnightly
            .get(&FortnightKey::of(date))
            .copied()
            .unwrap_or(Duration::ZERO)
    }

    /// Non-zero monthly totals in calendar order.
    pub fn months(&self) -> impl Iterator<Item = (MonthKey, Duration)> + '_ {
        self.monthly.iter().map(|(key, total)| (*key, *total))
    }

    /// Flight time across all months.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.monthly.values().copied().sum()
    }
}

fn debit_bucket<K: Ord>(buckets: &mut BTreeMap<K, Duration>, key: K, amount: Duration) {
    if let Some(balance) = buckets.get_mut(&key) {
        *balance -= amount;
        if *balance <= Duration::ZERO {
            buckets.remove(&key);
        }
    }
}

/// Mutable per-pilot scheduling state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotState {
    /// Destination of the most recently registered duty.
    pub location: Station,
    /// Credited flight time.
    pub ledger: FlightHourLedger,
}

impl PilotState {
    /// State of a pilot sitting at home base with no flight time credited.
    #[must_use]
    pub const fn at_base(base: Station) -> Self {
        Self {
            location: base,
            ledger: FlightHourLedger::new(),
        }
    }
}
