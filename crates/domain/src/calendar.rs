// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar arithmetic on the roster-local clock.
//!
//! All instants are `PrimitiveDateTime` values in one local clock. Hour
//! quantities are carried as `Duration` so accumulation stays exact;
//! fractional hours only appear at the configuration and reporting edges,
//! where [`Hours`] converts them once.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::macros::time;
use time::{Date, Duration, PrimitiveDateTime, Time};

const MINUTES_PER_HOUR: f64 = 60.0;

/// Largest hour value accepted from a document, a little over a year.
pub const MAX_HOURS: f64 = 9_000.0;

/// Last minute of a whole-day entry.
pub const END_OF_DAY: Time = time!(23:59);

/// A non-negative number of hours.
///
/// Documents carry fractional hours; the value is rounded to whole minutes
/// and range-checked once, when it is created.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Hours(Duration);

impl Hours {
    /// Converts fractional hours.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidHours` for negative, non-finite or
    /// oversized values.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(hours: f64) -> Result<Self, DomainError> {
        if !(0.0..=MAX_HOURS).contains(&hours) {
            return Err(DomainError::InvalidHours(hours.to_string()));
        }
        Ok(Self(Duration::minutes((hours * MINUTES_PER_HOUR).round() as i64)))
    }

    /// Whole hours.
    #[must_use]
    pub const fn whole(hours: i64) -> Self {
        Self(Duration::hours(hours))
    }

    /// Hours and minutes.
    #[must_use]
    pub const fn hm(hours: i64, minutes: i64) -> Self {
        Self(Duration::minutes(hours * 60 + minutes))
    }

    #[must_use]
    pub const fn duration(self) -> Duration {
        self.0
    }
}

impl TryFrom<f64> for Hours {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Hours> for f64 {
    fn from(hours: Hours) -> Self {
        duration_hours(hours.0)
    }
}

impl std::fmt::Display for Hours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h", duration_hours(self.0))
    }
}

/// Converts a `Duration` into fractional hours at minute resolution.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn duration_hours(duration: Duration) -> f64 {
    duration.whole_minutes() as f64 / MINUTES_PER_HOUR
}

/// Minutes elapsed since midnight.
#[must_use]
pub fn minute_of_day(time: Time) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// The first instant of a day.
#[must_use]
pub const fn start_of_day(date: Date) -> PrimitiveDateTime {
    PrimitiveDateTime::new(date, Time::MIDNIGHT)
}

/// The last minute of a day.
#[must_use]
pub const fn end_of_day(date: Date) -> PrimitiveDateTime {
    PrimitiveDateTime::new(date, END_OF_DAY)
}

/// Every date from `first` to `last`, inclusive. Empty when `last < first`.
pub fn days_inclusive(first: Date, last: Date) -> impl Iterator<Item = Date> {
    std::iter::successors(Some(first), |day: &Date| day.next_day())
        .take_while(move |day: &Date| *day <= last)
}

/// Number of calendar days from `first` to `last`, inclusive.
#[must_use]
pub fn calendar_days_spanned(first: Date, last: Date) -> i64 {
    (last - first).whole_days() + 1
}

/// Whether `date` falls within the dates touched by `[start, end]`.
#[must_use]
pub fn covers_date(start: PrimitiveDateTime, end: PrimitiveDateTime, date: Date) -> bool {
    start.date() <= date && date <= end.date()
}

/// Bucket for the monthly flight-hour cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 to 12.
    pub month: u8,
}

impl MonthKey {
    /// The month containing `date`.
    #[must_use]
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
        }
    }
}

/// Bucket for the fortnightly flight-hour cap.
///
/// Days 1 to 15 form the first half of a month, the rest the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FortnightKey {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 to 12.
    pub month: u8,
    /// 1 or 2.
    pub half: u8,
}

impl FortnightKey {
    /// The fortnight containing `date`.
    #[must_use]
    pub fn of(date: Date) -> Self {
        Self {
            year: date.year(),
            month: u8::from(date.month()),
            half: if date.day() <= 15 { 1 } else { 2 },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_hours_round_trip_at_minute_resolution() {
        assert_eq!(Hours::new(1.5).unwrap().duration(), Duration::minutes(90));
        assert_eq!(Hours::new(12.5).unwrap(), Hours::hm(12, 30));
        assert!((duration_hours(Duration::minutes(45)) - 0.75).abs() < f64::EPSILON);
        assert!((f64::from(Hours::whole(9)) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hours_reject_values_out_of_range() {
        assert_eq!(
            Hours::new(-5.0),
            Err(DomainError::InvalidHours(String::from("-5")))
        );
        assert!(Hours::new(f64::NAN).is_err());
        assert!(Hours::new(f64::INFINITY).is_err());
        assert!(Hours::new(1e300).is_err());
        assert_eq!(Hours::new(MAX_HOURS).unwrap(), Hours::whole(9_000));
    }

    #[test]
    fn test_days_inclusive_spans_month_boundary() {
        let days: Vec<Date> = days_inclusive(date!(2026 - 01 - 30), date!(2026 - 02 - 02)).collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[3], date!(2026 - 02 - 02));
        assert_eq!(
            days_inclusive(date!(2026 - 01 - 02), date!(2026 - 01 - 01)).count(),
            0
        );
    }

    #[test]
    fn test_fortnight_split_on_the_fifteenth() {
        assert_eq!(FortnightKey::of(date!(2026 - 03 - 15)).half, 1);
        assert_eq!(FortnightKey::of(date!(2026 - 03 - 16)).half, 2);
        assert_eq!(MonthKey::of(date!(2026 - 03 - 31)).month, 3);
    }
}
