//! Inclusive date intervals for budget and reporting periods.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from date range construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateRangeError {
    /// End date precedes the start date.
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

/// An inclusive date interval (`start..=end`).
///
/// Both endpoints count: a range covering a single day has one total day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange", into = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Serde-facing mirror of `DateRange` without the ordering invariant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    ///
    /// `start == end` is a valid single-day range.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if end < start {
            return Err(DateRangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the calendar month containing `date`, first through last day.
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(date);
        Self { start, end }
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the end date.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the total number of days, counting both endpoints.
    #[must_use]
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if `date` falls within the range (inclusive).
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns the number of whole days elapsed from the start to `as_of`,
    /// clamped to `0..=total_days`.
    ///
    /// Zero on the range's first day.
    #[must_use]
    pub fn days_elapsed(&self, as_of: NaiveDate) -> i64 {
        (as_of - self.start).num_days().clamp(0, self.total_days())
    }

    /// Returns the number of days from `as_of` through the end, inclusive,
    /// clamped to zero once the range has passed.
    ///
    /// One on the range's last day.
    #[must_use]
    pub fn days_remaining(&self, as_of: NaiveDate) -> i64 {
        ((self.end - as_of).num_days() + 1)
            .clamp(0, self.total_days())
    }
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DateRangeError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl From<DateRange> for RawDateRange {
    fn from(range: DateRange) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}
