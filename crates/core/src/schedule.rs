//! Weekly calendar arithmetic and time ranges.
//!
//! The schedule is always laid out Monday..Sunday. Week navigation works on
//! the Monday of a week; every other date is derived from it.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DAYS_PER_WEEK: usize = 7;

const TIME_FORMAT: &str = "%H:%M";

//
// ─── WEEK MATH ─────────────────────────────────────────────────────────────────
//

/// Monday of the week containing `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Moves a week start by `weeks` (negative goes back in time).
///
/// Returns `None` if the result is outside the representable calendar.
#[must_use]
pub fn shift_weeks(start: NaiveDate, weeks: i64) -> Option<NaiveDate> {
    let delta = Duration::try_weeks(weeks)?;
    start.checked_add_signed(delta)
}

/// The seven dates of the week beginning at `start`.
#[must_use]
pub fn week_days(start: NaiveDate) -> [NaiveDate; DAYS_PER_WEEK] {
    let mut days = [start; DAYS_PER_WEEK];
    for (offset, day) in (0_i64..).zip(days.iter_mut()) {
        *day = start + Duration::days(offset);
    }
    days
}

/// English display name of a weekday, as used in session keys.
#[must_use]
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Case-insensitive weekday lookup; accepts full and three-letter names.
#[must_use]
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    name.trim().parse::<Weekday>().ok()
}

//
// ─── TIME RANGE ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimeRangeError {
    #[error("time range must look like `HH:MM - HH:MM`: {0}")]
    Malformed(String),

    #[error("invalid time of day: {0}")]
    InvalidTime(String),

    #[error("time range must end after it starts")]
    EndNotAfterStart,
}

/// Start and end time of a training on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    /// # Errors
    ///
    /// Returns `TimeRangeError::EndNotAfterStart` if `end <= start`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, TimeRangeError> {
        if end <= start {
            return Err(TimeRangeError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    /// Parse `"09:00 - 10:30"`. The separator may be `-` or `–`, spaces optional.
    ///
    /// # Errors
    ///
    /// Returns `TimeRangeError` if either side is not `HH:MM` or the range is empty.
    pub fn parse(raw: &str) -> Result<Self, TimeRangeError> {
        let (start, end) = raw
            .split_once(['-', '–'])
            .ok_or_else(|| TimeRangeError::Malformed(raw.to_string()))?;
        let start = parse_time(start)?;
        let end = parse_time(end)?;
        Self::new(start, end)
    }

    #[must_use]
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, TimeRangeError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .map_err(|_| TimeRangeError::InvalidTime(trimmed.to_string()))
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

impl FromStr for TimeRange {
    type Err = TimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
