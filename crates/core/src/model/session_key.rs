//! Client-side identity for one weekly occurrence of a training slot.
//!
//! The calendar grid is generated locally before the matching server
//! training is known, so enrollment state is keyed by a string derived from
//! what the grid cell shows: activity, weekday, time range and date.
//!
//! Key layout: `{activity-slug}-{day}-{time-digits}-{YYYY-MM-DD}`, e.g.
//! `table-tennis-monday-09001030-2024-01-15`.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::schedule::{TimeRange, weekday_name};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_SEGMENTS: usize = 4;

/// Derived identifier of a weekly session occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    /// Derive the key for `(activity, day, time, date)`.
    ///
    /// Activity and day are lowercased (whitespace runs in the activity become
    /// `-`), `:`, space and `-` are stripped from the time, and the date is
    /// rendered as `YYYY-MM-DD`. Distinct activities that slug identically
    /// share a key.
    #[must_use]
    pub fn generate(activity: &str, day: &str, time: &str, date: NaiveDate) -> Self {
        let activity = activity
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        let day = day.trim().to_lowercase();
        let time: String = time
            .chars()
            .filter(|c| !matches!(c, ':' | ' ' | '-'))
            .collect();

        Self(format!(
            "{activity}-{day}-{time}-{}",
            date.format(DATE_FORMAT)
        ))
    }

    /// Wrap a key received from outside (command line, persisted UI state).
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort reconstruction of the key's inputs. See [`parse_session_key`].
    #[must_use]
    pub fn parts(&self) -> Option<SessionKeyParts> {
        parse_session_key(&self.0)
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fields recovered from a session key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionKeyParts {
    pub activity: String,
    pub day: String,
    pub time: String,
    pub date: NaiveDate,
}

/// Split a key back into its inputs.
///
/// The last three `-` segments are the date, preceded by the time and the
/// weekday; everything before that is the activity, re-joined with spaces
/// and title-cased. The time regains `HH:MM - HH:MM` punctuation only when it
/// is exactly eight digits.
///
/// This is not an exact inverse of [`SessionKey::generate`]: hyphens inside
/// the activity name come back as spaces, and times that did not strip to
/// eight digits come back as bare digits.
///
/// Returns `None` for fewer than four segments, or when no activity,
/// weekday, time and valid date can be read off the key.
#[must_use]
pub fn parse_session_key(id: &str) -> Option<SessionKeyParts> {
    let segments: Vec<&str> = id.trim().split('-').collect();
    if segments.len() < MIN_SEGMENTS {
        return None;
    }

    let [activity @ .., day, time, year, month, day_of_month] = segments.as_slice() else {
        return None;
    };

    let activity = activity
        .iter()
        .filter(|segment| !segment.is_empty())
        .map(|segment| title_case(segment))
        .collect::<Vec<_>>()
        .join(" ");
    if activity.is_empty() || day.is_empty() || time.is_empty() {
        return None;
    }

    let date =
        NaiveDate::parse_from_str(&format!("{year}-{month}-{day_of_month}"), DATE_FORMAT).ok()?;

    Some(SessionKeyParts {
        activity,
        day: title_case(day),
        time: restore_time(time),
        date,
    })
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn restore_time(digits: &str) -> String {
    if digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_digit()) {
        format!(
            "{}:{} - {}:{}",
            &digits[0..2],
            &digits[2..4],
            &digits[4..6],
            &digits[6..8]
        )
    } else {
        digits.to_string()
    }
}

/// Structured form of a calendar cell: the values a key is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSlot {
    activity: String,
    weekday: Weekday,
    time: TimeRange,
    date: NaiveDate,
}

impl SessionSlot {
    /// The weekday is taken from `date`.
    #[must_use]
    pub fn new(activity: impl Into<String>, time: TimeRange, date: NaiveDate) -> Self {
        Self {
            activity: activity.into().trim().to_string(),
            weekday: date.weekday(),
            time,
            date,
        }
    }

    #[must_use]
    pub fn activity(&self) -> &str {
        &self.activity
    }

    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    #[must_use]
    pub fn time(&self) -> TimeRange {
        self.time
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn key(&self) -> SessionKey {
        SessionKey::generate(
            &self.activity,
            weekday_name(self.weekday),
            &self.time.to_string(),
            self.date,
        )
    }
}
