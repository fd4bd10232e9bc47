use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::ids::TrainingId;
use crate::model::session_key::{SessionKey, SessionSlot};
use crate::schedule::{TimeRange, TimeRangeError};

/// One occurrence of a training as served by the API.
///
/// Timestamps keep the server's offset so the calendar shows local wall-clock
/// times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Training {
    pub id: TrainingId,
    #[serde(alias = "group_name", alias = "title")]
    pub activity: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub checked_in: bool,
    #[serde(default)]
    pub can_check_in: bool,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub load: u32,
}

impl Training {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// # Errors
    ///
    /// Returns `TimeRangeError` if the training does not end after it starts on
    /// the same wall clock (e.g. it runs past midnight).
    pub fn time_range(&self) -> Result<TimeRange, TimeRangeError> {
        TimeRange::new(self.start.time(), self.end.time())
    }

    /// # Errors
    ///
    /// See [`Training::time_range`].
    pub fn slot(&self) -> Result<SessionSlot, TimeRangeError> {
        Ok(SessionSlot::new(
            self.activity.clone(),
            self.time_range()?,
            self.date(),
        ))
    }

    /// # Errors
    ///
    /// See [`Training::time_range`].
    pub fn session_key(&self) -> Result<SessionKey, TimeRangeError> {
        Ok(self.slot()?.key())
    }

    #[must_use]
    pub fn free_places(&self) -> Option<u32> {
        self.capacity.map(|capacity| capacity.saturating_sub(self.load))
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_places() == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training(json: &str) -> Training {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn key_uses_local_wall_clock() {
        let t = training(
            r#"{"id": 5, "group_name": "Table Tennis",
                "start": "2024-01-15T09:00:00+03:00", "end": "2024-01-15T10:30:00+03:00"}"#,
        );
        assert_eq!(t.activity, "Table Tennis");
        assert_eq!(
            t.session_key().unwrap().as_str(),
            "table-tennis-monday-09001030-2024-01-15"
        );
        assert!(!t.checked_in);
    }

    #[test]
    fn capacity_tracks_load() {
        let mut t = training(
            r#"{"id": 1, "activity": "Yoga", "capacity": 10, "load": 9,
                "start": "2024-01-16T18:00:00+03:00", "end": "2024-01-16T19:00:00+03:00"}"#,
        );
        assert_eq!(t.free_places(), Some(1));
        assert!(!t.is_full());
        t.load = 12;
        assert_eq!(t.free_places(), Some(0));
        assert!(t.is_full());
    }

    #[test]
    fn overnight_training_has_no_slot() {
        let t = training(
            r#"{"id": 2, "activity": "Night Run",
                "start": "2024-01-16T23:00:00+03:00", "end": "2024-01-17T00:30:00+03:00"}"#,
        );
        assert_eq!(t.slot().unwrap_err(), TimeRangeError::EndNotAfterStart);
    }
}
