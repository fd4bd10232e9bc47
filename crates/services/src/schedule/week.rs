use chrono::NaiveDate;
use tracing::warn;

use sport_core::model::{SessionKey, SessionSlot, Training};
use sport_core::schedule::week_days;

/// Where the sessions of a week came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Live,
    /// The backend could not be reached; the week shows built-in sample
    /// sessions that must be presented as such.
    Sample { reason: String },
}

/// A training placed on the calendar grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledSession {
    pub training: Training,
    pub slot: SessionSlot,
    pub key: SessionKey,
    pub enrolled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub sessions: Vec<ScheduledSession>,
}

/// Seven days starting on a Monday.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSchedule {
    week_start: NaiveDate,
    days: Vec<DaySchedule>,
    source: DataSource,
}

impl WeekSchedule {
    /// Lay `trainings` out over the week starting at `week_start`.
    ///
    /// Trainings outside the week, or whose time range cannot be shown on a
    /// single day, are skipped. Sessions within a day are ordered by start.
    pub fn build(
        week_start: NaiveDate,
        trainings: Vec<Training>,
        source: DataSource,
        is_enrolled: impl Fn(&SessionKey, &Training) -> bool,
    ) -> Self {
        let mut days: Vec<DaySchedule> = week_days(week_start)
            .into_iter()
            .map(|date| DaySchedule {
                date,
                sessions: Vec::new(),
            })
            .collect();

        for training in trainings {
            let Some(day) = days.iter_mut().find(|day| day.date == training.date()) else {
                continue;
            };
            let slot = match training.slot() {
                Ok(slot) => slot,
                Err(err) => {
                    warn!(training = %training.id, %err, "skipping training that cannot be placed");
                    continue;
                }
            };
            let key = slot.key();
            let enrolled = is_enrolled(&key, &training);
            day.sessions.push(ScheduledSession {
                training,
                slot,
                key,
                enrolled,
            });
        }

        for day in &mut days {
            day.sessions.sort_by_key(|session| session.slot.time());
        }

        Self {
            week_start,
            days,
            source,
        }
    }

    #[must_use]
    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    #[must_use]
    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    #[must_use]
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    #[must_use]
    pub fn is_sample(&self) -> bool {
        matches!(self.source, DataSource::Sample { .. })
    }

    pub fn sessions(&self) -> impl Iterator<Item = &ScheduledSession> {
        self.days.iter().flat_map(|day| day.sessions.iter())
    }

    #[must_use]
    pub fn find(&self, key: &SessionKey) -> Option<&ScheduledSession> {
        self.sessions().find(|session| &session.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};
    use sport_core::model::TrainingId;

    fn at(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    fn training(id: u64, activity: &str, start: &str, end: &str) -> Training {
        Training {
            id: TrainingId::new(id),
            activity: activity.into(),
            start: at(start),
            end: at(end),
            place: None,
            checked_in: false,
            can_check_in: true,
            capacity: None,
            load: 0,
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn places_trainings_on_their_day_in_order() {
        let week = WeekSchedule::build(
            monday(),
            vec![
                training(2, "Yoga", "2024-01-15T18:00:00+03:00", "2024-01-15T19:00:00+03:00"),
                training(1, "Table Tennis", "2024-01-15T09:00:00+03:00", "2024-01-15T10:30:00+03:00"),
                training(3, "Swimming", "2024-01-21T10:00:00+03:00", "2024-01-21T11:00:00+03:00"),
            ],
            DataSource::Live,
            |_, _| false,
        );

        assert_eq!(week.days().len(), 7);
        let monday_sessions: Vec<&str> = week.days()[0]
            .sessions
            .iter()
            .map(|s| s.training.activity.as_str())
            .collect();
        assert_eq!(monday_sessions, ["Table Tennis", "Yoga"]);
        assert_eq!(week.days()[6].sessions.len(), 1);
        assert!(!week.is_sample());
    }

    #[test]
    fn skips_trainings_outside_week_or_overnight() {
        let week = WeekSchedule::build(
            monday(),
            vec![
                training(1, "Yoga", "2024-01-22T18:00:00+03:00", "2024-01-22T19:00:00+03:00"),
                training(2, "Night Run", "2024-01-16T23:00:00+03:00", "2024-01-17T00:30:00+03:00"),
            ],
            DataSource::Live,
            |_, _| false,
        );
        assert_eq!(week.sessions().count(), 0);
    }

    #[test]
    fn find_by_key_and_enrollment_flag() {
        let week = WeekSchedule::build(
            monday(),
            vec![training(
                1,
                "Table Tennis",
                "2024-01-15T09:00:00+03:00",
                "2024-01-15T10:30:00+03:00",
            )],
            DataSource::Sample {
                reason: "offline".into(),
            },
            |_, training| training.id == TrainingId::new(1),
        );

        let key = SessionKey::from_raw("table-tennis-monday-09001030-2024-01-15");
        let session = week.find(&key).unwrap();
        assert!(session.enrolled);
        assert!(week.is_sample());
        assert!(week.find(&SessionKey::from_raw("nope")).is_none());
    }
}
