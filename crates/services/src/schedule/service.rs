use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};

use sport_core::model::{SessionKey, TrainingId};
use sport_core::schedule::{shift_weeks, week_start};

use super::sample::sample_trainings;
use super::week::{DataSource, ScheduledSession, WeekSchedule};
use crate::Clock;
use crate::api::SportApi;
use crate::enrollment_store::EnrollmentStore;
use crate::error::ScheduleError;

/// Loads weekly calendars and books sessions on them.
///
/// Live weeks re-sync the enrollment store from the server's check-in flags.
/// When the backend cannot be reached the week is filled with sample
/// sessions and marked `DataSource::Sample`. Every other failure, including
/// authentication and decoding errors, propagates.
pub struct ScheduleService {
    clock: Clock,
    api: Arc<dyn SportApi>,
    store: EnrollmentStore,
}

impl ScheduleService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn SportApi>, store: EnrollmentStore) -> Self {
        Self { clock, api, store }
    }

    #[must_use]
    pub fn current_week_start(&self) -> NaiveDate {
        self.clock.week_start()
    }

    /// Load the week `offset` weeks away from the current one.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::WeekOutOfRange` for unrepresentable offsets and
    /// `ScheduleError::Api` for failures other than an unreachable backend.
    pub async fn load_week(&self, offset: i64) -> Result<WeekSchedule, ScheduleError> {
        let start = shift_weeks(self.current_week_start(), offset)
            .ok_or(ScheduleError::WeekOutOfRange(offset))?;
        self.load_week_containing(start).await
    }

    /// Load the week that contains `date`.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::Api` for failures other than an unreachable
    /// backend, see [`ApiError::is_unreachable`](crate::ApiError::is_unreachable).
    pub async fn load_week_containing(&self, date: NaiveDate) -> Result<WeekSchedule, ScheduleError> {
        let start = week_start(date);
        let end = start + Duration::weeks(1);

        match self.api.trainings(start, end).await {
            Ok(trainings) => {
                let checked_in: Vec<(SessionKey, TrainingId)> = trainings
                    .iter()
                    .filter(|training| training.checked_in)
                    .filter_map(|training| {
                        training.session_key().ok().map(|key| (key, training.id))
                    })
                    .collect();
                self.store.replace_week(start, checked_in);
                debug!(%start, count = trainings.len(), "loaded live week");

                Ok(WeekSchedule::build(
                    start,
                    trainings,
                    DataSource::Live,
                    |key, _| self.store.is_enrolled(key),
                ))
            }
            Err(err) if err.is_unreachable() => {
                warn!(%start, %err, "schedule unavailable, showing sample sessions");
                Ok(WeekSchedule::build(
                    start,
                    sample_trainings(start),
                    DataSource::Sample {
                        reason: err.to_string(),
                    },
                    |_, _| false,
                ))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Check in to the session identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError` if the session cannot be found, is sample data,
    /// is already booked, closed or full, or the backend refuses.
    pub async fn enroll(&self, key: &SessionKey) -> Result<ScheduledSession, ScheduleError> {
        let mut session = self.resolve(key).await?;
        if session.enrolled {
            return Err(ScheduleError::AlreadyEnrolled(session.key));
        }
        if !session.training.can_check_in {
            return Err(ScheduleError::CheckInClosed(session.key));
        }
        if session.training.is_full() {
            return Err(ScheduleError::Full(session.key));
        }

        self.api.check_in(session.training.id).await?;
        self.store.enroll(session.key.clone(), session.training.id);
        info!(key = %session.key, training = %session.training.id, "enrolled");

        session.enrolled = true;
        session.training.checked_in = true;
        session.training.load = session.training.load.saturating_add(1);
        Ok(session)
    }

    /// Cancel the check-in for the session identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError` if the session cannot be found, is sample data,
    /// is not booked, or the backend refuses.
    pub async fn cancel(&self, key: &SessionKey) -> Result<ScheduledSession, ScheduleError> {
        let mut session = self.resolve(key).await?;
        if !session.enrolled {
            return Err(ScheduleError::NotEnrolled(session.key));
        }

        self.api.cancel_check_in(session.training.id).await?;
        self.store.cancel(&session.key);
        info!(key = %session.key, training = %session.training.id, "cancelled");

        session.enrolled = false;
        session.training.checked_in = false;
        session.training.load = session.training.load.saturating_sub(1);
        Ok(session)
    }

    /// Find the live session behind `key` by loading the week its date falls in.
    async fn resolve(&self, key: &SessionKey) -> Result<ScheduledSession, ScheduleError> {
        let parts = key
            .parts()
            .ok_or_else(|| ScheduleError::UnknownSession(key.clone()))?;
        let week = self.load_week_containing(parts.date).await?;
        let found = week.find(key).cloned();

        match (week.source(), found) {
            (DataSource::Live, Some(session)) => Ok(session),
            (DataSource::Live, None) => Err(ScheduleError::UnknownSession(key.clone())),
            (DataSource::Sample { .. }, Some(_)) => Err(ScheduleError::SampleData(key.clone())),
            (DataSource::Sample { reason }, None) => Err(ScheduleError::Unavailable(reason.clone())),
        }
    }
}
