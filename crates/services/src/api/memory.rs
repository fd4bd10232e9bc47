use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use std::sync::{Arc, Mutex, MutexGuard};

use sport_core::model::{
    Club, ClubDetail, ClubId, FaqCategory, FitnessExercise, FitnessSubmission, LegacyHours,
    StudentProfile, Training, TrainingId,
};

use super::SportApi;
use crate::error::ApiError;

#[derive(Default)]
struct State {
    offline: bool,
    failure: Option<StatusCode>,
    profile: Option<StudentProfile>,
    legacy_hours: LegacyHours,
    trainings: Vec<Training>,
    clubs: Vec<ClubDetail>,
    exercises: Vec<FitnessExercise>,
    submissions: Vec<FitnessSubmission>,
    faq: Vec<FaqCategory>,
}

/// Simple in-memory backend for testing and prototyping.
///
/// Check-ins toggle `checked_in` and the load counter on the stored
/// training, the way the real backend reports them on the next fetch.
#[derive(Clone, Default)]
pub struct InMemorySportApi {
    state: Arc<Mutex<State>>,
}

impl InMemorySportApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))
    }

    fn online(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        let guard = self.lock()?;
        if guard.offline {
            return Err(ApiError::Unavailable("backend offline".into()));
        }
        if let Some(status) = guard.failure {
            return Err(ApiError::HttpStatus(status));
        }
        Ok(guard)
    }

    /// Make every call fail with `ApiError::Unavailable` while `offline` is set.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the state lock is poisoned.
    pub fn set_offline(&self, offline: bool) -> Result<(), ApiError> {
        self.lock()?.offline = offline;
        Ok(())
    }

    /// Make every call answer with `status` until cleared with `None`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the state lock is poisoned.
    pub fn set_failure_status(&self, status: Option<StatusCode>) -> Result<(), ApiError> {
        self.lock()?.failure = status;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the state lock is poisoned.
    pub fn set_profile(&self, profile: StudentProfile) -> Result<(), ApiError> {
        self.lock()?.profile = Some(profile);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the state lock is poisoned.
    pub fn set_legacy_hours(&self, hours: LegacyHours) -> Result<(), ApiError> {
        self.lock()?.legacy_hours = hours;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the state lock is poisoned.
    pub fn add_training(&self, training: Training) -> Result<(), ApiError> {
        self.lock()?.trainings.push(training);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the state lock is poisoned.
    pub fn add_club(&self, club: ClubDetail) -> Result<(), ApiError> {
        self.lock()?.clubs.push(club);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the state lock is poisoned.
    pub fn set_exercises(&self, exercises: Vec<FitnessExercise>) -> Result<(), ApiError> {
        self.lock()?.exercises = exercises;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the state lock is poisoned.
    pub fn set_faq(&self, faq: Vec<FaqCategory>) -> Result<(), ApiError> {
        self.lock()?.faq = faq;
        Ok(())
    }

    /// Fitness submissions received so far.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unavailable` if the state lock is poisoned.
    pub fn submissions(&self) -> Result<Vec<FitnessSubmission>, ApiError> {
        Ok(self.lock()?.submissions.clone())
    }

    /// Stored copy of a training, reflecting check-ins.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no training has this id.
    pub fn training(&self, id: TrainingId) -> Result<Training, ApiError> {
        self.lock()?
            .trainings
            .iter()
            .find(|training| training.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }
}

#[async_trait]
impl SportApi for InMemorySportApi {
    async fn profile(&self) -> Result<StudentProfile, ApiError> {
        self.online()?.profile.clone().ok_or(ApiError::Unauthorized)
    }

    async fn legacy_hours(&self) -> Result<LegacyHours, ApiError> {
        Ok(self.online()?.legacy_hours)
    }

    async fn trainings(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Training>, ApiError> {
        let guard = self.online()?;
        let mut found: Vec<Training> = guard
            .trainings
            .iter()
            .filter(|training| {
                let date = training.date();
                date >= from && date < to
            })
            .cloned()
            .collect();
        found.sort_by_key(|training| training.start);
        Ok(found)
    }

    async fn check_in(&self, id: TrainingId) -> Result<(), ApiError> {
        let mut guard = self.online()?;
        let training = guard
            .trainings
            .iter_mut()
            .find(|training| training.id == id)
            .ok_or(ApiError::NotFound)?;

        if training.checked_in {
            return Err(ApiError::Rejected("already checked in".into()));
        }
        if !training.can_check_in {
            return Err(ApiError::Rejected("check-in is closed".into()));
        }
        if training.is_full() {
            return Err(ApiError::Rejected("training is full".into()));
        }

        training.checked_in = true;
        training.load = training.load.saturating_add(1);
        Ok(())
    }

    async fn cancel_check_in(&self, id: TrainingId) -> Result<(), ApiError> {
        let mut guard = self.online()?;
        let training = guard
            .trainings
            .iter_mut()
            .find(|training| training.id == id)
            .ok_or(ApiError::NotFound)?;

        if !training.checked_in {
            return Err(ApiError::Rejected("not checked in".into()));
        }

        training.checked_in = false;
        training.load = training.load.saturating_sub(1);
        Ok(())
    }

    async fn clubs(&self) -> Result<Vec<Club>, ApiError> {
        Ok(self
            .online()?
            .clubs
            .iter()
            .map(|detail| detail.club.clone())
            .collect())
    }

    async fn club(&self, id: ClubId) -> Result<ClubDetail, ApiError> {
        self.online()?
            .clubs
            .iter()
            .find(|detail| detail.club.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn fitness_exercises(&self) -> Result<Vec<FitnessExercise>, ApiError> {
        Ok(self.online()?.exercises.clone())
    }

    async fn submit_fitness_results(&self, submission: &FitnessSubmission) -> Result<(), ApiError> {
        self.online()?.submissions.push(submission.clone());
        Ok(())
    }

    async fn faq(&self) -> Result<Vec<FaqCategory>, ApiError> {
        Ok(self.online()?.faq.clone())
    }
}
