//! Contract for the remote sports API and its implementations.

mod http;
mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;

use sport_core::model::{
    Club, ClubDetail, ClubId, FaqCategory, FitnessExercise, FitnessSubmission, LegacyHours,
    StudentProfile, Training, TrainingId,
};

use crate::error::ApiError;

pub use http::HttpSportApi;
pub use memory::InMemorySportApi;

/// Everything the client asks of the backend.
///
/// Implementations resolve payload shapes into domain types, so callers never
/// see wire-format differences between API generations.
#[async_trait]
pub trait SportApi: Send + Sync {
    /// Profile of the signed-in student.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be read.
    async fn profile(&self) -> Result<StudentProfile, ApiError>;

    /// Semester counters from the older hours endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be read.
    async fn legacy_hours(&self) -> Result<LegacyHours, ApiError>;

    /// Trainings starting on `from` up to, but not including, `to`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be read.
    async fn trainings(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Training>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::Rejected` if the backend refuses the check-in.
    async fn check_in(&self, id: TrainingId) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::Rejected` if the backend refuses the cancellation.
    async fn cancel_check_in(&self, id: TrainingId) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be read.
    async fn clubs(&self) -> Result<Vec<Club>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown club.
    async fn club(&self, id: ClubId) -> Result<ClubDetail, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be read.
    async fn fitness_exercises(&self) -> Result<Vec<FitnessExercise>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the upload fails.
    async fn submit_fitness_results(&self, submission: &FitnessSubmission) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be read.
    async fn faq(&self) -> Result<Vec<FaqCategory>, ApiError>;
}
