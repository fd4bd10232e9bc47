use std::sync::Arc;
use tracing::info;

use sport_core::model::{FitnessExercise, FitnessResultDraft, FitnessSubmission};

use crate::api::SportApi;
use crate::error::{ApiError, FitnessServiceError};

#[derive(Clone)]
pub struct FitnessService {
    api: Arc<dyn SportApi>,
}

impl FitnessService {
    #[must_use]
    pub fn new(api: Arc<dyn SportApi>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the catalogue cannot be fetched.
    pub async fn exercises(&self) -> Result<Vec<FitnessExercise>, ApiError> {
        self.api.fitness_exercises().await
    }

    /// Validate `draft` against the current catalogue, then upload it.
    ///
    /// # Errors
    ///
    /// Returns `FitnessServiceError::Validation` before any upload if the draft
    /// is invalid, or `FitnessServiceError::Api` if a request fails.
    pub async fn submit(
        &self,
        draft: FitnessResultDraft,
    ) -> Result<FitnessSubmission, FitnessServiceError> {
        let exercises = self.api.fitness_exercises().await?;
        let submission = draft.validate(&exercises)?;
        self.api.submit_fitness_results(&submission).await?;
        info!(results = submission.results().len(), "fitness results submitted");
        Ok(submission)
    }
}
