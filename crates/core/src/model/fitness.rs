use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::model::ids::ExerciseId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FitnessError {
    #[error("fitness test submission has no results")]
    Empty,

    #[error("unknown exercise {0}")]
    UnknownExercise(ExerciseId),

    #[error("exercise {0} appears more than once")]
    DuplicateExercise(ExerciseId),

    #[error("result for exercise {0} is empty")]
    EmptyValue(ExerciseId),

    #[error("result for exercise {id} must be a non-negative number, got `{value}`")]
    InvalidNumber { id: ExerciseId, value: String },

    #[error("result for exercise {id} must be one of the listed options, got `{value}`")]
    NotAnOption { id: ExerciseId, value: String },
}

/// An exercise of the fitness test.
///
/// Exercises with `select` options take one of those labels as a result;
/// all others take a non-negative number in `unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessExercise {
    pub id: ExerciseId,
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub select: Option<Vec<String>>,
}

/// Results as typed by the student, before validation.
#[derive(Debug, Clone, Default)]
pub struct FitnessResultDraft {
    pub results: Vec<(ExerciseId, String)>,
}

impl FitnessResultDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_result(mut self, id: ExerciseId, value: impl Into<String>) -> Self {
        self.results.push((id, value.into()));
        self
    }

    /// Validate the draft against the exercise catalogue.
    ///
    /// # Errors
    ///
    /// Returns `FitnessError` for an empty draft, unknown or repeated
    /// exercises, and values that do not fit the exercise.
    pub fn validate(self, exercises: &[FitnessExercise]) -> Result<FitnessSubmission, FitnessError> {
        if self.results.is_empty() {
            return Err(FitnessError::Empty);
        }

        let mut seen = HashSet::new();
        let mut results = Vec::with_capacity(self.results.len());
        for (id, raw) in self.results {
            let exercise = exercises
                .iter()
                .find(|exercise| exercise.id == id)
                .ok_or(FitnessError::UnknownExercise(id))?;
            if !seen.insert(id) {
                return Err(FitnessError::DuplicateExercise(id));
            }

            let value = raw.trim().to_string();
            if value.is_empty() {
                return Err(FitnessError::EmptyValue(id));
            }
            match exercise.select.as_deref() {
                Some(options) => {
                    if !options.iter().any(|option| option == &value) {
                        return Err(FitnessError::NotAnOption { id, value });
                    }
                }
                None => {
                    let valid = value
                        .parse::<f64>()
                        .is_ok_and(|number| number.is_finite() && number >= 0.0);
                    if !valid {
                        return Err(FitnessError::InvalidNumber { id, value });
                    }
                }
            }

            results.push(FitnessResultEntry {
                exercise_id: id,
                value,
            });
        }

        Ok(FitnessSubmission { results })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FitnessResultEntry {
    pub exercise_id: ExerciseId,
    pub value: String,
}

/// Validated fitness-test results, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FitnessSubmission {
    results: Vec<FitnessResultEntry>,
}

impl FitnessSubmission {
    #[must_use]
    pub fn results(&self) -> &[FitnessResultEntry] {
        &self.results
    }
}
