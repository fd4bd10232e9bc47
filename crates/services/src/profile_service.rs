use std::sync::Arc;
use tracing::debug;

use sport_core::model::{ProgressRecord, StudentProfile};

use crate::api::SportApi;
use crate::error::ApiError;

/// A freshly fetched profile together with the progress derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileProgress {
    pub profile: StudentProfile,
    pub progress: ProgressRecord,
}

/// Fetches profiles and derives semester progress. Nothing is cached.
#[derive(Clone)]
pub struct ProfileService {
    api: Arc<dyn SportApi>,
}

impl ProfileService {
    #[must_use]
    pub fn new(api: Arc<dyn SportApi>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ApiError` if the profile cannot be fetched.
    pub async fn progress(&self) -> Result<ProfileProgress, ApiError> {
        let profile = self.api.profile().await?;
        let progress = ProgressRecord::from_profile(&profile);
        debug!(%progress, "computed progress from profile");
        Ok(ProfileProgress { profile, progress })
    }

    /// Progress from the older hours endpoint.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the hours cannot be fetched.
    pub async fn legacy_progress(&self) -> Result<ProgressRecord, ApiError> {
        let hours = self.api.legacy_hours().await?;
        Ok(ProgressRecord::from_legacy(&hours))
    }
}
