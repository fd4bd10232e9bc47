use std::sync::Arc;

use sport_core::model::{Club, ClubDetail, ClubId};

use crate::api::SportApi;
use crate::error::ApiError;

#[derive(Clone)]
pub struct ClubService {
    api: Arc<dyn SportApi>,
}

impl ClubService {
    #[must_use]
    pub fn new(api: Arc<dyn SportApi>) -> Self {
        Self { api }
    }

    /// All clubs, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the club list cannot be fetched.
    pub async fn list(&self) -> Result<Vec<Club>, ApiError> {
        let mut clubs = self.api.clubs().await?;
        clubs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(clubs)
    }

    /// A club with its groups and roster.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown club.
    pub async fn detail(&self, id: ClubId) -> Result<ClubDetail, ApiError> {
        self.api.club(id).await
    }
}
