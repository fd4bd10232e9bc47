use std::sync::Arc;

use sport_core::model::{FaqCategory, find_category};

use crate::api::SportApi;
use crate::error::ApiError;

#[derive(Clone)]
pub struct FaqService {
    api: Arc<dyn SportApi>,
}

impl FaqService {
    #[must_use]
    pub fn new(api: Arc<dyn SportApi>) -> Self {
        Self { api }
    }

    /// Categories with at least one entry.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the FAQ cannot be fetched.
    pub async fn categories(&self) -> Result<Vec<FaqCategory>, ApiError> {
        let mut categories = self.api.faq().await?;
        categories.retain(|category| !category.entries.is_empty());
        Ok(categories)
    }

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no category has this name.
    pub async fn category(&self, name: &str) -> Result<FaqCategory, ApiError> {
        let categories = self.categories().await?;
        find_category(&categories, name)
            .cloned()
            .ok_or(ApiError::NotFound)
    }
}
