use std::sync::Arc;
use tracing::info;

use crate::Clock;
use crate::api::{HttpSportApi, SportApi};
use crate::club_service::ClubService;
use crate::config::ApiConfig;
use crate::enrollment_store::EnrollmentStore;
use crate::error::AppServicesError;
use crate::faq_service::FaqService;
use crate::fitness_service::FitnessService;
use crate::profile_service::ProfileService;
use crate::schedule::ScheduleService;

/// Assembles app-facing services around one API client and one enrollment
/// store, scoped to a signed-in session.
#[derive(Clone)]
pub struct AppServices {
    store: EnrollmentStore,
    schedule: Arc<ScheduleService>,
    profile: Arc<ProfileService>,
    clubs: Arc<ClubService>,
    fitness: Arc<FitnessService>,
    faq: Arc<FaqService>,
}

impl AppServices {
    /// Build services backed by the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be configured.
    pub fn from_config(config: &ApiConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let api: Arc<dyn SportApi> = Arc::new(HttpSportApi::new(config)?);
        info!(base_url = %config.base_url(), authenticated = config.token().is_some(), "api client ready");
        Ok(Self::with_api(api, clock))
    }

    /// Build services over any `SportApi` implementation.
    #[must_use]
    pub fn with_api(api: Arc<dyn SportApi>, clock: Clock) -> Self {
        let store = EnrollmentStore::new();
        Self {
            schedule: Arc::new(ScheduleService::new(
                clock,
                Arc::clone(&api),
                store.clone(),
            )),
            profile: Arc::new(ProfileService::new(Arc::clone(&api))),
            clubs: Arc::new(ClubService::new(Arc::clone(&api))),
            fitness: Arc::new(FitnessService::new(Arc::clone(&api))),
            faq: Arc::new(FaqService::new(api)),
            store,
        }
    }

    #[must_use]
    pub fn store(&self) -> EnrollmentStore {
        self.store.clone()
    }

    #[must_use]
    pub fn schedule(&self) -> Arc<ScheduleService> {
        Arc::clone(&self.schedule)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn clubs(&self) -> Arc<ClubService> {
        Arc::clone(&self.clubs)
    }

    #[must_use]
    pub fn fitness(&self) -> Arc<FitnessService> {
        Arc::clone(&self.fitness)
    }

    #[must_use]
    pub fn faq(&self) -> Arc<FaqService> {
        Arc::clone(&self.faq)
    }

    /// End the signed-in session: enrollment state does not outlive it.
    pub fn logout(&self) {
        self.store.clear();
        info!("logged out; enrollment state cleared");
    }
}
