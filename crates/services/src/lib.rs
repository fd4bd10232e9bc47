#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod club_service;
pub mod config;
pub mod enrollment_store;
pub mod error;
pub mod faq_service;
pub mod fitness_service;
pub mod profile_service;
pub mod schedule;

pub use sport_core::Clock;

pub use api::{HttpSportApi, InMemorySportApi, SportApi};
pub use app_services::AppServices;
pub use club_service::ClubService;
pub use config::ApiConfig;
pub use enrollment_store::{EnrollmentSnapshot, EnrollmentStore, SubscriptionId};
pub use error::{ApiError, AppServicesError, ConfigError, FitnessServiceError, ScheduleError};
pub use faq_service::FaqService;
pub use fitness_service::FitnessService;
pub use profile_service::{ProfileProgress, ProfileService};
pub use schedule::{DataSource, DaySchedule, ScheduleService, ScheduledSession, WeekSchedule};
