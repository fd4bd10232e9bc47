//! Shared error types for the services crate.

use thiserror::Error;

use sport_core::model::{FitnessError, SessionKey};

/// Errors surfaced by `SportApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not signed in or session expired")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("invalid request url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// True when the backend could not be reached or failed on its side:
    /// connection and timeout failures, 5xx statuses and `Unavailable`.
    ///
    /// Client-side problems (bad URL, undecodable body, 4xx) are not.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        match self {
            ApiError::Unavailable(_) => true,
            ApiError::HttpStatus(status) => status.is_server_error(),
            ApiError::Http(err) => err.is_connect() || err.is_timeout(),
            _ => false,
        }
    }
}

/// Errors emitted while reading API configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid request timeout: {0}")]
    InvalidTimeout(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors emitted by `ScheduleService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScheduleError {
    #[error("week offset {0} is out of range")]
    WeekOutOfRange(i64),

    #[error("no session `{0}` in the schedule")]
    UnknownSession(SessionKey),

    #[error("schedule unavailable: {0}")]
    Unavailable(String),

    #[error("session `{0}` is sample data and cannot be booked")]
    SampleData(SessionKey),

    #[error("already enrolled in `{0}`")]
    AlreadyEnrolled(SessionKey),

    #[error("not enrolled in `{0}`")]
    NotEnrolled(SessionKey),

    #[error("check-in for `{0}` is closed")]
    CheckInClosed(SessionKey),

    #[error("session `{0}` is full")]
    Full(SessionKey),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `FitnessService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FitnessServiceError {
    #[error(transparent)]
    Validation(#[from] FitnessError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn only_transport_and_server_failures_are_unreachable() {
        assert!(ApiError::Unavailable("down".into()).is_unreachable());
        assert!(ApiError::HttpStatus(StatusCode::BAD_GATEWAY).is_unreachable());

        assert!(!ApiError::HttpStatus(StatusCode::GONE).is_unreachable());
        assert!(!ApiError::Unauthorized.is_unreachable());
        assert!(!ApiError::NotFound.is_unreachable());
        assert!(!ApiError::Rejected("full".into()).is_unreachable());

        let bad_url = url::Url::parse("not a url").unwrap_err();
        assert!(!ApiError::from(bad_url).is_unreachable());
    }
}
