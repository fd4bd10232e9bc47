use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use sport_core::model::{
    Club, ClubDetail, ClubId, FaqCategory, FitnessExercise, FitnessSubmission, LegacyHours,
    StudentProfile, Training, TrainingId,
};

use super::SportApi;
use crate::config::ApiConfig;
use crate::error::{ApiError, ConfigError};

const PROFILE_PATH: &str = "profile/student";
const LEGACY_HOURS_PATH: &str = "attendance/hours";
const TRAININGS_PATH: &str = "calendar/trainings";
const CLUBS_PATH: &str = "clubs";
const FITNESS_EXERCISES_PATH: &str = "fitnesstest/exercises";
const FITNESS_UPLOAD_PATH: &str = "fitnesstest/upload";
const FAQ_PATH: &str = "faq";

const QUERY_DATE_FORMAT: &str = "%Y-%m-%d";

/// `SportApi` over HTTPS with bearer-token authentication.
#[derive(Clone)]
pub struct HttpSportApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSportApi {
    /// # Errors
    ///
    /// Returns `ConfigError::Client` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url().as_str().trim_end_matches('/').to_string(),
            token: config.token().map(str::to_string),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    fn trainings_url(&self, from: NaiveDate, to: NaiveDate) -> Result<Url, ApiError> {
        let mut url = self.endpoint(TRAININGS_PATH)?;
        url.query_pairs_mut()
            .append_pair("start", &from.format(QUERY_DATE_FORMAT).to_string())
            .append_pair("end", &to.format(QUERY_DATE_FORMAT).to_string());
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.authorize(self.client.get(url)).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + Sync + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<(), ApiError> {
        debug!(%url, "POST");
        let response = self
            .authorize(self.client.post(url))
            .json(body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            let body = response.text().await.unwrap_or_default();
            let message = body.trim();
            if message.is_empty() {
                Err(ApiError::Rejected(status.to_string()))
            } else {
                Err(ApiError::Rejected(message.to_string()))
            }
        }
        _ => Err(ApiError::HttpStatus(status)),
    }
}

#[async_trait]
impl SportApi for HttpSportApi {
    async fn profile(&self) -> Result<StudentProfile, ApiError> {
        self.get_json(self.endpoint(PROFILE_PATH)?).await
    }

    async fn legacy_hours(&self) -> Result<LegacyHours, ApiError> {
        self.get_json(self.endpoint(LEGACY_HOURS_PATH)?).await
    }

    async fn trainings(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Training>, ApiError> {
        self.get_json(self.trainings_url(from, to)?).await
    }

    async fn check_in(&self, id: TrainingId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("trainings/{id}/check_in"))?;
        self.post_json(url, &serde_json::json!({})).await
    }

    async fn cancel_check_in(&self, id: TrainingId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("trainings/{id}/cancel_check_in"))?;
        self.post_json(url, &serde_json::json!({})).await
    }

    async fn clubs(&self) -> Result<Vec<Club>, ApiError> {
        self.get_json(self.endpoint(CLUBS_PATH)?).await
    }

    async fn club(&self, id: ClubId) -> Result<ClubDetail, ApiError> {
        self.get_json(self.endpoint(&format!("{CLUBS_PATH}/{id}"))?)
            .await
    }

    async fn fitness_exercises(&self) -> Result<Vec<FitnessExercise>, ApiError> {
        self.get_json(self.endpoint(FITNESS_EXERCISES_PATH)?).await
    }

    async fn submit_fitness_results(&self, submission: &FitnessSubmission) -> Result<(), ApiError> {
        self.post_json(self.endpoint(FITNESS_UPLOAD_PATH)?, submission)
            .await
    }

    async fn faq(&self) -> Result<Vec<FaqCategory>, ApiError> {
        self.get_json(self.endpoint(FAQ_PATH)?).await
    }
}
