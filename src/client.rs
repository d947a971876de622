use crate::error::{ApiError, StepError};
use crate::models::{DailyStepEntry, parse_daily_steps, parse_lifetime_steps, parse_step_series};
use crate::period::DATE_FORMAT;
use chrono::NaiveDate;
use log::{debug, info};
use reqwest::{Client as HttpClient, Response, StatusCode};
use std::fmt;
use std::time::Duration;

pub const BASE_URL: &str = "https://api.fitbit.com/1/user/-";
const SUFFIX: &str = ".json";

#[derive(Clone)]
pub struct Client {
    token: String,
    http: HttpClient,
    base_url: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("token", &"<token>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Client {
    /// Create a new client with the default base URL.
    pub fn new(token: impl Into<String>) -> Result<Self, StepError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(StepError::MissingToken);
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        info!("Initialized Fitbit API client with default base URL");
        Ok(Self {
            token,
            http,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Override the base URL (useful for tests or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Updated Fitbit API base URL to {}", self.base_url);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Total steps recorded by the tracker since the account was created.
    pub async fn fetch_lifetime_steps(&self) -> Result<u64, StepError> {
        debug!("Fetching lifetime totals");
        let body = self.get_text(format!("/activities{}", SUFFIX)).await?;
        parse_lifetime_steps(&body)
    }

    /// Steps for a single day, up to the most recent sync.
    pub async fn fetch_daily_summary(&self, date: NaiveDate) -> Result<u64, StepError> {
        let path = format!("/activities/date/{}{}", date.format(DATE_FORMAT), SUFFIX);
        debug!("Fetching activity summary for {}", date);
        let body = self.get_text(path).await?;
        parse_daily_steps(&body)
    }

    /// Per-day steps for an inclusive date range.
    pub async fn fetch_step_series(
        &self,
        date_from: NaiveDate,
        date_to: NaiveDate,
    ) -> Result<Vec<DailyStepEntry>, StepError> {
        if date_from > date_to {
            return Err(StepError::InvalidDateRange {
                start: date_from,
                end: date_to,
            });
        }
        let path = format!(
            "/activities/log/steps/date/{}/{}{}",
            date_from.format(DATE_FORMAT),
            date_to.format(DATE_FORMAT),
            SUFFIX
        );
        debug!("Fetching step series for {} to {}", date_from, date_to);
        let body = self.get_text(path).await?;
        parse_step_series(&body)
    }

    /// Parse a step series from a JSON string returned by the API.
    pub fn parse_step_series(&self, data: &str) -> Result<Vec<DailyStepEntry>, StepError> {
        parse_step_series(data)
    }

    async fn get_text(&self, path: String) -> Result<String, StepError> {
        let response = self.get(path).await?;
        response.text().await.map_err(StepError::from)
    }

    async fn get(&self, path: String) -> Result<Response, StepError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET request to {}", url);
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        debug!("Received status {}", response.status());
        self.handle_status(response.status())?;
        Ok(response)
    }

    fn handle_status(&self, status: StatusCode) -> Result<(), StepError> {
        if status.is_success() {
            return Ok(());
        }
        let api_error = match status {
            StatusCode::BAD_REQUEST => ApiError::InvalidRequest,
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            _ => ApiError::UnexpectedStatus(status),
        };
        Err(StepError::Api(api_error))
    }
}
