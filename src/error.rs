use thiserror::Error;

#[derive(Debug, Error)]
pub enum StepError {
    #[error("missing access token")]
    MissingToken,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid date range: start {start} must be before or equal to end {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid or unexpected response format")]
    InvalidResponse,

    #[error("api rejected request: {0}")]
    Api(#[from] ApiError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request (400)")]
    InvalidRequest,

    #[error("not authorized, token invalid or expired (401)")]
    Unauthorized,

    #[error("insufficient scope (403)")]
    Forbidden,

    #[error("resource not found (404)")]
    NotFound,

    #[error("rate limit exceeded (429)")]
    RateLimited,

    #[error("unexpected status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
}
