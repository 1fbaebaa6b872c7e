use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::envelope::ApiResponse;

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

// Anything a route can fail with. Rendered as a failure envelope with a
// matching non-2xx status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Rate limit exceeded: Too many requests")]
    RateLimited,

    #[error("{message}: {detail}")]
    BadRequest { message: String, detail: String },

    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn internal(message: impl Into<String>, detail: impl ToString) -> Self {
        Self::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::RateLimited => ApiResponse::failure("Rate limit exceeded", "Too many requests"),
            Self::BadRequest { message, detail } | Self::Internal { message, detail } => {
                ApiResponse::failure(message, detail)
            }
        };
        (status, Json(body)).into_response()
    }
}

// Market data API failures
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid market data url: {0}")]
    InvalidUrl(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("rate limit window must be greater than zero")]
    ZeroRateWindow,

    #[error("upstream timeout must be greater than zero")]
    ZeroUpstreamTimeout,

    #[error("market data url must start with http: {0}")]
    InvalidUrl(String),
}
