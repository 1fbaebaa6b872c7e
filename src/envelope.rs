use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Body of every API route. `message` and `error` are omitted when unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

// Unvalidated: `success` and `error` may disagree. Handlers build bodies
// through `ApiResponse::ok` or `ApiError` instead.
pub fn create_api_response<T>(
    data: T,
    success: bool,
    message: Option<String>,
    error: Option<String>,
) -> ApiResponse<T> {
    ApiResponse {
        data,
        success,
        message,
        error,
        timestamp: Utc::now(),
    }
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        create_api_response(data, true, Some(message.into()), None)
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        create_api_response((), false, Some(message.into()), Some(error.into()))
    }
}
