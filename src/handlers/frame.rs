use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::{check_rate_limit, query_params};
use crate::client_key::ClientKey;
use crate::envelope::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::frame::{FrameActionRequest, FrameData, FrameView, frame_data};
use crate::metrics::REQUEST_TOTAL;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FrameQuery {
    pub action: Option<String>,
}

pub async fn frame_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    query: Result<Query<FrameQuery>, QueryRejection>,
) -> ApiResult<FrameData> {
    REQUEST_TOTAL.inc();
    check_rate_limit(&state, &key)?;
    let query = query_params(query)?;

    let view = FrameView::from_action(query.action.as_deref().unwrap_or("home"));

    Ok(Json(ApiResponse::ok(
        frame_data(view, &state.base_url),
        "Frame data generated successfully",
    )))
}

pub async fn frame_action_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    payload: Result<Json<FrameActionRequest>, JsonRejection>,
) -> ApiResult<FrameData> {
    REQUEST_TOTAL.inc();
    check_rate_limit(&state, &key)?;

    let Json(body) = payload
        .map_err(|e| ApiError::bad_request("Invalid frame data", e.body_text()))?;

    let (Some(untrusted), Some(_trusted)) = (body.untrusted_data, body.trusted_data) else {
        return Err(ApiError::bad_request(
            "Invalid frame data",
            "Missing untrustedData or trustedData",
        ));
    };

    let view = FrameView::from_button_index(untrusted.button_index.as_ref());
    debug!(fid = ?untrusted.fid, view = view.as_str(), "Frame interaction");

    Ok(Json(ApiResponse::ok(
        frame_data(view, &state.base_url),
        "Frame interaction processed",
    )))
}
