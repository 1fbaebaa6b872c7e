use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::{check_rate_limit, is_blank, is_unset, non_empty, now_id, query_params};
use crate::client_key::ClientKey;
use crate::envelope::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::metrics::REQUEST_TOTAL;
use crate::mock_data::alerts_for;
use crate::models::{Alert, AlertCondition, AlertStatus, CreateAlertRequest};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertsQuery {
    pub user_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAlertQuery {
    pub alert_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedAlert {
    pub alert_id: String,
}

pub async fn list_alerts_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    query: Result<Query<AlertsQuery>, QueryRejection>,
) -> ApiResult<Vec<Alert>> {
    REQUEST_TOTAL.inc();
    let query = query_params(query)?;

    let Some(user_id) = non_empty(query.user_id) else {
        return Err(ApiError::bad_request("User ID is required", "Missing userId parameter"));
    };
    check_rate_limit(&state, &key)?;

    Ok(Json(ApiResponse::ok(alerts_for(&user_id), "Alerts fetched successfully")))
}

pub async fn create_alert_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    payload: Result<Json<CreateAlertRequest>, JsonRejection>,
) -> ApiResult<Alert> {
    REQUEST_TOTAL.inc();
    check_rate_limit(&state, &key)?;

    let Json(body) = payload
        .map_err(|e| ApiError::bad_request("Invalid request body", e.body_text()))?;

    if is_blank(&body.user_id)
        || is_blank(&body.asset)
        || is_blank(&body.symbol)
        || is_blank(&body.condition_type)
        || is_unset(body.value)
    {
        return Err(ApiError::bad_request(
            "Missing required fields",
            "userId, asset, symbol, conditionType, and value are required",
        ));
    }

    let condition_type = body
        .condition_type
        .as_deref()
        .and_then(AlertCondition::parse)
        .ok_or_else(|| {
            let valid: Vec<&str> = AlertCondition::ALL.iter().map(|c| c.as_str()).collect();
            ApiError::bad_request(
                "Invalid condition type",
                format!("conditionType must be one of: {}", valid.join(", ")),
            )
        })?;

    // not persisted
    let alert = Alert {
        alert_id: now_id("alert"),
        user_id: body.user_id.unwrap_or_default(),
        asset: body.asset.unwrap_or_default(),
        symbol: body.symbol.unwrap_or_default(),
        condition_type,
        value: body.value.unwrap_or_default(),
        status: AlertStatus::Active,
        created_at: chrono::Utc::now(),
        triggered_at: None,
        message: None,
    };
    info!(alert_id = %alert.alert_id, condition = condition_type.as_str(), "Alert created");

    Ok(Json(ApiResponse::ok(alert, "Alert created successfully")))
}

pub async fn delete_alert_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    query: Result<Query<DeleteAlertQuery>, QueryRejection>,
) -> ApiResult<DeletedAlert> {
    REQUEST_TOTAL.inc();
    let query = query_params(query)?;

    let Some(alert_id) = non_empty(query.alert_id) else {
        return Err(ApiError::bad_request("Alert ID is required", "Missing alertId parameter"));
    };
    check_rate_limit(&state, &key)?;

    Ok(Json(ApiResponse::ok(
        DeletedAlert { alert_id },
        "Alert deleted successfully",
    )))
}
