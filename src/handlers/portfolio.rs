use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;

use super::{check_rate_limit, is_blank, is_unset, non_empty, now_id, query_params};
use crate::client_key::ClientKey;
use crate::envelope::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::metrics::REQUEST_TOTAL;
use crate::mock_data::{PortfolioSummary, portfolio_for};
use crate::models::{CreatePortfolioItemRequest, Holding, PortfolioItem};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

fn require_user(query: Result<Query<UserQuery>, QueryRejection>) -> Result<String, ApiError> {
    non_empty(query_params(query)?.user_id)
        .ok_or_else(|| ApiError::bad_request("User ID is required", "Missing userId parameter"))
}

pub async fn get_portfolio_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Vec<Holding>> {
    REQUEST_TOTAL.inc();
    let user_id = require_user(query)?;
    check_rate_limit(&state, &key)?;

    Ok(Json(ApiResponse::ok(
        portfolio_for(&user_id),
        "Portfolio data fetched successfully",
    )))
}

pub async fn portfolio_summary_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<PortfolioSummary> {
    REQUEST_TOTAL.inc();
    let user_id = require_user(query)?;
    check_rate_limit(&state, &key)?;

    let summary = PortfolioSummary::from_holdings(&portfolio_for(&user_id));
    Ok(Json(ApiResponse::ok(summary, "Portfolio summary computed successfully")))
}

pub async fn add_portfolio_item_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    payload: Result<Json<CreatePortfolioItemRequest>, JsonRejection>,
) -> ApiResult<PortfolioItem> {
    REQUEST_TOTAL.inc();
    check_rate_limit(&state, &key)?;

    let Json(body) = payload
        .map_err(|e| ApiError::bad_request("Invalid request body", e.body_text()))?;

    if is_blank(&body.user_id)
        || is_blank(&body.asset)
        || is_unset(body.quantity)
        || is_unset(body.average_buy_price)
    {
        return Err(ApiError::bad_request(
            "Missing required fields",
            "userId, asset, quantity, and averageBuyPrice are required",
        ));
    }

    // nothing is stored, the item is echoed back
    let item = PortfolioItem {
        portfolio_id: now_id("portfolio"),
        user_id: body.user_id.unwrap_or_default(),
        asset: body.asset.unwrap_or_default(),
        quantity: body.quantity.unwrap_or_default(),
        average_buy_price: body.average_buy_price.unwrap_or_default(),
        created_at: chrono::Utc::now(),
    };

    Ok(Json(ApiResponse::ok(item, "Portfolio item added successfully")))
}
