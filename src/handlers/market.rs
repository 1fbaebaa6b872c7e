use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

use super::{check_rate_limit, non_empty, query_params};
use crate::client_key::ClientKey;
use crate::envelope::ApiResponse;
use crate::error::{ApiError, ApiResult};
use crate::market::{DEFAULT_CURRENCY, DEFAULT_HISTORY_DAYS, MarketClient};
use crate::metrics::REQUEST_TOTAL;
use crate::models::{CoinHistory, MarketData};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MarketQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub ids: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub coin_id: Option<String>,
    pub days: Option<String>,
    pub vs_currency: Option<String>,
}

// `?ids=a,b` with blanks dropped; nothing left means the default set
fn parse_ids(raw: Option<String>) -> Vec<String> {
    let ids: Vec<String> = raw
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        MarketClient::default_ids()
    } else {
        ids
    }
}

pub async fn market_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    query: Result<Query<MarketQuery>, QueryRejection>,
) -> ApiResult<Vec<MarketData>> {
    REQUEST_TOTAL.inc();
    check_rate_limit(&state, &key)?;
    let query = query_params(query)?;

    let result = match query.kind.as_deref() {
        Some("trending") => state.market.fetch_trending().await,
        // "market" and anything unrecognised
        _ => {
            let ids = parse_ids(query.ids);
            state.market.fetch_market_data(&ids, DEFAULT_CURRENCY).await
        }
    };

    let data = result.map_err(|e| {
        error!(error = %e, "Market API error");
        ApiError::internal("Failed to fetch market data", e)
    })?;

    Ok(Json(ApiResponse::ok(data, "Market data fetched successfully")))
}

pub async fn coin_history_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<CoinHistory> {
    REQUEST_TOTAL.inc();
    let query = query_params(query)?;

    let Some(coin_id) = non_empty(query.coin_id) else {
        return Err(ApiError::bad_request("Coin ID is required", "Missing coinId parameter"));
    };

    let days = match non_empty(query.days) {
        None => DEFAULT_HISTORY_DAYS,
        Some(raw) => match raw.parse::<u32>() {
            Ok(days) if days > 0 => days,
            _ => {
                return Err(ApiError::bad_request(
                    "Invalid days parameter",
                    "days must be a positive integer",
                ));
            }
        },
    };
    let vs_currency = non_empty(query.vs_currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

    check_rate_limit(&state, &key)?;

    let history = state
        .market
        .fetch_coin_history(&coin_id, days, &vs_currency)
        .await
        .map_err(|e| {
            error!(error = %e, coin_id = %coin_id, "Coin history API error");
            ApiError::internal("Failed to fetch coin history", e)
        })?;

    Ok(Json(ApiResponse::ok(history, "Coin history fetched successfully")))
}
