use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;

use super::{check_rate_limit, query_params};
use crate::client_key::ClientKey;
use crate::envelope::ApiResponse;
use crate::error::ApiResult;
use crate::metrics::REQUEST_TOTAL;
use crate::mock_data::crypto_news;
use crate::models::NewsItem;
use crate::state::AppState;

const DEFAULT_NEWS_LIMIT: usize = 10;

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    pub limit: Option<String>,
}

// unparseable or negative limits fall back to the default
fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_NEWS_LIMIT)
}

pub async fn news_handler(
    State(state): State<Arc<AppState>>,
    key: ClientKey,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> ApiResult<Vec<NewsItem>> {
    REQUEST_TOTAL.inc();
    check_rate_limit(&state, &key)?;
    let query = query_params(query)?;

    let limit = parse_limit(query.limit.as_deref());
    let news: Vec<NewsItem> = crypto_news().into_iter().take(limit).collect();

    Ok(Json(ApiResponse::ok(news, "News fetched successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits() {
        assert_eq!(parse_limit(None), 10);
        assert_eq!(parse_limit(Some("1")), 1);
        assert_eq!(parse_limit(Some("0")), 0);
        assert_eq!(parse_limit(Some("abc")), 10);
        assert_eq!(parse_limit(Some("-3")), 10);
    }
}
