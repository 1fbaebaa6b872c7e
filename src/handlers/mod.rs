use axum::Router;
use axum::extract::Query;
use axum::extract::rejection::QueryRejection;
use axum::routing::get;
use std::sync::Arc;
use tracing::warn;

use crate::client_key::ClientKey;
use crate::error::ApiError;
use crate::metrics::RATE_LIMITED;
use crate::state::AppState;

mod alerts;
mod frame;
mod health;
mod market;
mod metrics;
mod news;
mod portfolio;

pub use alerts::{create_alert_handler, delete_alert_handler, list_alerts_handler};
pub use frame::{frame_action_handler, frame_handler};
pub use health::health_handler;
pub use market::{coin_history_handler, market_handler};
pub use metrics::metrics_handler;
pub use news::news_handler;
pub use portfolio::{add_portfolio_item_handler, get_portfolio_handler, portfolio_summary_handler};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/market", get(market_handler))
        .route("/api/market/history", get(coin_history_handler))
        .route("/api/portfolio", get(get_portfolio_handler).post(add_portfolio_item_handler))
        .route("/api/portfolio/summary", get(portfolio_summary_handler))
        .route(
            "/api/alerts",
            get(list_alerts_handler)
                .post(create_alert_handler)
                .delete(delete_alert_handler),
        )
        .route("/api/news", get(news_handler))
        .route("/api/frame", get(frame_handler).post(frame_action_handler))
        .with_state(state)
}

// Rate limit check, shared by every API route
fn check_rate_limit(state: &AppState, key: &ClientKey) -> Result<(), ApiError> {
    if state.rate_limiter.can_make_request(key.as_str()) {
        return Ok(());
    }

    RATE_LIMITED.inc();
    warn!(client = key.as_str(), "Rate limit exceeded");
    Err(ApiError::RateLimited)
}

// Undecodable query strings (duplicate keys, bad numbers) still answer
// with an envelope
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|e| ApiError::bad_request("Invalid query parameters", e.body_text()))
}

// Query strings treat an empty value like a missing one
fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

// zero counts as missing for required numeric body fields
fn is_unset(value: Option<f64>) -> bool {
    value.is_none_or(|v| v == 0.0 || v.is_nan())
}

fn now_id(prefix: &str) -> String {
    format!("{prefix}_{}", chrono::Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_unset() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some("  ".into())));
        assert!(!is_blank(&Some("u1".into())));

        assert!(is_unset(None));
        assert!(is_unset(Some(0.0)));
        assert!(is_unset(Some(f64::NAN)));
        assert!(!is_unset(Some(0.25)));
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty(Some(" u1 ".into())).as_deref(), Some("u1"));
        assert_eq!(non_empty(Some("".into())), None);
    }

    #[test]
    fn ids_carry_prefix() {
        assert!(now_id("alert").starts_with("alert_"));
    }
}
