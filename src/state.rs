use std::sync::Arc;
use crate::market::MarketClient;
use crate::rate_limit::RateLimiter;
// app's shared state

pub struct AppState {
    pub market: MarketClient,
    // one limiter for the whole process, shared by every route
    pub rate_limiter: Arc<RateLimiter>,
    pub base_url: String, // public url for frame links
}

impl AppState {
    pub fn new(market: MarketClient, rate_limiter: Arc<RateLimiter>, base_url: impl Into<String>) -> Self {
        Self {
            market,
            rate_limiter,
            base_url: base_url.into(),
        }
    }
}
