use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};


lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("cryptotrend_requests_total", "Total number of API requests").unwrap();
    pub static ref RATE_LIMITED: Counter =
        register_counter!("cryptotrend_rate_limited_total", "Requests rejected by the rate limiter").unwrap();
    pub static ref RATE_LIMIT_KEYS: Gauge =
        register_gauge!("cryptotrend_rate_limit_keys", "Client keys tracked by the rate limiter").unwrap();
    pub static ref CACHE_HITS: Counter =
        register_counter!("cryptotrend_market_cache_hits_total", "Market data cache hits").unwrap();
    pub static ref CACHE_MISSES: Counter =
        register_counter!("cryptotrend_market_cache_misses_total", "Market data cache misses").unwrap();
    pub static ref CACHE_SIZE: Gauge =
        register_gauge!("cryptotrend_market_cache_size", "Current number of cached market queries").unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "cryptotrend_upstream_latency_seconds",
        "Market data API latency in seconds"
    )
    .unwrap();
}
