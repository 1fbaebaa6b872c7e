pub mod cache;
pub mod client_key;
pub mod clock;
pub mod config;
pub mod envelope;
pub mod error;
pub mod frame;
pub mod handlers;
pub mod market;
pub mod metrics;
pub mod mock_data;
pub mod models;
pub mod rate_limit;
pub mod state;
