use anyhow::Context;
use clap::Parser; // for cli
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cryptotrend_gateway::config::Args;
use cryptotrend_gateway::handlers;
use cryptotrend_gateway::market::MarketClient;
use cryptotrend_gateway::rate_limit::{RateLimiter, idle_key_sweeper};
use cryptotrend_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // parse cli arguments
    let args = Args::parse();
    args.validate()?;

    let (limit, window_ms) = args.rate_limiter_config();
    let rate_limiter = Arc::new(RateLimiter::new(limit, window_ms));

    let market = MarketClient::new(
        &args.coingecko_url,
        Duration::from_secs(args.cache_ttl),
        Duration::from_secs(args.upstream_timeout),
    )
    .context("building market data client")?;

    // creating shared state
    let state = Arc::new(AppState::new(market, Arc::clone(&rate_limiter), args.public_base_url()));

    if args.rate_sweep_secs > 0 {
        let sweep_every = Duration::from_secs(args.rate_sweep_secs);
        tokio::spawn(idle_key_sweeper(Arc::clone(&rate_limiter), sweep_every));
    }

    let app = handlers::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(port = args.port, "Gateway running");
    info!(url = %args.coingecko_url, "Market data from CoinGecko");
    info!(limit, window_ms, "Rate limit configured");
    info!(cache_ttl = args.cache_ttl, "Market cache TTL in seconds");

    // peer address is the rate limit key of last resort
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("server error")?;

    info!("Gateway stopped");
    Ok(())
}
