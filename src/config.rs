use clap::Parser;

use crate::error::ConfigError;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "cryptotrend-gateway")]
#[command(about = "JSON API for the crypto trend dashboard and its frame")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    // Market data API base url
    #[arg(long, default_value = "https://api.coingecko.com/api/v3")]
    pub coingecko_url: String,

    // Public url used when building frame links
    #[arg(long, env = "NEXT_PUBLIC_BASE_URL", default_value = "https://cryptotrend-profx.vercel.app")]
    pub base_url: String,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 100)]
    pub rate_limit: u32,

    // Rate limit window in milliseconds
    #[arg(long, default_value_t = 60_000)]
    pub rate_window_ms: u64,

    // Idle rate limit key sweep interval in seconds, 0 keeps every key forever
    #[arg(long, default_value_t = 0)]
    pub rate_sweep_secs: u64,

    // Market data cache TTL in seconds
    #[arg(short, long, default_value_t = 30)]
    pub cache_ttl: u64,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub upstream_timeout: u64,
}

impl Args {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_window_ms == 0 {
            return Err(ConfigError::ZeroRateWindow);
        }
        if self.upstream_timeout == 0 {
            return Err(ConfigError::ZeroUpstreamTimeout);
        }
        if !self.coingecko_url.starts_with("http") {
            return Err(ConfigError::InvalidUrl(self.coingecko_url.clone()));
        }
        Ok(())
    }

    pub fn rate_limiter_config(&self) -> (u32, u64) {
        (self.rate_limit, self.rate_window_ms)
    }

    // trailing slash would produce `//api/frame` links
    pub fn public_base_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard_limiter() {
        let args = Args::parse_from(["cryptotrend-gateway"]);
        assert_eq!(args.rate_limiter_config(), (100, 60_000));
        assert_eq!(args.port, 3000);
        assert_eq!(args.rate_sweep_secs, 0);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn zero_window_is_rejected() {
        let args = Args::parse_from(["cryptotrend-gateway", "--rate-window-ms", "0"]);
        assert!(matches!(args.validate(), Err(ConfigError::ZeroRateWindow)));
    }

    #[test]
    fn zero_limit_is_allowed() {
        let args = Args::parse_from(["cryptotrend-gateway", "--rate-limit", "0"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.rate_limiter_config().0, 0);
    }

    #[test]
    fn non_http_upstream_is_rejected() {
        let args = Args::parse_from(["cryptotrend-gateway", "--coingecko-url", "localhost:9000"]);
        assert!(matches!(args.validate(), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let args = Args::parse_from(["cryptotrend-gateway", "--base-url", "https://example.com/"]);
        assert_eq!(args.public_base_url(), "https://example.com");
    }
}
