// CoinGecko market data client. Only `/coins/markets` results are cached;
// trending ids are resolved uncached and then go through that call.

use chrono::Utc;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use crate::cache::{MarketCache, make_cache_key};
use crate::error::FetchError;
use crate::metrics::{CACHE_HITS, CACHE_MISSES, CACHE_SIZE, UPSTREAM_LATENCY};
use crate::models::{CoinGeckoMarketData, CoinHistory, MarketData, TrendingResponse};

pub const DEFAULT_IDS: [&str; 3] = ["bitcoin", "ethereum", "binancecoin"];
pub const DEFAULT_CURRENCY: &str = "usd";
pub const DEFAULT_HISTORY_DAYS: u32 = 7;

// trending coins taken from `/search/trending`
const TRENDING_COUNT: usize = 10;

pub struct MarketClient {
    client: reqwest::Client,
    base_url: Url,
    cache: MarketCache,
}

impl MarketClient {
    pub fn new(base_url: &str, cache_ttl: Duration, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url,
            cache: MarketCache::new(cache_ttl),
        })
    }

    // Base url plus one escaped path segment per element, so caller input
    // can never add segments or a query of its own
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn default_ids() -> Vec<String> {
        DEFAULT_IDS.iter().map(|id| id.to_string()).collect()
    }

    pub async fn fetch_market_data(
        &self,
        ids: &[String],
        vs_currency: &str,
    ) -> Result<Vec<MarketData>, FetchError> {
        let cache_key = make_cache_key(ids, vs_currency);

        if let Some(data) = self.cache.get(&cache_key) {
            CACHE_HITS.inc();
            debug!(ids = ids.len(), "Market cache hit");
            return Ok(data);
        }
        CACHE_MISSES.inc();

        let mut url = self.endpoint(&["coins", "markets"])?;
        url.query_pairs_mut()
            .append_pair("ids", &ids.join(","))
            .append_pair("vs_currency", vs_currency)
            .append_pair("order", "market_cap_desc")
            .append_pair("per_page", "100")
            .append_pair("page", "1")
            .append_pair("sparkline", "false")
            .append_pair("price_change_percentage", "24h");

        let rows: Vec<CoinGeckoMarketData> = self.get_json(url).await.inspect_err(|e| {
            error!(error = %e, "Error fetching market data");
        })?;

        let now = Utc::now();
        let data: Vec<MarketData> = rows.into_iter().map(|row| row.into_market_data(now)).collect();

        self.cache.insert(cache_key, data.clone());
        CACHE_SIZE.set(self.cache.len() as f64);

        Ok(data)
    }

    pub async fn fetch_trending(&self) -> Result<Vec<MarketData>, FetchError> {
        let url = self.endpoint(&["search", "trending"])?;

        let trending: TrendingResponse = self.get_json(url).await.inspect_err(|e| {
            error!(error = %e, "Error fetching trending coins");
        })?;

        let ids: Vec<String> = trending
            .coins
            .into_iter()
            .take(TRENDING_COUNT)
            .map(|coin| coin.item.id)
            .collect();

        self.fetch_market_data(&ids, DEFAULT_CURRENCY).await
    }

    pub async fn fetch_coin_history(
        &self,
        coin_id: &str,
        days: u32,
        vs_currency: &str,
    ) -> Result<CoinHistory, FetchError> {
        let mut url = self.endpoint(&["coins", coin_id, "market_chart"])?;
        url.query_pairs_mut()
            .append_pair("vs_currency", vs_currency)
            .append_pair("days", &days.to_string());

        self.get_json(url).await.inspect_err(|e| {
            error!(error = %e, coin_id = %coin_id, "Error fetching coin history");
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let start_time = Instant::now();
        let res = self.client.get(url).send().await;
        UPSTREAM_LATENCY.observe(start_time.elapsed().as_secs_f64());

        let res = res?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        res.json::<T>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
