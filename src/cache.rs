use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

use crate::models::MarketData;

// Cache entry with timestamp
#[derive(Clone)]
pub struct CacheEntry {
    pub data: Vec<MarketData>,
    pub created_at: Instant,
}

pub struct MarketCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MarketCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    // Fresh entry or nothing
    pub fn get(&self, key: &str) -> Option<Vec<MarketData>> {
        self.entries
            .get(key)
            .filter(|entry| entry.created_at.elapsed() < self.ttl)
            .map(|entry| entry.data.clone())
    }

    // Every insert evicts expired entries, so distinct `ids` sets don't pile up
    pub fn insert(&self, key: String, data: Vec<MarketData>) {
        self.entries.retain(|_, entry| entry.created_at.elapsed() < self.ttl);
        self.entries.insert(key, CacheEntry {
            data,
            created_at: Instant::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Create a cache key (hash of coin ids + quote currency)
pub fn make_cache_key(ids: &[String], vs_currency: &str) -> String {
    let mut hasher = Sha256::new();
    for id in ids {
        hasher.update(id);
        hasher.update(",");
    }
    hasher.update("|");
    hasher.update(vs_currency);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn key_depends_on_ids_order_and_currency() {
        let a = make_cache_key(&ids(&["bitcoin", "ethereum"]), "usd");
        assert_eq!(a, make_cache_key(&ids(&["bitcoin", "ethereum"]), "usd"));
        assert_ne!(a, make_cache_key(&ids(&["ethereum", "bitcoin"]), "usd"));
        assert_ne!(a, make_cache_key(&ids(&["bitcoin", "ethereum"]), "eur"));
        // no ambiguity from joining
        assert_ne!(make_cache_key(&ids(&["ab", "c"]), "usd"), make_cache_key(&ids(&["a", "bc"]), "usd"));
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = MarketCache::new(Duration::ZERO);
        cache.insert("k".into(), Vec::new());
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn insert_drops_expired_entries() {
        let cache = MarketCache::new(Duration::ZERO);
        for i in 0..50 {
            cache.insert(format!("ids-{i}"), Vec::new());
        }
        // only the entry just written survives
        assert_eq!(cache.len(), 1);
        assert!(cache.entries.contains_key("ids-49"));
    }

    #[test]
    fn insert_keeps_fresh_entries() {
        let cache = MarketCache::new(Duration::from_secs(60));
        cache.insert("a".into(), Vec::new());
        cache.insert("b".into(), Vec::new());
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
    }

    #[test]
    fn fresh_entries_are_served() {
        let cache = MarketCache::new(Duration::from_secs(60));
        assert!(cache.is_empty());
        cache.insert("k".into(), Vec::new());
        assert_eq!(cache.get("k"), Some(Vec::new()));
    }
}
