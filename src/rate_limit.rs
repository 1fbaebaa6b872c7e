use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::metrics::RATE_LIMIT_KEYS;

// Sliding-window rate limiter keyed by client. Each key keeps the
// millisecond timestamps of its admitted requests; the pruned list is only
// written back on admission. The check runs under the key's shard lock.
// Keys are never removed unless `sweep_idle` is called.
pub struct RateLimiter<C: Clock = SystemClock> {
    requests: DashMap<String, Vec<u64>>,
    limit: usize,
    window_ms: u64,
    clock: C,
}

impl RateLimiter<SystemClock> {
    pub fn new(limit: u32, window_ms: u64) -> Self {
        Self::with_clock(limit, window_ms, SystemClock)
    }
}

impl Default for RateLimiter<SystemClock> {
    fn default() -> Self {
        Self::new(100, 60_000)
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(limit: u32, window_ms: u64, clock: C) -> Self {
        Self {
            requests: DashMap::new(),
            limit: limit as usize,
            window_ms,
            clock,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit as u32
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    // Admit or reject one request for `key`, recording it when admitted
    pub fn can_make_request(&self, key: &str) -> bool {
        let now = self.clock.now_ms();

        match self.requests.entry(key.to_string()) {
            Entry::Occupied(mut entry) => {
                let mut valid: Vec<u64> = entry
                    .get()
                    .iter()
                    .copied()
                    .filter(|&t| self.is_live(now, t))
                    .collect();

                if valid.len() >= self.limit {
                    return false;
                }

                valid.push(now);
                entry.insert(valid);
                true
            }
            Entry::Vacant(entry) => {
                // limit 0: nothing is ever admitted, so nothing is stored
                if self.limit == 0 {
                    return false;
                }
                entry.insert(vec![now]);
                true
            }
        }
    }

    // strict: an entry exactly one window old no longer counts
    fn is_live(&self, now: u64, t: u64) -> bool {
        now.saturating_sub(t) < self.window_ms
    }

    pub fn tracked_keys(&self) -> usize {
        self.requests.len()
    }

    // Drops keys whose newest request is out of the window, returns the count.
    // `now` is read before the shard lock, so stamps are not always sorted.
    pub fn sweep_idle(&self) -> usize {
        let now = self.clock.now_ms();
        let mut removed = 0;

        self.requests.retain(|_, stamps| {
            let keep = stamps.iter().max().is_some_and(|&t| self.is_live(now, t));
            if !keep {
                removed += 1;
            }
            keep
        });

        removed
    }
}

// Idle key sweeper - only spawned when a sweep interval is configured
pub async fn idle_key_sweeper<C: Clock + 'static>(limiter: Arc<RateLimiter<C>>, every: Duration) {
    let mut interval = interval(every);

    info!(interval = ?every, "Rate limit sweeper started");

    loop {
        interval.tick().await;

        let removed = limiter.sweep_idle();
        let remaining = limiter.tracked_keys();
        RATE_LIMIT_KEYS.set(remaining as f64);

        if removed > 0 {
            debug!(removed, remaining, "Swept idle rate limit keys");
        }
    }
}
