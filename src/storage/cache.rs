use crate::model::{FetchRequest, PriceSeries};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;

fn ttl_from_seconds(seconds: i64) -> Duration {
    Duration::try_seconds(seconds).unwrap_or(if seconds < 0 { Duration::MIN } else { Duration::MAX })
}

struct CacheEntry {
    series: Arc<PriceSeries>,
    fetched_at: DateTime<Utc>,
}

/// Fetched series keyed by (symbol, start, end). Entries older than the TTL
/// are treated as missing.
pub struct PriceCache {
    entries: HashMap<FetchRequest, CacheEntry>,
    ttl: Duration,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Out-of-range values saturate to the largest representable TTL.
    pub fn with_ttl_seconds(seconds: i64) -> Self {
        Self::new(ttl_from_seconds(seconds))
    }

    pub fn set_ttl_seconds(&mut self, seconds: i64) {
        self.ttl = ttl_from_seconds(seconds);
    }

    /// Returns the cached series if it is younger than the TTL.
    pub fn get(&self, key: &FetchRequest, now: DateTime<Utc>) -> Option<Arc<PriceSeries>> {
        self.entries
            .get(key)
            .filter(|entry| now.signed_duration_since(entry.fetched_at) < self.ttl)
            .map(|entry| entry.series.clone())
    }

    pub fn insert(&mut self, key: FetchRequest, series: Arc<PriceSeries>, now: DateTime<Utc>) {
        self.entries.insert(
            key,
            CacheEntry {
                series,
                fetched_at: now,
            },
        );
    }

    pub fn invalidate(&mut self, key: &FetchRequest) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drops every cached range of `symbol`, returning how many were removed.
    pub fn invalidate_symbol(&mut self, symbol: &str) -> usize {
        let keys: Vec<FetchRequest> = self
            .entries
            .keys()
            .filter(|k| k.symbol == symbol)
            .cloned()
            .collect();
        keys.iter().filter(|k| self.invalidate(k)).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops expired entries, returning how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.signed_duration_since(entry.fetched_at) < ttl);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
