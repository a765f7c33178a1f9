//! TTL memoization in front of the catalog provider. Keys mirror the
//! operations: `search:<query>`, `series:<id>`, `season:<id>:<n>`,
//! `recommendations:<id>`, `similar:<id>`, `trending:daily`. Entries live
//! for one hour and are dropped lazily when a read finds them stale; there
//! is no size bound and no background sweep.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::warn;

use crate::catalog::{CatalogProvider, CatalogSeries, SeasonDetails, SeriesDetails};

pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Time source for TTL checks, injectable so tests can move time by hand.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

pub struct TtlCache<T> {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        let Ok(mut entries) = self.entries.lock() else {
            return None;
        };
        match entries.get(key) {
            Some(entry) if self.clock.now().duration_since(entry.stored_at) < self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: String, value: T) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key,
                CacheEntry {
                    value,
                    stored_at: self.clock.now(),
                },
            );
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

/// Write-through memoization over a catalog provider. Lookups never fail:
/// a provider error is logged and surfaced as an empty result, and only
/// successful responses (empty lists included) are cached.
pub struct CachedCatalog<P> {
    provider: P,
    lists: TtlCache<Vec<CatalogSeries>>,
    details: TtlCache<SeriesDetails>,
    seasons: TtlCache<SeasonDetails>,
}

impl<P: CatalogProvider> CachedCatalog<P> {
    pub fn new(provider: P) -> Self {
        Self::with_clock(provider, Arc::new(SystemClock))
    }

    pub fn with_clock(provider: P, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            lists: TtlCache::new(CACHE_TTL, clock.clone()),
            details: TtlCache::new(CACHE_TTL, clock.clone()),
            seasons: TtlCache::new(CACHE_TTL, clock),
        }
    }

    pub async fn search(&self, query: &str) -> Vec<CatalogSeries> {
        let key = format!("search:{query}");
        if let Some(hit) = self.lists.get(&key) {
            return hit;
        }
        match self.provider.search(query).await {
            Ok(results) => {
                self.lists.put(key, results.clone());
                results
            }
            Err(e) => {
                warn!(error = %e, query, "Series search failed");
                Vec::new()
            }
        }
    }

    pub async fn details(&self, id: u64) -> Option<SeriesDetails> {
        let key = format!("series:{id}");
        if let Some(hit) = self.details.get(&key) {
            return Some(hit);
        }
        match self.provider.details(id).await {
            Ok(details) => {
                self.details.put(key, details.clone());
                Some(details)
            }
            Err(e) => {
                warn!(error = %e, id, "Series details lookup failed");
                None
            }
        }
    }

    pub async fn season(&self, id: u64, season_number: u32) -> Option<SeasonDetails> {
        let key = format!("season:{id}:{season_number}");
        if let Some(hit) = self.seasons.get(&key) {
            return Some(hit);
        }
        match self.provider.season(id, season_number).await {
            Ok(season) => {
                self.seasons.put(key, season.clone());
                Some(season)
            }
            Err(e) => {
                warn!(error = %e, id, season_number, "Season details lookup failed");
                None
            }
        }
    }

    pub async fn recommendations(&self, id: u64) -> Vec<CatalogSeries> {
        let key = format!("recommendations:{id}");
        if let Some(hit) = self.lists.get(&key) {
            return hit;
        }
        match self.provider.recommendations(id).await {
            Ok(results) => {
                self.lists.put(key, results.clone());
                results
            }
            Err(e) => {
                warn!(error = %e, id, "Recommendations lookup failed");
                Vec::new()
            }
        }
    }

    pub async fn similar(&self, id: u64) -> Vec<CatalogSeries> {
        let key = format!("similar:{id}");
        if let Some(hit) = self.lists.get(&key) {
            return hit;
        }
        match self.provider.similar(id).await {
            Ok(results) => {
                self.lists.put(key, results.clone());
                results
            }
            Err(e) => {
                warn!(error = %e, id, "Similar-series lookup failed");
                Vec::new()
            }
        }
    }

    pub async fn trending(&self) -> Vec<CatalogSeries> {
        let key = "trending:daily".to_string();
        if let Some(hit) = self.lists.get(&key) {
            return hit;
        }
        match self.provider.trending().await {
            Ok(results) => {
                self.lists.put(key, results.clone());
                results
            }
            Err(e) => {
                warn!(error = %e, "Trending lookup failed");
                Vec::new()
            }
        }
    }

    /// Drop every cached entry. Manual/debug use.
    pub fn clear_cache(&self) {
        self.lists.clear();
        self.details.clear();
        self.seasons.clear();
    }
}
