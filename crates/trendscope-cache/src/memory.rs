use std::time::Duration;

use moka::future::Cache;
use tracing::debug;
use trendscope_models::config::CacheConfig;
use trendscope_models::price::{PeriodSelector, PriceSeries};

/// Memoisation key: the exact (symbol, period) pair a series was fetched for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesKey {
    pub symbol: String,
    pub period: PeriodSelector,
}

impl SeriesKey {
    pub fn new(symbol: &str, period: PeriodSelector) -> Self {
        Self {
            symbol: symbol.to_string(),
            period,
        }
    }
}

/// Bounded in-memory memoisation of windowed price series, backed by moka.
///
/// Entries never outlive the process. When no TTL is configured they are only
/// evicted once `max_capacity` is reached.
#[derive(Clone)]
pub struct SeriesCache {
    inner: Option<Cache<SeriesKey, PriceSeries>>,
}

impl SeriesCache {
    pub fn new(max_capacity: u64, ttl: Option<Duration>) -> Self {
        let mut builder = Cache::<SeriesKey, PriceSeries>::builder().max_capacity(max_capacity);
        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            inner: Some(builder.build()),
        }
    }

    /// A cache that stores nothing; every lookup misses.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }
        Self::new(
            config.max_capacity,
            config.ttl_seconds.map(Duration::from_secs),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    pub async fn get(&self, key: &SeriesKey) -> Option<PriceSeries> {
        let cache = self.inner.as_ref()?;
        let hit = cache.get(key).await;
        debug!(symbol = %key.symbol, period = %key.period, hit = hit.is_some(), "Series cache lookup");
        hit
    }

    pub async fn insert(&self, key: SeriesKey, series: PriceSeries) {
        if let Some(cache) = &self.inner {
            cache.insert(key, series).await;
        }
    }

    pub async fn invalidate(&self, key: &SeriesKey) {
        if let Some(cache) = &self.inner {
            cache.invalidate(key).await;
        }
    }

    /// Approximate number of live entries (moka updates this lazily).
    pub fn entry_count(&self) -> u64 {
        self.inner.as_ref().map_or(0, |c| c.entry_count())
    }
}
