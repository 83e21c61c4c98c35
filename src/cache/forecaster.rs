//! Caching decorator for any `Forecaster`
//!
//! `ExpiringBoundedCache` answers repeated requests for the same region and
//! day from memory for one hour after the upstream call completed. An
//! optional size bound evicts the oldest entry (by insertion, not by use)
//! when a new forecast has to be stored in a full cache.

use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::store::ExpiringStore;
use super::CacheError;
use crate::data::{Day, Forecast, Forecaster, Region};

/// How long a cached forecast stays fresh, in minutes
pub const FORECAST_TTL_MINUTES: i64 = 60;

/// How long a cached forecast stays fresh
pub fn forecast_ttl() -> Duration {
    Duration::minutes(FORECAST_TTL_MINUTES)
}

/// Cache key
type ForecastKey = (Region, Day);

/// Counters describing how the cache has been used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that went to the provider (including failed ones)
    pub misses: u64,
    /// Entries dropped because they went stale
    pub expired: u64,
    /// Entries dropped to make room under the size bound
    pub evicted: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    store: ExpiringStore<ForecastKey, Forecast>,
    stats: CacheStats,
}

/// A `Forecaster` that caches another `Forecaster`'s answers
pub struct ExpiringBoundedCache<P> {
    provider: P,
    max_size: Option<usize>,
    clock: Arc<dyn Clock>,
    state: Mutex<CacheState>,
}

impl<P> std::fmt::Debug for ExpiringBoundedCache<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringBoundedCache")
            .field("max_size", &self.max_size)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Builder for `ExpiringBoundedCache`
///
/// A provider is required. Without `max_size` the cache is unbounded; without
/// `clock` it uses `SystemClock`.
pub struct CacheBuilder<P> {
    provider: Option<P>,
    max_size: Option<usize>,
    clock: Option<Arc<dyn Clock>>,
}

impl<P> Default for CacheBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> CacheBuilder<P> {
    pub fn new() -> Self {
        Self {
            provider: None,
            max_size: None,
            clock: None,
        }
    }

    /// The forecaster whose answers are cached
    pub fn provider(mut self, provider: P) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Bound the number of cached forecasts. Must be greater than zero.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Like `max_size`, but `None` leaves the cache unbounded
    pub fn max_size_opt(mut self, max_size: Option<usize>) -> Self {
        self.max_size = max_size;
        self
    }

    /// Time source used for freshness checks and insertion timestamps
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the configuration and build the cache
    ///
    /// # Returns
    /// * `Err(CacheError::InvalidConfiguration)` if no provider was given or
    ///   `max_size` is zero
    pub fn build(self) -> Result<ExpiringBoundedCache<P>, CacheError> {
        let provider = self.provider.ok_or_else(|| {
            CacheError::InvalidConfiguration("a forecast provider is required".to_string())
        })?;
        if self.max_size == Some(0) {
            return Err(CacheError::InvalidConfiguration(
                "cache size must be greater than zero".to_string(),
            ));
        }

        Ok(ExpiringBoundedCache {
            provider,
            max_size: self.max_size,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            state: Mutex::new(CacheState::default()),
        })
    }
}

impl<P> ExpiringBoundedCache<P> {
    pub fn builder() -> CacheBuilder<P> {
        CacheBuilder::new()
    }

    /// Cache every answer from `provider`, with no size bound
    pub fn with_unlimited_cache(provider: P) -> Self {
        Self {
            provider,
            max_size: None,
            clock: Arc::new(SystemClock),
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Cache answers from `provider`, holding at most `max_size` of them
    pub fn with_limited_cache(provider: P, max_size: usize) -> Result<Self, CacheError> {
        CacheBuilder::new()
            .provider(provider)
            .max_size(max_size)
            .build()
    }

    /// Configured size bound, if any
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    /// Number of forecasts currently held, stale ones included until swept
    pub fn len(&self) -> usize {
        self.state.lock().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats
    }

    /// The wrapped provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: Forecaster> ExpiringBoundedCache<P> {
    /// Return the forecast for `region` on `day`, calling the provider only
    /// when there is no fresh cached answer.
    ///
    /// Provider errors are returned unchanged and nothing is cached for them.
    /// The lock is held across the provider call, so concurrent misses for
    /// the same key produce a single upstream request.
    pub fn lookup(&self, region: Region, day: Day) -> Result<Forecast, P::Error> {
        let key = (region, day);
        let ttl = forecast_ttl();
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if let Some(entry) = state.store.get(&key) {
            let now = self.clock.now();
            if entry.is_fresh(now, ttl) {
                let forecast = entry.value.clone();
                state.stats.hits += 1;
                debug!(?region, ?day, "forecast cache hit");
                return Ok(forecast);
            }

            let mut swept = state.store.sweep_expired(now, ttl);
            // Only reachable if the clock went backwards between insertions
            if state.store.remove(&key).is_some() {
                swept += 1;
            }
            state.stats.expired += swept as u64;
            debug!(?region, ?day, swept, "forecast cache entry expired");
        }

        state.stats.misses += 1;
        debug!(?region, ?day, "forecast cache miss");
        let forecast = self.provider.forecast_for(region, day)?;
        let timestamp = self.clock.now();

        if let Some(max_size) = self.max_size {
            while state.store.len() >= max_size {
                match state.store.evict_oldest() {
                    Some(((old_region, old_day), _)) => {
                        state.stats.evicted += 1;
                        debug!(region = ?old_region, day = ?old_day, "evicted oldest forecast");
                    }
                    None => break,
                }
            }
        }

        state.store.insert(key, forecast.clone(), timestamp);
        Ok(forecast)
    }
}

impl<P: Forecaster> Forecaster for ExpiringBoundedCache<P> {
    type Error = P::Error;

    fn forecast_for(&self, region: Region, day: Day) -> Result<Forecast, Self::Error> {
        self.lookup(region, day)
    }
}
