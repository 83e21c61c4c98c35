//! In-memory forecast cache
//!
//! This module provides `ExpiringBoundedCache`, a `Forecaster` decorator that
//! keeps each answer for one hour and optionally bounds how many answers it
//! holds. Expired entries are dropped lazily during lookups; when the bound
//! is reached the oldest insertion makes room for the new one.

pub mod clock;
mod forecaster;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use forecaster::{
    forecast_ttl, CacheBuilder, CacheStats, ExpiringBoundedCache, FORECAST_TTL_MINUTES,
};

use thiserror::Error;

/// Errors raised while constructing a cache
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The cache was configured with missing or out-of-range settings
    #[error("Invalid cache configuration: {0}")]
    InvalidConfiguration(String),
}
