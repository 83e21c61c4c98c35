//! UK Forecast CLI Library
//!
//! Regional weather forecasts served through `ExpiringBoundedCache`, an
//! in-memory cache that shields the upstream weather service from repeated
//! requests for the same region and day.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;

pub use cache::{CacheBuilder, CacheError, ExpiringBoundedCache};
pub use data::{ArgumentError, Day, Forecast, Forecaster, Region};
