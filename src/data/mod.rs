//! Core data models for UK Forecast CLI
//!
//! This module contains the forecast vocabulary (regions, days, forecasts) and
//! the `Forecaster` capability that both the upstream adapter and the cache
//! implement.

pub mod adapter;
pub mod weather;

pub use adapter::WeatherServiceAdapter;
pub use weather::WeatherService;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for values that fall outside the region or day vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// The specified region name is not recognized
    #[error("Invalid region: '{0}'. Valid regions: birmingham, edinburgh, glasgow, london, manchester, north-england, south-west-england, south-east-england, wales")]
    InvalidRegion(String),

    /// The specified day name is not recognized
    #[error("Invalid day: '{0}'. Valid days: monday, tuesday, wednesday, thursday, friday, saturday, sunday")]
    InvalidDay(String),
}

/// Regions for which forecasts are supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Birmingham,
    Edinburgh,
    Glasgow,
    London,
    Manchester,
    NorthEngland,
    SouthWestEngland,
    SouthEastEngland,
    Wales,
}

impl Region {
    /// Returns a slice containing all region variants.
    pub fn all() -> &'static [Region] {
        &[
            Region::Birmingham,
            Region::Edinburgh,
            Region::Glasgow,
            Region::London,
            Region::Manchester,
            Region::NorthEngland,
            Region::SouthWestEngland,
            Region::SouthEastEngland,
            Region::Wales,
        ]
    }

    /// Returns a human-readable display label for the region.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Birmingham => "Birmingham",
            Region::Edinburgh => "Edinburgh",
            Region::Glasgow => "Glasgow",
            Region::London => "London",
            Region::Manchester => "Manchester",
            Region::NorthEngland => "North England",
            Region::SouthWestEngland => "South West England",
            Region::SouthEastEngland => "South East England",
            Region::Wales => "Wales",
        }
    }

    /// Parses user input into a Region.
    ///
    /// Matching is case-insensitive; spaces, dashes and underscores are
    /// interchangeable, and the compass regions accept short forms
    /// (`"sw-england"`, `"north"`).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Region, ArgumentError> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "birmingham" => Ok(Region::Birmingham),
            "edinburgh" => Ok(Region::Edinburgh),
            "glasgow" => Ok(Region::Glasgow),
            "london" => Ok(Region::London),
            "manchester" => Ok(Region::Manchester),
            "north-england" | "north" => Ok(Region::NorthEngland),
            "south-west-england" | "sw-england" | "south-west" => Ok(Region::SouthWestEngland),
            "south-east-england" | "se-england" | "south-east" => Ok(Region::SouthEastEngland),
            "wales" => Ok(Region::Wales),
            _ => Err(ArgumentError::InvalidRegion(s.to_string())),
        }
    }
}

/// Days of the week for which forecasts are supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Returns a slice containing all day variants, Monday first.
    pub fn all() -> &'static [Day] {
        &[
            Day::Monday,
            Day::Tuesday,
            Day::Wednesday,
            Day::Thursday,
            Day::Friday,
            Day::Saturday,
            Day::Sunday,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Parses user input into a Day. Accepts full names and three-letter
    /// abbreviations, case-insensitively.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Day, ArgumentError> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Day::Monday),
            "tuesday" | "tue" => Ok(Day::Tuesday),
            "wednesday" | "wed" => Ok(Day::Wednesday),
            "thursday" | "thu" => Ok(Day::Thursday),
            "friday" | "fri" => Ok(Day::Friday),
            "saturday" | "sat" => Ok(Day::Saturday),
            "sunday" | "sun" => Ok(Day::Sunday),
            _ => Err(ArgumentError::InvalidDay(s.to_string())),
        }
    }
}

/// A weather forecast: a text summary and a temperature in Celsius
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Forecast {
    /// Short outlook, e.g. "Sunny"
    pub summary: String,
    /// Temperature in Celsius
    pub temperature: i32,
}

impl Forecast {
    pub fn new(summary: impl Into<String>, temperature: i32) -> Self {
        Self {
            summary: summary.into(),
            temperature,
        }
    }
}

/// The capability to provide a forecast for a region and day.
///
/// Both the upstream adapter and `ExpiringBoundedCache` implement this, so a
/// cached forecaster can stand in wherever an uncached one is expected.
pub trait Forecaster {
    /// Error reported by the provider. Callers receive it unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Provides the forecast for `region` on `day`.
    fn forecast_for(&self, region: Region, day: Day) -> Result<Forecast, Self::Error>;
}

impl<F: Forecaster + ?Sized> Forecaster for &F {
    type Error = F::Error;

    fn forecast_for(&self, region: Region, day: Day) -> Result<Forecast, Self::Error> {
        (**self).forecast_for(region, day)
    }
}

impl<F: Forecaster + ?Sized> Forecaster for Box<F> {
    type Error = F::Error;

    fn forecast_for(&self, region: Region, day: Day) -> Result<Forecast, Self::Error> {
        (**self).forecast_for(region, day)
    }
}

impl<F: Forecaster + ?Sized> Forecaster for Arc<F> {
    type Error = F::Error;

    fn forecast_for(&self, region: Region, day: Day) -> Result<Forecast, Self::Error> {
        (**self).forecast_for(region, day)
    }
}
