//! Upstream weather service
//!
//! A self-contained stand-in for the third-party forecasting service the
//! cache protects. It speaks its own vocabulary (`weather::Region`,
//! `weather::Day`, `weather::Forecast`) which `WeatherServiceAdapter` maps
//! onto ours. Results are deterministic per (region, day, seed), and each
//! request can be slowed down to mimic a remote call.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use tracing::trace;

/// Regions known to the weather service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

/// Days known to the weather service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Forecast as reported by the weather service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    /// Outlook text, e.g. "Partly cloudy"
    pub outlook: String,
    /// Temperature in Celsius
    pub temperature_c: i32,
}

/// Default seed used by `WeatherService::new`
const DEFAULT_SEED: u64 = 0x5eed_f0ca_57ed;

/// Simulated forecasting backend
#[derive(Debug)]
pub struct WeatherService {
    seed: u64,
    latency: Duration,
    requests: AtomicU64,
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherService {
    /// Create a service with the default seed and no latency
    pub fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            latency: Duration::ZERO,
            requests: AtomicU64::new(0),
        }
    }

    /// Use a different seed, producing a different (but still stable) set of forecasts
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sleep for `latency` on every request
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of forecasts served so far
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Produce the forecast for `region` on `day`
    pub fn forecast_for(&self, region: Region, day: Day) -> Forecast {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        let hash = mix(self.seed ^ ((region as u64) << 8) ^ (day as u64));
        let code = WEATHER_CODES[(hash % WEATHER_CODES.len() as u64) as usize];
        // Spread of -4..=+5 around the regional baseline
        let offset = ((hash >> 32) % 10) as i32 - 4;
        let forecast = Forecast {
            outlook: weather_code_to_outlook(code).to_string(),
            temperature_c: base_temperature(region) + offset,
        };

        trace!(?region, ?day, code, "weather service produced forecast");
        forecast
    }
}

/// WMO weather codes the simulation draws from
const WEATHER_CODES: [u8; 10] = [0, 1, 2, 3, 45, 51, 61, 80, 71, 95];

/// Map a WMO weather code to outlook text
pub fn weather_code_to_outlook(code: u8) -> &'static str {
    match code {
        0 => "Sunny",
        1..=3 => "Partly cloudy",
        45 | 48 => "Fog",
        51..=55 => "Drizzle",
        61..=65 | 80..=82 => "Rain",
        71..=77 | 85..=86 => "Snow",
        95..=99 => "Thunderstorms",
        _ => "Cloudy", // Default for unknown codes
    }
}

/// Typical temperature in Celsius for a region
fn base_temperature(region: Region) -> i32 {
    match region {
        Region::Edinburgh | Region::Glasgow => 11,
        Region::NorthEngland | Region::Manchester => 13,
        Region::Wales | Region::Birmingham => 14,
        Region::SouthWestEngland => 16,
        Region::London | Region::SouthEastEngland => 17,
    }
}

/// splitmix64 finalizer
fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
