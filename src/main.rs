//! UK Forecast CLI - regional weather forecasts with an hour-long cache
//!
//! Looks up forecasts for the requested regions and days through the
//! forecast cache, so repeated queries within an hour reach the upstream
//! weather service only once.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ukforecast::cache::ExpiringBoundedCache;
use ukforecast::cli::{Cli, StartupConfig};
use ukforecast::data::{Day, Forecast, Region, WeatherService, WeatherServiceAdapter};

/// One line of `--json` output
#[derive(Debug, Serialize)]
struct ForecastLine<'a> {
    region: Region,
    day: Day,
    #[serde(flatten)]
    forecast: &'a Forecast,
}

/// Logs go to stderr so stdout stays clean for forecasts
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_forecast(
    region: Region,
    day: Day,
    forecast: &Forecast,
    json: bool,
) -> serde_json::Result<()> {
    if json {
        let line = ForecastLine {
            region,
            day,
            forecast,
        };
        println!("{}", serde_json::to_string(&line)?);
    } else {
        let place = format!("{} {}", region.label(), day.label());
        println!("{} outlook: {}", place, forecast.summary);
        println!("{} temperature: {}", place, forecast.temperature);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    let config = match StartupConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };
    info!(settings = ?config.settings, queries = config.queries.len(), "starting");

    let service = Arc::new(
        WeatherService::new().with_latency(Duration::from_millis(config.settings.latency_ms)),
    );
    let cache = ExpiringBoundedCache::builder()
        .provider(WeatherServiceAdapter::new(Arc::clone(&service)))
        .max_size_opt(config.settings.max_size)
        .build()?;

    for (region, day) in &config.queries {
        let forecast = cache.lookup(*region, *day)?;
        print_forecast(*region, *day, &forecast, config.json)?;
    }

    let stats = cache.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        evicted = stats.evicted,
        upstream_requests = service.requests(),
        "done"
    );
    Ok(())
}
