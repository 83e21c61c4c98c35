//! Command-line interface parsing for UK Forecast CLI
//!
//! This module handles parsing of CLI arguments using clap. Queries are given
//! as `region/day` pairs; settings flags override the config file.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::{ConfigError, Settings};
use crate::data::{ArgumentError, Day, Region};

/// Queries used when none are given on the command line
const DEFAULT_QUERIES: [(Region, Day); 2] =
    [(Region::London, Day::Monday), (Region::Edinburgh, Day::Monday)];

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// A query is not of the form `region/day`
    #[error("Invalid query: '{0}'. Expected REGION/DAY, e.g. london/monday")]
    InvalidQuery(String),

    /// The region or day of a query is not recognized
    #[error(transparent)]
    InvalidArgument(#[from] ArgumentError),

    /// `--max-size 0` was given
    #[error("Invalid cache size: must be greater than zero")]
    InvalidCacheSize,

    /// The settings file could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// UK Forecast CLI - regional weather forecasts with an hour-long cache
#[derive(Parser, Debug)]
#[command(name = "ukforecast")]
#[command(about = "UK regional weather forecasts, cached for an hour")]
#[command(version)]
pub struct Cli {
    /// Forecasts to look up, as REGION/DAY
    ///
    /// Examples:
    ///   ukforecast london/monday
    ///   ukforecast "south east england/fri" wales/sun
    ///
    /// Defaults to london/monday edinburgh/monday
    #[arg(value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Maximum number of forecasts to keep cached (unbounded if omitted)
    #[arg(long, value_name = "N")]
    pub max_size: Option<usize>,

    /// Simulated upstream latency per request, in milliseconds
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Print one JSON object per forecast instead of text
    #[arg(long)]
    pub json: bool,

    /// Read settings from PATH instead of the default config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Configuration derived from CLI arguments and settings for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Lookups to perform, in order
    pub queries: Vec<(Region, Day)>,
    /// Effective settings after CLI overrides
    pub settings: Settings,
    /// Whether to print JSON
    pub json: bool,
}

/// Parses a `region/day` query.
///
/// # Returns
/// * `Ok((Region, Day))` if both halves are recognized
/// * `Err(CliError::InvalidQuery)` if there is no `/` separator
/// * `Err(CliError::InvalidArgument)` if the region or day is unknown
pub fn parse_query(s: &str) -> Result<(Region, Day), CliError> {
    let (region, day) = s
        .rsplit_once('/')
        .ok_or_else(|| CliError::InvalidQuery(s.to_string()))?;
    Ok((Region::from_str(region)?, Day::from_str(day)?))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments and file settings.
    ///
    /// CLI flags take precedence over `settings`.
    pub fn from_cli(cli: &Cli, settings: Settings) -> Result<Self, CliError> {
        let queries = if cli.queries.is_empty() {
            DEFAULT_QUERIES.to_vec()
        } else {
            cli.queries
                .iter()
                .map(|q| parse_query(q))
                .collect::<Result<Vec<_>, _>>()?
        };

        let mut settings = settings;
        if let Some(max_size) = cli.max_size {
            settings.max_size = Some(max_size);
        }
        if let Some(latency_ms) = cli.latency_ms {
            settings.latency_ms = latency_ms;
        }
        if settings.max_size == Some(0) {
            return Err(CliError::InvalidCacheSize);
        }

        Ok(StartupConfig {
            queries,
            settings,
            json: cli.json,
        })
    }

    /// Loads settings (from `--config` or the default location) and builds
    /// the StartupConfig.
    pub fn load(cli: &Cli) -> Result<Self, CliError> {
        let settings = match &cli.config {
            Some(path) => Settings::load(path)?,
            None => Settings::load_default()?,
        };
        Self::from_cli(cli, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_valid() {
        assert_eq!(
            parse_query("london/monday").unwrap(),
            (Region::London, Day::Monday)
        );
        assert_eq!(
            parse_query("South East England/fri").unwrap(),
            (Region::SouthEastEngland, Day::Friday)
        );
    }

    #[test]
    fn test_parse_query_missing_separator() {
        let err = parse_query("london").unwrap_err();
        assert!(matches!(err, CliError::InvalidQuery(_)));
        assert!(err.to_string().contains("REGION/DAY"));
    }

    #[test]
    fn test_parse_query_invalid_region() {
        let err = parse_query("atlantis/monday").unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidArgument(ArgumentError::InvalidRegion(_))
        ));
        assert!(err.to_string().contains("Invalid region"));
    }

    #[test]
    fn test_parse_query_invalid_day() {
        let err = parse_query("wales/someday").unwrap_err();
        assert!(matches!(
            err,
            CliError::InvalidArgument(ArgumentError::InvalidDay(_))
        ));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["ukforecast"]);
        assert!(cli.queries.is_empty());
        assert!(cli.max_size.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parse_all_flags() {
        let cli = Cli::parse_from([
            "ukforecast",
            "wales/sun",
            "--max-size",
            "3",
            "--latency-ms",
            "20",
            "--json",
        ]);
        assert_eq!(cli.queries, vec!["wales/sun".to_string()]);
        assert_eq!(cli.max_size, Some(3));
        assert_eq!(cli.latency_ms, Some(20));
        assert!(cli.json);
    }

    #[test]
    fn test_startup_config_defaults_to_demo_queries() {
        let cli = Cli::parse_from(["ukforecast"]);
        let config = StartupConfig::from_cli(&cli, Settings::default()).unwrap();
        assert_eq!(
            config.queries,
            vec![(Region::London, Day::Monday), (Region::Edinburgh, Day::Monday)]
        );
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_startup_config_cli_overrides_settings() {
        let cli = Cli::parse_from(["ukforecast", "--max-size", "4"]);
        let file_settings = Settings {
            max_size: Some(10),
            latency_ms: 5,
        };
        let config = StartupConfig::from_cli(&cli, file_settings).unwrap();
        assert_eq!(config.settings.max_size, Some(4));
        assert_eq!(config.settings.latency_ms, 5);
    }

    #[test]
    fn test_startup_config_rejects_zero_size() {
        let cli = Cli::parse_from(["ukforecast", "--max-size", "0"]);
        let result = StartupConfig::from_cli(&cli, Settings::default());
        assert!(matches!(result, Err(CliError::InvalidCacheSize)));
    }

    #[test]
    fn test_startup_config_rejects_zero_size_from_file() {
        let cli = Cli::parse_from(["ukforecast"]);
        let settings = Settings {
            max_size: Some(0),
            latency_ms: 0,
        };
        assert!(StartupConfig::from_cli(&cli, settings).is_err());
    }

    #[test]
    fn test_startup_config_invalid_query() {
        let cli = Cli::parse_from(["ukforecast", "london/monday", "nowhere/monday"]);
        assert!(StartupConfig::from_cli(&cli, Settings::default()).is_err());
    }
}
