//! Command-line interface parsing for Skycast
//!
//! This module handles parsing of CLI arguments using clap, including the
//! location flags and the --strategy flag selecting how hourly slots are
//! picked for the conditions view.

use clap::Parser;
use thiserror::Error;

use crate::selector::SlotStrategy;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified strategy name is not recognized
    #[error("Invalid strategy: '{0}'. Valid strategies: extremity, windowed")]
    InvalidStrategy(String),

    /// --lat and --lon must be given together
    #[error("Both --lat and --lon are required when overriding the location")]
    IncompleteCoordinates,
}

/// Skycast - view current weather, hourly outlook, and 7-day forecasts
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Terminal weather viewer powered by Open-Meteo")]
#[command(version)]
pub struct Cli {
    /// Place name to look up, e.g. "Vancouver" or "New York"
    ///
    /// Resolved through the Open-Meteo geocoding API. Overridden by
    /// --lat/--lon when both are given.
    #[arg(long, value_name = "NAME")]
    pub place: Option<String>,

    /// Latitude in decimal degrees (requires --lon)
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees (requires --lat)
    #[arg(long, value_name = "DEG", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Hourly slot selection strategy
    ///
    /// Examples:
    ///   skycast --strategy extremity   # show hottest/coldest hours
    ///   skycast --strategy windowed    # show typical waking hours
    ///
    /// Valid strategies: extremity, windowed
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<String>,

    /// Skip all network fetches and use cached or synthetic data
    #[arg(long)]
    pub offline: bool,

    /// Disable the periodic background refresh
    #[arg(long)]
    pub no_refresh: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Place name to geocode before starting, if any
    pub place: Option<String>,
    /// Explicit coordinates, when both --lat and --lon were given
    pub coordinates: Option<(f64, f64)>,
    /// Initial slot selection strategy
    pub strategy: SlotStrategy,
    /// Whether to skip network fetches entirely
    pub offline: bool,
    /// Whether the periodic background refresh is enabled
    pub auto_refresh: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            place: None,
            coordinates: None,
            strategy: SlotStrategy::Windowed,
            offline: false,
            auto_refresh: true,
        }
    }
}

/// Parses a strategy string argument into a SlotStrategy.
///
/// # Arguments
/// * `s` - The strategy string from CLI
///
/// # Returns
/// * `Ok(SlotStrategy)` if the string matches a valid strategy
/// * `Err(CliError::InvalidStrategy)` if the string doesn't match
pub fn parse_strategy_arg(s: &str) -> Result<SlotStrategy, CliError> {
    SlotStrategy::from_str(s).ok_or_else(|| CliError::InvalidStrategy(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if an invalid strategy or half a coordinate pair
    ///   was specified
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let coordinates = match (cli.lat, cli.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            (None, None) => None,
            _ => return Err(CliError::IncompleteCoordinates),
        };

        let strategy = match &cli.strategy {
            Some(s) => parse_strategy_arg(s)?,
            None => SlotStrategy::Windowed,
        };

        Ok(StartupConfig {
            place: cli.place.clone(),
            coordinates,
            strategy,
            offline: cli.offline,
            auto_refresh: !cli.no_refresh,
        })
    }
}
