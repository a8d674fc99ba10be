//! Command-line interface parsing for Pescador
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated [`StartupConfig`] before any network call is made.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::config::ForecastConfig;
use crate::data::Location;
use crate::day::DayOffset;
use crate::fishing::ScoringModel;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified day is not one of the three forecast days
    #[error("Invalid day: '{0}'. Valid days: hoy, mañana, pasado (or 0, 1, 2)")]
    InvalidDay(String),

    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Invalid coordinates: lat {lat}, lon {lon}. Latitude must be within ±90 and longitude within ±180")]
    InvalidCoordinates { lat: f64, lon: f64 },

    /// A zero deadline would never let the primary provider answer
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,
}

/// Pescador - Fishing forecast for a riverside spot
#[derive(Parser, Debug)]
#[command(name = "pescador")]
#[command(about = "Hourly weather and a fishing verdict for a riverside spot")]
#[command(version)]
pub struct Cli {
    /// Latitude of the fishing spot
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the fishing spot
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Name shown in the report
    #[arg(long, default_value = "Ubicación personalizada")]
    pub name: String,

    /// Day to check: hoy, mañana, pasado (or 0, 1, 2)
    #[arg(long, default_value = "hoy")]
    pub day: String,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Use the earlier three-factor scorer
    #[arg(long)]
    pub legacy_scoring: bool,

    /// Seconds to wait for Open-Meteo before falling back to MET Norway
    #[arg(long, value_name = "SECONDS", default_value_t = 4)]
    pub timeout_secs: u64,

    /// User-Agent sent to MET Norway
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Log provider attempts and fallbacks to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub location: Location,
    pub day: DayOffset,
    pub scoring: ScoringModel,
    pub json: bool,
    pub verbose: bool,
    pub forecast: ForecastConfig,
}

/// Parses a day string argument into a DayOffset.
///
/// # Returns
/// * `Ok(DayOffset)` if the string matches a valid day
/// * `Err(CliError::InvalidDay)` if the string doesn't match
pub fn parse_day_arg(s: &str) -> Result<DayOffset, CliError> {
    DayOffset::from_str(s).ok_or_else(|| CliError::InvalidDay(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the day, coordinates or timeout are invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let day = parse_day_arg(&cli.day)?;

        if !(-90.0..=90.0).contains(&cli.lat) || !(-180.0..=180.0).contains(&cli.lon) {
            return Err(CliError::InvalidCoordinates {
                lat: cli.lat,
                lon: cli.lon,
            });
        }

        if cli.timeout_secs == 0 {
            return Err(CliError::InvalidTimeout);
        }

        let mut forecast =
            ForecastConfig::default().with_primary_timeout(Duration::from_secs(cli.timeout_secs));
        if let Some(user_agent) = &cli.user_agent {
            forecast = forecast.with_user_agent(user_agent.clone());
        }

        let scoring = if cli.legacy_scoring {
            ScoringModel::Legacy
        } else {
            ScoringModel::Standard
        };

        Ok(StartupConfig {
            location: Location::new(cli.name.clone(), cli.lat, cli.lon),
            day,
            scoring,
            json: cli.json,
            verbose: cli.verbose,
            forecast,
        })
    }
}
