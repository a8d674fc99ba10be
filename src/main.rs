//! Pescador - Fishing conditions for a riverside spot
//!
//! Fetches an hourly forecast (Open-Meteo, falling back to MET Norway), picks
//! the requested day and prints each hour plus a fishing verdict.

use std::process::ExitCode;

use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pescador::cli::{Cli, StartupConfig};
use pescador::data::ForecastGateway;
use pescador::day::{current_local_hour, localize, slice_day};
use pescador::report::{render_json, render_text, DayReport};

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
/// output with `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "pescador=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(2);
        }
    };

    init_tracing(config.verbose);

    let gateway = ForecastGateway::new(&config.forecast);
    let series = match gateway.fetch_for_location(&config.location).await {
        Ok(series) => series,
        Err(err) => {
            eprintln!("Error al obtener el clima. Por favor intente nuevamente.");
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let series = localize(series, *Local::now().offset());
    let now_hour = current_local_hour(&series, Utc::now());
    let day = slice_day(&series, config.day, now_hour);
    let verdict = config.scoring.verdict(&day.frames);
    let report = DayReport::new(config.location, config.day, day, verdict);

    if config.json {
        match render_json(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("error: failed to serialize report: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_text(&report));
    }

    ExitCode::SUCCESS
}
