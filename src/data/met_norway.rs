//! MET Norway locationforecast client
//!
//! The fallback provider. It reports wind in m/s, describes weather with
//! symbol codes instead of WMO numbers and has no wave data. Past the first
//! couple of days its steps widen to 6 or 12 hours.

use chrono::{DateTime, Duration, FixedOffset};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;

use super::forecast::ProviderError;
use super::{ForecastSource, HourlyFrame, HourlySeries, CLOUDY_CODE};
use crate::config::ForecastConfig;

/// Conversion factor from m/s to km/h
pub const MS_TO_KMH: f64 = 3.6;

/// Symbol used when a time step has no summary at all
const DEFAULT_SYMBOL: &str = "cloudy";

/// Client for the MET Norway compact forecast
#[derive(Debug, Clone)]
pub struct MetNorwayClient {
    client: Client,
    url: String,
    user_agent: String,
}

impl MetNorwayClient {
    /// Create a client from the gateway configuration
    pub fn new(client: Client, config: &ForecastConfig) -> Self {
        Self {
            client,
            url: config.met_norway_url.clone(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Fetch and normalize the forecast for the given coordinates
    ///
    /// No deadline of its own; the request relies on the HTTP client's defaults.
    pub async fn fetch_series(&self, lat: f64, lon: f64) -> Result<HourlySeries, ProviderError> {
        // MET Norway rejects coordinates with more than four decimals
        let url = format!("{}?lat={:.4}&lon={:.4}", self.url, lat, lon);

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint: "MET Norway",
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let compact: CompactResponse = serde_json::from_str(&text)?;
        parse_series(compact)
    }
}

/// Convert m/s to km/h
pub fn ms_to_kmh(speed_ms: f64) -> f64 {
    speed_ms * MS_TO_KMH
}

/// Map a MET Norway symbol code to an approximate WMO weather code
///
/// The day/night/polartwilight suffix is ignored. Unknown symbols map to
/// cloudy.
pub fn symbol_to_wmo(symbol: &str) -> u8 {
    let base = symbol.split('_').next().unwrap_or(symbol);

    match base {
        "clearsky" => 0,
        "fair" => 1,
        "partlycloudy" => 2,
        "cloudy" => 3,
        "fog" => 45,
        "lightrain" => 61,
        "rain" => 63,
        "heavyrain" => 65,
        "lightsleet" | "lightsnow" => 71,
        "sleet" | "snow" => 73,
        "heavysleet" | "heavysnow" => 75,
        "lightrainshowers" => 80,
        "rainshowers" => 81,
        "heavyrainshowers" => 82,
        "lightsleetshowers" | "lightsnowshowers" | "sleetshowers" | "snowshowers" => 85,
        "heavysleetshowers" | "heavysnowshowers" => 86,
        // Every "...andthunder" variant, including MET's misspelled "lightss..." codes
        "lightrainandthunder"
        | "rainandthunder"
        | "heavyrainandthunder"
        | "lightrainshowersandthunder"
        | "rainshowersandthunder"
        | "heavyrainshowersandthunder"
        | "lightsleetandthunder"
        | "sleetandthunder"
        | "heavysleetandthunder"
        | "lightssleetshowersandthunder"
        | "sleetshowersandthunder"
        | "heavysleetshowersandthunder"
        | "lightsnowandthunder"
        | "snowandthunder"
        | "heavysnowandthunder"
        | "lightssnowshowersandthunder"
        | "snowshowersandthunder"
        | "heavysnowshowersandthunder" => 95,
        _ => CLOUDY_CODE,
    }
}

/// Infer daylight from the symbol suffix, defaulting to day
pub fn symbol_is_day(symbol: &str) -> bool {
    symbol.contains("day") || !symbol.contains("night")
}

/// Normalize the compact timeseries into contiguous hourly frames
fn parse_series(response: CompactResponse) -> Result<HourlySeries, ProviderError> {
    let steps = response
        .properties
        .timeseries
        .iter()
        .map(parse_step)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(HourlySeries::new(
        ForecastSource::MetNorway,
        fill_hourly_gaps(steps),
    ))
}

fn parse_step(step: &TimeStep) -> Result<HourlyFrame, ProviderError> {
    let timestamp = DateTime::parse_from_rfc3339(&step.time)
        .map_err(|_| ProviderError::InvalidTimeFormat(step.time.clone()))?;
    let details = &step.data.instant.details;

    let symbol = step.data.symbol_code().unwrap_or(DEFAULT_SYMBOL);

    Ok(HourlyFrame {
        timestamp,
        temperature_c: required(details.air_temperature, "air_temperature")?,
        pressure_hpa: required(details.air_pressure_at_sea_level, "air_pressure_at_sea_level")?,
        wind_speed_kmh: ms_to_kmh(required(details.wind_speed, "wind_speed")?),
        wind_direction_deg: details.wind_from_direction,
        weather_code: symbol_to_wmo(symbol),
        is_day: symbol_is_day(symbol),
        wave_height_m: None,
    })
}

fn required(value: Option<f64>, field: &str) -> Result<f64, ProviderError> {
    value.ok_or_else(|| ProviderError::MissingField(field.to_string()))
}

/// Repeat each step's readings for every hour until the next step
fn fill_hourly_gaps(steps: Vec<HourlyFrame>) -> Vec<HourlyFrame> {
    let mut frames = Vec::with_capacity(steps.len());

    for (i, step) in steps.iter().enumerate() {
        let span = steps
            .get(i + 1)
            .map(|next| hours_between(step.timestamp, next.timestamp))
            .unwrap_or(1);

        for hour in 0..span {
            frames.push(HourlyFrame {
                timestamp: step.timestamp + Duration::hours(hour),
                ..step.clone()
            });
        }
    }

    frames
}

fn hours_between(from: DateTime<FixedOffset>, to: DateTime<FixedOffset>) -> i64 {
    to.signed_duration_since(from).num_hours().max(1)
}

/// MET Norway compact response
#[derive(Debug, Deserialize)]
struct CompactResponse {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    timeseries: Vec<TimeStep>,
}

#[derive(Debug, Deserialize)]
struct TimeStep {
    time: String,
    data: StepData,
}

#[derive(Debug, Deserialize)]
struct StepData {
    instant: Instant,
    #[serde(default)]
    next_1_hours: Option<Period>,
    #[serde(default)]
    next_6_hours: Option<Period>,
    #[serde(default)]
    next_12_hours: Option<Period>,
}

impl StepData {
    /// Shortest-period symbol available for this step
    fn symbol_code(&self) -> Option<&str> {
        [&self.next_1_hours, &self.next_6_hours, &self.next_12_hours]
            .into_iter()
            .flatten()
            .find_map(|period| period.summary.as_ref())
            .map(|summary| summary.symbol_code.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct Instant {
    details: InstantDetails,
}

#[derive(Debug, Deserialize)]
struct InstantDetails {
    air_temperature: Option<f64>,
    air_pressure_at_sea_level: Option<f64>,
    wind_speed: Option<f64>,
    wind_from_direction: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Period {
    summary: Option<Summary>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    symbol_code: String,
}
