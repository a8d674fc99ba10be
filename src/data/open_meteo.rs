//! Open-Meteo weather and marine API client
//!
//! The primary provider. Weather and wave heights come from two endpoints that
//! are queried together; both must answer within the deadline or the whole
//! attempt is dropped.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::forecast::ProviderError;
use super::{normalize_wmo_code, ForecastSource, HourlyFrame, HourlySeries};
use crate::config::ForecastConfig;

/// Hourly variables requested from the forecast endpoint
const HOURLY_WEATHER_VARIABLES: &str =
    "temperature_2m,surface_pressure,wind_speed_10m,wind_direction_10m,weather_code,is_day";

/// Hourly variables requested from the marine endpoint
const HOURLY_MARINE_VARIABLES: &str = "wave_height";

/// Client for the Open-Meteo forecast and marine APIs
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    forecast_url: String,
    marine_url: String,
    forecast_days: u8,
    timeout: Duration,
}

impl OpenMeteoClient {
    /// Create a client from the gateway configuration
    pub fn new(client: Client, config: &ForecastConfig) -> Self {
        Self {
            client,
            forecast_url: config.open_meteo_url.clone(),
            marine_url: config.marine_url.clone(),
            forecast_days: config.forecast_days,
            timeout: config.primary_timeout,
        }
    }

    /// Deadline applied to the combined weather + marine attempt
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch weather and marine data and merge them into one series
    ///
    /// Both requests run concurrently. If either fails, or the deadline fires
    /// first, the other in-flight request is dropped along with it.
    pub async fn fetch_series(&self, lat: f64, lon: f64) -> Result<HourlySeries, ProviderError> {
        let weather = self.fetch_json::<WeatherResponse>(
            self.endpoint_url(&self.forecast_url, lat, lon, HOURLY_WEATHER_VARIABLES),
            "Open-Meteo Weather",
        );
        let marine = self.fetch_json::<Option<MarineResponse>>(
            self.endpoint_url(&self.marine_url, lat, lon, HOURLY_MARINE_VARIABLES),
            "Open-Meteo Marine",
        );

        let (weather, marine) =
            tokio::time::timeout(self.timeout, futures::future::try_join(weather, marine))
                .await
                .map_err(|_| ProviderError::Timeout(self.timeout))??;

        parse_series(weather, marine)
    }

    fn endpoint_url(&self, base: &str, lat: f64, lon: f64, hourly: &str) -> String {
        format!(
            "{}?latitude={}&longitude={}&hourly={}&forecast_days={}&timezone=auto",
            base, lat, lon, hourly, self.forecast_days
        )
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: String,
        endpoint: &'static str,
    ) -> Result<T, ProviderError> {
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Merge the weather and marine payloads into normalized frames
fn parse_series(
    weather: WeatherResponse,
    marine: Option<MarineResponse>,
) -> Result<HourlySeries, ProviderError> {
    let hourly = weather.hourly;
    let len = hourly.time.len();

    if hourly.temperature_2m.len() != len
        || hourly.surface_pressure.len() != len
        || hourly.wind_speed_10m.len() != len
        || hourly.weather_code.len() != len
        || hourly.is_day.len() != len
    {
        return Err(ProviderError::MissingField(
            "hourly arrays have inconsistent lengths".to_string(),
        ));
    }

    let offset = FixedOffset::east_opt(weather.utc_offset_seconds).ok_or_else(|| {
        ProviderError::MissingField(format!(
            "utc_offset_seconds out of range: {}",
            weather.utc_offset_seconds
        ))
    })?;

    // A null or empty marine body just means no waves for this spot
    let waves = marine
        .and_then(|m| m.hourly)
        .map(|h| h.wave_height)
        .unwrap_or_default();

    let mut frames = Vec::with_capacity(len);
    for i in 0..len {
        frames.push(HourlyFrame {
            timestamp: parse_local_datetime(&hourly.time[i], offset)?,
            temperature_c: hourly.temperature_2m[i],
            pressure_hpa: hourly.surface_pressure[i],
            wind_speed_kmh: hourly.wind_speed_10m[i],
            wind_direction_deg: hourly.wind_direction_10m.get(i).copied().flatten(),
            weather_code: normalize_wmo_code(hourly.weather_code[i]),
            is_day: hourly.is_day[i] == 1,
            wave_height_m: waves.get(i).copied().flatten(),
        });
    }

    Ok(HourlySeries::new(ForecastSource::OpenMeteo, frames))
}

/// Parse a local time like "2024-07-15T05:00" and attach the location offset
fn parse_local_datetime(
    datetime_str: &str,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, ProviderError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .ok()
        .and_then(|naive| naive.and_local_timezone(offset).single())
        .ok_or_else(|| ProviderError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    hourly: HourlyWeather,
}

/// Hourly weather arrays, one entry per hour
#[derive(Debug, Deserialize)]
struct HourlyWeather {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    surface_pressure: Vec<f64>,
    wind_speed_10m: Vec<f64>,
    #[serde(default)]
    wind_direction_10m: Vec<Option<f64>>,
    weather_code: Vec<i64>,
    is_day: Vec<u8>,
}

/// Open-Meteo marine response
#[derive(Debug, Deserialize)]
struct MarineResponse {
    #[serde(default)]
    hourly: Option<MarineHourly>,
}

#[derive(Debug, Deserialize)]
struct MarineHourly {
    #[serde(default)]
    wave_height: Vec<Option<f64>>,
}
