//! Core data models for Pescador
//!
//! This module contains the normalized hourly forecast types shared by both
//! forecast providers, the fishing scorer and the report renderer.

pub mod forecast;
pub mod met_norway;
pub mod open_meteo;

pub use forecast::{ForecastGateway, ForecastUnavailable, ProviderError};
pub use met_norway::MetNorwayClient;
pub use open_meteo::OpenMeteoClient;

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

/// WMO code used whenever a provider reports something we cannot classify
pub const CLOUDY_CODE: u8 = 3;

/// A fishing spot, owned by the caller and only read here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable name of the spot
    pub name: String,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

/// One hour of normalized weather and marine data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyFrame {
    /// Start of the hour, in the offset the provider reported
    pub timestamp: DateTime<FixedOffset>,
    /// Air temperature in Celsius
    pub temperature_c: f64,
    /// Pressure in hectopascals
    pub pressure_hpa: f64,
    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
    /// Direction the wind blows from, in degrees
    pub wind_direction_deg: Option<f64>,
    /// WMO weather code
    pub weather_code: u8,
    /// Whether the hour is in daylight at the location
    pub is_day: bool,
    /// Significant wave height in meters, `None` without marine data
    pub wave_height_m: Option<f64>,
}

impl HourlyFrame {
    /// Wind direction with a missing reading treated as north.
    pub fn wind_direction_or_default(&self) -> f64 {
        self.wind_direction_deg.unwrap_or(0.0)
    }
}

/// Which provider produced a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForecastSource {
    OpenMeteo,
    MetNorway,
}

impl ForecastSource {
    /// Display name of the provider
    pub fn name(&self) -> &'static str {
        match self {
            ForecastSource::OpenMeteo => "Open-Meteo",
            ForecastSource::MetNorway => "MET Norway",
        }
    }
}

impl fmt::Display for ForecastSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered run of hourly frames from a single provider
///
/// Frames ascend by timestamp in one-hour steps. A series is built fresh on
/// every fetch and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Provider that satisfied the request
    pub source: ForecastSource,
    /// Hourly frames in ascending order
    pub frames: Vec<HourlyFrame>,
}

impl HourlySeries {
    pub fn new(source: ForecastSource, frames: Vec<HourlyFrame>) -> Self {
        Self { source, frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// UTC offset the series timestamps are expressed in.
    ///
    /// Falls back to UTC for an empty series.
    pub fn offset(&self) -> FixedOffset {
        self.frames
            .first()
            .map(|frame| *frame.timestamp.offset())
            .unwrap_or_else(utc_offset)
    }

    /// Re-express every timestamp in `offset`; the instants are unchanged.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        for frame in &mut self.frames {
            frame.timestamp = frame.timestamp.with_timezone(&offset);
        }
        self
    }

    /// Whether any frame carries a wave height
    pub fn has_marine_data(&self) -> bool {
        self.frames.iter().any(|f| f.wave_height_m.is_some())
    }
}

pub(crate) fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Clamp a provider weather code into the WMO code space we understand.
///
/// Known groups:
/// - 0: Clear sky
/// - 1-3: Mainly clear to overcast
/// - 45-48: Fog
/// - 51-67: Drizzle and rain
/// - 71-77: Snow
/// - 80-82: Rain showers
/// - 85-86: Snow showers
/// - 95-99: Thunderstorm
///
/// Anything else becomes [`CLOUDY_CODE`].
pub fn normalize_wmo_code(code: i64) -> u8 {
    match code {
        0..=3 | 45..=48 | 51..=67 | 71..=77 | 80..=82 | 85..=86 | 95..=99 => code as u8,
        _ => CLOUDY_CODE,
    }
}

/// Short Spanish description of a normalized WMO code
pub fn weather_condition(code: u8) -> &'static str {
    match code {
        0 => "Despejado",
        1 => "Mayormente despejado",
        2 => "Parcialmente nublado",
        45..=48 => "Niebla",
        51..=57 => "Llovizna",
        61..=67 => "Lluvia",
        71..=77 => "Nieve",
        80..=82 => "Chaparrones",
        85..=86 => "Chaparrones de nieve",
        95..=99 => "Tormenta",
        _ => "Nublado",
    }
}
