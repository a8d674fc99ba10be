//! Forecast gateway with single-hop provider fallback
//!
//! Open-Meteo (weather + marine) is tried first under a deadline. If it fails
//! for any reason MET Norway is tried once. Only when both fail does the caller
//! see an error, and that error is always [`ForecastUnavailable`].

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::{HourlySeries, Location, MetNorwayClient, OpenMeteoClient};
use crate::config::ForecastConfig;

/// Errors that can occur while talking to a single provider
///
/// These never leave the gateway on their own; they are either recovered by
/// falling back or wrapped in [`ForecastUnavailable`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("{endpoint} error: {status}")]
    Status { endpoint: &'static str, status: u16 },

    /// The attempt did not finish before its deadline
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or inconsistent field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// Both providers failed; the only error the gateway returns
#[derive(Debug, Error)]
#[error("Unable to fetch weather data from any source (primary: {primary})")]
pub struct ForecastUnavailable {
    /// Why Open-Meteo failed
    pub primary: ProviderError,
    /// Why MET Norway failed
    #[source]
    pub secondary: ProviderError,
}

/// Fetches a normalized hourly series from whichever provider answers
#[derive(Debug, Clone)]
pub struct ForecastGateway {
    primary: OpenMeteoClient,
    secondary: MetNorwayClient,
}

impl ForecastGateway {
    /// Create a gateway for the given configuration
    pub fn new(config: &ForecastConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a gateway sharing an existing HTTP client
    pub fn with_client(client: Client, config: &ForecastConfig) -> Self {
        Self {
            primary: OpenMeteoClient::new(client.clone(), config),
            secondary: MetNorwayClient::new(client, config),
        }
    }

    /// Fetch at least three days of hourly data for the given coordinates
    ///
    /// # Arguments
    /// * `lat` - Latitude coordinate
    /// * `lon` - Longitude coordinate
    ///
    /// # Returns
    /// * `Ok(HourlySeries)` - Series tagged with the provider that produced it
    /// * `Err(ForecastUnavailable)` - If the primary and the fallback both failed
    ///
    /// # Behavior
    /// - Open-Meteo weather and marine requests run concurrently under one deadline
    /// - Any primary failure (status, timeout, bad payload) discards its partial data
    /// - MET Norway is tried strictly after the primary attempt has failed
    pub async fn fetch_forecast(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<HourlySeries, ForecastUnavailable> {
        info!(lat, lon, "Attempting to fetch from Open-Meteo");
        let primary = match self.primary.fetch_series(lat, lon).await {
            Ok(series) => {
                debug!(frames = series.len(), "Open-Meteo success");
                return Ok(series);
            }
            Err(err) => {
                warn!(error = %err, "Open-Meteo failed or timed out, falling back to MET Norway");
                err
            }
        };

        match self.secondary.fetch_series(lat, lon).await {
            Ok(series) => {
                info!(frames = series.len(), "MET Norway success");
                Ok(series)
            }
            Err(secondary) => {
                error!(error = %secondary, "MET Norway also failed");
                Err(ForecastUnavailable { primary, secondary })
            }
        }
    }

    /// Fetch the forecast for a fishing spot
    pub async fn fetch_for_location(
        &self,
        location: &Location,
    ) -> Result<HourlySeries, ForecastUnavailable> {
        self.fetch_forecast(location.latitude, location.longitude)
            .await
    }
}
