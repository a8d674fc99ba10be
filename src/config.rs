//! Forecast gateway configuration
//!
//! Endpoints, the primary provider deadline and the identification string
//! sent to MET Norway. Defaults match the public production APIs.

use std::time::Duration;

/// Open-Meteo general weather endpoint
pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Open-Meteo marine (wave) endpoint
pub const OPEN_METEO_MARINE_URL: &str = "https://marine-api.open-meteo.com/v1/marine";

/// MET Norway compact location forecast endpoint
pub const MET_NORWAY_URL: &str = "https://api.met.no/weatherapi/locationforecast/2.0/compact";

/// Deadline shared by both primary sub-requests
pub const DEFAULT_PRIMARY_TIMEOUT: Duration = Duration::from_secs(4);

/// Days of hourly data requested from the primary provider
pub const DEFAULT_FORECAST_DAYS: u8 = 3;

/// Settings for the forecast gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastConfig {
    /// Open-Meteo forecast endpoint
    pub open_meteo_url: String,
    /// Open-Meteo marine endpoint
    pub marine_url: String,
    /// MET Norway endpoint
    pub met_norway_url: String,
    /// How long the primary attempt may take before falling back
    pub primary_timeout: Duration,
    /// `User-Agent` MET Norway requires to identify the client
    pub user_agent: String,
    /// Number of days requested from the primary provider
    pub forecast_days: u8,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            open_meteo_url: OPEN_METEO_FORECAST_URL.to_string(),
            marine_url: OPEN_METEO_MARINE_URL.to_string(),
            met_norway_url: MET_NORWAY_URL.to_string(),
            primary_timeout: DEFAULT_PRIMARY_TIMEOUT,
            user_agent: default_user_agent(),
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

impl ForecastConfig {
    /// Point the primary provider at different endpoints
    pub fn with_open_meteo_urls(
        mut self,
        forecast_url: impl Into<String>,
        marine_url: impl Into<String>,
    ) -> Self {
        self.open_meteo_url = forecast_url.into();
        self.marine_url = marine_url.into();
        self
    }

    /// Point the secondary provider at a different endpoint
    pub fn with_met_norway_url(mut self, url: impl Into<String>) -> Self {
        self.met_norway_url = url.into();
        self
    }

    pub fn with_primary_timeout(mut self, timeout: Duration) -> Self {
        self.primary_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// `pescador/<version>` plus a contact address, as MET Norway's terms ask for
pub fn default_user_agent() -> String {
    format!("pescador/{} (contact@example.com)", env!("CARGO_PKG_VERSION"))
}
