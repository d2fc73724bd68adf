//! External data providers
//!
//! Each data source sits behind an async trait so the report can be
//! assembled against real HTTP clients or test doubles alike.

pub mod openweather;
pub mod stormglass;

use crate::config::HttpConfig;
use crate::models::{Location, OceanCurrentSample, PollutionSample, RawForecastPoint, WeatherSample};
use crate::{CoastcastError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

pub use openweather::OpenWeatherClient;
pub use stormglass::StormglassClient;

/// Current weather together with the location the provider resolved
#[derive(Debug, Clone, PartialEq)]
pub struct CityWeather {
    pub location: Location,
    pub weather: WeatherSample,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a city, in metric units
    async fn current_weather(&self, city: &str) -> Result<CityWeather>;
}

#[async_trait]
pub trait PollutionProvider: Send + Sync {
    async fn air_pollution(&self, latitude: f64, longitude: f64) -> Result<PollutionSample>;
}

#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Raw forecast steps in the provider's chronological order
    async fn forecast(&self, city: &str) -> Result<Vec<RawForecastPoint>>;
}

#[async_trait]
pub trait OceanCurrentProvider: Send + Sync {
    /// Hourly current samples up to `end`; empty when the point is not covered
    async fn ocean_currents(
        &self,
        latitude: f64,
        longitude: f64,
        end: DateTime<Utc>,
    ) -> Result<Vec<OceanCurrentSample>>;
}

/// Build the shared HTTP client with a bounded request timeout
pub fn build_http_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Check the status and decode a JSON body.
///
/// Non-2xx maps to `ProviderUnavailable`; a 2xx body that does not have the
/// expected shape maps to `ProviderDataMissing`.
pub(crate) async fn decode_json<T: DeserializeOwned>(provider: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        warn!(provider, status = status.as_u16(), "Provider returned an error status");
        return Err(CoastcastError::unavailable(provider, status.as_u16()));
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| {
        warn!(provider, error = %e, "Provider response did not match the expected shape");
        CoastcastError::data_missing(provider, e.to_string())
    })
}
