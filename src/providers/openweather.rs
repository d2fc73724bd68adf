//! OpenWeatherMap client: current weather, air pollution and 5-day forecast

use super::{CityWeather, ForecastProvider, PollutionProvider, WeatherProvider, decode_json};
use crate::config::OpenWeatherConfig;
use crate::models::{Location, PollutionSample, RawForecastPoint, WeatherSample};
use crate::{CoastcastError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

const PROVIDER: &str = "OpenWeatherMap";

/// Client for the OpenWeatherMap 2.5 data API
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Create a client; fails when no API key is configured
    pub fn new(client: Client, config: &OpenWeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                CoastcastError::config(
                    "OpenWeatherMap API key is required (set COASTCAST_PROVIDERS__OPENWEATHER__API_KEY)",
                )
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/data/2.5/{path}", self.base_url)
    }

    /// City lookups answer 404 for names the provider does not know
    fn not_found(city: &str) -> CoastcastError {
        CoastcastError::input(format!("City '{city}' not found"))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, city: &str) -> Result<CityWeather> {
        info!("Getting current weather for {}", city);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.endpoint("weather"))
            .query(&[("q", city), ("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Self::not_found(city));
        }

        let body: dto::WeatherResponse = decode_json(PROVIDER, response).await?;
        let condition = body
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| CoastcastError::data_missing(PROVIDER, "no weather condition"))?;

        let total_duration = start_time.elapsed();
        info!(
            "Retrieved current weather in {:.3}s",
            total_duration.as_secs_f64()
        );
        if total_duration.as_secs() > 5 {
            warn!("Slow API response detected: {:.3}s", total_duration.as_secs_f64());
        }

        Ok(CityWeather {
            location: resolve_location(&body.coord, body.name, body.sys, city),
            weather: WeatherSample {
                temperature_c: body.main.temp,
                condition,
                wind_speed_ms: body.wind.speed,
                wind_bearing_deg: body.wind.deg,
                latitude: body.coord.lat,
                longitude: body.coord.lon,
            },
        })
    }
}

#[async_trait]
impl PollutionProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn air_pollution(&self, latitude: f64, longitude: f64) -> Result<PollutionSample> {
        debug!("Getting air pollution for {:.4}, {:.4}", latitude, longitude);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.endpoint("air_pollution"))
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let body: dto::PollutionResponse = decode_json(PROVIDER, response).await?;
        let entry = body
            .list
            .into_iter()
            .next()
            .ok_or_else(|| CoastcastError::data_missing(PROVIDER, "empty air pollution list"))?;

        info!(
            "Retrieved air pollution (AQI {}) in {:.3}s",
            entry.main.aqi,
            start_time.elapsed().as_secs_f64()
        );

        Ok(PollutionSample {
            aqi: entry.main.aqi,
            components: entry.components,
        })
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn forecast(&self, city: &str) -> Result<Vec<RawForecastPoint>> {
        info!("Getting 5-day forecast for {}", city);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.endpoint("forecast"))
            .query(&[("q", city), ("units", "metric"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Self::not_found(city));
        }

        let body: dto::ForecastResponse = decode_json(PROVIDER, response).await?;
        let points: Vec<RawForecastPoint> = body
            .list
            .into_iter()
            .map(|entry| RawForecastPoint {
                epoch_seconds: entry.dt,
                temperature_c: entry.main.temp,
                description: entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.description)
                    .unwrap_or_default(),
            })
            .collect();

        info!(
            "Retrieved forecast with {} data points in {:.3}s",
            points.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(points)
    }
}

/// Location as named by the provider, falling back to the requested city
fn resolve_location(
    coord: &dto::Coord,
    name: Option<String>,
    sys: Option<dto::Sys>,
    city: &str,
) -> Location {
    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| city.to_string());
    match sys.and_then(|sys| sys.country) {
        Some(country) => Location::with_country(coord.lat, coord.lon, name, country),
        None => Location::new(coord.lat, coord.lon, name),
    }
}

/// OpenWeatherMap response structures
mod dto {
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize)]
    pub struct Coord {
        pub lat: f64,
        pub lon: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub description: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct MainBlock {
        pub temp: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: f64,
        /// Omitted by the provider in calm conditions
        #[serde(default)]
        pub deg: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Sys {
        pub country: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct WeatherResponse {
        pub coord: Coord,
        #[serde(default)]
        pub weather: Vec<Condition>,
        pub main: MainBlock,
        pub wind: Wind,
        pub name: Option<String>,
        pub sys: Option<Sys>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AqiBlock {
        pub aqi: i64,
    }

    #[derive(Debug, Deserialize)]
    pub struct PollutionEntry {
        pub main: AqiBlock,
        #[serde(default)]
        pub components: BTreeMap<String, f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct PollutionResponse {
        #[serde(default)]
        pub list: Vec<PollutionEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        pub dt: i64,
        pub main: MainBlock,
        #[serde(default)]
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub list: Vec<ForecastEntry>,
    }
}
