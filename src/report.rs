//! Conditions report assembly
//!
//! Runs one evaluation for a city: weather, then air pollution and the beach
//! verdict, then the optional ocean current and forecast sections. Calls are
//! awaited one after another. Only a weather failure aborts the report; every
//! other failure is confined to the section that needed the data.

use crate::conditions::{BeachThresholds, BeachVerdict, CompassPoint};
use crate::config::CoastcastConfig;
use crate::models::{ForecastSeries, Location, OceanCurrentSample, PollutionSample, WeatherSample, normalize};
use crate::providers::{
    ForecastProvider, OceanCurrentProvider, OpenWeatherClient, PollutionProvider, StormglassClient,
    WeatherProvider, build_http_client,
};
use crate::{CoastcastError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const NO_OCEAN_DATA: &str = "No ocean current data available for this location.";

/// A report section that either carries data or explains why it could not
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Ready { data: T },
    Unavailable { warning: String },
}

impl<T> Section<T> {
    pub fn ready(data: T) -> Self {
        Self::Ready { data }
    }

    pub fn unavailable<S: Into<String>>(warning: S) -> Self {
        Self::Unavailable {
            warning: warning.into(),
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Section::Ready { data } => Some(data),
            Section::Unavailable { .. } => None,
        }
    }

    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match self {
            Section::Ready { .. } => None,
            Section::Unavailable { warning } => Some(warning),
        }
    }
}

/// Air quality as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityReading {
    pub aqi: i64,
    pub label: String,
    /// PM2.5 concentration in μg/m³
    pub pm2_5: Option<f64>,
    pub components: BTreeMap<String, f64>,
}

impl From<&PollutionSample> for AirQualityReading {
    fn from(sample: &PollutionSample) -> Self {
        Self {
            aqi: sample.aqi,
            label: sample.label().to_string(),
            pm2_5: sample.pm2_5(),
            components: sample.components.clone(),
        }
    }
}

/// First ocean current hour with its compass direction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OceanCurrentReading {
    #[serde(flatten)]
    pub sample: OceanCurrentSample,
    pub direction: CompassPoint,
}

/// Everything gathered for one city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionsReport {
    /// City as requested
    pub city: String,
    /// Location as resolved by the weather provider
    pub location: Location,
    pub generated_at: DateTime<Utc>,
    pub weather: WeatherSample,
    pub wind_direction: CompassPoint,
    pub air_quality: Section<AirQualityReading>,
    pub beach: Section<BeachVerdict>,
    /// `None` when the section is switched off
    pub ocean: Option<Section<OceanCurrentReading>>,
    /// `None` when the section is switched off
    pub forecast: Option<Section<ForecastSeries>>,
}

/// Which optional sections to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub include_ocean: bool,
    pub include_forecast: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_ocean: true,
            include_forecast: true,
        }
    }
}

/// Assembles conditions reports from the configured providers
pub struct ReportService {
    weather: Arc<dyn WeatherProvider>,
    pollution: Arc<dyn PollutionProvider>,
    forecast: Arc<dyn ForecastProvider>,
    /// `None` when no ocean data source is configured
    ocean: Option<Arc<dyn OceanCurrentProvider>>,
    thresholds: BeachThresholds,
}

impl ReportService {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        pollution: Arc<dyn PollutionProvider>,
        forecast: Arc<dyn ForecastProvider>,
        ocean: Option<Arc<dyn OceanCurrentProvider>>,
        thresholds: BeachThresholds,
    ) -> Self {
        Self {
            weather,
            pollution,
            forecast,
            ocean,
            thresholds,
        }
    }

    /// Wire the HTTP providers from configuration
    pub fn from_config(config: &CoastcastConfig) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        let openweather = Arc::new(OpenWeatherClient::new(
            client.clone(),
            &config.providers.openweather,
        )?);

        let ocean: Option<Arc<dyn OceanCurrentProvider>> =
            match StormglassClient::new(client, &config.providers.stormglass) {
                Ok(stormglass) => Some(Arc::new(stormglass)),
                Err(e) => {
                    warn!("Ocean currents disabled: {}", e);
                    None
                }
            };

        Ok(Self::new(
            openweather.clone(),
            openweather.clone(),
            openweather,
            ocean,
            config.beach,
        ))
    }

    /// Build the report for one city
    #[instrument(skip(self))]
    pub async fn build(&self, city: &str, options: ReportOptions) -> Result<ConditionsReport> {
        let city = city.trim();
        if city.is_empty() {
            return Err(CoastcastError::input("City cannot be empty"));
        }

        info!("Building conditions report for {}", city);

        // everything below depends on the coordinates, so this one is fatal
        let city_weather = self.weather.current_weather(city).await?;
        let weather = city_weather.weather;

        let (air_quality, beach) = match self
            .pollution
            .air_pollution(weather.latitude, weather.longitude)
            .await
        {
            Ok(pollution) => {
                let verdict = self.thresholds.evaluate(
                    weather.temperature_c,
                    pollution.aqi,
                    pollution.pm2_5(),
                    weather.wind_speed_ms,
                );
                (
                    Section::ready(AirQualityReading::from(&pollution)),
                    Section::ready(verdict),
                )
            }
            Err(e) => {
                warn!("Air pollution unavailable: {}", e);
                (
                    Section::unavailable(format!("Air quality data error: {}", e.user_message())),
                    Section::unavailable("Beach verdict needs air quality data."),
                )
            }
        };

        let ocean = if options.include_ocean {
            Some(self.ocean_section(&weather).await)
        } else {
            None
        };

        let forecast = if options.include_forecast {
            Some(self.forecast_section(city).await)
        } else {
            None
        };

        Ok(ConditionsReport {
            city: city.to_string(),
            location: city_weather.location,
            generated_at: Utc::now(),
            wind_direction: weather.wind_direction(),
            weather,
            air_quality,
            beach,
            ocean,
            forecast,
        })
    }

    async fn ocean_section(&self, weather: &WeatherSample) -> Section<OceanCurrentReading> {
        let Some(ocean) = &self.ocean else {
            return Section::unavailable("Ocean currents need a Stormglass API key.");
        };

        match ocean
            .ocean_currents(weather.latitude, weather.longitude, Utc::now())
            .await
        {
            Ok(samples) => match samples.into_iter().next() {
                Some(sample) => Section::ready(OceanCurrentReading {
                    direction: sample.direction(),
                    sample,
                }),
                None => Section::unavailable(NO_OCEAN_DATA),
            },
            Err(CoastcastError::ProviderUnavailable { status, .. }) => {
                warn!(status, "Ocean current provider refused the request");
                Section::unavailable(NO_OCEAN_DATA)
            }
            Err(e) => {
                warn!("Ocean currents unavailable: {}", e);
                Section::unavailable(format!("Ocean current data error: {e}"))
            }
        }
    }

    async fn forecast_section(&self, city: &str) -> Section<ForecastSeries> {
        let raw = match self.forecast.forecast(city).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Forecast unavailable: {}", e);
                return Section::unavailable(format!("Forecast data error: {e}"));
            }
        };

        match normalize(raw) {
            Ok(series) => Section::ready(series),
            Err(e) => {
                warn!("Forecast could not be normalized: {}", e);
                Section::unavailable(format!("Forecast data error: {e}"))
            }
        }
    }
}
