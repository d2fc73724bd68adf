//! `CoastCast` - Coastal conditions reporter
//!
//! This library fetches current weather, air quality, ocean currents and a
//! 5-day forecast for a city and evaluates whether it is a beach day.

pub mod api;
pub mod conditions;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod render;
pub mod report;
pub mod web;

// Re-export core types for public API
pub use conditions::{
    AirQualityIndex, BeachReason, BeachThresholds, BeachVerdict, CompassPoint, ConditionsError,
    classify_aqi, classify_bearing, evaluate,
};
pub use config::CoastcastConfig;
pub use error::CoastcastError;
pub use models::{ForecastPoint, ForecastSeries, Location, OceanCurrentSample, PollutionSample, WeatherSample, normalize};
pub use report::{ConditionsReport, ReportOptions, ReportService, Section};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CoastcastError>;
