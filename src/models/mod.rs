//! Data models for the CoastCast application
//!
//! Value records produced by the providers and consumed by the report:
//! - Location: geographic coordinates and metadata
//! - Weather: current conditions at a city
//! - Pollution: air quality index and pollutant concentrations
//! - Ocean: surface current speed and direction
//! - Forecast: ordered 3-hourly temperature series

pub mod forecast;
pub mod location;
pub mod ocean;
pub mod pollution;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{ForecastPoint, ForecastRow, ForecastSeries, RawForecastPoint, normalize};
pub use location::Location;
pub use ocean::OceanCurrentSample;
pub use pollution::PollutionSample;
pub use weather::WeatherSample;
