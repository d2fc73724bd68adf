//! Current weather sample and display methods

use crate::conditions::{CompassPoint, classify_bearing};
use serde::{Deserialize, Serialize};

/// Current conditions reported by the weather provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSample {
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Human-readable description of weather conditions
    pub condition: String,
    /// Wind speed in m/s
    pub wind_speed_ms: f64,
    /// Wind bearing in degrees (0-360, where 0/360 is North)
    pub wind_bearing_deg: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl WeatherSample {
    /// Compass point the wind blows from
    #[must_use]
    pub fn wind_direction(&self) -> CompassPoint {
        classify_bearing(self.wind_bearing_deg)
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature_c)
    }

    /// Format wind information
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!(
            "{:.1} m/s {} ({:.0}°)",
            self.wind_speed_ms,
            self.wind_direction(),
            self.wind_bearing_deg
        )
    }
}
