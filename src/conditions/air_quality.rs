//! Air quality index classification

use super::ConditionsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label rendered when a provider sends an AQI outside 1-5
pub const UNKNOWN_LABEL: &str = "Unknown";

/// OpenWeatherMap air quality index levels (1 = best, 5 = worst)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AirQualityIndex {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AirQualityIndex {
    /// Map a provider AQI value onto its level
    pub fn from_index(aqi: i64) -> Result<Self, ConditionsError> {
        match aqi {
            1 => Ok(Self::Good),
            2 => Ok(Self::Fair),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::Poor),
            5 => Ok(Self::VeryPoor),
            _ => Err(ConditionsError::MissingMapping { aqi }),
        }
    }

    #[must_use]
    pub fn index(self) -> i64 {
        match self {
            Self::Good => 1,
            Self::Fair => 2,
            Self::Moderate => 3,
            Self::Poor => 4,
            Self::VeryPoor => 5,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }
}

impl TryFrom<i64> for AirQualityIndex {
    type Error = ConditionsError;

    fn try_from(aqi: i64) -> Result<Self, Self::Error> {
        Self::from_index(aqi)
    }
}

impl fmt::Display for AirQualityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Human label for an AQI value, or [`UNKNOWN_LABEL`] when it has no mapping
#[must_use]
pub fn classify_aqi(aqi: i64) -> &'static str {
    AirQualityIndex::from_index(aqi).map_or(UNKNOWN_LABEL, AirQualityIndex::label)
}
