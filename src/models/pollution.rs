//! Air pollution sample

use crate::conditions::{AirQualityIndex, classify_aqi};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the fine particulate concentration in the component map
pub const PM2_5: &str = "pm2_5";

/// Air quality reading for a coordinate pair
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PollutionSample {
    /// Air quality index, 1 (Good) to 5 (Very Poor) when the provider behaves
    pub aqi: i64,
    /// Pollutant concentrations in μg/m³, keyed by pollutant name
    pub components: BTreeMap<String, f64>,
}

impl PollutionSample {
    /// PM2.5 concentration in μg/m³, if the provider reported it
    #[must_use]
    pub fn pm2_5(&self) -> Option<f64> {
        self.components.get(PM2_5).copied()
    }

    #[must_use]
    pub fn level(&self) -> Option<AirQualityIndex> {
        AirQualityIndex::from_index(self.aqi).ok()
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        classify_aqi(self.aqi)
    }
}
