//! Ocean current sample

use crate::conditions::{CompassPoint, classify_bearing};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One hourly surface current reading
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OceanCurrentSample {
    /// Hour this reading applies to
    pub time: Option<DateTime<Utc>>,
    /// Current speed in m/s
    pub speed_ms: f64,
    /// Direction in degrees (0-360, clockwise from North)
    pub direction_deg: f64,
}

impl OceanCurrentSample {
    #[must_use]
    pub fn direction(&self) -> CompassPoint {
        classify_bearing(self.direction_deg)
    }

    #[must_use]
    pub fn format_speed(&self) -> String {
        format!("{:.2} m/s", self.speed_ms)
    }

    #[must_use]
    pub fn format_direction(&self) -> String {
        format!("{:.1}° ({})", self.direction_deg, self.direction())
    }
}
