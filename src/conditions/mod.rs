//! Environmental conditions module
//!
//! Pure decision logic applied to fetched samples:
//! - Bearing classification into compass points
//! - Air quality index labelling
//! - Beach suitability evaluation

pub mod air_quality;
pub mod beach;
pub mod bearing;
pub mod error;

pub use air_quality::{AirQualityIndex, classify_aqi};
pub use beach::{BeachReason, BeachThresholds, BeachVerdict, evaluate};
pub use bearing::{CompassPoint, classify_bearing};
pub use error::ConditionsError;
