//! Forecast series model and normalization from provider samples

use crate::conditions::ConditionsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Forecast sample as delivered by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastPoint {
    /// Unix timestamp in seconds (UTC)
    pub epoch_seconds: i64,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Provider description, usually lower case ("light rain")
    pub description: String,
}

/// One normalized forecast step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Title-cased description ("Light Rain")
    pub condition: String,
}

impl ForecastPoint {
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }
}

/// Row of the forecast table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub time: String,
    pub temperature: String,
    pub condition: String,
}

/// Forecast steps in provider (chronological) order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastPoint> {
        self.points.iter()
    }

    /// Table rows with formatted time and temperature
    #[must_use]
    pub fn rows(&self) -> Vec<ForecastRow> {
        self.points
            .iter()
            .map(|point| ForecastRow {
                time: point.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                temperature: format!("{:.1}°C", point.temperature_c),
                condition: point.condition.clone(),
            })
            .collect()
    }

    /// (time, temperature) pairs for charting
    #[must_use]
    pub fn temperature_series(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.points
            .iter()
            .map(|point| (point.timestamp, point.temperature_c))
            .collect()
    }

    /// Lowest and highest temperature, or `None` for an empty series
    #[must_use]
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.temperature_c).fold(None, |acc, t| {
            Some(match acc {
                None => (t, t),
                Some((min, max)) => (min.min(t), max.max(t)),
            })
        })
    }
}

impl<'a> IntoIterator for &'a ForecastSeries {
    type Item = &'a ForecastPoint;
    type IntoIter = std::slice::Iter<'a, ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Convert provider samples into a forecast series.
///
/// Order and cardinality are preserved; there is no sorting, deduplication or
/// gap filling.
pub fn normalize<I>(raw_points: I) -> Result<ForecastSeries, ConditionsError>
where
    I: IntoIterator<Item = RawForecastPoint>,
{
    let points = raw_points
        .into_iter()
        .map(|raw| {
            let timestamp = DateTime::from_timestamp(raw.epoch_seconds, 0).ok_or(
                ConditionsError::TimestampOutOfRange {
                    epoch_seconds: raw.epoch_seconds,
                },
            )?;
            Ok(ForecastPoint {
                timestamp,
                temperature_c: raw.temperature_c,
                condition: title_case(&raw.description),
            })
        })
        .collect::<Result<Vec<_>, ConditionsError>>()?;

    Ok(ForecastSeries { points })
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}
