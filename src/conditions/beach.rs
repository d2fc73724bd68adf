//! Beach suitability evaluation
//!
//! Four independent rules are checked against the full input in a fixed
//! order. The verdict reports the first rule that fails and keeps every
//! failure, in rule order, for display.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a beach verdict came out the way it did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeachReason {
    Ok,
    TempOutOfRange,
    AqiPoor,
    #[serde(rename = "PM25_HIGH")]
    Pm25High,
    WindHigh,
}

impl BeachReason {
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            BeachReason::Ok => "OK",
            BeachReason::TempOutOfRange => "TEMP_OUT_OF_RANGE",
            BeachReason::AqiPoor => "AQI_POOR",
            BeachReason::Pm25High => "PM25_HIGH",
            BeachReason::WindHigh => "WIND_HIGH",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            BeachReason::Ok => "Great day for the beach!",
            BeachReason::TempOutOfRange => "Temperature is not ideal for the beach.",
            BeachReason::AqiPoor => "Air quality is not good enough for the beach.",
            BeachReason::Pm25High => "PM2.5 concentration is too high.",
            BeachReason::WindHigh => "It's too windy for the beach.",
        }
    }
}

impl fmt::Display for BeachReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Limits applied by the evaluator; bounds are inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeachThresholds {
    /// Coldest acceptable air temperature in Celsius
    pub min_temperature_c: f64,
    /// Warmest acceptable air temperature in Celsius
    pub max_temperature_c: f64,
    /// Worst acceptable AQI (1-5 scale)
    pub max_aqi: i64,
    /// Highest acceptable PM2.5 concentration in μg/m³
    pub max_pm2_5: f64,
    /// Highest acceptable wind speed in m/s
    pub max_wind_speed_ms: f64,
}

impl Default for BeachThresholds {
    fn default() -> Self {
        Self {
            min_temperature_c: 20.0,
            max_temperature_c: 30.0,
            max_aqi: 2,
            max_pm2_5: 35.0,
            max_wind_speed_ms: 15.0,
        }
    }
}

/// Outcome of a beach suitability evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeachVerdict {
    pub suitable: bool,
    /// First violated rule, or `Ok`
    pub reason: BeachReason,
    /// Every violated rule in evaluation order
    pub violations: Vec<BeachReason>,
}

impl BeachVerdict {
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.reason.message()
    }
}

impl BeachThresholds {
    /// Evaluate conditions against these thresholds
    #[must_use]
    pub fn evaluate(
        &self,
        temperature_c: f64,
        aqi: i64,
        pm2_5: Option<f64>,
        wind_speed_ms: f64,
    ) -> BeachVerdict {
        // non-finite readings fail their rule
        let rules = [
            (
                BeachReason::TempOutOfRange,
                !(self.min_temperature_c..=self.max_temperature_c).contains(&temperature_c),
            ),
            (BeachReason::AqiPoor, aqi > self.max_aqi),
            (
                BeachReason::Pm25High,
                pm2_5.is_some_and(|pm| !pm.is_finite() || pm > self.max_pm2_5),
            ),
            (
                BeachReason::WindHigh,
                !wind_speed_ms.is_finite() || wind_speed_ms > self.max_wind_speed_ms,
            ),
        ];

        let violations: Vec<BeachReason> = rules
            .into_iter()
            .filter_map(|(reason, violated)| violated.then_some(reason))
            .collect();

        BeachVerdict {
            suitable: violations.is_empty(),
            reason: violations.first().copied().unwrap_or(BeachReason::Ok),
            violations,
        }
    }
}

/// Evaluate conditions against the default thresholds
#[must_use]
pub fn evaluate(temperature_c: f64, aqi: i64, pm2_5: Option<f64>, wind_speed_ms: f64) -> BeachVerdict {
    BeachThresholds::default().evaluate(temperature_c, aqi, pm2_5, wind_speed_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(25.0, 1, Some(10.0), 5.0, BeachReason::Ok)]
    #[case(35.0, 1, Some(10.0), 5.0, BeachReason::TempOutOfRange)]
    #[case(15.0, 1, Some(10.0), 5.0, BeachReason::TempOutOfRange)]
    #[case(25.0, 3, Some(10.0), 5.0, BeachReason::AqiPoor)]
    #[case(25.0, 1, Some(40.0), 5.0, BeachReason::Pm25High)]
    #[case(25.0, 1, Some(10.0), 20.0, BeachReason::WindHigh)]
    #[case(25.0, 1, None, 5.0, BeachReason::Ok)]
    fn test_evaluate(
        #[case] temperature: f64,
        #[case] aqi: i64,
        #[case] pm2_5: Option<f64>,
        #[case] wind: f64,
        #[case] expected: BeachReason,
    ) {
        let verdict = evaluate(temperature, aqi, pm2_5, wind);
        assert_eq!(verdict.reason, expected);
        assert_eq!(verdict.suitable, expected == BeachReason::Ok);
    }

    #[rstest]
    #[case(20.0, 2, Some(35.0), 15.0)]
    #[case(30.0, 1, Some(0.0), 0.0)]
    fn test_bounds_are_inclusive(
        #[case] temperature: f64,
        #[case] aqi: i64,
        #[case] pm2_5: Option<f64>,
        #[case] wind: f64,
    ) {
        assert!(evaluate(temperature, aqi, pm2_5, wind).suitable);
    }

    #[test]
    fn test_first_violation_wins_and_all_are_collected() {
        let verdict = evaluate(35.0, 4, Some(80.0), 25.0);
        assert!(!verdict.suitable);
        assert_eq!(verdict.reason, BeachReason::TempOutOfRange);
        assert_eq!(
            verdict.violations,
            vec![
                BeachReason::TempOutOfRange,
                BeachReason::AqiPoor,
                BeachReason::Pm25High,
                BeachReason::WindHigh,
            ]
        );

        let verdict = evaluate(25.0, 1, Some(80.0), 25.0);
        assert_eq!(verdict.reason, BeachReason::Pm25High);
        assert_eq!(verdict.violations.len(), 2);
    }

    #[rstest]
    #[case(f64::NAN, Some(10.0), 5.0, vec![BeachReason::TempOutOfRange])]
    #[case(f64::INFINITY, None, 5.0, vec![BeachReason::TempOutOfRange])]
    #[case(25.0, Some(f64::NAN), 5.0, vec![BeachReason::Pm25High])]
    #[case(25.0, Some(10.0), f64::NAN, vec![BeachReason::WindHigh])]
    #[case(
        f64::NAN,
        Some(f64::NAN),
        f64::NAN,
        vec![BeachReason::TempOutOfRange, BeachReason::Pm25High, BeachReason::WindHigh]
    )]
    fn test_non_finite_readings_are_violations(
        #[case] temperature: f64,
        #[case] pm2_5: Option<f64>,
        #[case] wind: f64,
        #[case] expected: Vec<BeachReason>,
    ) {
        let verdict = evaluate(temperature, 1, pm2_5, wind);
        assert!(!verdict.suitable);
        assert_eq!(verdict.reason, expected[0]);
        assert_eq!(verdict.violations, expected);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = BeachThresholds {
            max_wind_speed_ms: 8.0,
            ..BeachThresholds::default()
        };
        assert_eq!(
            thresholds.evaluate(25.0, 1, None, 10.0).reason,
            BeachReason::WindHigh
        );
    }

    #[test]
    fn test_reason_serializes_as_code() {
        let json = serde_json::to_string(&BeachReason::Pm25High).unwrap();
        assert_eq!(json, "\"PM25_HIGH\"");
        let json = serde_json::to_string(&BeachReason::TempOutOfRange).unwrap();
        assert_eq!(json, format!("\"{}\"", BeachReason::TempOutOfRange.code()));
    }
}
