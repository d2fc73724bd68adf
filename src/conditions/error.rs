use thiserror::Error;

/// Errors raised by the pure classification and normalization code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionsError {
    #[error("No air quality label for AQI {aqi} (expected 1-5)")]
    MissingMapping { aqi: i64 },

    #[error("Epoch timestamp {epoch_seconds} is out of range")]
    TimestampOutOfRange { epoch_seconds: i64 },
}
