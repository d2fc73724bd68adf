//! Error types and handling for the `CoastCast` application

use crate::conditions::ConditionsError;
use thiserror::Error;

/// Main error type for the `CoastCast` application
#[derive(Error, Debug)]
pub enum CoastcastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A provider answered with a non-2xx status
    #[error("{provider} unavailable (HTTP {status})")]
    ProviderUnavailable { provider: String, status: u16 },

    /// A provider answered 2xx but an expected field was absent
    #[error("{provider} returned no usable data: {message}")]
    ProviderDataMissing { provider: String, message: String },

    /// Input validation errors, including unknown cities
    #[error("Invalid input: {message}")]
    InputInvalid { message: String },

    /// Transport failures (connect, timeout, undecodable body)
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    /// Classification or normalization failures
    #[error(transparent)]
    Conditions(#[from] ConditionsError),
}

impl CoastcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider-unavailable error
    pub fn unavailable<S: Into<String>>(provider: S, status: u16) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            status,
        }
    }

    /// Create a new provider-data-missing error
    pub fn data_missing<P: Into<String>, S: Into<String>>(provider: P, message: S) -> Self {
        Self::ProviderDataMissing {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a new input validation error
    pub fn input<S: Into<String>>(message: S) -> Self {
        Self::InputInvalid {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CoastcastError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file and API keys.")
            }
            CoastcastError::ProviderUnavailable { provider, .. } => {
                format!("{provider} is currently unavailable. Please try again later.")
            }
            CoastcastError::ProviderDataMissing { provider, message } => {
                format!("{provider} has no data here: {message}")
            }
            CoastcastError::InputInvalid { message } => {
                format!("Invalid input: {message}")
            }
            CoastcastError::Http { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            CoastcastError::Conditions(err) => err.to_string(),
        }
    }
}
