//! Configuration management for the `CoastCast` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::CoastcastError;
use crate::conditions::BeachThresholds;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `CoastCast` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoastcastConfig {
    /// External data providers
    pub providers: ProvidersConfig,
    /// Outbound HTTP settings
    pub http: HttpConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Default application settings
    pub defaults: DefaultsConfig,
    /// Optional report sections
    pub sections: SectionsConfig,
    /// Beach suitability limits
    pub beach: BeachThresholds,
    /// HTTP dashboard server
    pub web: WebConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openweather: OpenWeatherConfig,
    pub stormglass: StormglassConfig,
}

/// OpenWeatherMap settings (weather, air pollution, forecast)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    /// API key, required to produce a report
    pub api_key: Option<String>,
    /// Base URL for the OpenWeatherMap API
    pub base_url: String,
}

/// Stormglass settings (ocean currents)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StormglassConfig {
    /// API key; without it the ocean section is skipped
    pub api_key: Option<String>,
    /// Base URL for the Stormglass API
    pub base_url: String,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u32,
    /// User agent sent with every request
    pub user_agent: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

/// Default application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// City used when none is given
    pub city: String,
}

/// Toggles for the optional report sections
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionsConfig {
    pub ocean: bool,
    pub forecast: bool,
}

/// HTTP dashboard server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub port: u16,
}

// Default value functions
fn default_openweather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_stormglass_base_url() -> String {
    "https://api.stormglass.io".to_string()
}

fn default_http_timeout() -> u32 {
    10
}

fn default_user_agent() -> String {
    format!("CoastCast/{}", crate::VERSION)
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_city() -> String {
    "Varna".to_string()
}

fn default_web_port() -> u16 {
    8080
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openweather_base_url(),
        }
    }
}

impl Default for StormglassConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_stormglass_base_url(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
        }
    }
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            ocean: true,
            forecast: true,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
        }
    }
}

impl CoastcastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // COASTCAST_PROVIDERS__OPENWEATHER__API_KEY -> providers.openweather.api_key
        builder = builder.add_source(
            Environment::with_prefix("COASTCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: CoastcastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("coastcast").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.providers.openweather.base_url.is_empty() {
            self.providers.openweather.base_url = default_openweather_base_url();
        }
        if self.providers.stormglass.base_url.is_empty() {
            self.providers.stormglass.base_url = default_stormglass_base_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.city.trim().is_empty() {
            self.defaults.city = default_city();
        }
        if self.web.port == 0 {
            self.web.port = default_web_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        let keys = [
            ("OpenWeatherMap", &self.providers.openweather.api_key),
            ("Stormglass", &self.providers.stormglass.api_key),
        ];

        for (provider, key) in keys {
            let Some(api_key) = key else { continue };

            if api_key.trim().is_empty() {
                return Err(CoastcastError::config(format!(
                    "{provider} API key cannot be empty if provided. Either remove it or provide a valid key."
                ))
                .into());
            }

            if api_key.len() < 8 {
                return Err(CoastcastError::config(format!(
                    "{provider} API key appears to be invalid (too short). Please check your API key."
                ))
                .into());
            }

            if api_key.len() > 200 {
                return Err(CoastcastError::config(format!(
                    "{provider} API key appears to be invalid (too long). Please check your API key."
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 120 {
            return Err(CoastcastError::config("HTTP timeout cannot exceed 120 seconds").into());
        }

        let beach = &self.beach;
        if beach.min_temperature_c > beach.max_temperature_c {
            return Err(CoastcastError::config(
                "Beach minimum temperature cannot exceed the maximum temperature",
            )
            .into());
        }

        if !(1..=5).contains(&beach.max_aqi) {
            return Err(CoastcastError::config("Beach max AQI must be between 1 and 5").into());
        }

        if beach.max_pm2_5 < 0.0 || beach.max_wind_speed_ms < 0.0 {
            return Err(CoastcastError::config(
                "Beach PM2.5 and wind speed limits cannot be negative",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(CoastcastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(CoastcastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (provider, url) in [
            ("OpenWeatherMap", &self.providers.openweather.base_url),
            ("Stormglass", &self.providers.stormglass.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(CoastcastError::config(format!(
                    "{provider} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
