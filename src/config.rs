//! Configuration management for the `SkyRoute` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings. The loaded
//! configuration is handed to each provider at construction and never
//! mutated afterwards.

use crate::SkyRouteError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `SkyRoute` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkyRouteConfig {
    /// Upstream provider configuration
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Route analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Geocoding, weather and flight-tracking provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// OpenWeather API key, shared by geocoding and weather lookups
    pub weather_api_key: Option<String>,
    /// Base URL for the current-weather API
    #[serde(default = "default_weather_base_url")]
    pub weather_base_url: String,
    /// Base URL for the direct geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// AviationStack access key
    pub aviation_api_key: Option<String>,
    /// Base URL for the live flight API
    #[serde(default = "default_aviation_base_url")]
    pub aviation_base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Route analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of intermediate points sampled between the two endpoints
    #[serde(default = "default_sample_points")]
    pub sample_points: usize,
    /// Maximum number of live flight records requested
    #[serde(default = "default_flight_limit")]
    pub flight_limit: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "http://api.openweathermap.org/data/2.5".to_string()
}

fn default_geocoding_base_url() -> String {
    "http://api.openweathermap.org/geo/1.0".to_string()
}

fn default_aviation_base_url() -> String {
    "http://api.aviationstack.com/v1".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_sample_points() -> usize {
    crate::geo::DEFAULT_SAMPLE_POINTS
}

fn default_flight_limit() -> u32 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            weather_base_url: default_weather_base_url(),
            geocoding_base_url: default_geocoding_base_url(),
            aviation_api_key: None,
            aviation_base_url: default_aviation_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_points: default_sample_points(),
            flight_limit: default_flight_limit(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
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

impl SkyRouteConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

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

        // SKYROUTE_PROVIDERS__WEATHER_API_KEY -> providers.weather_api_key
        builder = builder.add_source(
            Environment::with_prefix("SKYROUTE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: SkyRouteConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skyroute").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.providers.weather_base_url.is_empty() {
            self.providers.weather_base_url = default_weather_base_url();
        }
        if self.providers.geocoding_base_url.is_empty() {
            self.providers.geocoding_base_url = default_geocoding_base_url();
        }
        if self.providers.aviation_base_url.is_empty() {
            self.providers.aviation_base_url = default_aviation_base_url();
        }
        if self.providers.timeout_seconds == 0 {
            self.providers.timeout_seconds = default_timeout();
        }
        if self.analysis.flight_limit == 0 {
            self.analysis.flight_limit = default_flight_limit();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
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
            ("Weather", &self.providers.weather_api_key),
            ("Aviation", &self.providers.aviation_api_key),
        ];

        for (label, key) in keys {
            let Some(api_key) = key else { continue };

            if api_key.is_empty() {
                return Err(SkyRouteError::config(format!(
                    "{label} API key cannot be empty if provided. Either remove it or provide a valid key."
                ))
                .into());
            }

            if api_key.len() < 8 {
                return Err(SkyRouteError::config(format!(
                    "{label} API key appears to be invalid (too short). Please check your API key."
                ))
                .into());
            }

            if api_key.len() > 100 {
                return Err(SkyRouteError::config(format!(
                    "{label} API key appears to be invalid (too long). Please check your API key."
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.providers.timeout_seconds > 300 {
            return Err(
                SkyRouteError::config("Provider timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.analysis.sample_points > 50 {
            return Err(SkyRouteError::config("Sample points cannot exceed 50").into());
        }

        if self.analysis.flight_limit > 100 {
            return Err(SkyRouteError::config("Flight limit cannot exceed 100").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SkyRouteError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SkyRouteError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("Weather", &self.providers.weather_base_url),
            ("Geocoding", &self.providers.geocoding_base_url),
            ("Aviation", &self.providers.aviation_base_url),
        ];
        for (label, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SkyRouteError::config(format!(
                    "{label} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
