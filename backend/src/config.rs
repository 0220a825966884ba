//! Configuration management for the Agricultural Advisory Service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::advisory::AdvisoryThresholds;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather and soil API configuration
    pub weather: WeatherConfig,

    /// Agronomic thresholds for the condition classifiers
    #[serde(default)]
    pub advisory: AdvisoryThresholds,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint (current conditions and forecasts)
    pub api_endpoint: String,

    /// Agro API endpoint (soil data)
    pub soil_endpoint: String,

    /// API key sent as `appid`
    pub api_key: String,

    /// Timeout for data requests
    pub timeout_secs: u64,

    /// Timeout for the health probe
    pub health_timeout_secs: u64,

    /// Lifetime of cached upstream responses, 0 disables caching
    pub cache_ttl_secs: u64,

    /// Largest sample count the forecast endpoint serves
    pub max_forecast_samples: u32,
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI__ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.soil_endpoint", "http://api.agromonitoring.com/agro/1.0")?
            .set_default("weather.api_key", "")?
            .set_default("weather.timeout_secs", 30)?
            .set_default("weather.health_timeout_secs", 5)?
            .set_default("weather.cache_ttl_secs", 300)?
            .set_default("weather.max_forecast_samples", 40)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI__ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api.openweathermap.org/data/2.5".to_string(),
            soil_endpoint: "http://api.agromonitoring.com/agro/1.0".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
            health_timeout_secs: 5,
            cache_ttl_secs: 300,
            max_forecast_samples: 40,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            advisory: AdvisoryThresholds::default(),
        }
    }
}
