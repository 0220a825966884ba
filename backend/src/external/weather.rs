//! Weather API client for fetching weather and soil data
//!
//! Integrates with the OpenWeatherMap API for current conditions and forecasts
//! and with the AgroMonitoring API for soil readings.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use shared::{GeoLocation, SoilReading, WeatherCondition, WeatherForecast};

use super::cache::TtlCache;
use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Forecast samples per day (3-hour steps)
pub const SAMPLES_PER_DAY: u32 = 8;

/// Offset between Kelvin and Celsius
fn kelvin_offset() -> Decimal {
    Decimal::new(27315, 2)
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    soil_url: String,
    health_timeout: Duration,
    max_forecast_samples: u32,
    current_cache: TtlCache<String, WeatherCondition>,
    forecast_cache: TtlCache<String, WeatherForecast>,
    soil_cache: TtlCache<String, serde_json::Value>,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: Decimal,
    humidity: Decimal,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: Decimal,
    deg: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<Decimal>,
    #[serde(rename = "3h")]
    three_hour: Option<Decimal>,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

/// AgroMonitoring soil response fields the service relies on
#[derive(Debug, Deserialize)]
struct AgroSoilResponse {
    /// Temperature 10 cm below the surface, Kelvin
    t10: Decimal,
    /// Volumetric soil moisture, m³/m³
    moisture: Decimal,
}

/// Soil readings normalised to °C and percent
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SoilSnapshot {
    pub temperature_celsius: SoilReading,
    pub moisture_percent: SoilReading,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
            soil_url: config.soil_endpoint.trim_end_matches('/').to_string(),
            health_timeout: config.health_timeout(),
            max_forecast_samples: config.max_forecast_samples,
            current_cache: TtlCache::new(config.cache_ttl()),
            forecast_cache: TtlCache::new(config.cache_ttl()),
            soil_cache: TtlCache::new(config.cache_ttl()),
        })
    }

    /// Create a client serving weather and soil from one base URL, without caching (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> AppResult<Self> {
        Self::new(&WeatherConfig {
            api_endpoint: base_url.clone(),
            soil_endpoint: base_url,
            api_key,
            cache_ttl_secs: 0,
            ..WeatherConfig::default()
        })
    }

    fn location_query(&self, location: &GeoLocation) -> Vec<(&'static str, String)> {
        vec![
            ("lat", location.latitude().to_string()),
            ("lon", location.longitude().to_string()),
            ("appid", self.api_key.clone()),
        ]
    }

    /// Send one request and decode its JSON body
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> AppResult<T> {
        tracing::debug!(operation, "Calling weather API");

        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation, "Weather API request failed: {}", e);
            AppError::Upstream(format!("{} request failed: {}", operation, e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(operation, %status, "Weather API returned an error");
            return Err(AppError::Upstream(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(operation, "Failed to read weather response: {}", e);
            AppError::Upstream(format!("{} response could not be read: {}", operation, e))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(kind = "mapping", operation, "Unexpected weather response: {}", e);
            AppError::Mapping(format!("Failed to parse {} response: {}", operation, e))
        })
    }

    /// Fetch current weather conditions for a location
    pub async fn get_current_weather(&self, location: &GeoLocation) -> AppResult<WeatherCondition> {
        let key = location.location_id();
        if let Some(cached) = self.current_cache.get(&key).await {
            tracing::debug!(location = %key, "Current weather cache hit");
            return Ok(cached);
        }

        let mut query = self.location_query(location);
        query.push(("units", "metric".to_string()));
        let request = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&query);

        let data: OWMCurrentResponse = self.fetch(request, "current weather").await?;
        let precipitation = data.rain.and_then(|r| r.one_hour).unwrap_or(Decimal::ZERO);
        let condition = convert_condition(data.dt, data.main, data.wind, precipitation)?;

        self.current_cache.insert(key, condition.clone()).await;
        Ok(condition)
    }

    /// Fetch a forecast of `days` days (1-7), capped at the upstream sample limit
    pub async fn get_forecast(&self, location: &GeoLocation, days: u32) -> AppResult<WeatherForecast> {
        if !(1..=7).contains(&days) {
            return Err(AppError::invalid("days", "must be between 1 and 7"));
        }
        let count = (days * SAMPLES_PER_DAY).min(self.max_forecast_samples);

        let key = format!("{}:{}", location.location_id(), count);
        if let Some(cached) = self.forecast_cache.get(&key).await {
            tracing::debug!(location = %key, "Forecast cache hit");
            return Ok(cached);
        }

        let mut query = self.location_query(location);
        query.push(("cnt", count.to_string()));
        query.push(("units", "metric".to_string()));
        let request = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&query);

        let data: OWMForecastResponse = self.fetch(request, "forecast").await?;
        let conditions = data
            .list
            .into_iter()
            .map(|item| {
                let precipitation = item.rain.and_then(|r| r.three_hour).unwrap_or(Decimal::ZERO);
                convert_condition(item.dt, item.main, item.wind, precipitation)
            })
            .collect::<AppResult<Vec<_>>>()?;

        let forecast = WeatherForecast::new(location, conditions, Utc::now()).map_err(|e| {
            tracing::error!(kind = "mapping", "Forecast contained no samples");
            AppError::Mapping(e.to_string())
        })?;

        self.forecast_cache.insert(key, forecast.clone()).await;
        Ok(forecast)
    }

    /// Fetch the raw soil payload for a location
    pub async fn get_soil_data(&self, location: &GeoLocation) -> AppResult<serde_json::Value> {
        let key = location.location_id();
        if let Some(cached) = self.soil_cache.get(&key).await {
            tracing::debug!(location = %key, "Soil data cache hit");
            return Ok(cached);
        }

        let request = self
            .client
            .get(format!("{}/soil", self.soil_url))
            .query(&self.location_query(location));

        let data: serde_json::Value = self.fetch(request, "soil").await?;
        self.soil_cache.insert(key, data.clone()).await;
        Ok(data)
    }

    /// Probe the weather API; never fails, only reports reachability
    pub async fn health_check(&self) -> bool {
        let result = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[("lat", "0"), ("lon", "0"), ("appid", self.api_key.as_str())])
            .timeout(self.health_timeout)
            .send()
            .await;

        match result {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                tracing::warn!("Weather API health check failed: {}", e);
                false
            }
        }
    }
}

/// Map one upstream sample into a condition with estimated soil fields
fn convert_condition(
    dt: i64,
    main: OWMMain,
    wind: OWMWind,
    precipitation: Decimal,
) -> AppResult<WeatherCondition> {
    let timestamp: DateTime<Utc> = DateTime::from_timestamp(dt, 0)
        .ok_or_else(|| AppError::Mapping(format!("Invalid timestamp: {}", dt)))?;

    let condition = WeatherCondition::new(
        timestamp,
        main.temp,
        main.humidity,
        precipitation,
        wind.speed,
        wind.deg.unwrap_or(Decimal::ZERO),
    )
    .map_err(|e| {
        tracing::error!(kind = "mapping", "Weather sample out of range: {}", e);
        AppError::Mapping(format!("Weather sample out of range: {}", e))
    })?;

    Ok(condition.with_estimated_soil())
}

/// Extract soil temperature (°C) and moisture (%) from a raw soil payload
pub fn normalize_soil(raw: &serde_json::Value) -> AppResult<SoilSnapshot> {
    let soil: AgroSoilResponse = serde_json::from_value(raw.clone()).map_err(|e| {
        tracing::error!(kind = "mapping", "Unexpected soil response: {}", e);
        AppError::Mapping(format!("Failed to parse soil response: {}", e))
    })?;

    let (Some(temperature), Some(moisture)) = (
        soil.t10.checked_sub(kelvin_offset()),
        soil.moisture.checked_mul(Decimal::ONE_HUNDRED),
    ) else {
        tracing::error!(kind = "mapping", "Soil readings out of range");
        return Err(AppError::Mapping("Soil readings out of range".to_string()));
    };

    Ok(SoilSnapshot {
        temperature_celsius: SoilReading::measured(temperature.round_dp(2)),
        moisture_percent: SoilReading::measured(
            moisture.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED).round_dp(2),
        ),
    })
}
