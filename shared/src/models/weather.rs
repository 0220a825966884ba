//! Weather data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AdvisoryError, AdvisoryResult, ValidationErrors};
use crate::types::GeoLocation;
use crate::validation::{validate_min, validate_percentage, validate_range};

/// Offset (°C) between air temperature and the estimated soil temperature
pub const SOIL_TEMPERATURE_OFFSET: Decimal = Decimal::TWO;

/// Plausible air temperature band (°C) for a surface observation
pub const MIN_AIR_TEMPERATURE: i64 = -100;
pub const MAX_AIR_TEMPERATURE: i64 = 100;

/// Upper bound (mm) on precipitation reported for a single sample
pub const MAX_SAMPLE_PRECIPITATION: i64 = 1000;

/// Ratio of relative humidity used as the estimated soil moisture
pub fn soil_moisture_ratio() -> Decimal {
    Decimal::new(7, 1)
}

/// Where a soil value came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Measured,
    Estimated,
}

/// A soil value together with its provenance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SoilReading {
    pub value: Decimal,
    pub source: DataSource,
}

impl SoilReading {
    pub fn measured(value: Decimal) -> Self {
        Self {
            value,
            source: DataSource::Measured,
        }
    }

    pub fn estimated(value: Decimal) -> Self {
        Self {
            value,
            source: DataSource::Estimated,
        }
    }

    pub fn is_estimated(&self) -> bool {
        self.source == DataSource::Estimated
    }
}

/// Point-in-time weather and soil snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "WeatherConditionInput")]
pub struct WeatherCondition {
    timestamp: DateTime<Utc>,
    /// Air temperature in °C
    temperature: Decimal,
    /// Relative humidity in percent
    humidity: Decimal,
    /// Precipitation in mm
    precipitation: Decimal,
    /// Wind speed in m/s
    wind_speed: Decimal,
    /// Wind direction in degrees
    wind_direction: Decimal,
    soil_temperature: Option<SoilReading>,
    soil_moisture: Option<SoilReading>,
}

#[derive(Deserialize)]
struct WeatherConditionInput {
    timestamp: DateTime<Utc>,
    temperature: Decimal,
    humidity: Decimal,
    precipitation: Decimal,
    wind_speed: Decimal,
    wind_direction: Decimal,
    #[serde(default)]
    soil_temperature: Option<SoilReading>,
    #[serde(default)]
    soil_moisture: Option<SoilReading>,
}

impl TryFrom<WeatherConditionInput> for WeatherCondition {
    type Error = ValidationErrors;

    fn try_from(input: WeatherConditionInput) -> Result<Self, Self::Error> {
        let mut condition = WeatherCondition::new(
            input.timestamp,
            input.temperature,
            input.humidity,
            input.precipitation,
            input.wind_speed,
            input.wind_direction,
        )?;
        if let Some(moisture) = input.soil_moisture {
            ValidationErrors::from_check("soil_moisture", validate_percentage(moisture.value))?;
        }
        condition.soil_temperature = input.soil_temperature;
        condition.soil_moisture = input.soil_moisture;
        Ok(condition)
    }
}

impl WeatherCondition {
    pub fn new(
        timestamp: DateTime<Utc>,
        temperature: Decimal,
        humidity: Decimal,
        precipitation: Decimal,
        wind_speed: Decimal,
        wind_direction: Decimal,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            "temperature",
            validate_range(
                temperature,
                Decimal::from(MIN_AIR_TEMPERATURE),
                Decimal::from(MAX_AIR_TEMPERATURE),
            ),
        );
        errors.check("humidity", validate_percentage(humidity));
        errors.check(
            "precipitation",
            validate_range(precipitation, Decimal::ZERO, Decimal::from(MAX_SAMPLE_PRECIPITATION)),
        );
        errors.check("wind_speed", validate_min(wind_speed, Decimal::ZERO));
        errors.check(
            "wind_direction",
            validate_range(wind_direction, Decimal::ZERO, Decimal::from(360)),
        );
        errors.into_result()?;

        Ok(Self {
            timestamp,
            temperature,
            humidity,
            precipitation,
            wind_speed,
            wind_direction,
            soil_temperature: None,
            soil_moisture: None,
        })
    }

    /// Attach soil values reported by a sensor or the upstream provider
    pub fn with_measured_soil(
        mut self,
        soil_temperature: Option<Decimal>,
        soil_moisture: Option<Decimal>,
    ) -> Result<Self, ValidationErrors> {
        if let Some(moisture) = soil_moisture {
            ValidationErrors::from_check("soil_moisture", validate_percentage(moisture))?;
        }
        self.soil_temperature = soil_temperature.map(SoilReading::measured);
        self.soil_moisture = soil_moisture.map(SoilReading::measured);
        Ok(self)
    }

    /// Fill absent soil fields with estimates derived from air readings
    pub fn with_estimated_soil(mut self) -> Self {
        if self.soil_temperature.is_none() {
            self.soil_temperature = Some(SoilReading::estimated(
                self.temperature - SOIL_TEMPERATURE_OFFSET,
            ));
        }
        if self.soil_moisture.is_none() {
            let estimate = (self.humidity * soil_moisture_ratio())
                .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
            self.soil_moisture = Some(SoilReading::estimated(estimate));
        }
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn temperature(&self) -> Decimal {
        self.temperature
    }

    pub fn humidity(&self) -> Decimal {
        self.humidity
    }

    pub fn precipitation(&self) -> Decimal {
        self.precipitation
    }

    pub fn wind_speed(&self) -> Decimal {
        self.wind_speed
    }

    pub fn wind_direction(&self) -> Decimal {
        self.wind_direction
    }

    pub fn soil_temperature(&self) -> Option<SoilReading> {
        self.soil_temperature
    }

    pub fn soil_moisture(&self) -> Option<SoilReading> {
        self.soil_moisture
    }
}

/// Chronological weather samples for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherForecast {
    location_id: String,
    conditions: Vec<WeatherCondition>,
    created_at: DateTime<Utc>,
}

impl WeatherForecast {
    /// Samples keep the order they were received in
    pub fn new(
        location: &GeoLocation,
        conditions: Vec<WeatherCondition>,
        created_at: DateTime<Utc>,
    ) -> AdvisoryResult<Self> {
        if conditions.is_empty() {
            return Err(AdvisoryError::EmptyInput("forecast conditions"));
        }
        Ok(Self {
            location_id: location.location_id(),
            conditions,
            created_at,
        })
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    pub fn conditions(&self) -> &[WeatherCondition] {
        &self.conditions
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, hour, 0, 0).unwrap()
    }

    fn condition(temperature: &str, humidity: &str) -> WeatherCondition {
        WeatherCondition::new(at(12), dec(temperature), dec(humidity), dec("0"), dec("3"), dec("180"))
            .unwrap()
    }

    #[test]
    fn test_estimated_soil_fields() {
        let c = condition("22.5", "65").with_estimated_soil();

        let soil_temperature = c.soil_temperature().unwrap();
        assert_eq!(soil_temperature.value, dec("20.5"));
        assert!(soil_temperature.is_estimated());

        let soil_moisture = c.soil_moisture().unwrap();
        assert_eq!(soil_moisture.value, dec("45.5"));
        assert_eq!(soil_moisture.source, DataSource::Estimated);
    }

    #[test]
    fn test_measured_soil_is_not_overwritten() {
        let c = condition("22", "80")
            .with_measured_soil(Some(dec("18")), None)
            .unwrap()
            .with_estimated_soil();

        assert_eq!(c.soil_temperature(), Some(SoilReading::measured(dec("18"))));
        assert_eq!(c.soil_moisture(), Some(SoilReading::estimated(dec("56"))));
    }

    #[test]
    fn test_condition_validation_collects_fields() {
        let errors = WeatherCondition::new(
            at(0),
            dec("20"),
            dec("101"),
            dec("-1"),
            dec("-0.5"),
            dec("361"),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 4);
        assert!(errors.has_field("wind_direction"));
    }

    #[test]
    fn test_implausible_readings_are_rejected() {
        let errors = WeatherCondition::new(
            at(0),
            dec("1000000"),
            dec("50"),
            Decimal::from_scientific("5e28").unwrap(),
            dec("2"),
            dec("90"),
        )
        .unwrap_err();
        assert!(errors.has_field("temperature"));
        assert!(errors.has_field("precipitation"));

        assert!(WeatherCondition::new(at(0), dec("-100"), dec("50"), dec("1000"), dec("2"), dec("90"))
            .is_ok());
    }

    #[test]
    fn test_measured_soil_moisture_range() {
        let result = condition("20", "50").with_measured_soil(None, Some(dec("120")));
        assert!(result.unwrap_err().has_field("soil_moisture"));
    }

    #[test]
    fn test_forecast_requires_samples() {
        let location = GeoLocation::new(dec("45"), dec("-122")).unwrap();
        let empty = WeatherForecast::new(&location, vec![], at(0));
        assert_eq!(empty.unwrap_err(), AdvisoryError::EmptyInput("forecast conditions"));

        let forecast = WeatherForecast::new(&location, vec![condition("20", "50")], at(0)).unwrap();
        assert_eq!(forecast.location_id(), "45,-122");
        assert_eq!(forecast.conditions().len(), 1);
    }

    #[test]
    fn test_condition_serde_round_trip_keeps_provenance() {
        let c = condition("10", "40").with_estimated_soil();
        let json = serde_json::to_string(&c).unwrap();
        let back: WeatherCondition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
