//! Agronomic thresholds used by the condition classifiers

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Policy values for the condition classifiers, loaded from configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AdvisoryThresholds {
    /// Below this air temperature (°C) it is too cold to plant
    pub min_planting_temperature: Decimal,
    /// Above this air temperature (°C) it is too hot to plant
    pub max_planting_temperature: Decimal,
    /// Above this precipitation (mm) it is too wet to plant
    pub max_planting_precipitation: Decimal,
    /// Below this soil moisture (%) the soil is too dry to plant
    pub min_soil_moisture: Decimal,
    /// Below this soil moisture (%) irrigation is recommended
    pub irrigation_threshold: Decimal,
    /// Above this precipitation (mm) recent rain makes irrigation unnecessary
    pub recent_rain_threshold: Decimal,
    pub field_work_max_precipitation: Decimal,
    /// m/s
    pub field_work_max_wind_speed: Decimal,
}

impl Default for AdvisoryThresholds {
    fn default() -> Self {
        Self {
            min_planting_temperature: Decimal::from(10),
            max_planting_temperature: Decimal::from(35),
            max_planting_precipitation: Decimal::from(10),
            min_soil_moisture: Decimal::from(30),
            irrigation_threshold: Decimal::from(40),
            recent_rain_threshold: Decimal::from(5),
            field_work_max_precipitation: Decimal::from(2),
            field_work_max_wind_speed: Decimal::from(15),
        }
    }
}
