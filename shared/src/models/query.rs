//! Request payloads for the advisory endpoints
//!
//! Payloads only check enum membership while deserializing; numeric ranges and
//! cross-field rules are checked by the functions in [`crate::validation`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClimateZone, CropType, GrowthStage, IrrigationMethod, Season, SoilType};

pub const DEFAULT_FORECAST_DAYS: u32 = 3;

fn default_forecast_days() -> u32 {
    DEFAULT_FORECAST_DAYS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropManagementQuery {
    pub crop_type: CropType,
    pub soil_type: SoilType,
    pub planting_season: Season,
    pub climate_zone: ClimateZone,
    pub planting_date: NaiveDate,
    pub field_size_ha: Decimal,
    #[serde(default)]
    pub irrigation_method: Option<IrrigationMethod>,
    #[serde(default)]
    pub expected_rainfall_mm: Option<Decimal>,
    #[serde(default)]
    pub previous_crop: Option<String>,
    /// Field coordinates; both or neither
    #[serde(default)]
    pub latitude: Option<Decimal>,
    #[serde(default)]
    pub longitude: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilAnalysisQuery {
    pub ph_level: Decimal,
    /// Percent
    pub organic_matter: Decimal,
    /// ppm
    pub nitrogen: Decimal,
    /// ppm
    pub phosphorus: Decimal,
    /// ppm
    pub potassium: Decimal,
    /// Percent
    pub soil_moisture: Decimal,
    #[serde(default)]
    pub crop_type: Option<CropType>,
    #[serde(default)]
    pub soil_type: Option<SoilType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PestControlQuery {
    pub pest_type: String,
    /// 1 (minor) to 5 (critical)
    pub infestation_level: u8,
    pub crop_stage: GrowthStage,
    #[serde(default)]
    pub crop_type: Option<CropType>,
    pub temperature: Decimal,
    pub humidity: Decimal,
    #[serde(default)]
    pub previous_treatments: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationScheduleQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub crop_type: CropType,
    pub growth_stage: GrowthStage,
    pub soil_moisture: Decimal,
    #[serde(default = "default_forecast_days")]
    pub days: u32,
    #[serde(default)]
    pub irrigation_method: Option<IrrigationMethod>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HarvestTimingQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub crop_type: CropType,
    pub planting_date: NaiveDate,
    pub growing_degree_days: Decimal,
    #[serde(default)]
    pub grain_moisture: Option<Decimal>,
    #[serde(default = "default_forecast_days")]
    pub days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_days_default() {
        let query: IrrigationScheduleQuery = serde_json::from_str(
            r#"{"latitude":45.5,"longitude":-122.6,"crop_type":"corn",
                "growth_stage":"flowering","soil_moisture":25}"#,
        )
        .unwrap();
        assert_eq!(query.days, DEFAULT_FORECAST_DAYS);
        assert_eq!(query.irrigation_method, None);
    }

    #[test]
    fn test_unknown_enum_rejected() {
        let result = serde_json::from_str::<PestControlQuery>(
            r#"{"pest_type":"aphids","infestation_level":2,"crop_stage":"budding",
                "temperature":20,"humidity":50}"#,
        );
        assert!(result.is_err());
    }
}
