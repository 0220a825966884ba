//! Validation utilities for the Agricultural Advisory Service
//!
//! Field checks return `Result<(), String>` so callers can collect every
//! violation into a [`ValidationErrors`] before any advisory logic runs.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{ValidationErrors, FieldError};
use crate::models::{
    ClimateZone, CropManagementQuery, CropType, HarvestTimingQuery, IrrigationScheduleQuery,
    PestControlQuery, SoilAnalysisQuery, SoilType,
};

// ============================================================================
// Field Checks
// ============================================================================

/// Validate that a value lies within `[min, max]` (both ends inclusive)
pub fn validate_range(value: Decimal, min: Decimal, max: Decimal) -> Result<(), String> {
    if value < min || value > max {
        return Err(format!("must be between {} and {}", min, max));
    }
    Ok(())
}

/// Validate that a value is at least `min`
pub fn validate_min(value: Decimal, min: Decimal) -> Result<(), String> {
    if value < min {
        return Err(format!("must be at least {}", min));
    }
    Ok(())
}

/// Validate that a value is strictly positive
pub fn validate_positive(value: Decimal) -> Result<(), String> {
    if value <= Decimal::ZERO {
        return Err("must be greater than 0".to_string());
    }
    Ok(())
}

pub fn validate_latitude(latitude: Decimal) -> Result<(), String> {
    validate_range(latitude, Decimal::from(-90), Decimal::from(90))
}

pub fn validate_longitude(longitude: Decimal) -> Result<(), String> {
    validate_range(longitude, Decimal::from(-180), Decimal::from(180))
}

/// Validate a percentage in `[0, 100]`
pub fn validate_percentage(value: Decimal) -> Result<(), String> {
    validate_range(value, Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Validate soil pH on the full `[0, 14]` scale
pub fn validate_ph(ph: Decimal) -> Result<(), String> {
    validate_range(ph, Decimal::ZERO, Decimal::from(14))
}

/// Validate an air temperature is plausible for field conditions (-50°C to 60°C)
pub fn validate_field_temperature(temperature: Decimal) -> Result<(), String> {
    validate_range(temperature, Decimal::from(-50), Decimal::from(60))
}

/// Validate a forecast horizon in days (1-7)
pub fn validate_forecast_days(days: u32) -> Result<(), String> {
    if !(1..=7).contains(&days) {
        return Err("must be between 1 and 7".to_string());
    }
    Ok(())
}

/// Validate a date lies within one year of `today` in either direction
pub fn validate_within_year(date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if date < today - Duration::days(365) {
        return Err("cannot be more than a year in the past".to_string());
    }
    if date > today + Duration::days(365) {
        return Err("cannot be more than a year in the future".to_string());
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("must not be empty".to_string());
    }
    Ok(())
}

fn location_errors(latitude: Decimal, longitude: Decimal, errors: &mut ValidationErrors) {
    errors.check("latitude", validate_latitude(latitude));
    errors.check("longitude", validate_longitude(longitude));
}

// ============================================================================
// Endpoint Query Validations
// ============================================================================

/// Maximum plausible nutrient levels (ppm) for a soil test
pub const MAX_NITROGEN: i64 = 500;
pub const MAX_PHOSPHORUS: i64 = 300;
pub const MAX_POTASSIUM: i64 = 800;

/// Rainfall (mm) a corn crop needs when no irrigation is planned
pub const CORN_MIN_RAINFALL_WITHOUT_IRRIGATION: i64 = 500;

/// Validate a crop management query, including agronomic cross-field rules
pub fn validate_crop_management(
    query: &CropManagementQuery,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check("planting_date", validate_within_year(query.planting_date, today));
    errors.check("field_size_ha", validate_positive(query.field_size_ha));
    if let Some(rainfall) = query.expected_rainfall_mm {
        errors.check("expected_rainfall_mm", validate_min(rainfall, Decimal::ZERO));
    }
    if let Some(previous) = &query.previous_crop {
        errors.check("previous_crop", validate_not_blank(previous));
    }
    match (query.latitude, query.longitude) {
        (Some(latitude), Some(longitude)) => {
            errors.check("latitude", validate_latitude(latitude));
            errors.check("longitude", validate_longitude(longitude));
        }
        (Some(_), None) => errors.check("longitude", Err("required with latitude".to_string())),
        (None, Some(_)) => errors.check("latitude", Err("required with longitude".to_string())),
        (None, None) => {}
    }

    for violation in crop_requirement_violations(query) {
        errors.errors.push(violation);
    }

    errors.into_result()
}

/// Agronomic constraints between crop, soil, climate and water supply
fn crop_requirement_violations(query: &CropManagementQuery) -> Vec<FieldError> {
    let mut violations = Vec::new();
    let mut violate = |field: &str, message: &str| {
        violations.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        })
    };

    match query.crop_type {
        CropType::Wheat => {
            if query.soil_type == SoilType::Sandy {
                violate("soil_type", "Wheat prefers loamy, silt or clay soils");
            }
            if query.climate_zone == ClimateZone::Tropical {
                violate("climate_zone", "Wheat is not suitable for tropical climates");
            }
        }
        CropType::Corn => {
            if matches!(
                query.climate_zone,
                ClimateZone::Subarctic | ClimateZone::Mediterranean
            ) {
                violate("climate_zone", "Corn requires longer growing seasons");
            }
            let rainfall = query.expected_rainfall_mm.unwrap_or(Decimal::ZERO);
            if query.irrigation_method.is_none()
                && rainfall < Decimal::from(CORN_MIN_RAINFALL_WITHOUT_IRRIGATION)
            {
                violate(
                    "irrigation_method",
                    "Corn requires either irrigation or at least 500mm expected rainfall",
                );
            }
        }
        CropType::Sunflower => {}
    }

    violations
}

/// Validate a soil analysis query
pub fn validate_soil_analysis(query: &SoilAnalysisQuery) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check("ph_level", validate_ph(query.ph_level));
    errors.check("organic_matter", validate_percentage(query.organic_matter));
    errors.check(
        "nitrogen",
        validate_range(query.nitrogen, Decimal::ZERO, Decimal::from(MAX_NITROGEN)),
    );
    errors.check(
        "phosphorus",
        validate_range(query.phosphorus, Decimal::ZERO, Decimal::from(MAX_PHOSPHORUS)),
    );
    errors.check(
        "potassium",
        validate_range(query.potassium, Decimal::ZERO, Decimal::from(MAX_POTASSIUM)),
    );
    errors.check("soil_moisture", validate_percentage(query.soil_moisture));

    errors.into_result()
}

/// Validate a pest control query
pub fn validate_pest_control(query: &PestControlQuery) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check("pest_type", validate_not_blank(&query.pest_type));
    if !(1..=5).contains(&query.infestation_level) {
        errors.add("infestation_level", "must be between 1 and 5");
    }
    errors.check("temperature", validate_field_temperature(query.temperature));
    errors.check("humidity", validate_percentage(query.humidity));
    for (index, treatment) in query.previous_treatments.iter().enumerate() {
        errors.check(
            &format!("previous_treatments[{}]", index),
            validate_not_blank(treatment),
        );
    }

    errors.into_result()
}

/// Validate an irrigation schedule query
pub fn validate_irrigation_schedule(query: &IrrigationScheduleQuery) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    location_errors(query.latitude, query.longitude, &mut errors);
    errors.check("soil_moisture", validate_percentage(query.soil_moisture));
    errors.check("days", validate_forecast_days(query.days));

    errors.into_result()
}

/// Validate a harvest timing query
pub fn validate_harvest_timing(
    query: &HarvestTimingQuery,
    today: NaiveDate,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    location_errors(query.latitude, query.longitude, &mut errors);
    if query.planting_date > today {
        errors.add("planting_date", "cannot be in the future");
    }
    errors.check(
        "growing_degree_days",
        validate_min(query.growing_degree_days, Decimal::ZERO),
    );
    if let Some(moisture) = query.grain_moisture {
        errors.check("grain_moisture", validate_percentage(moisture));
    }
    errors.check("days", validate_forecast_days(query.days));

    errors.into_result()
}
