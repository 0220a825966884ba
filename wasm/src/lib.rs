//! WebAssembly module for the Agricultural Advisory Service
//!
//! Provides offline, client-side access to:
//! - Soil–crop compatibility and seasonal notes
//! - Condition assessment for a weather snapshot
//! - Forecast summaries
//! - Soil analysis validation

use wasm_bindgen::prelude::*;

use shared::advisory::{
    analyze_forecast, seasonal_note, soil_compatibility, AdvisoryThresholds, ConditionAssessor,
};
use shared::{validate_soil_analysis, CropType, Season, SoilAnalysisQuery, SoilType, WeatherCondition};

fn parse<T>(value: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| e.to_string())
}

fn compatibility_text(crop: &str, soil: &str) -> Result<String, String> {
    let crop: CropType = parse(crop)?;
    let soil: SoilType = parse(soil)?;
    Ok(soil_compatibility(crop, soil).to_string())
}

fn seasonal_text(crop: &str, season: &str) -> Result<String, String> {
    let crop: CropType = parse(crop)?;
    let season: Season = parse(season)?;
    Ok(seasonal_note(crop, season).to_string())
}

fn assessment_json(condition_json: &str) -> Result<String, String> {
    let condition: WeatherCondition = serde_json::from_str(condition_json)
        .map_err(|e| format!("Invalid condition JSON: {}", e))?;
    let assessment = ConditionAssessor::default().assess(&condition);
    serde_json::to_string(&assessment).map_err(|e| e.to_string())
}

fn forecast_json(conditions_json: &str) -> Result<String, String> {
    let conditions: Vec<WeatherCondition> = serde_json::from_str(conditions_json)
        .map_err(|e| format!("Invalid forecast JSON: {}", e))?;
    let analysis =
        analyze_forecast(&conditions, &AdvisoryThresholds::default()).map_err(|e| e.to_string())?;
    serde_json::to_string(&analysis).map_err(|e| e.to_string())
}

fn soil_errors_json(query_json: &str) -> Result<String, String> {
    let query: SoilAnalysisQuery = serde_json::from_str(query_json)
        .map_err(|e| format!("Invalid soil analysis JSON: {}", e))?;
    let errors = match validate_soil_analysis(&query) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.errors,
    };
    serde_json::to_string(&errors).map_err(|e| e.to_string())
}

/// Soil compatibility rating, e.g. "Excellent - ideal growing medium"
#[wasm_bindgen]
pub fn check_soil_compatibility(crop: &str, soil: &str) -> Result<String, JsValue> {
    compatibility_text(crop, soil).map_err(|e| JsValue::from_str(&e))
}

/// Seasonal planting note for a crop
#[wasm_bindgen]
pub fn seasonal_planting_note(crop: &str, season: &str) -> Result<String, JsValue> {
    seasonal_text(crop, season).map_err(|e| JsValue::from_str(&e))
}

/// Planting, irrigation and field work assessment as JSON
#[wasm_bindgen]
pub fn assess_conditions(condition_json: &str) -> Result<String, JsValue> {
    assessment_json(condition_json).map_err(|e| JsValue::from_str(&e))
}

/// Forecast summary, recommendations and daily breakdown as JSON
#[wasm_bindgen]
pub fn summarize_forecast(conditions_json: &str) -> Result<String, JsValue> {
    forecast_json(conditions_json).map_err(|e| JsValue::from_str(&e))
}

/// Field errors of a soil analysis query as a JSON array (empty when valid)
#[wasm_bindgen]
pub fn validate_soil_analysis_query(query_json: &str) -> Result<String, JsValue> {
    soil_errors_json(query_json).map_err(|e| JsValue::from_str(&e))
}
