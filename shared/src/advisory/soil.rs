//! Soil condition bands and soil test interpretation

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::compatibility::{soil_compatibility, SoilCompatibility};
use super::planting::crop_profile;
use crate::models::{CropType, SoilAnalysisQuery};
use crate::types::ValueRange;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoilTemperatureBand {
    TooCold,
    Cool,
    Moderate,
    Warm,
    Hot,
}

impl fmt::Display for SoilTemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilTemperatureBand::TooCold => write!(f, "Too cold for most crops"),
            SoilTemperatureBand::Cool => write!(f, "Cool - suitable for cool season crops only"),
            SoilTemperatureBand::Moderate => write!(f, "Moderate - good for many crops"),
            SoilTemperatureBand::Warm => write!(f, "Warm - excellent for most crops"),
            SoilTemperatureBand::Hot => write!(f, "Hot - monitor for heat stress"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoilMoistureBand {
    TooDry,
    Low,
    Good,
    High,
    Waterlogged,
}

impl fmt::Display for SoilMoistureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilMoistureBand::TooDry => write!(f, "Too dry - irrigation needed"),
            SoilMoistureBand::Low => write!(f, "Low - consider irrigation"),
            SoilMoistureBand::Good => write!(f, "Good - suitable for planting"),
            SoilMoistureBand::High => write!(f, "High - monitor for excess moisture"),
            SoilMoistureBand::Waterlogged => write!(f, "Waterlogged - wait for better drainage"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverallSoilConditions {
    Wait,
    MonitorStress,
    Good,
}

impl fmt::Display for OverallSoilConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallSoilConditions::Wait => write!(f, "Wait for better conditions"),
            OverallSoilConditions::MonitorStress => {
                write!(f, "Monitor for heat and moisture stress")
            }
            OverallSoilConditions::Good => write!(f, "Good conditions for farming operations"),
        }
    }
}

pub fn classify_soil_temperature(celsius: Decimal) -> SoilTemperatureBand {
    if celsius < Decimal::from(5) {
        SoilTemperatureBand::TooCold
    } else if celsius < Decimal::from(10) {
        SoilTemperatureBand::Cool
    } else if celsius < Decimal::from(15) {
        SoilTemperatureBand::Moderate
    } else if celsius < Decimal::from(25) {
        SoilTemperatureBand::Warm
    } else {
        SoilTemperatureBand::Hot
    }
}

pub fn classify_soil_moisture(percent: Decimal) -> SoilMoistureBand {
    if percent < Decimal::from(20) {
        SoilMoistureBand::TooDry
    } else if percent < Decimal::from(40) {
        SoilMoistureBand::Low
    } else if percent < Decimal::from(70) {
        SoilMoistureBand::Good
    } else if percent < Decimal::from(85) {
        SoilMoistureBand::High
    } else {
        SoilMoistureBand::Waterlogged
    }
}

pub fn overall_soil_conditions(celsius: Decimal, moisture_percent: Decimal) -> OverallSoilConditions {
    if celsius < Decimal::from(10) || moisture_percent < Decimal::from(30) {
        OverallSoilConditions::Wait
    } else if celsius > Decimal::from(25) && moisture_percent > Decimal::from(80) {
        OverallSoilConditions::MonitorStress
    } else {
        OverallSoilConditions::Good
    }
}

/// Planting assessment attached to a soil-conditions reading
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SoilPlantingAssessment {
    pub temperature: SoilTemperatureBand,
    pub temperature_message: String,
    pub moisture: SoilMoistureBand,
    pub moisture_message: String,
    pub overall: OverallSoilConditions,
    pub overall_message: String,
}

pub fn assess_soil(celsius: Decimal, moisture_percent: Decimal) -> SoilPlantingAssessment {
    let temperature = classify_soil_temperature(celsius);
    let moisture = classify_soil_moisture(moisture_percent);
    let overall = overall_soil_conditions(celsius, moisture_percent);
    SoilPlantingAssessment {
        temperature_message: temperature.to_string(),
        temperature,
        moisture_message: moisture.to_string(),
        moisture,
        overall_message: overall.to_string(),
        overall,
    }
}

// ============================================================================
// Soil Test Interpretation
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhStatus {
    Acidic,
    Optimal,
    Alkaline,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrganicMatterStatus {
    Low,
    Adequate,
}

pub fn classify_ph(ph: Decimal) -> PhStatus {
    if ph < Decimal::from(6) {
        PhStatus::Acidic
    } else if ph > Decimal::new(75, 1) {
        PhStatus::Alkaline
    } else {
        PhStatus::Optimal
    }
}

pub fn classify_organic_matter(percent: Decimal) -> OrganicMatterStatus {
    if percent < Decimal::from(3) {
        OrganicMatterStatus::Low
    } else {
        OrganicMatterStatus::Adequate
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CropPhFit {
    pub crop_type: CropType,
    pub optimal_ph: ValueRange,
    pub within_range: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SoilAnalysisReport {
    pub ph_status: PhStatus,
    pub organic_matter_status: OrganicMatterStatus,
    pub moisture: SoilMoistureBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_ph_fit: Option<CropPhFit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_compatibility: Option<SoilCompatibility>,
    pub recommendations: Vec<String>,
}

/// Interpret an already validated soil test
pub fn analyze_soil(query: &SoilAnalysisQuery) -> SoilAnalysisReport {
    let ph_status = classify_ph(query.ph_level);
    let organic_matter_status = classify_organic_matter(query.organic_matter);
    let moisture = classify_soil_moisture(query.soil_moisture);

    let mut recommendations = Vec::new();
    match ph_status {
        PhStatus::Acidic => recommendations.push("Consider lime application to raise soil pH".to_string()),
        PhStatus::Alkaline => {
            recommendations.push("Consider sulfur application to lower soil pH".to_string())
        }
        PhStatus::Optimal => {}
    }
    if organic_matter_status == OrganicMatterStatus::Low {
        recommendations.push("Add organic matter through cover crops or compost".to_string());
    }
    if matches!(moisture, SoilMoistureBand::TooDry | SoilMoistureBand::Low) {
        recommendations.push(moisture.to_string());
    }

    let crop_ph_fit = query.crop_type.map(|crop| {
        let optimal_ph = crop_profile(crop).optimal_ph;
        let within_range = optimal_ph.contains(query.ph_level);
        if !within_range {
            recommendations.push(format!(
                "Soil pH {} is outside the optimal range {} for {}",
                query.ph_level, optimal_ph, crop
            ));
        }
        CropPhFit {
            crop_type: crop,
            optimal_ph,
            within_range,
        }
    });

    let soil_compatibility = match (query.crop_type, query.soil_type) {
        (Some(crop), Some(soil)) => Some(soil_compatibility(crop, soil)),
        _ => None,
    };

    SoilAnalysisReport {
        ph_status,
        organic_matter_status,
        moisture,
        crop_ph_fit,
        soil_compatibility,
        recommendations,
    }
}
