//! Crop profiles, planting recommendations and growth timelines

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::error::ValidationErrors;
use crate::models::{CropInfo, CropType, GrowthStage, WeatherCondition, SOIL_TEMPERATURE_OFFSET};
use crate::types::ValueRange;

/// (stage, minimum days, maximum days)
type GrowthPeriod = (GrowthStage, i64, i64);

const CORN_GROWTH: &[GrowthPeriod] = &[
    (GrowthStage::Germination, 5, 7),
    (GrowthStage::Emergence, 7, 10),
    (GrowthStage::Tillering, 20, 30),
    (GrowthStage::StemElongation, 15, 20),
    (GrowthStage::Heading, 15, 20),
    (GrowthStage::Flowering, 10, 15),
    (GrowthStage::GrainFilling, 35, 45),
    (GrowthStage::Maturity, 20, 25),
];

const WHEAT_GROWTH: &[GrowthPeriod] = &[
    (GrowthStage::Germination, 4, 7),
    (GrowthStage::Emergence, 7, 10),
    (GrowthStage::Tillering, 25, 35),
    (GrowthStage::StemElongation, 20, 30),
    (GrowthStage::Heading, 10, 15),
    (GrowthStage::Flowering, 7, 10),
    (GrowthStage::GrainFilling, 30, 40),
    (GrowthStage::Maturity, 10, 15),
];

// Sunflowers do not tiller
const SUNFLOWER_GROWTH: &[GrowthPeriod] = &[
    (GrowthStage::Germination, 5, 8),
    (GrowthStage::Emergence, 5, 10),
    (GrowthStage::StemElongation, 25, 35),
    (GrowthStage::Heading, 15, 20),
    (GrowthStage::Flowering, 10, 15),
    (GrowthStage::GrainFilling, 20, 30),
    (GrowthStage::Maturity, 10, 15),
];

/// Everything the engine knows about one crop
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropProfile {
    pub crop_type: CropType,
    /// Soil temperature (°C) below which planting should wait
    pub min_soil_temperature: Decimal,
    pub planting_depth: &'static str,
    pub row_spacing: &'static str,
    /// Planting guide pH target, narrower than `optimal_ph` for corn
    pub planting_ph: &'static str,
    pub optimal_temperature: ValueRange,
    pub optimal_soil_moisture: ValueRange,
    pub optimal_ph: ValueRange,
    /// Air temperature band that makes a planting day ideal
    pub ideal_planting_band: Option<ValueRange>,
    /// Air temperature (°C) above which planting should be postponed
    pub heat_ceiling: Option<Decimal>,
    pub planting_season: &'static str,
    pub growing_days: &'static str,
    #[serde(skip)]
    growth_periods: &'static [GrowthPeriod],
}

fn range(min: i64, max: i64) -> ValueRange {
    ValueRange::from_bounds(Decimal::from(min), Decimal::from(max))
}

pub fn crop_profile(crop: CropType) -> CropProfile {
    match crop {
        CropType::Corn => CropProfile {
            crop_type: crop,
            min_soil_temperature: Decimal::from(10),
            planting_depth: "1.5-2 inches",
            row_spacing: "30-36 inches",
            planting_ph: "6.0-6.8",
            optimal_temperature: range(20, 30),
            optimal_soil_moisture: range(50, 70),
            optimal_ph: range(6, 7),
            ideal_planting_band: None,
            heat_ceiling: Some(Decimal::from(30)),
            planting_season: "Spring (April-June)",
            growing_days: "90-120 days",
            growth_periods: CORN_GROWTH,
        },
        CropType::Wheat => CropProfile {
            crop_type: crop,
            min_soil_temperature: Decimal::from(4),
            planting_depth: "1-2 inches",
            row_spacing: "6-8 inches",
            planting_ph: "6.0-7.0",
            optimal_temperature: range(15, 25),
            optimal_soil_moisture: range(40, 60),
            optimal_ph: range(6, 7),
            ideal_planting_band: Some(range(15, 25)),
            heat_ceiling: None,
            planting_season: "Fall (September-November) or Spring (March-May)",
            growing_days: "120-150 days",
            growth_periods: WHEAT_GROWTH,
        },
        CropType::Sunflower => CropProfile {
            crop_type: crop,
            min_soil_temperature: Decimal::from(12),
            planting_depth: "1.5-2.5 inches",
            row_spacing: "20-30 inches",
            planting_ph: "6.0-7.5",
            optimal_temperature: range(18, 28),
            optimal_soil_moisture: range(45, 65),
            optimal_ph: ValueRange::from_bounds(Decimal::from(6), Decimal::new(75, 1)),
            ideal_planting_band: Some(range(20, 28)),
            heat_ceiling: None,
            planting_season: "Late Spring (May-June)",
            growing_days: "80-120 days",
            growth_periods: SUNFLOWER_GROWTH,
        },
    }
}

/// Calendar facts shown alongside a crop's planting recommendation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CropCalendar {
    pub crop_type: CropType,
    pub optimal_temperature: ValueRange,
    pub planting_season: &'static str,
    pub min_soil_temperature: Decimal,
    pub growing_days: &'static str,
}

pub fn crop_calendar(crop: CropType) -> CropCalendar {
    let profile = crop_profile(crop);
    CropCalendar {
        crop_type: crop,
        optimal_temperature: profile.ideal_planting_band.unwrap_or(profile.optimal_temperature),
        planting_season: profile.planting_season,
        min_soil_temperature: profile.min_soil_temperature,
        growing_days: profile.growing_days,
    }
}

// ============================================================================
// Planting Recommendation
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationGrade {
    Wait,
    Ideal,
    Acceptable,
    ConsiderWaiting,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PlantingRecommendation {
    pub grade: RecommendationGrade,
    pub message: String,
}

impl fmt::Display for PlantingRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn crop_noun(crop: CropType) -> &'static str {
    match crop {
        CropType::Corn => "corn planting",
        CropType::Wheat => "wheat",
        CropType::Sunflower => "sunflowers",
    }
}

/// Grade the current conditions for planting `crop`
///
/// The soil temperature falls back to the air temperature offset when the
/// condition carries no soil reading.
pub fn planting_recommendation(crop: CropType, condition: &WeatherCondition) -> PlantingRecommendation {
    let profile = crop_profile(crop);
    let temperature = condition.temperature();
    let soil_temperature = condition
        .soil_temperature()
        .map(|reading| reading.value)
        .unwrap_or(temperature - SOIL_TEMPERATURE_OFFSET);

    let (grade, message) = if soil_temperature < profile.min_soil_temperature {
        (
            RecommendationGrade::Wait,
            format!("Wait - soil temperature too low for {}", crop_noun(crop)),
        )
    } else if profile.heat_ceiling.is_some_and(|ceiling| temperature > ceiling) {
        (
            RecommendationGrade::ConsiderWaiting,
            "Consider waiting for cooler weather".to_string(),
        )
    } else {
        match profile.ideal_planting_band {
            None => (
                RecommendationGrade::Ideal,
                format!("Good conditions for {} planting", crop),
            ),
            Some(band) if band.contains(temperature) => {
                let quality = if crop == CropType::Wheat { "Excellent" } else { "Ideal" };
                (
                    RecommendationGrade::Ideal,
                    format!("{} conditions for {} planting", quality, crop),
                )
            }
            Some(_) => (
                RecommendationGrade::Acceptable,
                format!("Acceptable conditions for {} planting", crop),
            ),
        }
    };

    PlantingRecommendation { grade, message }
}

// ============================================================================
// Growth Timeline
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StageWindow {
    pub stage: GrowthStage,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
}

/// Each stage lasts the integer mean of its day range, back to back from planting
pub fn growth_timeline(crop: CropType, planting_date: NaiveDate) -> Vec<StageWindow> {
    let mut start = planting_date;
    crop_profile(crop)
        .growth_periods
        .iter()
        .map(|(stage, min_days, max_days)| {
            let duration_days = (min_days + max_days) / 2;
            let end = start + Duration::days(duration_days);
            let window = StageWindow {
                stage: *stage,
                start_date: start,
                end_date: end,
                duration_days,
            };
            start = end;
            window
        })
        .collect()
}

/// Expected harvest date, the end of the last stage
pub fn expected_harvest_date(crop: CropType, planting_date: NaiveDate) -> NaiveDate {
    growth_timeline(crop, planting_date)
        .last()
        .map(|w| w.end_date)
        .unwrap_or(planting_date)
}

/// Stage the crop is in on `today`
pub fn current_stage(timeline: &[StageWindow], today: NaiveDate) -> GrowthStage {
    match timeline.first() {
        Some(first) if today < first.start_date => GrowthStage::Germination,
        _ => timeline
            .iter()
            .find(|w| today >= w.start_date && today < w.end_date)
            .map(|w| w.stage)
            .unwrap_or(GrowthStage::Maturity),
    }
}

/// Build the crop record for a planting
pub fn crop_info(
    crop: CropType,
    planting_date: NaiveDate,
    today: NaiveDate,
) -> Result<CropInfo, ValidationErrors> {
    let profile = crop_profile(crop);
    let timeline = growth_timeline(crop, planting_date);
    let harvest = timeline.last().map(|w| w.end_date).unwrap_or(planting_date);

    CropInfo::new(
        crop,
        current_stage(&timeline, today),
        planting_date,
        harvest,
        profile.optimal_temperature,
        profile.optimal_soil_moisture,
        profile.optimal_ph,
    )
}

// ============================================================================
// Growing Conditions
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureStatus {
    TooCold,
    Optimal,
    TooHot,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoistureStatus {
    TooDry,
    Optimal,
    TooWet,
    Unknown,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GrowingConditions {
    pub crop_type: CropType,
    pub temperature_status: TemperatureStatus,
    pub moisture_status: MoistureStatus,
}

/// Compare current readings with the crop's optimal ranges
pub fn growing_conditions(crop: CropType, condition: &WeatherCondition) -> GrowingConditions {
    let profile = crop_profile(crop);
    let temperature = condition.temperature();

    let temperature_status = if temperature < profile.optimal_temperature.min() {
        TemperatureStatus::TooCold
    } else if temperature > profile.optimal_temperature.max() {
        TemperatureStatus::TooHot
    } else {
        TemperatureStatus::Optimal
    };

    let moisture_status = match condition.soil_moisture() {
        None => MoistureStatus::Unknown,
        Some(reading) if reading.value < profile.optimal_soil_moisture.min() => MoistureStatus::TooDry,
        Some(reading) if reading.value > profile.optimal_soil_moisture.max() => MoistureStatus::TooWet,
        Some(_) => MoistureStatus::Optimal,
    };

    GrowingConditions {
        crop_type: crop,
        temperature_status,
        moisture_status,
    }
}
