//! Soil–crop compatibility and seasonal planting notes
//!
//! Both tables are exhaustive matches over closed enumerations, so the
//! compiler guarantees every pair has an entry.

use serde::Serialize;
use std::fmt;

use crate::models::{CropType, Season, SoilType};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityRating {
    Poor,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl fmt::Display for CompatibilityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompatibilityRating::Poor => write!(f, "Poor"),
            CompatibilityRating::Fair => write!(f, "Fair"),
            CompatibilityRating::Good => write!(f, "Good"),
            CompatibilityRating::VeryGood => write!(f, "Very good"),
            CompatibilityRating::Excellent => write!(f, "Excellent"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SoilCompatibility {
    pub rating: CompatibilityRating,
    pub rationale: &'static str,
}

impl fmt::Display for SoilCompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.rating, self.rationale)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SeasonalNote {
    pub text: &'static str,
    pub recommended: bool,
}

impl fmt::Display for SeasonalNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}

pub fn soil_compatibility(crop: CropType, soil: SoilType) -> SoilCompatibility {
    use CompatibilityRating::*;

    let (rating, rationale) = match (crop, soil) {
        (CropType::Corn, SoilType::Clay) => (Good, "retains moisture and nutrients well"),
        (CropType::Corn, SoilType::Loam) => (Excellent, "ideal growing medium"),
        (CropType::Corn, SoilType::Sandy) => (Fair, "may need more irrigation and fertilization"),
        (CropType::Corn, SoilType::Silt) => (Good, "good drainage and nutrient retention"),

        (CropType::Wheat, SoilType::Clay) => (Good, "retains moisture for winter varieties"),
        (CropType::Wheat, SoilType::Loam) => (Excellent, "best overall performance"),
        (CropType::Wheat, SoilType::Sandy) => (Poor, "may need significant amendments"),
        (CropType::Wheat, SoilType::Silt) => (VeryGood, "excellent water and nutrient retention"),

        (CropType::Sunflower, SoilType::Clay) => (Fair, "ensure good drainage to prevent root rot"),
        (CropType::Sunflower, SoilType::Loam) => (Excellent, "optimal growing conditions"),
        (CropType::Sunflower, SoilType::Sandy) => (Good, "naturally well-draining"),
        (CropType::Sunflower, SoilType::Silt) => (Good, "adequate drainage with good nutrients"),
    };

    SoilCompatibility { rating, rationale }
}

pub fn seasonal_note(crop: CropType, season: Season) -> SeasonalNote {
    let (text, recommended) = match (crop, season) {
        (CropType::Corn, Season::Spring) => ("Plant after last frost when soil reaches 10°C", true),
        (CropType::Corn, Season::Summer) => ("Early summer planting possible in northern regions", true),
        (CropType::Corn, Season::Fall) => ("Not recommended - insufficient growing season", false),

        (CropType::Wheat, Season::Spring) => ("Plant early spring for spring wheat varieties", true),
        (CropType::Wheat, Season::Summer) => ("Not typical planting season", false),
        (CropType::Wheat, Season::Fall) => ("Ideal for winter wheat varieties", true),

        (CropType::Sunflower, Season::Spring) => ("Plant after last frost, soil temperature 10°C+", true),
        (CropType::Sunflower, Season::Summer) => ("Early summer planting possible", true),
        (CropType::Sunflower, Season::Fall) => ("Not recommended - insufficient time to maturity", false),
    };

    SeasonalNote { text, recommended }
}

/// Soils ordered from best to worst for `crop`
pub fn ranked_soils(crop: CropType) -> Vec<(SoilType, SoilCompatibility)> {
    let mut soils: Vec<_> = SoilType::ALL
        .iter()
        .map(|soil| (*soil, soil_compatibility(crop, *soil)))
        .collect();
    soils.sort_by(|a, b| b.1.rating.cmp(&a.1.rating));
    soils
}
