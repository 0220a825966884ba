//! Planting, irrigation and field-work assessment of a single weather snapshot

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::rules::Classifier;
use super::thresholds::AdvisoryThresholds;
use crate::models::WeatherCondition;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlantingSuitability {
    TooCold,
    TooHot,
    TooWet,
    TooDry,
    Good,
}

impl fmt::Display for PlantingSuitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantingSuitability::TooCold => write!(f, "Too cold for most crops"),
            PlantingSuitability::TooHot => write!(f, "Too hot for optimal planting"),
            PlantingSuitability::TooWet => write!(f, "Too wet for planting"),
            PlantingSuitability::TooDry => {
                write!(f, "Soil too dry, consider irrigation before planting")
            }
            PlantingSuitability::Good => write!(f, "Good conditions for planting"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationNeed {
    Recommended,
    NotNeeded,
    Monitor,
}

impl fmt::Display for IrrigationNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrrigationNeed::Recommended => write!(f, "Irrigation recommended"),
            IrrigationNeed::NotNeeded => write!(f, "No irrigation needed - recent precipitation"),
            IrrigationNeed::Monitor => write!(f, "Monitor soil moisture"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldWorkSuitability {
    Unsuitable,
    Caution,
    Suitable,
}

impl fmt::Display for FieldWorkSuitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldWorkSuitability::Unsuitable => write!(f, "Not suitable - wet conditions"),
            FieldWorkSuitability::Caution => write!(f, "Caution - high winds"),
            FieldWorkSuitability::Suitable => write!(f, "Suitable for field work"),
        }
    }
}

/// A classification outcome paired with its human-readable message
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Verdict<T> {
    pub status: T,
    pub message: String,
    /// Name of the rule that fired; absent when the default applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<&'static str>,
}

impl<T: fmt::Display + Clone> Verdict<T> {
    pub fn from_classifier<I>(classifier: &Classifier<I, T>, input: &I) -> Self {
        let status = classifier.classify(input);
        Self {
            message: status.to_string(),
            rule: classifier.matched_rule(input),
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConditionAssessment {
    pub planting: Verdict<PlantingSuitability>,
    pub irrigation: Verdict<IrrigationNeed>,
    pub field_work: Verdict<FieldWorkSuitability>,
}

/// Soil moisture only counts when a reading is present
fn soil_moisture_below(condition: &WeatherCondition, limit: Decimal) -> bool {
    condition
        .soil_moisture()
        .map(|reading| reading.value < limit)
        .unwrap_or(false)
}

pub fn planting_classifier(t: &AdvisoryThresholds) -> Classifier<WeatherCondition, PlantingSuitability> {
    let (min_temp, max_temp) = (t.min_planting_temperature, t.max_planting_temperature);
    let max_precip = t.max_planting_precipitation;
    let min_moisture = t.min_soil_moisture;

    Classifier::<WeatherCondition, _>::new(PlantingSuitability::Good)
        .rule("too_cold", move |c| c.temperature() < min_temp, PlantingSuitability::TooCold)
        .rule("too_hot", move |c| c.temperature() > max_temp, PlantingSuitability::TooHot)
        .rule("too_wet", move |c| c.precipitation() > max_precip, PlantingSuitability::TooWet)
        .rule(
            "too_dry",
            move |c| soil_moisture_below(c, min_moisture),
            PlantingSuitability::TooDry,
        )
}

pub fn irrigation_classifier(t: &AdvisoryThresholds) -> Classifier<WeatherCondition, IrrigationNeed> {
    let threshold = t.irrigation_threshold;
    let recent_rain = t.recent_rain_threshold;

    Classifier::<WeatherCondition, _>::new(IrrigationNeed::Monitor)
        .rule(
            "dry_soil",
            move |c| soil_moisture_below(c, threshold),
            IrrigationNeed::Recommended,
        )
        .rule(
            "recent_rain",
            move |c| c.precipitation() > recent_rain,
            IrrigationNeed::NotNeeded,
        )
}

pub fn field_work_classifier(
    t: &AdvisoryThresholds,
) -> Classifier<WeatherCondition, FieldWorkSuitability> {
    let max_precip = t.field_work_max_precipitation;
    let max_wind = t.field_work_max_wind_speed;

    Classifier::<WeatherCondition, _>::new(FieldWorkSuitability::Suitable)
        .rule("wet", move |c| c.precipitation() > max_precip, FieldWorkSuitability::Unsuitable)
        .rule("windy", move |c| c.wind_speed() > max_wind, FieldWorkSuitability::Caution)
}

/// The three condition classifiers built from one set of thresholds
#[derive(Debug)]
pub struct ConditionAssessor {
    planting: Classifier<WeatherCondition, PlantingSuitability>,
    irrigation: Classifier<WeatherCondition, IrrigationNeed>,
    field_work: Classifier<WeatherCondition, FieldWorkSuitability>,
}

impl ConditionAssessor {
    pub fn new(thresholds: &AdvisoryThresholds) -> Self {
        Self {
            planting: planting_classifier(thresholds),
            irrigation: irrigation_classifier(thresholds),
            field_work: field_work_classifier(thresholds),
        }
    }

    pub fn planting(&self, condition: &WeatherCondition) -> PlantingSuitability {
        self.planting.classify(condition)
    }

    pub fn irrigation(&self, condition: &WeatherCondition) -> IrrigationNeed {
        self.irrigation.classify(condition)
    }

    pub fn field_work(&self, condition: &WeatherCondition) -> FieldWorkSuitability {
        self.field_work.classify(condition)
    }

    pub fn assess(&self, condition: &WeatherCondition) -> ConditionAssessment {
        ConditionAssessment {
            planting: Verdict::from_classifier(&self.planting, condition),
            irrigation: Verdict::from_classifier(&self.irrigation, condition),
            field_work: Verdict::from_classifier(&self.field_work, condition),
        }
    }
}

impl Default for ConditionAssessor {
    fn default() -> Self {
        Self::new(&AdvisoryThresholds::default())
    }
}
