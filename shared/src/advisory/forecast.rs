//! Multi-sample forecast aggregation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

use super::thresholds::AdvisoryThresholds;
use crate::error::{AdvisoryError, AdvisoryResult};
use crate::models::WeatherCondition;

/// At most this many optimal planting days are reported
pub const MAX_OPTIMAL_PLANTING_DAYS: usize = 3;

/// Precipitation (mm) above which irrigation priority drops to low
pub const LOW_IRRIGATION_PRIORITY_RAIN: i64 = 15;

/// Reported figures carry one decimal place; rules run on the exact values
fn one_decimal<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    Serialize::serialize(&value.round_dp(1), serializer)
}

/// Scalar planning signals for a forecast
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastSummary {
    pub sample_count: usize,
    #[serde(serialize_with = "one_decimal")]
    pub total_precipitation: Decimal,
    #[serde(serialize_with = "one_decimal")]
    pub average_temperature: Decimal,
    #[serde(serialize_with = "one_decimal")]
    pub average_humidity: Decimal,
    pub optimal_planting_days: Vec<WeatherCondition>,
}

fn mean(values: impl Iterator<Item = Decimal>, count: usize) -> Decimal {
    values.sum::<Decimal>() / Decimal::from(count)
}

/// Conditions with 15 ≤ temperature ≤ 30 °C and precipitation < 5 mm
pub fn is_optimal_planting_day(condition: &WeatherCondition) -> bool {
    condition.temperature() >= Decimal::from(15)
        && condition.temperature() <= Decimal::from(30)
        && condition.precipitation() < Decimal::from(5)
}

/// The first matching days in sequence order, at most three
pub fn optimal_planting_days(conditions: &[WeatherCondition]) -> Vec<WeatherCondition> {
    conditions
        .iter()
        .filter(|c| is_optimal_planting_day(c))
        .take(MAX_OPTIMAL_PLANTING_DAYS)
        .cloned()
        .collect()
}

pub fn summarize(conditions: &[WeatherCondition]) -> AdvisoryResult<ForecastSummary> {
    if conditions.is_empty() {
        return Err(AdvisoryError::EmptyInput("forecast conditions"));
    }
    let count = conditions.len();

    Ok(ForecastSummary {
        sample_count: count,
        total_precipitation: conditions.iter().map(|c| c.precipitation()).sum(),
        average_temperature: mean(conditions.iter().map(|c| c.temperature()), count),
        average_humidity: mean(conditions.iter().map(|c| c.humidity()), count),
        optimal_planting_days: optimal_planting_days(conditions),
    })
}

// ============================================================================
// Recommendations
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum IrrigationPriority {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationRecommendation {
    Minimal,
    Supplemental,
    Full,
}

impl fmt::Display for IrrigationRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrrigationRecommendation::Minimal => write!(f, "Minimal irrigation needed"),
            IrrigationRecommendation::Supplemental => {
                write!(f, "Supplemental irrigation recommended")
            }
            IrrigationRecommendation::Full => write!(f, "Full irrigation schedule recommended"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlantingAdvice {
    GoodWindow,
    Limited,
    Wait,
}

impl fmt::Display for PlantingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantingAdvice::GoodWindow => write!(f, "Good planting window identified"),
            PlantingAdvice::Limited => write!(f, "Limited planting opportunities"),
            PlantingAdvice::Wait => write!(f, "Wait for better conditions"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PestRisk {
    High,
    Moderate,
    LowToModerate,
}

impl fmt::Display for PestRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PestRisk::High => write!(f, "High - wet conditions favor disease development"),
            PestRisk::Moderate => {
                write!(f, "Moderate - warm, dry conditions may increase pest activity")
            }
            PestRisk::LowToModerate => write!(f, "Low to moderate - monitor field conditions"),
        }
    }
}

pub fn irrigation_recommendation(total_precipitation: Decimal) -> IrrigationRecommendation {
    if total_precipitation > Decimal::from(20) {
        IrrigationRecommendation::Minimal
    } else if total_precipitation > Decimal::from(5) {
        IrrigationRecommendation::Supplemental
    } else {
        IrrigationRecommendation::Full
    }
}

pub fn irrigation_priority(total_precipitation: Decimal) -> IrrigationPriority {
    if total_precipitation > Decimal::from(LOW_IRRIGATION_PRIORITY_RAIN) {
        IrrigationPriority::Low
    } else {
        IrrigationPriority::High
    }
}

/// Samples dry and calm enough for machinery
pub fn is_field_work_period(condition: &WeatherCondition, thresholds: &AdvisoryThresholds) -> bool {
    condition.precipitation() < thresholds.field_work_max_precipitation
        && condition.wind_speed() < thresholds.field_work_max_wind_speed
}

pub fn planting_advice(conditions: &[WeatherCondition]) -> PlantingAdvice {
    let suitable = conditions
        .iter()
        .filter(|c| {
            c.temperature() >= Decimal::from(10)
                && c.temperature() <= Decimal::from(30)
                && c.precipitation() < Decimal::from(5)
        })
        .count();

    match suitable {
        0 => PlantingAdvice::Wait,
        1 | 2 => PlantingAdvice::Limited,
        _ => PlantingAdvice::GoodWindow,
    }
}

pub fn pest_risk(average_temperature: Decimal, average_humidity: Decimal, total_precipitation: Decimal) -> PestRisk {
    if average_humidity > Decimal::from(80) && total_precipitation > Decimal::from(20) {
        PestRisk::High
    } else if average_temperature > Decimal::from(25) && average_humidity < Decimal::from(50) {
        PestRisk::Moderate
    } else {
        PestRisk::LowToModerate
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastRecommendations {
    pub irrigation_priority: IrrigationPriority,
    pub irrigation_recommendation: IrrigationRecommendation,
    pub irrigation_message: String,
    pub field_work_periods: usize,
    pub planting_advice: PlantingAdvice,
    pub planting_message: String,
    pub pest_risk: PestRisk,
    pub pest_risk_message: String,
}

pub fn recommend(
    conditions: &[WeatherCondition],
    summary: &ForecastSummary,
    thresholds: &AdvisoryThresholds,
) -> ForecastRecommendations {
    let recommendation = irrigation_recommendation(summary.total_precipitation);
    let advice = planting_advice(conditions);
    let risk = pest_risk(
        summary.average_temperature,
        summary.average_humidity,
        summary.total_precipitation,
    );

    ForecastRecommendations {
        irrigation_priority: irrigation_priority(summary.total_precipitation),
        irrigation_recommendation: recommendation,
        irrigation_message: recommendation.to_string(),
        field_work_periods: conditions
            .iter()
            .filter(|c| is_field_work_period(c, thresholds))
            .count(),
        planting_advice: advice,
        planting_message: advice.to_string(),
        pest_risk: risk,
        pest_risk_message: risk.to_string(),
    }
}

// ============================================================================
// Daily Breakdown
// ============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub samples: usize,
    #[serde(serialize_with = "one_decimal")]
    pub average_temperature: Decimal,
    #[serde(serialize_with = "one_decimal")]
    pub total_precipitation: Decimal,
    #[serde(serialize_with = "one_decimal")]
    pub average_humidity: Decimal,
}

/// Group samples by UTC calendar date, in chronological order
pub fn daily_breakdown(conditions: &[WeatherCondition]) -> Vec<DailySummary> {
    let mut days: Vec<(NaiveDate, Vec<&WeatherCondition>)> = Vec::new();
    for condition in conditions {
        let date = condition.timestamp().date_naive();
        match days.iter_mut().find(|(d, _)| *d == date) {
            Some((_, samples)) => samples.push(condition),
            None => days.push((date, vec![condition])),
        }
    }
    days.sort_by_key(|(date, _)| *date);

    days.into_iter()
        .map(|(date, samples)| {
            let count = samples.len();
            DailySummary {
                date,
                samples: count,
                average_temperature: mean(samples.iter().map(|c| c.temperature()), count),
                total_precipitation: samples.iter().map(|c| c.precipitation()).sum(),
                average_humidity: mean(samples.iter().map(|c| c.humidity()), count),
            }
        })
        .collect()
}

/// Full analysis block for a forecast
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastAnalysis {
    pub summary: ForecastSummary,
    pub recommendations: ForecastRecommendations,
    pub daily: Vec<DailySummary>,
}

pub fn analyze(
    conditions: &[WeatherCondition],
    thresholds: &AdvisoryThresholds,
) -> AdvisoryResult<ForecastAnalysis> {
    let summary = summarize(conditions)?;
    let recommendations = recommend(conditions, &summary, thresholds);
    Ok(ForecastAnalysis {
        daily: daily_breakdown(conditions),
        summary,
        recommendations,
    })
}
