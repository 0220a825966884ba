//! Infestation scale and pest control advice

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use super::knowledge::{disease_risks, protection_measures, DiseaseRisk, ProtectionMeasures};
use crate::models::{GrowthStage, PestControlQuery};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
        }
    }
}

/// Description of an infestation level on the 1-5 scale
pub fn infestation_description(level: u8) -> &'static str {
    match level {
        0 | 1 => "Minor presence - Monitoring required",
        2 => "Light infestation - Consider treatment",
        3 => "Moderate infestation - Treatment recommended",
        4 => "Severe infestation - Immediate treatment required",
        _ => "Critical infestation - Emergency measures needed",
    }
}

pub fn treatment_urgency(level: u8) -> Urgency {
    match level {
        0..=2 => Urgency::Low,
        3 => Urgency::Medium,
        _ => Urgency::High,
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PestPressure {
    Elevated,
    Moderate,
    Low,
}

impl fmt::Display for PestPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PestPressure::Elevated => {
                write!(f, "Elevated - warm, humid conditions favor rapid pest development")
            }
            PestPressure::Moderate => {
                write!(f, "Moderate - warm, dry conditions may increase pest activity")
            }
            PestPressure::Low => write!(f, "Low - weather is not favoring pest development"),
        }
    }
}

/// Weather-driven pest pressure from air temperature (°C) and humidity (%)
pub fn pest_pressure(temperature: Decimal, humidity: Decimal) -> PestPressure {
    if temperature >= Decimal::from(20)
        && temperature <= Decimal::from(30)
        && humidity > Decimal::from(70)
    {
        PestPressure::Elevated
    } else if temperature > Decimal::from(25) && humidity < Decimal::from(50) {
        PestPressure::Moderate
    } else {
        PestPressure::Low
    }
}

/// Treatments after which the mode of action should be rotated
const RESISTANCE_TREATMENT_COUNT: usize = 2;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PestControlAdvice {
    pub pest_type: String,
    pub infestation_level: u8,
    pub description: &'static str,
    pub urgency: Urgency,
    pub pest_pressure: PestPressure,
    pub pest_pressure_message: String,
    pub recommendations: Vec<String>,
    /// Crop diseases favoured by the reported weather
    pub disease_risks: Vec<DiseaseRisk>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_measures: Option<ProtectionMeasures>,
}

/// Advice for an already validated pest control query
pub fn pest_control_advice(query: &PestControlQuery) -> PestControlAdvice {
    let description = infestation_description(query.infestation_level);
    let urgency = treatment_urgency(query.infestation_level);
    let pressure = pest_pressure(query.temperature, query.humidity);

    let mut recommendations = vec![
        format!("Current infestation level: {}", description),
        "Consider integrated pest management approach".to_string(),
        format!("Treatment urgency: {}", urgency.to_string().to_uppercase()),
    ];
    if query.previous_treatments.len() >= RESISTANCE_TREATMENT_COUNT {
        recommendations
            .push("Rotate to a different mode of action to limit resistance build-up".to_string());
    }
    if query.crop_stage == GrowthStage::Flowering {
        recommendations
            .push("Avoid broad-spectrum insecticides during flowering to protect pollinators".to_string());
    }
    if pressure == PestPressure::Elevated {
        recommendations.push("Scout fields every 2-3 days while conditions persist".to_string());
    }

    let risks = query
        .crop_type
        .map(|crop| disease_risks(crop, query.temperature, query.humidity))
        .unwrap_or_default();
    for risk in &risks {
        if let Some(first) = risk.management.first() {
            recommendations.push(format!("High {} risk: {}", risk.disease.replace('_', " "), first));
        }
    }

    PestControlAdvice {
        pest_type: query.pest_type.trim().to_string(),
        infestation_level: query.infestation_level,
        description,
        urgency,
        pest_pressure: pressure,
        pest_pressure_message: pressure.to_string(),
        recommendations,
        disease_risks: risks,
        protection_measures: query
            .crop_type
            .map(|crop| protection_measures(crop, query.crop_stage)),
    }
}
