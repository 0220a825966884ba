//! HTTP handlers for the crop knowledge base

use axum::{extract::Query, Json};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::advisory::knowledge::{
    disease_risks, farming_techniques, protection_measures, DiseaseRisk, FarmingTechniques,
    ProtectionMeasures,
};
use shared::{validate_percentage, ClimateZone, CropType, GrowthStage, ValidationErrors};

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct DiseaseRiskQuery {
    pub crop_type: CropType,
    pub temperature: Decimal,
    pub humidity: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DiseaseRiskReport {
    pub crop_type: CropType,
    pub temperature: Decimal,
    pub humidity: Decimal,
    pub risks: Vec<DiseaseRisk>,
}

#[derive(Debug, Deserialize)]
pub struct ProtectionQuery {
    pub crop_type: CropType,
    pub growth_stage: GrowthStage,
}

#[derive(Debug, Deserialize)]
pub struct TechniquesQuery {
    pub crop_type: CropType,
    pub climate_zone: ClimateZone,
}

/// Diseases favoured by the given weather
pub async fn disease_risk(
    WithRejection(Query(query), _): WithRejection<Query<DiseaseRiskQuery>, AppError>,
) -> AppResult<Json<DiseaseRiskReport>> {
    ValidationErrors::from_check("humidity", validate_percentage(query.humidity))?;
    Ok(Json(DiseaseRiskReport {
        crop_type: query.crop_type,
        temperature: query.temperature,
        humidity: query.humidity,
        risks: disease_risks(query.crop_type, query.temperature, query.humidity),
    }))
}

pub async fn protection(
    WithRejection(Query(query), _): WithRejection<Query<ProtectionQuery>, AppError>,
) -> Json<ProtectionMeasures> {
    Json(protection_measures(query.crop_type, query.growth_stage))
}

pub async fn techniques(
    WithRejection(Query(query), _): WithRejection<Query<TechniquesQuery>, AppError>,
) -> Json<FarmingTechniques> {
    Json(farming_techniques(query.crop_type, query.climate_zone))
}
