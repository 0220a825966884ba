//! HTTP handlers for the advisory endpoints

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use chrono::Utc;

use shared::advisory::pest::PestControlAdvice;
use shared::advisory::soil::SoilAnalysisReport;
use shared::{
    CropManagementQuery, HarvestTimingQuery, IrrigationScheduleQuery, PestControlQuery,
    SoilAnalysisQuery,
};

use crate::error::{AppError, AppResult};
use crate::services::advisory::{
    CropManagementPlan, HarvestTimingPlan, IrrigationSchedule,
};
use crate::services::AdvisoryService;
use crate::AppState;

fn advisory_service(state: &AppState) -> AdvisoryService {
    AdvisoryService::new(state.config.advisory.clone(), state.weather_client.clone())
}

/// Crop management plan
pub async fn crop_management(
    State(state): State<AppState>,
    WithRejection(Json(query), _): WithRejection<Json<CropManagementQuery>, AppError>,
) -> AppResult<Json<CropManagementPlan>> {
    let plan = advisory_service(&state).crop_management(&query, Utc::now())?;
    Ok(Json(plan))
}

/// Soil test interpretation
pub async fn soil_analysis(
    State(state): State<AppState>,
    WithRejection(Json(query), _): WithRejection<Json<SoilAnalysisQuery>, AppError>,
) -> AppResult<Json<SoilAnalysisReport>> {
    let report = advisory_service(&state).soil_analysis(&query)?;
    Ok(Json(report))
}

/// Pest control advice
pub async fn pest_control(
    State(state): State<AppState>,
    WithRejection(Json(query), _): WithRejection<Json<PestControlQuery>, AppError>,
) -> AppResult<Json<PestControlAdvice>> {
    let advice = advisory_service(&state).pest_control(&query)?;
    Ok(Json(advice))
}

/// Forecast-driven irrigation schedule
pub async fn irrigation_schedule(
    State(state): State<AppState>,
    WithRejection(Json(query), _): WithRejection<Json<IrrigationScheduleQuery>, AppError>,
) -> AppResult<Json<IrrigationSchedule>> {
    let schedule = advisory_service(&state).irrigation_schedule(&query).await?;
    Ok(Json(schedule))
}

/// Harvest readiness and dry windows
pub async fn harvest_timing(
    State(state): State<AppState>,
    WithRejection(Json(query), _): WithRejection<Json<HarvestTimingQuery>, AppError>,
) -> AppResult<Json<HarvestTimingPlan>> {
    let plan = advisory_service(&state)
        .harvest_timing(&query, Utc::now().date_naive())
        .await?;
    Ok(Json(plan))
}
