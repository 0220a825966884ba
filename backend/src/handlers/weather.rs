//! HTTP handlers for weather-derived insights

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::{CropType, DEFAULT_FORECAST_DAYS};

use crate::error::{AppError, AppResult};
use crate::services::weather::{
    CropCalendarReport, CurrentConditionsReport, ForecastReport, SoilConditionsReport,
};
use crate::services::WeatherService;
use crate::AppState;

pub(crate) fn weather_service(state: &AppState) -> WeatherService {
    WeatherService::new(state.weather_client.clone(), state.config.advisory.clone())
}

pub(crate) fn default_days() -> u32 {
    DEFAULT_FORECAST_DAYS
}

/// Query parameters for a single location
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// Query parameters for a forecast
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
    #[serde(default = "default_days")]
    pub days: u32,
}

#[derive(Debug, Deserialize)]
pub struct CropCalendarQuery {
    pub crop_type: CropType,
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// Current conditions with agricultural assessment
pub async fn current_conditions(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<LocationQuery>, AppError>,
) -> AppResult<Json<CurrentConditionsReport>> {
    let report = weather_service(&state)
        .current_conditions(query.latitude, query.longitude)
        .await?;
    Ok(Json(report))
}

/// Forecast with analysis
pub async fn forecast_analysis(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<ForecastQuery>, AppError>,
) -> AppResult<Json<ForecastReport>> {
    let report = weather_service(&state)
        .forecast_analysis(query.latitude, query.longitude, query.days)
        .await?;
    Ok(Json(report))
}

/// Soil readings with planting assessment
pub async fn soil_conditions(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<LocationQuery>, AppError>,
) -> AppResult<Json<SoilConditionsReport>> {
    let report = weather_service(&state)
        .soil_conditions(query.latitude, query.longitude)
        .await?;
    Ok(Json(report))
}

/// Crop calendar with a planting recommendation for the site
pub async fn crop_calendar(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<CropCalendarQuery>, AppError>,
) -> AppResult<Json<CropCalendarReport>> {
    let report = weather_service(&state)
        .crop_calendar(query.crop_type, query.latitude, query.longitude)
        .await?;
    Ok(Json(report))
}
