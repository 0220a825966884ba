//! Human-readable text resources

use axum::extract::{Path, Query, State};
use axum_extra::extract::WithRejection;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::CropType;

use super::weather::{default_days, weather_service};
use crate::error::{AppError, AppResult};
use crate::services::report;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CoordinatesPath {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CropCalendarPath {
    pub crop_type: CropType,
    pub latitude: Decimal,
    pub longitude: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    #[serde(default = "default_days")]
    pub days: u32,
}

pub async fn current_weather(
    State(state): State<AppState>,
    WithRejection(Path(path), _): WithRejection<Path<CoordinatesPath>, AppError>,
) -> AppResult<String> {
    let report = weather_service(&state)
        .current_conditions(path.latitude, path.longitude)
        .await?;
    Ok(report::render_current_weather(&report))
}

pub async fn forecast(
    State(state): State<AppState>,
    WithRejection(Path(path), _): WithRejection<Path<CoordinatesPath>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<DaysQuery>, AppError>,
) -> AppResult<String> {
    let report = weather_service(&state)
        .forecast_analysis(path.latitude, path.longitude, query.days)
        .await?;
    Ok(report::render_forecast(&report))
}

pub async fn crop_calendar(
    State(state): State<AppState>,
    WithRejection(Path(path), _): WithRejection<Path<CropCalendarPath>, AppError>,
) -> AppResult<String> {
    let report = weather_service(&state)
        .crop_calendar(path.crop_type, path.latitude, path.longitude)
        .await?;
    Ok(report::render_crop_calendar(&report))
}
