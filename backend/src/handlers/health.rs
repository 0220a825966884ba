//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use super::weather::weather_service;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub weather_api: String,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    // Probe the weather API; failures only change the reported status
    let weather_status = if weather_service(&state).health().await {
        "connected".to_string()
    } else {
        "disconnected".to_string()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        weather_api: weather_status,
    })
}
