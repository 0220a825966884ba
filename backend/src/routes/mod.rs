//! Route definitions for the Agricultural Advisory Service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/advisory", advisory_routes())
        .nest("/weather", weather_routes())
        .nest("/resources", resource_routes())
        .nest("/knowledge", knowledge_routes())
}

/// Advisory endpoints
fn advisory_routes() -> Router<AppState> {
    Router::new()
        .route("/crop-management", post(handlers::crop_management))
        .route("/soil-analysis", post(handlers::soil_analysis))
        .route("/pest-control", post(handlers::pest_control))
        .route("/irrigation-schedule", post(handlers::irrigation_schedule))
        .route("/harvest-timing", post(handlers::harvest_timing))
}

/// Weather-derived insights
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/current", get(handlers::current_conditions))
        .route("/forecast", get(handlers::forecast_analysis))
        .route("/soil", get(handlers::soil_conditions))
        .route("/crop-calendar", get(handlers::crop_calendar))
}

/// Crop knowledge base lookups
fn knowledge_routes() -> Router<AppState> {
    Router::new()
        .route("/disease-risks", get(handlers::knowledge::disease_risk))
        .route("/protection-measures", get(handlers::knowledge::protection))
        .route("/farming-techniques", get(handlers::knowledge::techniques))
}

/// Plain-text resources
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/weather/current/:latitude/:longitude",
            get(handlers::resources::current_weather),
        )
        .route(
            "/weather/forecast/:latitude/:longitude",
            get(handlers::resources::forecast),
        )
        .route(
            "/crop-calendar/:crop_type/:latitude/:longitude",
            get(handlers::resources::crop_calendar),
        )
}
