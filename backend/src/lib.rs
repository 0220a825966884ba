//! Agricultural Advisory Service - Backend
//!
//! Crop planning, soil analysis, pest control, irrigation scheduling and
//! harvest timing advice, backed by weather and soil data from an
//! upstream weather API.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use external::WeatherClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub weather_client: WeatherClient,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let weather_client = WeatherClient::new(&config.weather)?;
        Ok(Self {
            config: Arc::new(config),
            weather_client,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Agricultural Advisory Service API v1.0"
}
