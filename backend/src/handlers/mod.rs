//! HTTP request handlers

pub mod advisory;
pub mod health;
pub mod knowledge;
pub mod resources;
pub mod weather;

pub use advisory::{crop_management, harvest_timing, irrigation_schedule, pest_control, soil_analysis};
pub use health::health_check;
pub use weather::{crop_calendar, current_conditions, forecast_analysis, soil_conditions};
