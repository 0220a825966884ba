//! External API integrations

pub mod cache;
pub mod weather;

pub use cache::TtlCache;
pub use weather::{normalize_soil, SoilSnapshot, WeatherClient};
