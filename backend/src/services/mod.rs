//! Business logic services for the Agricultural Advisory Service

pub mod advisory;
pub mod report;
pub mod weather;

pub use advisory::AdvisoryService;
pub use weather::WeatherService;
