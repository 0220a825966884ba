//! Shared types and models for the Agricultural Advisory Service
//!
//! This crate contains the domain model, the advisory rule engine and the
//! endpoint query validation shared between the backend and the WASM bindings.

pub mod advisory;
pub mod error;
pub mod models;
pub mod types;
pub mod validation;

pub use error::*;
pub use models::*;
pub use types::*;
pub use validation::*;
