//! Domain models for the Agricultural Advisory Service

mod crop;
mod query;
mod schedule;
mod weather;

pub use crop::*;
pub use query::*;
pub use schedule::*;
pub use weather::*;
