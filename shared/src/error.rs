//! Error types for the advisory domain

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated constraint on a named field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All constraint violations found while validating one input
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection holding exactly one violation
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record the outcome of a field check
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    /// Turn a single field check into a result
    pub fn from_check(field: &str, result: Result<(), String>) -> Result<(), ValidationErrors> {
        let mut errors = Self::new();
        errors.check(field, result);
        errors.into_result()
    }

    /// Merge another collection, prefixing its field names
    pub fn merge_prefixed(&mut self, prefix: &str, other: ValidationErrors) {
        for error in other.errors {
            self.add(format!("{}.{}", prefix, error.field), error.message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether any violation was recorded against `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors raised by the pure advisory engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdvisoryError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),
}

pub type AdvisoryResult<T> = Result<T, AdvisoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_violation() {
        let mut errors = ValidationErrors::new();
        errors.check("ph_level", Err("must be between 0 and 14".to_string()));
        errors.check("nitrogen", Ok(()));
        errors.check("potassium", Err("must be at most 800".to_string()));

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("ph_level"));
        assert!(errors.has_field("potassium"));
        assert!(!errors.has_field("nitrogen"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());
        assert!(ValidationErrors::single("days", "too many").into_result().is_err());
    }

    #[test]
    fn test_merge_prefixed() {
        let mut outer = ValidationErrors::new();
        outer.merge_prefixed("location", ValidationErrors::single("latitude", "out of range"));
        assert!(outer.has_field("location.latitude"));
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = ValidationErrors::single("a", "bad");
        errors.add("b", "worse");
        assert_eq!(errors.to_string(), "a: bad; b: worse");
    }
}
