//! Error handling for the Agricultural Advisory Service
//!
//! Every failure reaching a handler boundary is rendered as
//! `{ "error": { "code", "message", "fields"? } }`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{AdvisoryError, FieldError, ValidationErrors};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Upstream returned a non-success status or the request never completed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Upstream answered but the body did not have the expected shape
    #[error("Mapping error: {0}")]
    Mapping(String),

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl AppError {
    /// Validation failure on a single field
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation(ValidationErrors::single(field, message))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::Mapping(_) => StatusCode::BAD_GATEWAY,
            AppError::EmptyInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Mapping(_) => "MAPPING_ERROR",
            AppError::EmptyInput(_) => "EMPTY_INPUT",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_detail = match &self {
            AppError::Validation(errors) => ErrorDetail {
                code: self.code().to_string(),
                message: "Request failed validation".to_string(),
                fields: Some(errors.errors.clone()),
            },
            AppError::Upstream(_) => ErrorDetail {
                code: self.code().to_string(),
                message: "Weather service request failed".to_string(),
                fields: None,
            },
            AppError::Mapping(_) => ErrorDetail {
                code: self.code().to_string(),
                message: "Weather service returned an unexpected response".to_string(),
                fields: None,
            },
            AppError::EmptyInput(what) => ErrorDetail {
                code: self.code().to_string(),
                message: format!("No {} available", what),
                fields: None,
            },
            AppError::Configuration(_) | AppError::Internal(_) => ErrorDetail {
                code: self.code().to_string(),
                message: "An internal server error occurred".to_string(),
                fields: None,
            },
        };

        // Log the error for debugging
        match &self {
            AppError::Validation(errors) => tracing::warn!("Validation failed: {}", errors),
            AppError::Mapping(_) => tracing::error!(kind = "mapping", "Error: {:?}", self),
            _ => tracing::error!("Error: {:?}", self),
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<AdvisoryError> for AppError {
    fn from(err: AdvisoryError) -> Self {
        match err {
            AdvisoryError::Validation(errors) => AppError::Validation(errors),
            AdvisoryError::EmptyInput(what) => AppError::EmptyInput(what),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid("body", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid("query", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::invalid("path", rejection.body_text())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
