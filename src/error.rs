//! Error types for the Health First server

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
///
/// Every service-level operation returns one of these kinds; nothing
/// unwinds across the handler boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Account not verified: {0}")]
    AccountNotVerified(String),

    #[error("Account locked: {0}")]
    AccountLocked(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed")]
    ValidationFields(HashMap<String, Vec<String>>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Slot conflict: {0}")]
    SlotConflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimeZone(String),

    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Invalid recurrence pattern: {0}")]
    InvalidRecurrencePattern(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable error code for the response body
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Authentication(_) => "INVALID_CREDENTIALS",
            AppError::Authorization(_) => "FORBIDDEN",
            AppError::AccountNotVerified(_) => "ACCOUNT_NOT_VERIFIED",
            AppError::AccountLocked(_) => "ACCOUNT_LOCKED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) | AppError::ValidationFields(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "INVALID_REQUEST",
            AppError::SlotConflict(_) => "SLOT_CONFLICT",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::InvalidTimeZone(_) => "INVALID_TIMEZONE",
            AppError::InvalidTimeFormat(_) => "INVALID_TIME_FORMAT",
            AppError::InvalidRecurrencePattern(_) => "INVALID_RECURRENCE_PATTERN",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Invalid value for {}", field))
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        AppError::ValidationFields(fields)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message, errors) = match self {
            AppError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::Authorization(msg) => (StatusCode::FORBIDDEN, msg, None),
            AppError::AccountNotVerified(msg) => (StatusCode::FORBIDDEN, msg, None),
            AppError::AccountLocked(msg) => (StatusCode::LOCKED, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            AppError::ValidationFields(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed".to_string(),
                Some(fields),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::SlotConflict(msg) => (StatusCode::CONFLICT, msg, None),
            AppError::InvalidState(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            AppError::InvalidTimeZone(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::InvalidTimeFormat(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::InvalidRecurrencePattern(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Operation failed. Please try again.".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            error: code.to_string(),
            message,
            errors,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
