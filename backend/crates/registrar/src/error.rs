//! Registrar Error Types
//!
//! This module provides the registrar error taxonomy and its mapping
//! onto the unified `kernel::error::AppError` system. Each failure kind
//! has exactly one handling policy; nothing is stringified and passed
//! through.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Registrar-specific result type alias
pub type RegistrarResult<T> = Result<T, RegistrarError>;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl ToString) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Run one field validation, recording the violation on failure.
///
/// Returns `Some(value)` on success so callers can keep validating the
/// remaining fields and report every violation at once.
pub fn collect_field<T, E: std::fmt::Display>(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    result: Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            violations.push(FieldViolation::new(field, e));
            None
        }
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Registrar error variants
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// One or more inbound fields failed validation
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// Matricule or email already registered.
    /// The conflicting field is deliberately not identified, to avoid
    /// account enumeration.
    #[error("Matricule or email already in use")]
    DuplicateIdentity,

    /// Login failed. Unknown identifier and wrong password produce
    /// this same variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session cookie missing, unsigned, or tampered with
    #[error("Authentication required")]
    Unauthenticated,

    /// Backing store unreachable after bounded retries
    #[error("Service temporarily unavailable")]
    StoreUnavailable,

    /// Reserved; not currently surfaced by any use case
    #[error("Not found")]
    NotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RegistrarError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistrarError::Validation(_)
            | RegistrarError::DuplicateIdentity
            | RegistrarError::InvalidCredentials => StatusCode::BAD_REQUEST,
            RegistrarError::Unauthenticated => StatusCode::SEE_OTHER,
            RegistrarError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            RegistrarError::NotFound => StatusCode::NOT_FOUND,
            RegistrarError::Database(_) | RegistrarError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistrarError::Validation(_)
            | RegistrarError::DuplicateIdentity
            | RegistrarError::InvalidCredentials => ErrorKind::BadRequest,
            RegistrarError::Unauthenticated => ErrorKind::Unauthorized,
            RegistrarError::StoreUnavailable => ErrorKind::ServiceUnavailable,
            RegistrarError::NotFound => ErrorKind::NotFound,
            RegistrarError::Database(_) | RegistrarError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Store and internal errors get a generic message; the detail
    /// stays in the server log only.
    pub fn to_app_error(&self) -> AppError {
        match self {
            RegistrarError::Database(_) | RegistrarError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            RegistrarError::StoreUnavailable => {
                AppError::new(self.kind(), "Service temporarily unavailable")
                    .with_action("Please try again later")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            RegistrarError::Database(e) => {
                tracing::error!(error = %e, "Registrar database error");
            }
            RegistrarError::Internal(msg) => {
                tracing::error!(message = %msg, "Registrar internal error");
            }
            RegistrarError::StoreUnavailable => {
                tracing::error!("Store unavailable after retries");
            }
            RegistrarError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            RegistrarError::DuplicateIdentity => {
                tracing::info!("Registration rejected: identity already in use");
            }
            _ => {
                tracing::debug!(error = %self, "Registrar error");
            }
        }
    }
}

impl IntoResponse for RegistrarError {
    fn into_response(self) -> Response {
        self.log();
        // Missing/invalid sessions bounce back to the login page; all
        // other errors answer in place.
        match self {
            RegistrarError::Unauthenticated => Redirect::to("/login").into_response(),
            other => other.to_app_error().into_response(),
        }
    }
}
