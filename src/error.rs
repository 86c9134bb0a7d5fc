// Application error types
use thiserror::Error;

use crate::filter::FilterError;
use crate::gateway::GatewayError;
use crate::session::SessionError;
use crate::validation::ValidationErrors;

/// Everything a screen or command can fail with. None of these are fatal:
/// the caller reports them and the session carries on.
#[derive(Debug, Error)]
pub enum AppError {
    // Pre-submit, no request was made
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    // Login rejected, session stays unauthenticated
    #[error("Login failed: {}", .0.message())]
    Authentication(GatewayError),

    // Protected view requested without a session
    #[error("Not logged in (redirecting to {0})")]
    NotAuthenticated(&'static str),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

impl AppError {
    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(errors) => errors.to_string(),
            AppError::Gateway(e) | AppError::Authentication(e) => e.message().to_string(),
            other => other.to_string(),
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Gateway(e) => e.error_code(),
            AppError::Authentication(_) => "AUTHENTICATION_FAILED",
            AppError::NotAuthenticated(_) => "NOT_AUTHENTICATED",
            AppError::Session(_) => "SESSION_ERROR",
            AppError::Filter(_) => "INVALID_LIST_STATE",
        }
    }

    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}
