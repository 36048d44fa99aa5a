//! Step-Up Error Types
//!
//! This module provides step-up-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! One variant is not a failure at all: [`StepUpError::StepUpRequired`]
//! is the control-flow signal telling the caller to present the step-up
//! UI. Callers match on it specifically; it must never be handled as an
//! application error.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_objects::Nonce;

/// Step-up-specific result type alias
pub type StepUpResult<T> = Result<T, StepUpError>;

/// Step-up-specific error variants
#[derive(Debug, Error)]
pub enum StepUpError {
    /// Control-flow signal: a second factor must be verified before the
    /// operation proceeds. Carries the nonce the caller hands to the
    /// step-up UI for the later completing call.
    #[error("Second factor authentication required")]
    StepUpRequired { nonce: Nonce },

    /// Completion attempt rejected: missing, mismatched, or not-yet-verified
    /// challenge. Deliberately undifferentiated so a caller cannot probe
    /// which of the three it was.
    #[error("Invalid access")]
    InvalidAccess,

    /// User-facing validation failure raised by the external factor
    /// verification endpoint; carries a translation key for display
    #[error("Challenge rejected: {translation_key}")]
    BadChallenge {
        translation_key: String,
        status: u16,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored challenge could not be (de)serialized
    #[error("Challenge serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StepUpError {
    /// Build a [`StepUpError::BadChallenge`]
    pub fn bad_challenge(translation_key: impl Into<String>, status: u16) -> Self {
        StepUpError::BadChallenge {
            translation_key: translation_key.into(),
            status,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StepUpError::StepUpRequired { .. } => StatusCode::PRECONDITION_REQUIRED,
            StepUpError::InvalidAccess => StatusCode::UNAUTHORIZED,
            StepUpError::BadChallenge { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::UNPROCESSABLE_ENTITY)
            }
            StepUpError::Database(_)
            | StepUpError::Serialization(_)
            | StepUpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StepUpError::StepUpRequired { .. } => ErrorKind::PreconditionRequired,
            StepUpError::InvalidAccess => ErrorKind::Unauthorized,
            StepUpError::BadChallenge { .. } => ErrorKind::UnprocessableEntity,
            StepUpError::Database(_)
            | StepUpError::Serialization(_)
            | StepUpError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            StepUpError::Database(e) => {
                tracing::error!(error = %e, "Step-up database error");
            }
            StepUpError::Serialization(e) => {
                tracing::error!(error = %e, "Step-up serialization error");
            }
            StepUpError::Internal(msg) => {
                tracing::error!(message = %msg, "Step-up internal error");
            }
            StepUpError::InvalidAccess => {
                tracing::warn!("Invalid step-up completion attempt");
            }
            // The signal and user-facing validation failures are expected traffic
            _ => {
                tracing::debug!(error = %self, "Step-up flow event");
            }
        }
    }
}

impl From<StepUpError> for AppError {
    fn from(err: StepUpError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for StepUpError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        match self {
            // The verification endpoint shows the reason to the user
            StepUpError::BadChallenge {
                translation_key, ..
            } => {
                let body = serde_json::json!({ "translationKey": translation_key });
                (status, Json(body)).into_response()
            }
            // Empty body everywhere else (don't leak details)
            _ => (status, ()).into_response(),
        }
    }
}
