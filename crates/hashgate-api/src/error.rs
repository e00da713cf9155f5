//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps store resolution errors onto HTTP status codes with JSON error
//! bodies. Internal error details (paths, I/O causes) are logged, never
//! returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use hashgate_store::ResolveError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// The error payload.
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "UNAUTHORIZED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context, present only where it cannot leak internals
    /// (e.g., the authorization decision behind a 401).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Read not authorized (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500). Message is logged but not returned
    /// to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Map store resolution failures onto transport-level errors.
///
/// Missing references are the recoverable not-found case; a malformed
/// reference or a non-absence I/O failure is corrupted store state and
/// surfaces as a 500 with the detail kept server-side.
impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match &err {
            ResolveError::RefNotFound { .. } => Self::NotFound(err.to_string()),
            ResolveError::BadRef { .. } | ResolveError::Io { .. } => {
                Self::Internal(err.to_string())
            }
        }
    }
}
