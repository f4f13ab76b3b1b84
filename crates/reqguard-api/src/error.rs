//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`SchemaError`] kinds from `reqguard-core` to HTTP status codes and
//! returns JSON error bodies with an error code, a message, and, for
//! constraint failures, the list of offending fields.
//!
//! | Kind | Status |
//! |---|---|
//! | body read, malformed JSON, unknown field, decode | 400 |
//! | body over the configured limit | 413 |
//! | type mismatch, constraint violation | 422 |
//! | unregistered rule, serialization | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reqguard_core::{SchemaError, Violations};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "BAD_REQUEST", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Offending fields, present only for constraint violations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be read or parsed, or named unknown fields (400).
    #[error("{0}")]
    BadRequest(String),

    /// Request body exceeded the configured limit (413).
    #[error("{0}")]
    PayloadTooLarge(String),

    /// A field had the wrong type (422).
    #[error("{0}")]
    Validation(String),

    /// Declared constraints failed (422).
    #[error("validation failed: {0}")]
    ConstraintViolation(Violations),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            Self::Validation(_) | Self::ConstraintViolation(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        let Self::ConstraintViolation(violations) = self else {
            return None;
        };
        let fields = violations
            .violations()
            .iter()
            .map(|v| {
                serde_json::json!({
                    "field": v.field,
                    "path": v.path,
                    "constraint": v.constraint.to_string(),
                    "message": v.to_string(),
                })
            })
            .collect();
        Some(serde_json::Value::Array(fields))
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
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: self.details(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert strict-decoding and validation failures to API errors.
impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::ConstraintViolation(violations) => Self::ConstraintViolation(violations),
            SchemaError::TypeMismatch { .. } => Self::Validation(err.to_string()),
            SchemaError::BodyRead(_)
            | SchemaError::MalformedPayload(_)
            | SchemaError::UnknownField(_)
            | SchemaError::Decode(_) => Self::BadRequest(err.to_string()),
            SchemaError::UnregisteredRule(_) | SchemaError::Serialization(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}
