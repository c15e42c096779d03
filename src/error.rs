//! Application error type and its HTTP mapping.
//!
//! Every fallible layer returns [`AppError`]. Handlers hand it straight to
//! axum, which renders `{ "success": false, "error": "<message>" }` with the
//! matching status code. Internal failures never expose their cause to the
//! client; it is logged instead.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Message returned to clients for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Failure body shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing client input. Never retried.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The requested record does not exist. A normal negative result.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A uniqueness constraint was hit. The allocator retries these
    /// internally when the constraint is on the short code.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// A credential was supplied but could not be verified, or one is required.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Every generated short code collided.
    #[error("Failed to allocate a unique short code after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    /// Store unreachable, timed out, or otherwise failed.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns true if this is a uniqueness conflict on the named constraint.
    pub fn is_conflict_on(&self, constraint: &str) -> bool {
        match self {
            AppError::Conflict { details, .. } => {
                details.get("constraint").and_then(Value::as_str) == Some(constraint)
            }
            _ => false,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::CodeSpaceExhausted { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to a client.
    pub fn public_message(&self) -> String {
        match self {
            AppError::CodeSpaceExhausted { .. } | AppError::Internal { .. } => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Request failed");
            }
            AppError::CodeSpaceExhausted { attempts } => {
                tracing::error!(attempts, "Short code space exhausted");
            }
            _ => {}
        }

        let body = ErrorBody {
            success: false,
            error: self.public_message(),
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message, json!({ "fields": errors.to_string() }))
    }
}
