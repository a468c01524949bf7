//! Application error type and its HTTP representation.
//!
//! Every layer (repositories, services, handlers) returns [`AppError`]. The
//! [`IntoResponse`] impl is the single request boundary where failures become
//! JSON bodies of the form:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "Link not found", "details": { "code": "abc1234" } } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Message returned to clients for every 5xx that is not a data-integrity fault.
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Client-facing error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced by the link registry, the redirect resolver and the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input: bad URL, bad short code, unreadable JSON body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Short code already taken, either found by the pre-check or reported by
    /// the storage unique constraint.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Every random candidate collided with an existing code.
    #[error("Failed to generate a unique short code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// The stored target of an existing link is not redirect-safe.
    #[error("Invalid target URL configuration for code {code}")]
    InvalidTarget { code: String, target_url: String },

    /// Any storage fault, including pool timeouts. `reason` is logged, never returned.
    #[error("Storage unavailable: {reason}")]
    StorageUnavailable { reason: String },
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

    pub fn storage(reason: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            reason: reason.into(),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::AllocationExhausted { .. }
            | AppError::InvalidTarget { .. }
            | AppError::StorageUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing payload without consuming the error.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Conflict { message, details } => ErrorInfo {
                code: "conflict",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::AllocationExhausted { attempts } => ErrorInfo {
                code: "allocation_exhausted",
                message: "Failed to generate a unique short code. Please try again.".to_string(),
                details: json!({ "attempts": attempts }),
            },
            AppError::InvalidTarget { code, target_url } => ErrorInfo {
                code: "invalid_target",
                message: "Invalid target URL configuration".to_string(),
                details: json!({
                    "code": code,
                    "reason": format!(
                        "Target URL must start with http:// or https://. Got: \"{target_url}\""
                    ),
                }),
            },
            AppError::StorageUnavailable { .. } => ErrorInfo {
                code: "storage_unavailable",
                message: INTERNAL_MESSAGE.to_string(),
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Short code already exists. Please choose a different code.",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::storage(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors.field_errors();
        let message = if fields.contains_key("url") {
            "Invalid URL. Please provide a valid URL."
        } else if fields.contains_key("code") {
            "Invalid short code. Code must be 6-8 alphanumeric characters."
        } else {
            "Request validation failed"
        };

        AppError::bad_request(message, json!(errors))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
