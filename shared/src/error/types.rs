//! Error type and envelope rendering

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::codes::ErrorCode;

/// Application error with structured code and optional details
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, ...)
    pub details: Option<Value>,
}

/// Result alias used throughout the API layer
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new error with the default message for the code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.default_message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured details to this error
    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    // ==================== Convenience constructors ====================

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::BadRequest, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Unauthorized, msg)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Forbidden, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NotFound, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Conflict, msg)
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Unprocessable, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::Internal, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DbError, msg)
    }

    /// Uniform message for bad username/password — prevents enumeration
    pub fn invalid_credentials() -> Self {
        Self::with_message(ErrorCode::Unauthorized, "Invalid credentials")
    }
}

/// The `error` object inside the envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();

        // 5xx details stay in the log, never in the response body
        let (message, details) = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = %self.code, error = %self.message, "internal error");
            (self.code.default_message().to_string(), None)
        } else {
            (self.message, self.details)
        };

        let body = Json(ErrorEnvelope {
            error: ErrorBody {
                code: self.code,
                message,
                details,
            },
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape() {
        let err = AppError::conflict("Order already taken");
        let body = ErrorEnvelope {
            error: ErrorBody {
                code: err.code,
                message: err.message.clone(),
                details: None,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"]["code"], "CONFLICT");
        assert_eq!(json["error"]["message"], "Order already taken");
        assert!(json["error"].get("details").is_none());
    }

    #[test]
    fn details_round_trip() {
        let err = AppError::unprocessable("Unknown storage code(s)")
            .with_details(serde_json::json!({ "missing": ["Z99"] }));
        assert_eq!(err.details.unwrap()["missing"][0], "Z99");
    }
}
