//! Error codes and their HTTP status mapping

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Closed set of API error codes
///
/// Serialized as the SCREAMING_SNAKE wire strings clients already match
/// on (`BAD_REQUEST`, `CONFLICT`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed input (400)
    BadRequest,
    /// Missing or invalid credentials/token (401)
    Unauthorized,
    /// Authenticated but not allowed (403)
    Forbidden,
    /// Referenced entity absent (404)
    NotFound,
    /// Lost a race or violated a state precondition (409)
    Conflict,
    /// Semantically invalid reference, e.g. unknown storage code (422)
    Unprocessable,
    /// Server-side configuration problem (500)
    ServerConfig,
    /// Database failure (500)
    DbError,
    /// Unexpected failure (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status carrying this code's category
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ServerConfig | Self::DbError | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Default message for this code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad request",
            Self::Unauthorized => "Unauthorized",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not found",
            Self::Conflict => "Conflict",
            Self::Unprocessable => "Unprocessable entity",
            Self::ServerConfig => "Server configuration error",
            Self::DbError => "Database error",
            Self::Internal => "Internal server error",
        }
    }

    /// Wire string of this code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Unprocessable => "UNPROCESSABLE",
            Self::ServerConfig => "SERVER_CONFIG",
            Self::DbError => "DB_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_string_matches_serde() {
        for code in [
            ErrorCode::BadRequest,
            ErrorCode::Unauthorized,
            ErrorCode::Forbidden,
            ErrorCode::NotFound,
            ErrorCode::Conflict,
            ErrorCode::Unprocessable,
            ErrorCode::ServerConfig,
            ErrorCode::DbError,
            ErrorCode::Internal,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn status_categories() {
        assert_eq!(ErrorCode::Conflict.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::Unprocessable.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::DbError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
