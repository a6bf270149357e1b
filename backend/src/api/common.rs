//! Error handling utilities for API responses.
//!
//! Converts service-layer errors into HTTP responses. Every failure is
//! reported as a JSON object with a single `error` field:
//!
//! ```json
//! { "error": "Invalid username or password." }
//! ```
//!
//! Database and internal failures are logged in full and reported to the
//! caller with a generic message.

use crate::errors::ServiceError;
use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const INVALID_TOKEN: &str = "Token is invalid or expired.";
pub const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";
pub const INTERNAL_ERROR: &str = "Internal server error.";

/// Standard error body for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Builds an error response with the given status and message.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Converts ServiceError to the matching HTTP status and error body
pub fn service_error_to_http(error: ServiceError) -> ApiError {
    let (status, message) = match error {
        ServiceError::Validation { message } => (StatusCode::BAD_REQUEST, message),
        ServiceError::AlreadyExists { entity, .. } => (
            StatusCode::BAD_REQUEST,
            format!("{} already exists.", entity),
        ),
        ServiceError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string())
        }
        ServiceError::TokenInvalid { message } => {
            tracing::debug!("Token rejected: {}", message);
            (StatusCode::UNAUTHORIZED, INVALID_TOKEN.to_string())
        }
        ServiceError::TokenExpired => (StatusCode::UNAUTHORIZED, INVALID_TOKEN.to_string()),
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
        }
    };

    error_response(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped(error: ServiceError) -> (StatusCode, String) {
        let (status, Json(body)) = service_error_to_http(error);
        (status, body.error)
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            mapped(ServiceError::validation("Please provide all required fields.")),
            (
                StatusCode::BAD_REQUEST,
                "Please provide all required fields.".to_string()
            )
        );
        assert_eq!(
            mapped(ServiceError::already_exists("Username", "alice")),
            (StatusCode::BAD_REQUEST, "Username already exists.".to_string())
        );
        assert_eq!(
            mapped(ServiceError::InvalidCredentials),
            (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string())
        );
        assert_eq!(
            mapped(ServiceError::TokenExpired),
            (StatusCode::UNAUTHORIZED, INVALID_TOKEN.to_string())
        );
        assert_eq!(
            mapped(ServiceError::token_invalid("bad signature")),
            (StatusCode::UNAUTHORIZED, INVALID_TOKEN.to_string())
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let (status, message) = mapped(ServiceError::Database {
            source: anyhow::anyhow!("no such table: users"),
        });
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_ERROR);

        let (status, message) = mapped(ServiceError::internal_error("join error"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_ERROR);
    }

    #[test]
    fn test_error_body_shape() {
        let (_, Json(body)) = error_response(StatusCode::BAD_REQUEST, "nope");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "nope" }));
    }
}
