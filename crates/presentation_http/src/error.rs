//! API error handling
//!
//! Provides sanitized error responses that don't leak implementation details.
//! In production mode, internal errors return generic messages without details.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// User-facing text for numbers the provider does not know
pub const INVALID_NUMBER_MESSAGE: &str = "Invalid contact number";

/// Configure whether internal error details should be exposed in responses.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// Sanitize an error message to remove potentially sensitive information
///
/// Messages mentioning file paths, connection strings, gateway URLs or
/// transport failures are replaced by a generic text.
fn sanitize_error_message(msg: &str) -> String {
    if should_expose_details() {
        return msg.to_string();
    }

    let sensitive_patterns = [
        // File paths
        "/home/",
        "/Users/",
        "/var/",
        "/etc/",
        "\\Users\\",
        "C:\\",
        // Database patterns
        "sqlite:",
        // Stack trace indicators
        "stack backtrace",
        "panicked at",
        ".rs:",
        // Connection details
        "http://",
        "https://",
        "connection refused",
        "ECONNREFUSED",
        "timeout",
    ];

    let msg_lower = msg.to_lowercase();
    for pattern in &sensitive_patterns {
        if msg_lower.contains(&pattern.to_lowercase()) {
            return "An error occurred processing your request".to_string();
        }
    }

    msg.to_string()
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid contact number")]
    InvalidNumber,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("No default WhatsApp session configured")]
    NoDefaultSession,

    #[error("Session not connected: {0}")]
    SessionNotConnected(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "bad_request",
                sanitize_error_message(msg),
                None,
            ),
            Self::InvalidNumber => (
                StatusCode::BAD_REQUEST,
                "invalid_number",
                INVALID_NUMBER_MESSAGE.to_string(),
                None,
            ),
            Self::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "not_found",
                sanitize_error_message(msg),
                None,
            ),
            Self::Conflict(msg) => (
                StatusCode::CONFLICT,
                "conflict",
                sanitize_error_message(msg),
                None,
            ),
            Self::NoDefaultSession => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "no_default_session",
                self.to_string(),
                None,
            ),
            Self::SessionNotConnected(session) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "session_not_connected",
                format!("WhatsApp session {session} is not connected"),
                None,
            ),
            Self::ServiceUnavailable(msg) => {
                // Gateway errors might leak backend details
                let sanitized = if should_expose_details() {
                    msg.clone()
                } else {
                    "Service temporarily unavailable".to_string()
                };
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service_unavailable",
                    sanitized,
                    None,
                )
            },
            Self::Internal(msg) => {
                // Internal errors should never leak details in production
                let details = if should_expose_details() {
                    Some(msg.clone())
                } else {
                    None
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    details,
                )
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::NoDefaultSession => Self::NoDefaultSession,
            ApplicationError::NotConnected(id) => Self::SessionNotConnected(id.to_string()),
            ApplicationError::InvalidNumber(_) => Self::InvalidNumber,
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::InvalidOperation(msg) => Self::Conflict(msg),
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::SessionId;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn api_error_bad_request_message() {
        let err = ApiError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn api_error_invalid_number_message() {
        assert_eq!(ApiError::InvalidNumber.to_string(), "Invalid contact number");
    }

    #[test]
    fn error_response_serialization() {
        let resp = ErrorResponse {
            error: "Bad request".to_string(),
            code: "bad_request".to_string(),
            details: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("code"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn application_error_domain_converts_to_bad_request() {
        let source = ApplicationError::Domain(domain::DomainError::InvalidPhoneNumber(
            "abc".to_string(),
        ));
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::BadRequest(_)));
    }

    #[test]
    fn application_error_invalid_number_converts() {
        let source = ApplicationError::InvalidNumber("000".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::InvalidNumber));
    }

    #[test]
    fn application_error_no_default_session_converts() {
        let result: ApiError = ApplicationError::NoDefaultSession.into();
        assert!(matches!(result, ApiError::NoDefaultSession));
    }

    #[test]
    fn application_error_not_connected_converts() {
        let result: ApiError = ApplicationError::NotConnected(SessionId::new(3)).into();
        let ApiError::SessionNotConnected(id) = result else {
            unreachable!("Expected SessionNotConnected");
        };
        assert_eq!(id, "3");
    }

    #[test]
    fn application_error_external_service_converts() {
        let source = ApplicationError::ExternalService("gateway down".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::ServiceUnavailable(_)));
    }

    #[test]
    fn application_error_invalid_operation_converts_to_conflict() {
        let source = ApplicationError::InvalidOperation("duplicate".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::Conflict(_)));
    }

    #[test]
    fn application_error_configuration_converts_to_internal() {
        let source = ApplicationError::Configuration("bad config".to_string());
        let result: ApiError = source.into();
        assert!(matches!(result, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn invalid_number_response_keeps_user_text() {
        let response = ApiError::InvalidNumber.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid contact number");
        assert_eq!(body["code"], "invalid_number");
    }

    #[tokio::test]
    async fn no_default_session_response() {
        let response = ApiError::NoDefaultSession.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "no_default_session");
    }

    #[tokio::test]
    async fn not_connected_response() {
        let response = ApiError::SessionNotConnected("4".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["code"], "session_not_connected");
        assert!(body["error"].as_str().unwrap().contains('4'));
    }

    #[test]
    fn into_response_statuses() {
        assert_eq!(
            ApiError::NotFound("x".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".to_string()).into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::ServiceUnavailable("x".to_string())
                .into_response()
                .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Internal("x".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    // Error sanitization tests

    #[test]
    fn sanitize_removes_sensitive_details_in_production() {
        set_expose_internal_errors(false);
        assert_eq!(
            sanitize_error_message("Error loading config from /home/user/app.toml"),
            "An error occurred processing your request"
        );
        assert_eq!(
            sanitize_error_message("request to http://gateway:8080/v1/1 failed"),
            "An error occurred processing your request"
        );
        assert_eq!(
            sanitize_error_message("A session named 'support' already exists"),
            "A session named 'support' already exists"
        );
        set_expose_internal_errors(true);
    }

    #[test]
    fn sanitize_exposes_details_in_development() {
        set_expose_internal_errors(true);
        let msg = "Error at /home/user/.config/app.toml line 42";
        assert_eq!(sanitize_error_message(msg), msg);
    }
}
