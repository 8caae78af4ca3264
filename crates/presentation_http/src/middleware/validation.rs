//! JSON bodies checked against `validator` rules
//!
//! Rejections use the same `{error, code, details}` body as `ApiError`:
//! `bad_request` when the body cannot be parsed, `invalid_fields` when it
//! parses but breaks a field rule.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

/// Rejection produced by [`ValidatedJson`]
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Not JSON, wrong content type, or the wrong shape
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    /// One `field: reason` entry per broken rule, sorted
    #[error("Invalid fields: {}", .0.join("; "))]
    InvalidFields(Vec<String>),
}

impl ValidationError {
    const fn code(&self) -> &'static str {
        match self {
            Self::MalformedBody(_) => "bad_request",
            Self::InvalidFields(_) => "invalid_fields",
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            Self::MalformedBody(rejection) => (
                rejection.status(),
                "Malformed request body",
                rejection.body_text(),
            ),
            Self::InvalidFields(fields) => (
                StatusCode::BAD_REQUEST,
                "Request body failed validation",
                fields.join("; "),
            ),
        };

        let body = ErrorResponse {
            error: error.to_string(),
            code: self.code().to_string(),
            details: Some(details),
        };
        (status, Json(body)).into_response()
    }
}

/// `field: reason` for each failing rule; the rule code stands in for a
/// missing message
fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, rules)| {
            rules.iter().map(move |rule| {
                let reason = rule.message.as_deref().unwrap_or(rule.code.as_ref());
                format!("{field}: {reason}")
            })
        })
        .collect();
    fields.sort();
    fields
}

/// JSON extractor that runs the body's `Validate` rules before the handler
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|e| ValidationError::InvalidFields(describe(&e)))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;
    use validator::Validate;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct NumberRequest {
        #[validate(length(min = 1, max = 20, message = "must be between 1 and 20 characters"))]
        number: String,
        #[validate(length(max = 10))]
        #[serde(default)]
        label: String,
    }

    async fn number_handler(ValidatedJson(req): ValidatedJson<NumberRequest>) -> String {
        req.number
    }

    async fn post_json(body: &'static str) -> Response {
        Router::new()
            .route("/numbers", post(number_handler))
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/numbers")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn valid_request_passes() {
        let response = post_json(r#"{"number": "+55 11 99999-8888"}"#).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_number_rejected_with_field_message() {
        let response = post_json(r#"{"number": ""}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "invalid_fields");
        assert_eq!(body["error"], "Request body failed validation");
        assert_eq!(body["details"], "number: must be between 1 and 20 characters");
    }

    #[tokio::test]
    async fn rule_without_message_reports_code() {
        let response = post_json(r#"{"number": "1", "label": "far too long label"}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["details"], "label: length");
    }

    #[tokio::test]
    async fn every_broken_rule_is_listed_in_order() {
        let response = post_json(r#"{"number": "", "label": "far too long label"}"#).await;
        let body = body_json(response).await;
        assert_eq!(
            body["details"],
            "label: length; number: must be between 1 and 20 characters"
        );
    }

    #[tokio::test]
    async fn missing_field_is_bad_request_code() {
        let response = post_json(r#"{"label": "x"}"#).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["code"], "bad_request");
    }

    #[tokio::test]
    async fn invalid_json_is_bad_request() {
        let response = post_json(r#"{"number": not valid json}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "bad_request");
        assert_eq!(body["error"], "Malformed request body");
    }

    #[test]
    fn invalid_fields_display_joins_entries() {
        let error = ValidationError::InvalidFields(vec!["a: x".to_string(), "b: y".to_string()]);
        assert_eq!(error.to_string(), "Invalid fields: a: x; b: y");
    }
}
