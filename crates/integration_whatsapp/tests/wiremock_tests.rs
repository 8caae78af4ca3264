//! Integration tests for WhatsApp client using WireMock
//!
//! These tests mock the gateway to verify request shape and response
//! handling without a real WhatsApp connection.

use integration_whatsapp::{ContactValidity, WhatsAppClient, WhatsAppClientConfig, WhatsAppError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config(base_url: &str) -> WhatsAppClientConfig {
    WhatsAppClientConfig {
        base_url: base_url.to_string(),
        api_version: "v1".to_string(),
        instance: "7".to_string(),
        access_token: "test_access_token".to_string(),
        request_timeout_secs: 5,
    }
}

fn client_for(server: &MockServer) -> WhatsAppClient {
    WhatsAppClient::new(test_config(&server.uri())).unwrap()
}

fn contacts_response(input: &str, status: &str, wa_id: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "contacts": [{
            "input": input,
            "status": status,
            "wa_id": wa_id
        }]
    })
}

fn api_error_response(code: i32, message: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}

// =============================================================================
// Contact Check Tests
// =============================================================================

mod check_contact_tests {
    use super::*;

    #[tokio::test]
    async fn sends_blocking_request_with_bearer_auth() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/7/contacts"))
            .and(header("authorization", "Bearer test_access_token"))
            .and(body_json(serde_json::json!({
                "blocking": "wait",
                "contacts": ["5511999998888@c.us"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(contacts_response(
                "5511999998888@c.us",
                "valid",
                Some("5511999998888"),
            )))
            .expect(1)
            .mount(&server)
            .await;

        let status = client_for(&server)
            .check_contact("5511999998888@c.us")
            .await
            .unwrap();

        assert_eq!(status.account_id(), Some("5511999998888"));
    }

    #[tokio::test]
    async fn invalid_contact_is_not_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/7/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(contacts_response(
                "000@c.us", "invalid", None,
            )))
            .mount(&server)
            .await;

        let status = client_for(&server).check_contact("000@c.us").await.unwrap();

        assert_eq!(status.status, ContactValidity::Invalid);
        assert_eq!(status.account_id(), None);
    }

    #[tokio::test]
    async fn api_error_is_mapped() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/7/contacts"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(api_error_response(1005, "Access denied")),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).check_contact("1@c.us").await;

        match result {
            Err(WhatsAppError::Api { code, message }) => {
                assert_eq!(code, 1005);
                assert_eq!(message, "Access denied");
            },
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_status_for_input_is_unexpected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/7/contacts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "contacts": [] })),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).check_contact("1@c.us").await;
        assert!(matches!(result, Err(WhatsAppError::UnexpectedResponse(_))));
    }

    #[tokio::test]
    async fn malformed_body_is_request_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/7/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client_for(&server).check_contact("1@c.us").await;
        assert!(matches!(result, Err(WhatsAppError::Request(_))));
    }

    #[tokio::test]
    async fn batch_check_returns_all_statuses() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/7/contacts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "contacts": [
                    { "input": "1@c.us", "status": "valid", "wa_id": "1" },
                    { "input": "2@c.us", "status": "processing" }
                ]
            })))
            .mount(&server)
            .await;

        let statuses = client_for(&server)
            .check_contacts(&["1@c.us", "2@c.us"])
            .await
            .unwrap();

        assert_eq!(statuses.len(), 2);
        assert!(statuses[0].account_id().is_some());
        assert_eq!(statuses[1].status, ContactValidity::Processing);
    }
}

// =============================================================================
// Availability Tests
// =============================================================================

mod availability_tests {
    use super::*;

    #[tokio::test]
    async fn available_when_health_succeeds() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/7/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(client_for(&server).is_available().await);
    }

    #[tokio::test]
    async fn unavailable_when_health_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/7/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(!client_for(&server).is_available().await);
    }

    #[tokio::test]
    async fn unavailable_when_unreachable() {
        let client = WhatsAppClient::new(test_config("http://127.0.0.1:1")).unwrap();
        assert!(!client.is_available().await);
    }
}
