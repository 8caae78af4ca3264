//! Health check handlers

use std::collections::HashMap;

use application::ServiceHealth;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
}

/// Liveness check - is the server running?
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment().to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub services: HashMap<String, ServiceHealth>,
}

/// Readiness check - can contact numbers be validated right now?
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let report = state.health_service.check_all().await;

    let status_code = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            ready: report.healthy,
            services: report.services,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serialization() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            environment: "development".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("status"));
        assert!(json.contains("ok"));
        assert!(json.contains("development"));
    }

    #[test]
    fn readiness_response_serialization() {
        let mut services = HashMap::new();
        services.insert(
            "default_session".to_string(),
            ServiceHealth::unhealthy("No default WhatsApp session configured"),
        );
        let resp = ReadinessResponse {
            ready: false,
            services,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["ready"], false);
        assert_eq!(json["services"]["default_session"]["healthy"], false);
    }
}
