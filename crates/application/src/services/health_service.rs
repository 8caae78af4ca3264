//! Health aggregation service
//!
//! Reports whether contact validation can currently be served: a default
//! session must be configured, connected, and its provider reachable.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ClientRegistryPort, DatabaseHealthPort, DefaultSessionResolver},
};

/// Default timeout for the provider check in seconds
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Configuration for health check behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Timeout for the provider check in seconds (default: 5)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

const fn default_timeout() -> u64 {
    DEFAULT_HEALTH_CHECK_TIMEOUT_SECS
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

impl HealthConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Status of an individual check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Whether the check passed
    pub healthy: bool,
    /// Optional additional information (e.g., session id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Response time in milliseconds (if a remote call was made)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    #[must_use]
    pub fn healthy_with_info(info: impl Into<String>) -> Self {
        Self {
            healthy: true,
            info: Some(info.into()),
            response_time_ms: None,
            error: None,
        }
    }

    #[must_use]
    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            healthy: false,
            info: None,
            response_time_ms: None,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn timeout() -> Self {
        Self::unhealthy("Health check timed out")
    }

    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Health report across all checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True if every check passed
    pub healthy: bool,
    /// Individual check results
    pub services: HashMap<String, ServiceHealth>,
    /// Timestamp of the health check
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthReport {
    #[must_use]
    pub fn new(services: HashMap<String, ServiceHealth>) -> Self {
        let healthy = services.values().all(|s| s.healthy);

        Self {
            healthy,
            services,
            checked_at: chrono::Utc::now(),
        }
    }

    #[must_use]
    pub fn service_status(&self, name: &str) -> Option<&ServiceHealth> {
        self.services.get(name)
    }
}

/// Aggregates readiness checks for contact validation
pub struct HealthService {
    config: HealthConfig,
    resolver: Arc<dyn DefaultSessionResolver>,
    registry: Arc<dyn ClientRegistryPort>,
    database: Option<Arc<dyn DatabaseHealthPort>>,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HealthService {
    #[must_use]
    pub fn new(
        resolver: Arc<dyn DefaultSessionResolver>,
        registry: Arc<dyn ClientRegistryPort>,
    ) -> Self {
        Self {
            config: HealthConfig::default(),
            resolver,
            registry,
            database: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: HealthConfig) -> Self {
        self.config = config;
        self
    }

    /// Also report on the session database
    #[must_use]
    pub fn with_database(mut self, database: Arc<dyn DatabaseHealthPort>) -> Self {
        self.database = Some(database);
        self
    }

    /// Run all checks
    ///
    /// The report always contains `default_session` and `whatsapp`; the
    /// latter is only checked when the default session is resolved.
    /// `database` is added when a database check is configured.
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let mut services = HashMap::new();

        if let Some(database) = &self.database {
            services.insert("database".to_string(), self.check_database(database.as_ref()).await);
        }

        match self.resolver.resolve_default_session().await {
            Ok(session) => {
                services.insert(
                    "default_session".to_string(),
                    ServiceHealth::healthy_with_info(format!("session {}", session.id())),
                );
                services.insert(
                    "whatsapp".to_string(),
                    self.check_provider(session.id()).await,
                );
            },
            Err(e) => {
                warn!(error = %e, "Default session unavailable");
                services.insert("default_session".to_string(), ServiceHealth::unhealthy(e.to_string()));
                services.insert(
                    "whatsapp".to_string(),
                    ServiceHealth::unhealthy("Skipped: no default session"),
                );
            },
        }

        HealthReport::new(services)
    }

    async fn check_database(&self, database: &dyn DatabaseHealthPort) -> ServiceHealth {
        let start = Instant::now();
        let Ok(available) = timeout(self.config.timeout(), database.is_available()).await else {
            warn!("Database health check timed out");
            return ServiceHealth::timeout();
        };

        // SAFETY: Response time in milliseconds will never exceed u64::MAX in practice.
        #[allow(clippy::cast_possible_truncation)]
        let response_time = start.elapsed().as_millis() as u64;
        if available {
            ServiceHealth::healthy_with_info("sqlite").with_response_time(response_time)
        } else {
            warn!(response_time_ms = response_time, "Database unavailable");
            ServiceHealth::unhealthy("Database unavailable").with_response_time(response_time)
        }
    }

    /// Probe the provider through the session's live handle
    #[instrument(skip(self))]
    pub async fn check_provider(&self, session_id: domain::SessionId) -> ServiceHealth {
        let client = match self.registry.get_client(session_id) {
            Ok(client) => client,
            Err(ApplicationError::NotConnected(id)) => {
                return ServiceHealth::unhealthy(format!("Session {id} is not connected"));
            },
            Err(e) => return ServiceHealth::unhealthy(e.to_string()),
        };

        let start = Instant::now();
        let Ok(available) = timeout(self.config.timeout(), client.is_available()).await else {
            warn!(%session_id, "Provider health check timed out");
            return ServiceHealth::timeout();
        };

        // SAFETY: Response time in milliseconds will never exceed u64::MAX in practice.
        #[allow(clippy::cast_possible_truncation)]
        let response_time = start.elapsed().as_millis() as u64;
        if available {
            debug!(%session_id, response_time_ms = response_time, "Provider healthy");
            ServiceHealth::healthy_with_info(format!("session {session_id}"))
                .with_response_time(response_time)
        } else {
            warn!(%session_id, response_time_ms = response_time, "Provider unhealthy");
            ServiceHealth::unhealthy("WhatsApp provider unavailable").with_response_time(response_time)
        }
    }
}
