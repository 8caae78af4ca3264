//! HTTP listener settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shutdown grace period when none is configured
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP listener, CORS and request limits
///
/// Missing keys fall back to [`ServerConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_enabled: bool,
    /// Origins allowed by CORS; empty allows any origin
    pub allowed_origins: Vec<String>,
    /// Seconds to wait for open connections on shutdown
    pub shutdown_timeout_secs: Option<u64>,
    /// `text` or `json`
    pub log_format: String,
    /// Upper bound on request bodies
    pub max_body_size_json_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_enabled: true,
            allowed_origins: Vec::new(),
            shutdown_timeout_secs: None,
            log_format: "text".to_string(),
            max_body_size_json_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// Whether logs should be emitted as JSON
    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// `host:port` for the listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        self.shutdown_timeout_secs
            .map_or(DEFAULT_SHUTDOWN_TIMEOUT, Duration::from_secs)
    }
}
