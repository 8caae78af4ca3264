//! WhatsApp gateway configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::default_true;

/// WhatsApp gateway configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    /// Gateway base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version (default: v1)
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Gateway access token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub access_token: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connect every stored session on startup (default: true)
    #[serde(default = "default_true")]
    pub auto_start_sessions: bool,
}

impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field(
                "access_token",
                &if self.access_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("auto_start_sessions", &self.auto_start_sessions)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_api_version() -> String {
    "v1".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            access_token: None,
            request_timeout_secs: default_request_timeout(),
            auto_start_sessions: true,
        }
    }
}

impl WhatsAppConfig {
    /// Get the access token as a string reference (for API calls)
    #[must_use]
    pub fn access_token_str(&self) -> Option<&str> {
        self.access_token.as_ref().map(ExposeSecret::expose_secret)
    }
}
