//! WhatsApp gateway client
//!
//! Talks to the HTTP gateway that owns a session's WhatsApp connection.
//! One client is bound to one gateway instance (one linked account).

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// WhatsApp API errors
#[derive(Debug, Error)]
pub enum WhatsAppError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {code} - {message}")]
    Api { code: i32, message: String },

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Invalid contact address: {0}")]
    InvalidAddress(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// WhatsApp client configuration
#[derive(Debug, Clone)]
pub struct WhatsAppClientConfig {
    /// Gateway base URL, without trailing slash
    pub base_url: String,
    /// API version path segment (default: v1)
    pub api_version: String,
    /// Gateway instance serving this session
    pub instance: String,
    /// Bearer token for the gateway
    pub access_token: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for WhatsAppClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_version: "v1".to_string(),
            instance: String::new(),
            access_token: String::new(),
            request_timeout_secs: 30,
        }
    }
}

/// Contact check request
#[derive(Debug, Serialize)]
struct CheckContactsRequest<'a> {
    blocking: &'static str,
    contacts: &'a [&'a str],
}

/// Contact check response
#[derive(Debug, Deserialize)]
struct CheckContactsResponse {
    contacts: Vec<ContactStatus>,
}

/// Whether the gateway found an account for an address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactValidity {
    /// An account exists
    Valid,
    /// No account exists
    Invalid,
    /// The gateway has not finished the lookup
    Processing,
    #[serde(other)]
    Unknown,
}

/// Result of checking one address
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContactStatus {
    /// The address as sent
    pub input: String,
    /// Lookup outcome
    pub status: ContactValidity,
    /// Canonical id, present for valid contacts
    #[serde(default)]
    pub wa_id: Option<String>,
}

impl ContactStatus {
    /// Account id, present only when the gateway confirmed the account
    #[must_use]
    pub fn account_id(&self) -> Option<&str> {
        match self.status {
            ContactValidity::Valid => self.wa_id.as_deref(),
            _ => None,
        }
    }
}

/// API error response
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: i32,
    message: String,
}

/// Client for one WhatsApp gateway instance
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    client: Client,
    config: WhatsAppClientConfig,
    base_url: String,
}

impl WhatsAppClient {
    /// Create a new WhatsApp client
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        if config.base_url.is_empty() {
            return Err(WhatsAppError::Configuration(
                "base_url is required".to_string(),
            ));
        }
        if config.access_token.is_empty() {
            return Err(WhatsAppError::Configuration(
                "access_token is required".to_string(),
            ));
        }
        if config.instance.is_empty() {
            return Err(WhatsAppError::Configuration(
                "instance is required".to_string(),
            ));
        }

        let base_url = format!(
            "{}/{}/{}",
            config.base_url.trim_end_matches('/'),
            config.api_version,
            config.instance
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    /// Gateway instance this client is bound to
    #[must_use]
    pub fn instance(&self) -> &str {
        &self.config.instance
    }

    /// Check whether accounts exist for a batch of addresses
    #[instrument(skip(self), fields(instance = %self.config.instance, count = addresses.len()))]
    pub async fn check_contacts(
        &self,
        addresses: &[&str],
    ) -> Result<Vec<ContactStatus>, WhatsAppError> {
        if let Some(bad) = addresses.iter().find(|a| a.trim().is_empty()) {
            return Err(WhatsAppError::InvalidAddress((*bad).to_string()));
        }

        let request = CheckContactsRequest {
            blocking: "wait",
            contacts: addresses,
        };

        let response = self
            .client
            .post(format!("{}/contacts", self.base_url))
            .bearer_auth(&self.config.access_token)
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            let body: CheckContactsResponse = response.json().await?;
            debug!(returned = body.contacts.len(), "Contacts checked");
            Ok(body.contacts)
        } else {
            let error: ApiErrorResponse = response.json().await?;
            Err(WhatsAppError::Api {
                code: error.error.code,
                message: error.error.message,
            })
        }
    }

    /// Check whether an account exists for a single address
    #[instrument(skip(self), fields(instance = %self.config.instance))]
    pub async fn check_contact(&self, address: &str) -> Result<ContactStatus, WhatsAppError> {
        self.check_contacts(&[address])
            .await?
            .into_iter()
            .find(|c| c.input == address)
            .ok_or_else(|| {
                WhatsAppError::UnexpectedResponse(format!("no status returned for {address}"))
            })
    }

    /// Check if the gateway instance is reachable
    #[instrument(skip(self), fields(instance = %self.config.instance))]
    pub async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/health", self.base_url))
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .is_ok_and(|res| res.status().is_success())
    }
}
