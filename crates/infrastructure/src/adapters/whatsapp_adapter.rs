//! WhatsApp client adapter
//!
//! Implements `MessagingClientPort` using the WhatsApp integration crate and
//! `ClientConnectorPort` by opening one gateway client per session.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{ClientConnectorPort, MessagingClientPort};
use async_trait::async_trait;
use domain::{ContactAddress, Session, SessionId, WhatsAppId};
use integration_whatsapp::{
    ContactStatus, ContactValidity, WhatsAppClient, WhatsAppClientConfig, WhatsAppError,
};
use tracing::{debug, info, instrument, warn};

use crate::config::WhatsAppConfig;

/// Adapter that implements `MessagingClientPort` using `WhatsAppClient`
pub struct WhatsAppClientAdapter {
    session_id: SessionId,
    client: WhatsAppClient,
}

impl WhatsAppClientAdapter {
    /// Create a new adapter bound to `session_id`
    ///
    /// # Errors
    /// Returns an error if the client configuration is invalid.
    pub fn new(session_id: SessionId, config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        let client = WhatsAppClient::new(config)?;
        Ok(Self { session_id, client })
    }

}

impl std::fmt::Debug for WhatsAppClientAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClientAdapter")
            .field("session_id", &self.session_id)
            .field("instance", &self.client.instance())
            .finish_non_exhaustive()
    }
}

/// Interpret a gateway status as "account exists" / "no account"
fn to_whatsapp_id(status: &ContactStatus) -> Result<Option<WhatsAppId>, ApplicationError> {
    if let Some(wa_id) = status.account_id() {
        return WhatsAppId::from_jid(wa_id)
            .map(Some)
            .map_err(|e| ApplicationError::ExternalService(format!("Malformed WhatsApp id: {e}")));
    }

    match status.status {
        ContactValidity::Invalid => Ok(None),
        ContactValidity::Valid => Err(ApplicationError::ExternalService(
            "Valid contact without WhatsApp id".to_string(),
        )),
        other => Err(ApplicationError::ExternalService(format!(
            "Contact check not completed: {other:?}"
        ))),
    }
}

#[async_trait]
impl MessagingClientPort for WhatsAppClientAdapter {
    fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[instrument(skip(self), fields(session_id = %self.session_id, address = %address))]
    async fn check_number(
        &self,
        address: &ContactAddress,
    ) -> Result<Option<WhatsAppId>, ApplicationError> {
        let status = self
            .client
            .check_contact(address.as_str())
            .await
            .map_err(|e| ApplicationError::ExternalService(format!("WhatsApp check failed: {e}")))?;

        let result = to_whatsapp_id(&status)?;
        debug!(exists = result.is_some(), "WhatsApp contact checked");
        Ok(result)
    }

    #[instrument(skip(self), fields(session_id = %self.session_id))]
    async fn is_available(&self) -> bool {
        self.client.is_available().await
    }
}

/// Opens gateway clients for sessions
///
/// Each session maps to the gateway instance named by its id.
pub struct WhatsAppClientConnector {
    config: WhatsAppConfig,
}

impl WhatsAppClientConnector {
    /// Create a connector from gateway configuration
    #[must_use]
    pub const fn new(config: WhatsAppConfig) -> Self {
        Self { config }
    }

    /// Client configuration for one session
    fn client_config(&self, session_id: SessionId) -> WhatsAppClientConfig {
        WhatsAppClientConfig {
            base_url: self.config.base_url.clone(),
            api_version: self.config.api_version.clone(),
            instance: session_id.to_string(),
            access_token: self
                .config
                .access_token_str()
                .unwrap_or_default()
                .to_string(),
            request_timeout_secs: self.config.request_timeout_secs,
        }
    }
}

impl std::fmt::Debug for WhatsAppClientConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClientConnector")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl ClientConnectorPort for WhatsAppClientConnector {
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    async fn connect(
        &self,
        session: &Session,
    ) -> Result<Arc<dyn MessagingClientPort>, ApplicationError> {
        let adapter = WhatsAppClientAdapter::new(session.id(), self.client_config(session.id()))
            .map_err(|e| match e {
                WhatsAppError::Configuration(msg) => ApplicationError::Configuration(msg),
                e => ApplicationError::ExternalService(format!("WhatsApp client failed: {e}")),
            })?;

        if !adapter.is_available().await {
            warn!("WhatsApp gateway instance unreachable");
            return Err(ApplicationError::ExternalService(format!(
                "WhatsApp gateway unreachable for session {}",
                session.id()
            )));
        }

        info!("WhatsApp session connected");
        Ok(Arc::new(adapter))
    }
}
