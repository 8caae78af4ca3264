//! Messaging client port
//!
//! A live connection to the messaging provider, bound to one session.

use async_trait::async_trait;
use domain::{ContactAddress, SessionId, WhatsAppId};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Client handle for a connected session
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagingClientPort: Send + Sync {
    /// Session this handle is bound to
    fn session_id(&self) -> SessionId;

    /// Ask the provider whether an account exists at `address`
    ///
    /// Returns the canonical user id when it does, `None` when it does not.
    /// Transport or provider failures are errors, never `None`.
    async fn check_number(
        &self,
        address: &ContactAddress,
    ) -> Result<Option<WhatsAppId>, ApplicationError>;

    /// Check if the provider is reachable through this handle
    async fn is_available(&self) -> bool;
}
