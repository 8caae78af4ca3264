//! Session client registry port
//!
//! Process-wide map from session id to its live client handle. Holds at most
//! one handle per session.

use std::sync::Arc;

use domain::SessionId;
#[cfg(test)]
use mockall::automock;

use super::MessagingClientPort;
use crate::error::ApplicationError;

/// Registry of live client handles
#[cfg_attr(test, automock)]
pub trait ClientRegistryPort: Send + Sync {
    /// Look up the handle for a session
    ///
    /// Fails with `ApplicationError::NotConnected` when none is registered.
    fn get_client(
        &self,
        session_id: SessionId,
    ) -> Result<Arc<dyn MessagingClientPort>, ApplicationError>;

    /// Register a handle, returning the one it replaced
    fn register(
        &self,
        session_id: SessionId,
        client: Arc<dyn MessagingClientPort>,
    ) -> Option<Arc<dyn MessagingClientPort>>;

    /// Drop the handle for a session, returning it if there was one
    fn remove(&self, session_id: SessionId) -> Option<Arc<dyn MessagingClientPort>>;

    /// Check whether a handle is registered
    fn is_connected(&self, session_id: SessionId) -> bool;

    /// Ids of all sessions with a registered handle, in ascending order
    fn connected_sessions(&self) -> Vec<SessionId>;
}
