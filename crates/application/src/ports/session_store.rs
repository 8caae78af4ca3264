//! Session store port
//!
//! Persistence for linked WhatsApp sessions.

use async_trait::async_trait;
use domain::{Session, SessionId, SessionStatus};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for session persistence
///
/// Implementations must keep at most one session flagged as default.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a new session and return it with its assigned id
    ///
    /// When `is_default` is set, every other session loses the flag.
    async fn create(&self, name: &str, is_default: bool) -> Result<Session, ApplicationError>;

    /// Get a session by id
    async fn get(&self, id: SessionId) -> Result<Option<Session>, ApplicationError>;

    /// Get a session by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Session>, ApplicationError>;

    /// List all sessions ordered by id
    async fn list(&self) -> Result<Vec<Session>, ApplicationError>;

    /// Get the session flagged as default, if any
    async fn find_default(&self) -> Result<Option<Session>, ApplicationError>;

    /// Rename a session; returns false if it does not exist
    async fn rename(&self, id: SessionId, name: &str) -> Result<bool, ApplicationError>;

    /// Record a new connection status; returns false if the session does not exist
    async fn update_status(
        &self,
        id: SessionId,
        status: SessionStatus,
    ) -> Result<bool, ApplicationError>;

    /// Flag a session as default and clear the flag on all others
    ///
    /// Returns false (and changes nothing) if the session does not exist.
    async fn set_default(&self, id: SessionId) -> Result<bool, ApplicationError>;

    /// Delete a session; returns false if it did not exist
    async fn delete(&self, id: SessionId) -> Result<bool, ApplicationError>;
}
