//! Default session resolver port

use async_trait::async_trait;
use domain::Session;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Resolves the session flagged as default
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DefaultSessionResolver: Send + Sync {
    /// Return the default session
    ///
    /// Fails with `ApplicationError::NoDefaultSession` when none is flagged.
    /// Read-only.
    async fn resolve_default_session(&self) -> Result<Session, ApplicationError>;
}
