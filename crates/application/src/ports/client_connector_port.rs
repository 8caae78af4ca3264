//! Client connector port
//!
//! Opens a live provider connection for a session.

use std::sync::Arc;

use async_trait::async_trait;
use domain::Session;
#[cfg(test)]
use mockall::automock;

use super::MessagingClientPort;
use crate::error::ApplicationError;

/// Factory for client handles
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ClientConnectorPort: Send + Sync {
    /// Connect `session` to the provider and return its handle
    async fn connect(
        &self,
        session: &Session,
    ) -> Result<Arc<dyn MessagingClientPort>, ApplicationError>;
}
