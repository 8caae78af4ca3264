//! Database health check port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Port for probing the session database
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Whether the database answers a trivial query
    async fn is_available(&self) -> bool;
}
