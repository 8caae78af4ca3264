//! SQLite database health adapter
//!
//! Implements the `DatabaseHealthPort` on top of the sqlx pool.

use application::ports::DatabaseHealthPort;
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::AsyncDatabase;

#[async_trait]
impl DatabaseHealthPort for AsyncDatabase {
    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        let available = self.ping().await;
        if available {
            debug!("Database health check passed");
        } else {
            warn!("Database health check failed: unable to execute query");
        }
        available
    }
}
