//! In-process session client registry
//!
//! Implements `ClientRegistryPort` with a `parking_lot::RwLock` map. Lookups
//! clone the `Arc` out of the map so the lock is never held across an await.

use std::{collections::HashMap, sync::Arc};

use application::error::ApplicationError;
use application::ports::{ClientRegistryPort, MessagingClientPort};
use domain::SessionId;
use parking_lot::RwLock;
use tracing::{debug, info};

/// Registry of live client handles keyed by session id
#[derive(Default)]
pub struct InMemoryClientRegistry {
    clients: RwLock<HashMap<SessionId, Arc<dyn MessagingClientPort>>>,
}

impl InMemoryClientRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered handles
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.read().len()
    }

    /// True if no handle is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.read().is_empty()
    }
}

impl std::fmt::Debug for InMemoryClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryClientRegistry")
            .field("connected", &self.connected_sessions())
            .finish()
    }
}

impl ClientRegistryPort for InMemoryClientRegistry {
    fn get_client(
        &self,
        session_id: SessionId,
    ) -> Result<Arc<dyn MessagingClientPort>, ApplicationError> {
        self.clients
            .read()
            .get(&session_id)
            .cloned()
            .ok_or(ApplicationError::NotConnected(session_id))
    }

    fn register(
        &self,
        session_id: SessionId,
        client: Arc<dyn MessagingClientPort>,
    ) -> Option<Arc<dyn MessagingClientPort>> {
        let previous = self.clients.write().insert(session_id, client);
        if previous.is_some() {
            info!(%session_id, "Client handle replaced");
        } else {
            debug!(%session_id, "Client handle registered");
        }
        previous
    }

    fn remove(&self, session_id: SessionId) -> Option<Arc<dyn MessagingClientPort>> {
        let removed = self.clients.write().remove(&session_id);
        debug!(%session_id, removed = removed.is_some(), "Client handle removed");
        removed
    }

    fn is_connected(&self, session_id: SessionId) -> bool {
        self.clients.read().contains_key(&session_id)
    }

    fn connected_sessions(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.clients.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}
