//! Session management service
//!
//! Lifecycle of linked WhatsApp sessions: records in the `SessionStore`,
//! live connections in the `ClientRegistryPort`.

use std::{collections::HashMap, fmt, sync::Arc};

use domain::{DomainError, Session, SessionId, SessionStatus};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ClientConnectorPort, ClientRegistryPort, SessionStore},
};

/// Outcome of starting every stored session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StartAllReport {
    /// Sessions that are now connected
    pub started: Vec<SessionId>,
    /// Sessions whose connection failed
    pub failed: Vec<SessionId>,
}

/// Service for managing sessions and their connections
///
/// Start, stop and delete of the same session are serialized, so a stop or
/// delete issued while a connect is in flight runs after it.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    registry: Arc<dyn ClientRegistryPort>,
    connector: Arc<dyn ClientConnectorPort>,
    lifecycle_locks: Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService").finish_non_exhaustive()
    }
}

impl SessionService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        registry: Arc<dyn ClientRegistryPort>,
        connector: Arc<dyn ClientConnectorPort>,
    ) -> Self {
        Self {
            store,
            registry,
            connector,
            lifecycle_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Lock guarding connection changes of one session
    fn lifecycle_lock(&self, id: SessionId) -> Arc<AsyncMutex<()>> {
        Arc::clone(self.lifecycle_locks.lock().entry(id).or_default())
    }

    #[instrument(skip(self))]
    pub async fn list_sessions(&self) -> Result<Vec<Session>, ApplicationError> {
        self.store.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_session(&self, id: SessionId) -> Result<Session, ApplicationError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Session {id}")))
    }

    /// Register a new, disconnected session
    #[instrument(skip(self))]
    pub async fn create_session(
        &self,
        name: &str,
        is_default: bool,
    ) -> Result<Session, ApplicationError> {
        let name = validate_name(name)?;

        if self.store.find_by_name(name).await?.is_some() {
            return Err(ApplicationError::InvalidOperation(format!(
                "A session named '{name}' already exists"
            )));
        }

        let session = self.store.create(name, is_default).await?;
        info!(session_id = %session.id(), is_default, "Session created");
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn rename_session(
        &self,
        id: SessionId,
        name: &str,
    ) -> Result<Session, ApplicationError> {
        let name = validate_name(name)?;

        if let Some(existing) = self.store.find_by_name(name).await? {
            if existing.id() != id {
                return Err(ApplicationError::InvalidOperation(format!(
                    "A session named '{name}' already exists"
                )));
            }
        }

        if !self.store.rename(id, name).await? {
            return Err(ApplicationError::NotFound(format!("Session {id}")));
        }
        self.get_session(id).await
    }

    /// Make `id` the default session, clearing the flag everywhere else
    #[instrument(skip(self))]
    pub async fn set_default(&self, id: SessionId) -> Result<Session, ApplicationError> {
        if !self.store.set_default(id).await? {
            return Err(ApplicationError::NotFound(format!("Session {id}")));
        }
        info!(session_id = %id, "Default session changed");
        self.get_session(id).await
    }

    /// Disconnect and delete a session
    #[instrument(skip(self))]
    pub async fn delete_session(&self, id: SessionId) -> Result<(), ApplicationError> {
        let lock = self.lifecycle_lock(id);
        let _guard = lock.lock().await;

        if self.registry.remove(id).is_some() {
            debug!(session_id = %id, "Dropped live client before delete");
        }

        if !self.store.delete(id).await? {
            return Err(ApplicationError::NotFound(format!("Session {id}")));
        }
        self.lifecycle_locks.lock().remove(&id);
        info!(session_id = %id, "Session deleted");
        Ok(())
    }

    /// Connect a session and register its client handle
    ///
    /// A handle already registered for the session is replaced.
    #[instrument(skip(self))]
    pub async fn start_session(&self, id: SessionId) -> Result<Session, ApplicationError> {
        let lock = self.lifecycle_lock(id);
        let _guard = lock.lock().await;

        let session = self.get_session(id).await?;
        self.store.update_status(id, SessionStatus::Opening).await?;

        let client = match self.connector.connect(&session).await {
            Ok(client) => client,
            Err(e) => {
                warn!(session_id = %id, error = %e, "Session failed to connect");
                if let Err(store_err) = self
                    .store
                    .update_status(id, SessionStatus::Disconnected)
                    .await
                {
                    warn!(session_id = %id, error = %store_err, "Could not record failed connect");
                }
                return Err(e);
            },
        };

        if self.registry.register(id, client).is_some() {
            debug!(session_id = %id, "Replaced existing client handle");
        }
        self.store.update_status(id, SessionStatus::Connected).await?;

        info!(session_id = %id, "Session connected");
        self.get_session(id).await
    }

    /// Drop a session's client handle and mark it disconnected
    #[instrument(skip(self))]
    pub async fn stop_session(&self, id: SessionId) -> Result<Session, ApplicationError> {
        let lock = self.lifecycle_lock(id);
        let _guard = lock.lock().await;

        // Fail on unknown sessions before touching the registry
        self.get_session(id).await?;

        if self.registry.remove(id).is_none() {
            debug!(session_id = %id, "Session had no live client");
        }
        self.store
            .update_status(id, SessionStatus::Disconnected)
            .await?;

        info!(session_id = %id, "Session disconnected");
        self.get_session(id).await
    }

    /// Start every stored session, continuing past failures
    #[instrument(skip(self))]
    pub async fn start_all_sessions(&self) -> Result<StartAllReport, ApplicationError> {
        let sessions = self.store.list().await?;
        let mut report = StartAllReport::default();

        for session in sessions {
            match self.start_session(session.id()).await {
                Ok(_) => report.started.push(session.id()),
                Err(e) => {
                    warn!(
                        session_id = %session.id(),
                        error = %e,
                        retryable = e.is_retryable(),
                        "Could not start session"
                    );
                    report.failed.push(session.id());
                },
            }
        }

        info!(
            started = report.started.len(),
            failed = report.failed.len(),
            "Session startup finished"
        );
        Ok(report)
    }
}

fn validate_name(name: &str) -> Result<&str, ApplicationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::ValidationError("Session name must not be empty".to_string()).into());
    }
    Ok(name)
}
