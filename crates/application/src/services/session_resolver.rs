//! Default session resolution backed by the session store

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use domain::Session;
use tracing::{debug, instrument};

use crate::{
    error::ApplicationError,
    ports::{DefaultSessionResolver, SessionStore},
};

/// Resolves the default session by asking the `SessionStore`
pub struct StoreDefaultSessionResolver {
    store: Arc<dyn SessionStore>,
}

impl fmt::Debug for StoreDefaultSessionResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreDefaultSessionResolver")
            .finish_non_exhaustive()
    }
}

impl StoreDefaultSessionResolver {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DefaultSessionResolver for StoreDefaultSessionResolver {
    #[instrument(skip(self))]
    async fn resolve_default_session(&self) -> Result<Session, ApplicationError> {
        let session = self
            .store
            .find_default()
            .await?
            .ok_or(ApplicationError::NoDefaultSession)?;

        debug!(session_id = %session.id(), "Resolved default session");
        Ok(session)
    }
}
