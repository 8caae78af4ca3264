//! Contact number validation
//!
//! Checks a human-entered phone number against the messaging provider using
//! the default session's live connection.

use std::{fmt, sync::Arc};

use domain::{ContactNumber, WhatsAppId};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{ClientRegistryPort, DefaultSessionResolver},
};

/// Validates contact numbers through the default session
pub struct NumberValidationService {
    resolver: Arc<dyn DefaultSessionResolver>,
    registry: Arc<dyn ClientRegistryPort>,
}

impl fmt::Debug for NumberValidationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberValidationService")
            .finish_non_exhaustive()
    }
}

impl NumberValidationService {
    pub fn new(
        resolver: Arc<dyn DefaultSessionResolver>,
        registry: Arc<dyn ClientRegistryPort>,
    ) -> Self {
        Self { resolver, registry }
    }

    /// Validate `raw_number` and return the provider's canonical user id
    ///
    /// Errors, in the order they are checked:
    /// - `NoDefaultSession` if no session is flagged default
    /// - `NotConnected` if the default session has no live handle
    /// - `InvalidNumber` if the input has no digits or holds other
    ///   characters; the provider is not asked
    /// - `ExternalService` if the provider call fails
    /// - `InvalidNumber` if the provider has no account for the number
    #[instrument(skip(self))]
    pub async fn validate(&self, raw_number: &str) -> Result<WhatsAppId, ApplicationError> {
        let session = self.resolver.resolve_default_session().await?;
        let client = self.registry.get_client(session.id())?;

        let number = ContactNumber::new(raw_number).map_err(|e| {
            debug!(error = %e, "Input cannot be a phone number");
            ApplicationError::InvalidNumber(raw_number.trim().to_string())
        })?;

        let address = number.to_address();
        debug!(session_id = %session.id(), address = %address, "Checking number with provider");

        match client.check_number(&address).await? {
            Some(id) => {
                info!(session_id = %session.id(), wa_id = %id, "Contact number validated");
                Ok(id)
            },
            None => {
                info!(session_id = %session.id(), number = %number, "Number has no WhatsApp account");
                Err(ApplicationError::InvalidNumber(number.to_string()))
            },
        }
    }
}
