//! Canonical WhatsApp user identifier

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The provider-confirmed user identifier of a contact
///
/// Holds only the user portion of the provider's JID; the value is kept
/// exactly as the provider reported it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WhatsAppId(String);

impl WhatsAppId {
    /// Create an identifier from a bare user id
    pub fn new(user: impl Into<String>) -> Result<Self, DomainError> {
        let user = user.into();
        if user.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "WhatsApp id must not be empty".to_string(),
            ));
        }
        Ok(Self(user))
    }

    /// Extract the user portion of a JID such as `5511999998888@c.us`
    ///
    /// A value without a server part is taken as the user id itself.
    pub fn from_jid(jid: &str) -> Result<Self, DomainError> {
        let user = jid.split_once('@').map_or(jid, |(user, _)| user);
        Self::new(user)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for WhatsAppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
