//! Application-level errors

use domain::{DomainError, SessionId};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No session is flagged as the default one
    #[error("No default WhatsApp session configured")]
    NoDefaultSession,

    /// The session has no live client handle
    #[error("WhatsApp session {0} is not connected")]
    NotConnected(SessionId),

    /// The provider has no account for this number
    #[error("Invalid contact number: {0}")]
    InvalidNumber(String),

    /// External service (messaging provider) error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation conflicts with current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if a later retry may succeed without any change by the caller
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NotConnected(_) | Self::ExternalService(_))
    }
}
