//! WhatsApp session entity
//!
//! A session is one linked WhatsApp account. Its live connection is not part
//! of the entity; only the last known connection status is.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{errors::DomainError, value_objects::SessionId};

/// Connection status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Connection is being established
    Opening,
    /// Waiting for the QR code to be scanned
    Qrcode,
    /// QR code scanned, device pairing in progress
    Pairing,
    /// Connected and able to serve requests
    Connected,
    /// Not connected
    #[default]
    Disconnected,
    /// Pairing was not completed in time
    Timeout,
}

impl SessionStatus {
    /// Storage/wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Opening => "OPENING",
            Self::Qrcode => "QRCODE",
            Self::Pairing => "PAIRING",
            Self::Connected => "CONNECTED",
            Self::Disconnected => "DISCONNECTED",
            Self::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPENING" => Ok(Self::Opening),
            "QRCODE" => Ok(Self::Qrcode),
            "PAIRING" => Ok(Self::Pairing),
            "CONNECTED" => Ok(Self::Connected),
            "DISCONNECTED" => Ok(Self::Disconnected),
            "TIMEOUT" => Ok(Self::Timeout),
            other => Err(DomainError::ValidationError(format!(
                "Unknown session status: {other}"
            ))),
        }
    }
}

/// A linked WhatsApp account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    name: String,
    status: SessionStatus,
    is_default: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a freshly linked, disconnected session
    #[must_use]
    pub fn new(id: SessionId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            status: SessionStatus::Disconnected,
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Restore a session from storage
    #[must_use]
    pub const fn restore(
        id: SessionId,
        name: String,
        status: SessionStatus,
        is_default: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            status,
            is_default,
            created_at,
            updated_at,
        }
    }

    /// Mark as the default session
    #[must_use]
    pub const fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub const fn id(&self) -> SessionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    pub const fn is_connected(&self) -> bool {
        matches!(self.status, SessionStatus::Connected)
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Record a new connection status
    pub fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Rename the session
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Session name must not be empty".to_string(),
            ));
        }
        self.name = name;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Set or clear the default flag
    pub fn set_default(&mut self, is_default: bool) {
        self.is_default = is_default;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_disconnected_and_not_default() {
        let session = Session::new(SessionId::new(1), "support");
        assert_eq!(session.status(), SessionStatus::Disconnected);
        assert!(!session.is_default());
        assert!(!session.is_connected());
        assert_eq!(session.name(), "support");
    }

    #[test]
    fn as_default_sets_flag() {
        let session = Session::new(SessionId::new(1), "support").as_default();
        assert!(session.is_default());
    }

    #[test]
    fn set_status_updates_timestamp() {
        let mut session = Session::new(SessionId::new(1), "support");
        let before = session.updated_at();
        session.set_status(SessionStatus::Connected);
        assert!(session.is_connected());
        assert!(session.updated_at() >= before);
    }

    #[test]
    fn rename_rejects_blank_names() {
        let mut session = Session::new(SessionId::new(1), "support");
        assert!(session.rename("  ").is_err());
        assert_eq!(session.name(), "support");
        session.rename("sales").unwrap();
        assert_eq!(session.name(), "sales");
    }

    #[test]
    fn status_roundtrips_through_str() {
        for status in [
            SessionStatus::Opening,
            SessionStatus::Qrcode,
            SessionStatus::Pairing,
            SessionStatus::Connected,
            SessionStatus::Disconnected,
            SessionStatus::Timeout,
        ] {
            assert_eq!(status.as_str().parse::<SessionStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(
            "connected".parse::<SessionStatus>().unwrap(),
            SessionStatus::Connected
        );
        assert!("unknown".parse::<SessionStatus>().is_err());
    }

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&SessionStatus::Qrcode).unwrap();
        assert_eq!(json, "\"QRCODE\"");
    }
}
