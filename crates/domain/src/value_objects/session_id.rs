//! Session identifier value object

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Identifier of a linked WhatsApp session
///
/// Sessions are numbered by the store, so the identifier is a plain integer
/// rather than a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(i64);

impl SessionId {
    /// Wrap a raw session number
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw session number
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for SessionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::ValidationError(format!("Invalid session id: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_raw_number() {
        assert_eq!(SessionId::new(42).to_string(), "42");
    }

    #[test]
    fn parse_from_str() {
        let id: SessionId = " 7 ".parse().unwrap();
        assert_eq!(id, SessionId::new(7));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("seven".parse::<SessionId>().is_err());
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&SessionId::new(3)).unwrap();
        assert_eq!(json, "3");
        let parsed: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_i64(), 3);
    }

    #[test]
    fn ordering_follows_number() {
        assert!(SessionId::new(1) < SessionId::new(2));
    }
}
