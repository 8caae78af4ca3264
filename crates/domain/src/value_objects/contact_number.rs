//! Contact number and provider address value objects

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Server part of a WhatsApp user address (`<digits>@c.us`)
pub const CONTACT_SERVER: &str = "c.us";

/// Characters people type into phone fields that carry no meaning
const FORMATTING_CHARS: [char; 6] = ['+', '-', '(', ')', '.', ' '];

/// A human-entered phone number reduced to its digits
///
/// No length or country-code rules are applied here: whether the number
/// belongs to an account is decided by the messaging provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactNumber {
    digits: String,
}

impl ContactNumber {
    /// Normalize a raw number, dropping whitespace and formatting symbols
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let raw = raw.as_ref().trim();
        let digits: String = raw
            .chars()
            .filter(|c| !FORMATTING_CHARS.contains(c) && !c.is_whitespace())
            .collect();

        if digits.is_empty() {
            return Err(DomainError::InvalidPhoneNumber(
                "Phone number must contain digits".to_string(),
            ));
        }

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidPhoneNumber(format!(
                "Phone number may only contain digits and formatting symbols: {raw}"
            )));
        }

        Ok(Self { digits })
    }

    /// Digits only
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Provider address for this number
    pub fn to_address(&self) -> ContactAddress {
        ContactAddress {
            value: format!("{}@{CONTACT_SERVER}", self.digits),
        }
    }
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl TryFrom<String> for ContactNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ContactNumber {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContactNumber> for String {
    fn from(number: ContactNumber) -> Self {
        number.digits
    }
}

/// Address of a contact in the provider's format, e.g. `5511999998888@c.us`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContactAddress {
    value: String,
}

impl ContactAddress {
    /// Full address string
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// User part (before `@`)
    pub fn user(&self) -> &str {
        self.value
            .split_once('@')
            .map_or(self.value.as_str(), |(user, _)| user)
    }
}

impl fmt::Display for ContactAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&ContactNumber> for ContactAddress {
    fn from(number: &ContactNumber) -> Self {
        number.to_address()
    }
}
