//! Phone Value Object
//!
//! Exactly 9 ASCII digits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Required number of digits
pub const PHONE_DIGITS: usize = 9;

/// Error returned when phone validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// Wrong number of digits
    WrongLength { length: usize, expected: usize },

    /// Contains a non-digit character
    NonDigit { char: char },
}

impl fmt::Display for PhoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { length, expected } => {
                write!(f, "Phone must contain exactly {expected} digits (got {length})")
            }
            Self::NonDigit { char } => {
                write!(f, "Phone must contain digits only (found '{char}')")
            }
        }
    }
}

impl std::error::Error for PhoneError {}

/// Validated phone number
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(input: impl AsRef<str>) -> Result<Self, PhoneError> {
        let trimmed = input.as_ref().trim().to_string();

        if let Some(ch) = trimmed.chars().find(|c| !c.is_ascii_digit()) {
            return Err(PhoneError::NonDigit { char: ch });
        }

        if trimmed.len() != PHONE_DIGITS {
            return Err(PhoneError::WrongLength {
                length: trimmed.len(),
                expected: PHONE_DIGITS,
            });
        }

        Ok(Self(trimmed))
    }

    /// Create from a database value (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Phone({})", self.0)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Phone {
    type Error = PhoneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}
