//! Person Name Value Object
//!
//! Given and family names: letters (any script), spaces, hyphens, and
//! apostrophes, at most 255 characters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a name (in characters)
pub const NAME_MAX_LENGTH: usize = 255;

/// Error returned when name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonNameError {
    /// Name is empty after trimming
    Empty,

    /// Name is too long (maximum: NAME_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Name contains an invalid character
    InvalidCharacter { char: char },
}

impl fmt::Display for PersonNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char } => {
                write!(
                    f,
                    "Invalid character '{char}'. Only letters, spaces, hyphens and apostrophes are allowed"
                )
            }
        }
    }
}

impl std::error::Error for PersonNameError {}

/// Validated person name (given or family)
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, PersonNameError> {
        let trimmed = input.as_ref().trim().to_string();

        if trimmed.is_empty() {
            return Err(PersonNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > NAME_MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                length,
                max: NAME_MAX_LENGTH,
            });
        }

        for ch in trimmed.chars() {
            if !ch.is_alphabetic() && ch != ' ' && ch != '-' && ch != '\'' {
                return Err(PersonNameError::InvalidCharacter { char: ch });
            }
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

impl fmt::Debug for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersonName({})", self.0)
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = PersonNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> Self {
        name.0
    }
}
