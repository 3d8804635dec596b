//! Matricule Value Object
//!
//! The matricule is the student's institutional identifier and the
//! alternate login key alongside email.
//!
//! ## Invariants
//! - Non-empty after trimming
//! - At most 15 characters
//! - ASCII alphanumeric plus `-`, `_`, `.`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a matricule (in characters)
pub const MATRICULE_MAX_LENGTH: usize = 15;

/// Allowed special characters in a matricule
const ALLOWED_SPECIAL_CHARS: &[char] = &['-', '_', '.'];

/// Error returned when matricule validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatriculeError {
    /// Matricule is empty after trimming
    Empty,

    /// Matricule is too long (maximum: MATRICULE_MAX_LENGTH)
    TooLong { length: usize, max: usize },

    /// Matricule contains an invalid character
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for MatriculeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Matricule cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Matricule is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only letters, digits, -, _, . are allowed"
                )
            }
        }
    }
}

impl std::error::Error for MatriculeError {}

/// Validated matricule
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Matricule(String);

impl Matricule {
    /// Create a new Matricule from raw input (trimmed, validated)
    pub fn new(input: impl AsRef<str>) -> Result<Self, MatriculeError> {
        let trimmed = input.as_ref().trim().to_string();
        Self::validate(&trimmed)?;
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

    fn validate(value: &str) -> Result<(), MatriculeError> {
        if value.is_empty() {
            return Err(MatriculeError::Empty);
        }

        let length = value.chars().count();
        if length > MATRICULE_MAX_LENGTH {
            return Err(MatriculeError::TooLong {
                length,
                max: MATRICULE_MAX_LENGTH,
            });
        }

        for (pos, ch) in value.chars().enumerate() {
            if !ch.is_ascii_alphanumeric() && !ALLOWED_SPECIAL_CHARS.contains(&ch) {
                return Err(MatriculeError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Matricule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matricule({})", self.0)
    }
}

impl fmt::Display for Matricule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Matricule {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Matricule {
    type Error = MatriculeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Matricule> for String {
    fn from(matricule: Matricule) -> Self {
        matricule.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_matricules() {
        assert!(Matricule::new("A123").is_ok());
        assert!(Matricule::new("20CS-042").is_ok());
        assert!(Matricule::new("u_p.2024").is_ok());
        assert_eq!(Matricule::new("  A123  ").unwrap().as_str(), "A123");
    }

    #[test]
    fn test_empty_fails() {
        assert!(matches!(Matricule::new(""), Err(MatriculeError::Empty)));
        assert!(matches!(Matricule::new("   "), Err(MatriculeError::Empty)));
    }

    #[test]
    fn test_length_boundary() {
        assert!(Matricule::new("a".repeat(MATRICULE_MAX_LENGTH)).is_ok());
        assert!(matches!(
            Matricule::new("a".repeat(MATRICULE_MAX_LENGTH + 1)),
            Err(MatriculeError::TooLong { length: 16, max: 15 })
        ));
    }

    #[test]
    fn test_invalid_characters() {
        assert!(matches!(
            Matricule::new("A 123"),
            Err(MatriculeError::InvalidCharacter { char: ' ', .. })
        ));
        assert!(matches!(
            Matricule::new("A123@"),
            Err(MatriculeError::InvalidCharacter { char: '@', .. })
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let matricule = Matricule::new("A123").unwrap();
        let json = serde_json::to_string(&matricule).unwrap();
        assert_eq!(json, "\"A123\"");
        let back: Matricule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matricule);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<Matricule, _> = serde_json::from_str("\"way too long matricule\"");
        assert!(result.is_err());
    }
}
