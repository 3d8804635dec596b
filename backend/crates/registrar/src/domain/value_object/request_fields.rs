//! Request Field Value Objects
//!
//! Validation types for the grade-correction request form: academic
//! cycle, level, course name/code (UE), and the optional comment.

use std::fmt;

/// Maximum length for the cycle label
pub const CYCLE_MAX_LENGTH: usize = 50;

/// Level bounds (fits a SMALLINT column)
pub const LEVEL_MAX: i64 = 32767;

/// Maximum length for the course name/code
pub const COURSE_CODE_MAX_LENGTH: usize = 2048;

/// Maximum length for the free-text comment
pub const COMMENT_MAX_LENGTH: usize = 5000;

/// Error returned when a request field fails validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFieldError {
    /// Required text field is empty after trimming
    Empty,

    /// Text field exceeds its maximum length
    TooLong { length: usize, max: usize },

    /// Level is outside [0, 32767]
    LevelOutOfRange { value: i64 },
}

impl fmt::Display for RequestFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Field cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Field is too long ({length} chars, maximum {max})")
            }
            Self::LevelOutOfRange { value } => {
                write!(f, "Level must be between 0 and {LEVEL_MAX} (got {value})")
            }
        }
    }
}

impl std::error::Error for RequestFieldError {}

fn bounded_text(input: &str, max: usize) -> Result<String, RequestFieldError> {
    let trimmed = input.trim().to_string();

    if trimmed.is_empty() {
        return Err(RequestFieldError::Empty);
    }

    let length = trimmed.chars().count();
    if length > max {
        return Err(RequestFieldError::TooLong { length, max });
    }

    Ok(trimmed)
}

/// Academic cycle label (Licence, Master, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(String);

impl Cycle {
    pub fn new(input: impl AsRef<str>) -> Result<Self, RequestFieldError> {
        Ok(Self(bounded_text(input.as_ref(), CYCLE_MAX_LENGTH)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Numeric level within the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level(i16);

impl Level {
    pub fn new(value: i64) -> Result<Self, RequestFieldError> {
        if !(0..=LEVEL_MAX).contains(&value) {
            return Err(RequestFieldError::LevelOutOfRange { value });
        }
        Ok(Self(value as i16))
    }

    pub fn value(&self) -> i16 {
        self.0
    }
}

/// Course name / code (UE)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(input: impl AsRef<str>) -> Result<Self, RequestFieldError> {
        Ok(Self(bounded_text(input.as_ref(), COURSE_CODE_MAX_LENGTH)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Optional free-text comment; a blank comment collapses to `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment(Option<String>);

impl Comment {
    pub fn new(input: Option<&str>) -> Result<Self, RequestFieldError> {
        let Some(raw) = input else {
            return Ok(Self(None));
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self(None));
        }

        let length = trimmed.chars().count();
        if length > COMMENT_MAX_LENGTH {
            return Err(RequestFieldError::TooLong {
                length,
                max: COMMENT_MAX_LENGTH,
            });
        }

        Ok(Self(Some(trimmed.to_string())))
    }

    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_bounds() {
        assert_eq!(Cycle::new("L3").unwrap().as_str(), "L3");
        assert!(matches!(Cycle::new(""), Err(RequestFieldError::Empty)));
        assert!(matches!(
            Cycle::new("c".repeat(CYCLE_MAX_LENGTH + 1)),
            Err(RequestFieldError::TooLong { .. })
        ));
    }

    #[test]
    fn test_level_range() {
        assert_eq!(Level::new(0).unwrap().value(), 0);
        assert_eq!(Level::new(3).unwrap().value(), 3);
        assert_eq!(Level::new(LEVEL_MAX).unwrap().value(), 32767);
        assert!(matches!(
            Level::new(-1),
            Err(RequestFieldError::LevelOutOfRange { value: -1 })
        ));
        assert!(matches!(
            Level::new(LEVEL_MAX + 1),
            Err(RequestFieldError::LevelOutOfRange { .. })
        ));
    }

    #[test]
    fn test_course_code_bounds() {
        assert_eq!(CourseCode::new("CS301").unwrap().as_str(), "CS301");
        assert!(matches!(
            CourseCode::new("  "),
            Err(RequestFieldError::Empty)
        ));
        assert!(matches!(
            CourseCode::new("x".repeat(COURSE_CODE_MAX_LENGTH + 1)),
            Err(RequestFieldError::TooLong { .. })
        ));
    }

    #[test]
    fn test_comment_optional() {
        assert_eq!(Comment::new(None).unwrap().into_inner(), None);
        assert_eq!(Comment::new(Some("   ")).unwrap().into_inner(), None);
        assert_eq!(
            Comment::new(Some("missing grade")).unwrap().into_inner(),
            Some("missing grade".to_string())
        );
        let long = "c".repeat(COMMENT_MAX_LENGTH + 1);
        assert!(matches!(
            Comment::new(Some(long.as_str())),
            Err(RequestFieldError::TooLong { .. })
        ));
    }
}
