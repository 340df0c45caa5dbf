//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input is shorter than the minimum length.
    #[error("username must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input exceeds the maximum length.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a disallowed character.
    #[error("username may only contain letters, digits, '.', '_' and '-'")]
    InvalidCharacter,
}

/// A validated login username.
///
/// ## Constraints
///
/// - Length: 3-50 characters
/// - Allowed characters: ASCII letters, digits, `.`, `_`, `-`
///
/// Usernames are compared case-sensitively; uniqueness is enforced by the
/// store, not by this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Minimum length of a username.
    pub const MIN_LENGTH: usize = 3;

    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 50;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is outside the 3-50 character range or
    /// contains characters other than ASCII letters, digits, `.`, `_`, `-`.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        if s.len() < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Username::parse("priya").is_ok());
        assert!(Username::parse("priya.sharma_92").is_ok());
        assert!(Username::parse("a-b").is_ok());
    }

    #[test]
    fn test_parse_too_short() {
        assert_eq!(
            Username::parse("ab"),
            Err(UsernameError::TooShort { min: 3 })
        );
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(51);
        assert_eq!(
            Username::parse(&long),
            Err(UsernameError::TooLong { max: 50 })
        );
    }

    #[test]
    fn test_parse_invalid_characters() {
        assert_eq!(
            Username::parse("priya sharma"),
            Err(UsernameError::InvalidCharacter)
        );
        assert_eq!(
            Username::parse("priya@shop"),
            Err(UsernameError::InvalidCharacter)
        );
    }
}
