//! Names for glyphs and layers.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::NamingError;

/// The name of a [`Glyph`] or a [`Layer`].
///
/// A name is at least one character long and contains no control characters
/// (`0x00..=0x1F`, `0x7F` and `0x80..=0x9F`).
///
/// Names are reference counted, so cloning one never copies the underlying
/// string. A `Name` derefs to `&str`.
///
/// [`Glyph`]: crate::Glyph
/// [`Layer`]: crate::Layer
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Name(Arc<str>);

impl Name {
    /// Create a new `Name`, checking that it is non-empty and free of control
    /// characters.
    pub fn new(name: &str) -> Result<Name, NamingError> {
        if is_valid(name) {
            Ok(Name(name.into()))
        } else {
            Err(NamingError::Invalid(name.into()))
        }
    }

    /// Create a new `Name`, panicking if it is invalid.
    ///
    /// Only use this with names known to be valid, such as string literals.
    pub(crate) fn new_raw(name: &str) -> Name {
        assert!(is_valid(name), "invalid name '{name}'");
        Name(name.into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid(name: &str) -> bool {
    // chars, not bytes: multi-byte UTF-8 sequences contain bytes in the
    // control ranges.
    !name.is_empty() && !name.chars().any(is_control)
}

fn is_control(c: char) -> bool {
    matches!(c as u32, 0x00..=0x1F | 0x7F | 0x80..=0x9F)
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for Name {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Name {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl PartialEq<Name> for &str {
    fn eq(&self, other: &Name) -> bool {
        *self == &*other.0
    }
}

impl FromStr for Name {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Name::new(s)
    }
}

impl TryFrom<&str> for Name {
    type Error = NamingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Name::new(value)
    }
}

impl TryFrom<String> for Name {
    type Error = NamingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid(&value) {
            Ok(Name(value.into()))
        } else {
            Err(NamingError::Invalid(value))
        }
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Name, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Name::try_from(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_with_str() {
        assert_eq!(Name::new_raw("a"), "a");
        assert_eq!("a.alt", Name::new_raw("a.alt"));
        assert_eq!(vec![Name::new_raw("x"), Name::new_raw("y")], vec!["x", "y"]);
    }

    #[test]
    fn rejects_empty_and_control() {
        assert_eq!(Name::new(""), Err(NamingError::Invalid(String::new())));
        assert!(Name::new("tab\tname").is_err());
        assert!(Name::new("del\u{7f}").is_err());
        assert!(Name::new("c1\u{85}").is_err());
    }

    #[test]
    fn accepts_non_ascii() {
        let name = Name::new("é.sc").unwrap();
        assert_eq!(name.as_str(), "é.sc");
        assert!(Name::new("hi 💖").is_ok());
    }

    #[test]
    fn deserialize_validates() {
        use serde_test::{assert_de_tokens_error, assert_tokens, Token};
        assert_tokens(&Name::new_raw("A"), &[Token::Str("A")]);
        assert_de_tokens_error::<Name>(&[Token::Str("")], "'' is not a valid name");
    }
}
