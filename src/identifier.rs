//! Object identifiers.

use std::fmt;
use std::sync::Arc;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::IdentifierError;

/// An identifier attached to a point, contour, component, anchor or guideline.
///
/// An identifier is at most 100 characters long, and every character is in
/// the printable ASCII range `0x20..=0x7E`. Uniqueness within a glyph is not
/// checked.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Identifier(Arc<str>);

impl Identifier {
    /// Create a new identifier, if the string is valid.
    pub fn new(string: &str) -> Result<Self, IdentifierError> {
        if is_valid(string) {
            Ok(Identifier(string.into()))
        } else {
            Err(IdentifierError(string.into()))
        }
    }

    /// Create a random identifier from a version 4 UUID.
    ///
    /// Objects that carry a lib need an identifier; this is how one is made
    /// when none was given.
    #[cfg(feature = "object-libs")]
    pub fn from_uuidv4() -> Self {
        let uuid = uuid::Uuid::new_v4();
        // hyphenated UUIDs are 36 ASCII characters, always valid
        Identifier(uuid.hyphenated().to_string().into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid(s: &str) -> bool {
    s.len() <= 100 && s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({:?})", &*self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for Identifier {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl std::str::FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::new(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Identifier, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Identifier::new(&string).map_err(de::Error::custom)
    }
}
