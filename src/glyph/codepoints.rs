//! The Unicode codepoints mapped to a glyph.

use indexmap::IndexSet;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An ordered set of Unicode codepoints.
///
/// Order is kept and duplicates are dropped. The first codepoint is the
/// glyph's primary mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Codepoints(IndexSet<char>);

impl Codepoints {
    /// Create a set from anything that yields `char`s.
    ///
    /// ```
    /// # use fontdoc::Codepoints;
    /// let codepoints = Codepoints::new(['A', 'a', 'A']);
    /// assert_eq!(codepoints.len(), 2);
    /// ```
    pub fn new(src: impl IntoIterator<Item = char>) -> Self {
        Self(src.into_iter().collect())
    }

    /// The number of codepoints.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no codepoints.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first codepoint, if any.
    pub fn primary(&self) -> Option<char> {
        self.0.first().copied()
    }

    /// Replace all codepoints.
    pub fn set(&mut self, codepoints: impl IntoIterator<Item = char>) {
        self.0.clear();
        self.0.extend(codepoints);
    }

    /// Returns `true` if the codepoint is in the set.
    pub fn contains(&self, codepoint: char) -> bool {
        self.0.contains(&codepoint)
    }

    /// Add a codepoint at the end, returning `false` if it was already present.
    pub fn insert(&mut self, codepoint: char) -> bool {
        self.0.insert(codepoint)
    }

    /// Iterate over the codepoints in order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<char> for Codepoints {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Codepoints(iter.into_iter().collect())
    }
}

impl Serialize for Codepoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|c| *c as u32))
    }
}

impl<'de> Deserialize<'de> for Codepoints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<u32>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|v| {
                char::from_u32(v)
                    .ok_or_else(|| D::Error::custom(format!("invalid codepoint {v:#06X}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};

    use super::*;

    #[test]
    fn keeps_first_insertion_order() {
        let mut codepoints = Codepoints::new(['b', 'a']);
        assert!(!codepoints.insert('b'));
        assert!(codepoints.insert('c'));
        assert_eq!(codepoints.iter().collect::<String>(), "bac");
        assert_eq!(codepoints.primary(), Some('b'));
    }

    #[test]
    fn serialized_as_integers() {
        let codepoints = Codepoints::new(['A', 'é']);
        assert_tokens(
            &codepoints,
            &[Token::Seq { len: Some(2) }, Token::U32(0x41), Token::U32(0xE9), Token::SeqEnd],
        );
        assert_de_tokens_error::<Codepoints>(
            &[Token::Seq { len: Some(1) }, Token::U32(0xD800), Token::SeqEnd],
            "invalid codepoint 0xD800",
        );
    }
}
