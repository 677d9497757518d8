//! The `DomString` text payload.
//!
//! DOM Level 1 defines `DOMString` as a sequence of UTF-16 code units. We
//! store text as UTF-8 (a Rust `String`) and expose UTF-16 semantics where
//! the DOM observes them: lengths and offsets used by character-data editing
//! are counted in UTF-16 code units.

use std::fmt;

use crate::error::DomError;

/// An immutable-by-default text value carried by nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct DomString(String);

impl DomString {
    /// Creates an empty string.
    #[must_use]
    pub fn new() -> Self {
        Self(String::new())
    }

    /// Returns the text as a `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the value and returns the underlying `String`.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the length in UTF-16 code units.
    ///
    /// # Examples
    ///
    /// ```
    /// use domcore::DomString;
    ///
    /// assert_eq!(DomString::from("abc").len_utf16(), 3);
    /// // U+1F600 is a surrogate pair in UTF-16.
    /// assert_eq!(DomString::from("\u{1F600}").len_utf16(), 2);
    /// ```
    #[must_use]
    pub fn len_utf16(&self) -> usize {
        self.0.encode_utf16().count()
    }

    /// Returns `true` if the string has no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encodes the string as UTF-16 code units.
    #[must_use]
    pub fn to_utf16(&self) -> Vec<u16> {
        self.0.encode_utf16().collect()
    }

    /// Decodes a UTF-16 code unit sequence.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCharacter` if `units` contains an unpaired surrogate.
    pub fn from_utf16(units: &[u16]) -> Result<Self, DomError> {
        String::from_utf16(units)
            .map(Self)
            .map_err(|_| DomError::invalid_character("unpaired surrogate in UTF-16 input"))
    }

    /// Maps a UTF-16 offset to a byte offset into the UTF-8 storage.
    ///
    /// Returns `None` if `offset` is past the end or falls inside a
    /// surrogate pair.
    pub(crate) fn byte_offset(&self, offset: usize) -> Option<usize> {
        let mut units = 0;
        for (byte, ch) in self.0.char_indices() {
            if units == offset {
                return Some(byte);
            }
            units += ch.len_utf16();
            if units > offset {
                return None;
            }
        }
        (units == offset).then_some(self.0.len())
    }

    pub(crate) fn as_mut_string(&mut self) -> &mut String {
        &mut self.0
    }
}

impl fmt::Display for DomString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DomString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for DomString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<DomString> for String {
    fn from(s: DomString) -> Self {
        s.0
    }
}

impl PartialEq<str> for DomString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DomString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
