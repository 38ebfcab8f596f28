//! String wrapper type.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// An immutable string wrapper with cheap cloning.
///
/// The contract required of this collaborator is small: constructible from
/// a raw string and convertible back. `Arc<str>` storage makes clones and
/// key/value sharing free.
#[derive(Debug, Clone)]
pub struct Str {
    inner: Arc<str>,
}

impl Str {
    /// Creates a new Str from anything string-shaped
    #[inline]
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Creates an empty Str
    #[inline]
    pub fn empty() -> Self {
        Self {
            inner: Arc::from(""),
        }
    }

    /// Returns the text as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Converts to an owned String
    #[inline]
    pub fn into_string(self) -> String {
        self.inner.to_string()
    }

    /// Returns the length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the text is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns a lowercased copy (used by non-strict search)
    pub fn to_lowercase(&self) -> Self {
        Self::new(self.inner.to_lowercase())
    }
}

impl Default for Str {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl PartialEq for Str {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Str {}

impl Hash for Str {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl PartialEq<&str> for Str {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<str> for Str {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl Borrow<str> for Str {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for Str {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Str {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Arc<str>> for Str {
    fn from(value: Arc<str>) -> Self {
        Self { inner: value }
    }
}

impl Serialize for Str {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_raw_strings() {
        let s = Str::new("orderly");
        assert_eq!(s.as_str(), "orderly");
        assert_eq!(s.into_string(), "orderly".to_string());
    }

    #[test]
    fn equality_against_raw_str() {
        assert_eq!(Str::new("abc"), "abc");
        assert_ne!(Str::new("abc"), "ABC");
    }

    #[test]
    fn lowercase() {
        assert_eq!(Str::new("FoO").to_lowercase(), "foo");
    }
}
