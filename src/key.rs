//! Map keys: integers or strings.
//!
//! Collection keys cover the two shapes a map/sequence hybrid needs.
//! String keys are `Arc<str>` so that keys can be cloned cheaply into
//! derived collections (`keys()`, merger registries, allow-lists).

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// A collection key: either an integer index or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Int(i64),
    Str(Arc<str>),
}

impl Key {
    /// Returns the integer form of the key, if it is an integer.
    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Str(_) => None,
        }
    }

    /// Returns the string form of the key, if it is a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Str(Arc::from(value))
    }
}

impl From<Arc<str>> for Key {
    fn from(value: Arc<str>) -> Self {
        Self::Str(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Str(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_str_keys_are_distinct() {
        assert_ne!(Key::from(0), Key::from("0"));
        assert_eq!(Key::from(7), Key::Int(7));
        assert_eq!(Key::from("a"), Key::from("a".to_string()));
    }

    #[test]
    fn accessors() {
        assert_eq!(Key::from(3).as_int(), Some(3));
        assert_eq!(Key::from(3).as_str(), None);
        assert_eq!(Key::from("x").as_str(), Some("x"));
    }
}
