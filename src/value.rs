//! The element model stored in collections.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::collection::Collection;
use crate::key::Key;
use crate::kind::ValueKind;
use crate::scalar::{Number, Str};

/// A value held by a [`Collection`]: a plain scalar, a wrapper instance,
/// or a nested collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Str),
    Number(Number),
    Collection(Collection),
}

impl Value {
    /// Returns the kind tag of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Number(_) => ValueKind::Number,
            Self::Collection(_) => ValueKind::Collection,
        }
    }

    /// Returns true if the value is null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Falsy values: null, false, zero, the empty string and the empty
    /// collection. Drives the default `filter` predicate and the `flip`
    /// null-handling.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Bool(b) => !b,
            Self::Int(i) => *i == 0,
            Self::Float(f) => *f == 0.0,
            Self::Text(t) => t.is_empty(),
            Self::Number(n) => n.as_f64() == 0.0,
            Self::Collection(c) => c.is_empty(),
        }
    }

    /// Negation of [`is_falsy`](Self::is_falsy)
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !self.is_falsy()
    }

    /// Non-strict equality: strings compare case-insensitively, numeric
    /// values compare numerically across `Int`, `Float` and `Number`.
    /// Everything else falls back to exact equality, so `false` never
    /// matches `0` and a match at key `0` is a real match.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if let (Some(a), Some(b)) = (self.numeric_value(), other.numeric_value()) {
            return a == b;
        }

        match (self, other) {
            (Self::Text(a), Self::Text(b)) => {
                a.as_str().to_lowercase() == b.as_str().to_lowercase()
            }
            _ => self == other,
        }
    }

    /// Returns this value as a map key, when its kind allows it.
    /// Integers, text and integer-represented numbers are keyable.
    pub fn as_key(&self) -> Option<Key> {
        match self {
            Self::Int(i) => Some(Key::Int(*i)),
            Self::Text(t) => Some(Key::from(t.as_str())),
            Self::Number(n) => n.as_i64().map(Key::Int),
            _ => None,
        }
    }

    /// Returns a reference to the nested collection, if any
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// Converts this value into a [`Collection`].
    ///
    /// Collections pass through untouched, `Null` yields an empty
    /// collection and any other value wraps into a single-element one.
    pub fn into_collection(self) -> Collection {
        Collection::from(self)
    }

    fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }
}

/// String form used by [`Collection::join`](crate::Collection::join).
/// `Null` renders as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(t) => write!(f, "{t}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Collection(c) => write!(f, "{c}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(Str::new(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(Str::new(value))
    }
}

impl From<Str> for Value {
    fn from(value: Str) -> Self {
        Self::Text(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<Collection> for Value {
    fn from(value: Collection) -> Self {
        Self::Collection(value)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(i) => Self::Int(i),
            Key::Str(s) => Self::Text(Str::from(s)),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Text(t) => t.serialize(serializer),
            Self::Number(n) => n.serialize(serializer),
            Self::Collection(c) => c.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsiness_covers_null_zero_and_empty() {
        assert!(Value::Null.is_falsy());
        assert!(Value::from(false).is_falsy());
        assert!(Value::from(0).is_falsy());
        assert!(Value::from("").is_falsy());
        assert!(Value::from(0.0).is_falsy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::from(-1).is_truthy());
    }

    #[test]
    fn loose_eq_is_case_insensitive_for_text() {
        assert!(Value::from("Foo").loose_eq(&Value::from("foo")));
        assert!(!Value::from("Foo").loose_eq(&Value::from("bar")));
    }

    #[test]
    fn loose_eq_compares_numerics_across_kinds() {
        assert!(Value::from(1).loose_eq(&Value::from(1.0)));
        assert!(Value::from(Number::from(2)).loose_eq(&Value::from(2)));
    }

    #[test]
    fn loose_eq_never_juggles_bool_and_zero() {
        assert!(!Value::from(false).loose_eq(&Value::from(0)));
        assert!(!Value::from(0).loose_eq(&Value::from(false)));
    }

    #[test]
    fn keyable_values() {
        assert_eq!(Value::from(3).as_key(), Some(Key::Int(3)));
        assert_eq!(Value::from("a").as_key(), Some(Key::from("a")));
        assert_eq!(Value::from(1.5).as_key(), None);
        assert_eq!(Value::Null.as_key(), None);
    }

    #[test]
    fn display_renders_null_empty() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from("a").to_string(), "a");
        assert_eq!(Value::from(5).to_string(), "5");
    }
}
