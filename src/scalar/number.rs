//! Numeric wrapper type.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// A numeric wrapper holding either an integer or a float.
///
/// Equality is numeric across representations: `Number::from(1)` equals
/// `Number::from(1.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// True when the underlying representation is an integer.
    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Returns the value as f64
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Int(i) => *i as f64,
            Self::Float(f) => *f,
        }
    }

    /// Returns the value as i64, if it is an integer
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(_) => None,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Parses integers first, then floats. Used by the `Number` auto-normalizer
/// to upgrade raw strings.
impl FromStr for Number {
    type Err = std::num::ParseFloatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Self::Int(i));
        }
        s.parse::<f64>().map(Self::Float)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_representation_equality() {
        assert_eq!(Number::from(1), Number::from(1.0));
        assert_ne!(Number::from(1), Number::from(1.5));
    }

    #[test]
    fn parses_ints_before_floats() {
        let n: Number = "42".parse().unwrap();
        assert!(n.is_integer());
        assert_eq!(n.as_i64(), Some(42));

        let n: Number = "4.25".parse().unwrap();
        assert!(!n.is_integer());
        assert_eq!(n.as_f64(), 4.25);
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!("not a number".parse::<Number>().is_err());
    }
}
