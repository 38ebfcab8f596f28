//! Error types for primitive wrapper operations.
//!
//! A single self-contained error enum covers the whole crate; there is no
//! recovery or retry logic anywhere. Validation failures are programmer
//! errors and fail loudly, leaving the collection untouched.

use thiserror::Error;

use crate::key::Key;
use crate::kind::ValueKind;

/// Errors raised by collection and wrapper operations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrimitiveError {
    /// `restrict_to` was called in a state where restriction is illegal.
    #[error("invalid type restriction: {reason}")]
    InvalidTypeRestriction { reason: String },

    /// A value does not match the active type restriction.
    #[error("the value of kind {actual} doesn't match type restriction {expected}")]
    UnsupportedType {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// A key excluded by the allowed-keys list was read or written.
    #[error("forbidden key: {key}")]
    ForbiddenKey { key: Key },

    /// A value was rejected by a registered validator.
    #[error("value at key {key} did not pass validation: {reason}")]
    ForbiddenValue { key: Key, reason: String },

    /// An operation referenced a key that is not present.
    #[error("the key {key} was not found")]
    KeyNotFound { key: Key },

    /// Malformed argument, e.g. a flip value that cannot become a key.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    /// `first()` or `last()` on an empty collection.
    #[error("cannot call {operation}() on an empty collection")]
    Underflow { operation: &'static str },

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PrimitiveError {
    /// Create an invalid type restriction error
    pub fn invalid_type_restriction(reason: impl Into<String>) -> Self {
        Self::InvalidTypeRestriction {
            reason: reason.into(),
        }
    }

    /// Create an unsupported type error
    pub fn unsupported_type(expected: ValueKind, actual: ValueKind) -> Self {
        Self::UnsupportedType { expected, actual }
    }

    /// Create a forbidden key error
    pub fn forbidden_key(key: impl Into<Key>) -> Self {
        Self::ForbiddenKey { key: key.into() }
    }

    /// Create a forbidden value error
    pub fn forbidden_value(key: impl Into<Key>, reason: impl Into<String>) -> Self {
        Self::ForbiddenValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a key not found error
    pub fn key_not_found(key: impl Into<Key>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Create an underflow error
    pub fn underflow(operation: &'static str) -> Self {
        Self::Underflow { operation }
    }

    /// Get error code for monitoring
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTypeRestriction { .. } => "COLLECTION_INVALID_TYPE",
            Self::UnsupportedType { .. } => "COLLECTION_UNSUPPORTED_TYPE",
            Self::ForbiddenKey { .. } => "COLLECTION_FORBIDDEN_KEY",
            Self::ForbiddenValue { .. } => "COLLECTION_FORBIDDEN_VALUE",
            Self::KeyNotFound { .. } => "COLLECTION_KEY_NOT_FOUND",
            Self::InvalidParameter { .. } => "INVALID_PARAMETER",
            Self::Underflow { .. } => "COLLECTION_UNDERFLOW",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for PrimitiveError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Result type alias for primitive operations
pub type Result<T> = std::result::Result<T, PrimitiveError>;
