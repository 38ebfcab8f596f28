//! Value kind tags.
//!
//! Kinds are explicit capability tags used by `Collection::restrict_to` to
//! resolve the matching normalizer/validator pair at restriction time, so
//! the core never consults any global type table.

use std::fmt;

/// The kind of a [`Value`](crate::Value).
///
/// `Mixed` is a sentinel accepted only by
/// [`restrict_to`](crate::Collection::restrict_to), where it clears an
/// active restriction; no value ever reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Mixed,
    Null,
    Bool,
    Int,
    Float,
    Text,
    Number,
    Collection,
}

impl ValueKind {
    /// Stable lowercase name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mixed => "mixed",
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Number => "number",
            Self::Collection => "collection",
        }
    }

    /// True for kinds backed by a wrapper type that raw scalars can be
    /// normalized into (see the per-kind auto-normalizers).
    pub fn is_wrapper(&self) -> bool {
        matches!(self, Self::Text | Self::Number | Self::Collection)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_kinds() {
        assert!(ValueKind::Text.is_wrapper());
        assert!(ValueKind::Number.is_wrapper());
        assert!(ValueKind::Collection.is_wrapper());
        assert!(!ValueKind::Int.is_wrapper());
        assert!(!ValueKind::Mixed.is_wrapper());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(ValueKind::Collection.to_string(), "collection");
    }
}
