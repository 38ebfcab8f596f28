//! Value validators.

use std::fmt;
use std::sync::Arc;

use crate::kind::ValueKind;
use crate::value::Value;

/// A predicate every stored value must satisfy.
///
/// Validators registered through `restrict_to` remember the kind they
/// assert, so a failure can be reported as `UnsupportedType` rather than a
/// generic `ForbiddenValue`.
#[derive(Clone)]
pub struct Validator {
    kind: Option<ValueKind>,
    check: Arc<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Validator {
    /// Creates a validator from an arbitrary predicate
    pub fn new(check: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            kind: None,
            check: Arc::new(check),
        }
    }

    /// The kind-check validator installed by `restrict_to`
    pub(crate) fn for_kind(kind: ValueKind) -> Self {
        Self {
            kind: Some(kind),
            check: Arc::new(move |value| value.kind() == kind),
        }
    }

    /// Runs the predicate
    #[inline]
    pub fn check(&self, value: &Value) -> bool {
        (self.check)(value)
    }

    /// The kind this validator asserts, when it is a restriction validator
    #[inline]
    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").field("kind", &self.kind).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_validator_checks_kind() {
        let v = Validator::for_kind(ValueKind::Text);
        assert!(v.check(&Value::from("ok")));
        assert!(!v.check(&Value::from(1)));
        assert_eq!(v.kind(), Some(ValueKind::Text));
    }

    #[test]
    fn custom_validator_has_no_kind() {
        let v = Validator::new(|value| value.is_truthy());
        assert!(v.check(&Value::from(1)));
        assert!(!v.check(&Value::Null));
        assert_eq!(v.kind(), None);
    }
}
