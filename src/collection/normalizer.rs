//! Value and key normalizers.
//!
//! Normalizers run before validation on every insertion, so raw input can
//! be auto-upgraded into the kind a restriction demands without callers
//! pre-wrapping every value. A normalizer that cannot make sense of its
//! input leaves the value untouched and lets the validator reject it.

use std::sync::Arc;

use crate::collection::Collection;
use crate::key::Key;
use crate::kind::ValueKind;
use crate::scalar::{Number, Str};
use crate::value::Value;

/// A value transform applied on insertion, in registration order.
pub type Normalizer = Arc<dyn Fn(&mut Value) + Send + Sync>;

/// A key transform applied on insertion, in registration order.
pub type KeyNormalizer = Arc<dyn Fn(&mut Key) + Send + Sync>;

/// Returns the auto-normalizer registered by `restrict_to` for wrapper
/// kinds; plain scalar kinds get a validator only.
pub(crate) fn for_kind(kind: ValueKind) -> Option<Normalizer> {
    match kind {
        ValueKind::Text => Some(Arc::new(text_normalizer)),
        ValueKind::Number => Some(Arc::new(number_normalizer)),
        ValueKind::Collection => Some(Arc::new(collection_normalizer)),
        _ => None,
    }
}

/// Wraps scalars into `Str` via their string form. Nested collections are
/// left alone; the kind validator rejects them downstream.
fn text_normalizer(value: &mut Value) {
    match value {
        Value::Text(_) | Value::Collection(_) => {}
        other => *other = Value::Text(Str::new(other.to_string())),
    }
}

/// Upgrades raw numerics and parseable strings into `Number`.
fn number_normalizer(value: &mut Value) {
    match value {
        Value::Number(_) => {}
        Value::Int(i) => *value = Value::Number(Number::Int(*i)),
        Value::Float(f) => *value = Value::Number(Number::Float(*f)),
        Value::Text(t) => {
            if let Ok(n) = t.as_str().parse::<Number>() {
                *value = Value::Number(n);
            }
        }
        _ => {}
    }
}

/// Wraps any non-collection value into a single-element collection.
fn collection_normalizer(value: &mut Value) {
    if !matches!(value, Value::Collection(_)) {
        let scalar = std::mem::take(value);
        *value = Value::Collection(Collection::from(vec![scalar]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_normalizer_wraps_scalars() {
        let normalize = for_kind(ValueKind::Text).unwrap();

        let mut value = Value::from(42);
        normalize(&mut value);
        assert_eq!(value, Value::from("42"));

        let mut value = Value::from("kept");
        normalize(&mut value);
        assert_eq!(value, Value::from("kept"));
    }

    #[test]
    fn number_normalizer_parses_strings() {
        let normalize = for_kind(ValueKind::Number).unwrap();

        let mut value = Value::from("3.5");
        normalize(&mut value);
        assert_eq!(value, Value::Number(Number::Float(3.5)));

        // unparseable input is left for the validator to reject
        let mut value = Value::from("not numeric");
        normalize(&mut value);
        assert_eq!(value, Value::from("not numeric"));
    }

    #[test]
    fn collection_normalizer_wraps_scalars() {
        let normalize = for_kind(ValueKind::Collection).unwrap();

        let mut value = Value::from("lone");
        normalize(&mut value);
        let collection = value.as_collection().expect("wrapped");
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn plain_kinds_have_no_normalizer() {
        assert!(for_kind(ValueKind::Int).is_none());
        assert!(for_kind(ValueKind::Bool).is_none());
    }
}
