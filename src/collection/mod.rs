//! The collection core: an insertion-ordered map/sequence hybrid with
//! pluggable normalization, validation, type restriction, key allow-lists
//! and merge-policy driven combination.
//!
//! Every mutation funnels through the same pipeline: value normalizers,
//! key normalizers, allowed-key check, validators, store. A failure at any
//! stage leaves the collection untouched.

pub mod iter;
pub mod merger;
pub mod normalizer;
pub mod validator;

pub use iter::{IntoIter, Iter};
pub use merger::{MergePolicy, ValueMerger};
pub use normalizer::{KeyNormalizer, Normalizer};
pub use validator::Validator;

use std::fmt;
use std::ops::ControlFlow;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::error::{PrimitiveError, Result};
use crate::key::Key;
use crate::kind::ValueKind;
use crate::scalar::Str;
use crate::value::Value;

/// An ordered map/sequence hybrid with object identity, validation hooks
/// and a fluent mutation API.
///
/// Keys keep the position they were first introduced at; overwriting a key
/// does not move it, and new keys append at the end of iteration order.
#[derive(Clone, Default)]
pub struct Collection {
    store: IndexMap<Key, Value>,
    restriction: Option<ValueKind>,
    allowed_keys: Vec<Key>,
    normalizers: Vec<Normalizer>,
    key_normalizers: Vec<KeyNormalizer>,
    validators: Vec<Validator>,
    mergers: IndexMap<Key, ValueMerger>,
}

impl Collection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: IndexMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Builds a collection from `(key, value)` pairs
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        entries.into_iter().collect()
    }

    /// Converts a value into a collection; identity on collections.
    ///
    /// Scalars wrap into a single-element collection, `Null` becomes an
    /// empty one.
    pub fn cast(value: impl Into<Collection>) -> Collection {
        value.into()
    }

    // ==================== Restriction ====================

    /// Restricts elements to a single kind, auto-normalizing raw input.
    ///
    /// Passing [`ValueKind::Mixed`] clears the restriction together with
    /// all normalizers and validators, after which a fresh restriction may
    /// be applied again.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTypeRestriction` when the collection is not empty
    /// or when normalizers/validators are already attached.
    pub fn restrict_to(&mut self, kind: ValueKind) -> Result<&mut Self> {
        self.restrict_to_with(kind, true)
    }

    /// Like [`restrict_to`](Self::restrict_to), but with control over
    /// whether the kind's auto-normalizer is registered alongside the
    /// validator.
    pub fn restrict_to_with(&mut self, kind: ValueKind, normalize: bool) -> Result<&mut Self> {
        if kind == ValueKind::Mixed {
            return Ok(self.clear_restrictions());
        }

        if !self.store.is_empty() {
            return Err(PrimitiveError::invalid_type_restriction(
                "type restriction could not be applied to a non empty collection",
            ));
        }

        if !self.normalizers.is_empty() || !self.validators.is_empty() {
            return Err(PrimitiveError::invalid_type_restriction(
                "type restriction can not be set while normalizers or validators are attached",
            ));
        }

        if normalize {
            if let Some(auto) = normalizer::for_kind(kind) {
                self.normalizers.push(auto);
            }
        }
        self.validators.push(Validator::for_kind(kind));
        self.restriction = Some(kind);
        trace!(kind = %kind, "type restriction applied");

        Ok(self)
    }

    /// Drops the active restriction and every normalizer and validator
    pub fn clear_restrictions(&mut self) -> &mut Self {
        self.restriction = None;
        self.normalizers.clear();
        self.validators.clear();
        trace!("restrictions cleared");
        self
    }

    /// Returns the restricted kind, if any
    pub fn kind(&self) -> Option<ValueKind> {
        self.restriction
    }

    // ==================== Allowed keys ====================

    /// Restricts readable and writable keys to the given set.
    /// An empty set removes the restriction.
    pub fn set_allowed_keys<I>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        self.allowed_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the allowed keys; empty means all keys are allowed
    pub fn allowed_keys(&self) -> &[Key] {
        &self.allowed_keys
    }

    /// Is the given key currently writable/readable?
    pub fn is_key_allowed(&self, key: &Key) -> bool {
        self.allowed_keys.is_empty() || self.allowed_keys.contains(key)
    }

    // ==================== Pipelines ====================

    /// Registers a value normalizer and re-normalizes stored values.
    pub fn add_normalizer<F>(&mut self, normalizer: F) -> &mut Self
    where
        F: Fn(&mut Value) + Send + Sync + 'static,
    {
        for value in self.store.values_mut() {
            normalizer(value);
        }
        self.normalizers.push(std::sync::Arc::new(normalizer));
        self
    }

    /// Registers a key normalizer and re-keys the current store.
    ///
    /// # Errors
    ///
    /// Returns `ForbiddenKey` if a normalized key falls outside the
    /// allowed set; the store is unchanged in that case.
    pub fn add_key_normalizer<F>(&mut self, normalizer: F) -> Result<&mut Self>
    where
        F: Fn(&mut Key) + Send + Sync + 'static,
    {
        let mut rekeyed: IndexMap<Key, Value> = IndexMap::with_capacity(self.store.len());
        for (key, value) in &self.store {
            let mut key = key.clone();
            normalizer(&mut key);
            if !self.is_key_allowed(&key) {
                return Err(PrimitiveError::forbidden_key(key));
            }
            rekeyed.insert(key, value.clone());
        }

        self.store = rekeyed;
        self.key_normalizers.push(std::sync::Arc::new(normalizer));
        Ok(self)
    }

    /// Registers a validator after checking it against all stored values.
    ///
    /// # Errors
    ///
    /// Fails atomically with `ForbiddenValue` (or `UnsupportedType` for
    /// kind validators) if any stored value does not pass; the validator
    /// is not registered in that case.
    pub fn add_validator(&mut self, validator: Validator) -> Result<&mut Self> {
        for (key, value) in &self.store {
            if !validator.check(value) {
                return Err(match validator.kind() {
                    Some(expected) => PrimitiveError::unsupported_type(expected, value.kind()),
                    None => PrimitiveError::forbidden_value(
                        key.clone(),
                        "stored value did not pass validation",
                    ),
                });
            }
        }
        self.validators.push(validator);
        Ok(self)
    }

    /// Drops all value normalizers
    pub fn clear_normalizers(&mut self) -> &mut Self {
        self.normalizers.clear();
        self
    }

    /// Drops all key normalizers
    pub fn clear_key_normalizers(&mut self) -> &mut Self {
        self.key_normalizers.clear();
        self
    }

    /// Drops all validators
    pub fn clear_validators(&mut self) -> &mut Self {
        self.validators.clear();
        self
    }

    // ==================== Mergers ====================

    /// Registers a merger for one or more keys, consulted by
    /// [`merge`](Self::merge) when both sides define the key.
    pub fn add_merger<I>(&mut self, keys: I, merger: ValueMerger) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        for key in keys {
            let mut key = key.into();
            for normalize in &self.key_normalizers {
                normalize(&mut key);
            }
            self.mergers.insert(key, merger);
        }
        self
    }

    /// Returns the merger registered for a key, if any
    pub fn merger_for(&self, key: &Key) -> Option<&ValueMerger> {
        self.mergers.get(key)
    }

    // ==================== The set/get pipeline ====================

    /// Defines a key and associates a value to it.
    ///
    /// The value runs through every normalizer in registration order, the
    /// key through every key normalizer, then the allowed-key check and
    /// every validator. A new key appends at the end of iteration order;
    /// an existing key is overwritten in place.
    ///
    /// # Errors
    ///
    /// `ForbiddenKey` for keys outside the allowed set, `ForbiddenValue` /
    /// `UnsupportedType` for values failing validation. The store is
    /// unchanged on failure.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Result<&mut Self> {
        let mut value = value.into();
        for normalize in &self.normalizers {
            normalize(&mut value);
        }

        let mut key = key.into();
        for normalize in &self.key_normalizers {
            normalize(&mut key);
        }

        if !self.is_key_allowed(&key) {
            return Err(PrimitiveError::forbidden_key(key));
        }

        for validator in &self.validators {
            if !validator.check(&value) {
                return Err(match validator.kind() {
                    Some(expected) => PrimitiveError::unsupported_type(expected, value.kind()),
                    None => PrimitiveError::forbidden_value(key, "new value did not pass validation"),
                });
            }
        }

        self.store.insert(key, value);
        Ok(self)
    }

    /// Returns the value stored at `key`.
    ///
    /// An absent key yields `Ok(None)` when readable.
    ///
    /// # Errors
    ///
    /// `ForbiddenKey` when the key is absent and outside the allowed set.
    pub fn get(&self, key: impl Into<Key>) -> Result<Option<&Value>> {
        let key = key.into();
        match self.store.get(&key) {
            Some(value) => Ok(Some(value)),
            None if !self.is_key_allowed(&key) => Err(PrimitiveError::forbidden_key(key)),
            None => Ok(None),
        }
    }

    /// Like [`get`](Self::get), with a default for absent-but-allowed keys
    pub fn get_or<'a>(&'a self, key: impl Into<Key>, default: &'a Value) -> Result<&'a Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Is the given key set? A key explicitly set to null counts as
    /// present.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.store.contains_key(&key.into())
    }

    /// Is the given key missing?
    pub fn lacks(&self, key: impl Into<Key>) -> bool {
        !self.has(key)
    }

    // ==================== Basic state ====================

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when no entries are stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Removes all entries, keeping restrictions and pipelines
    pub fn clear(&mut self) -> &mut Self {
        self.store.clear();
        self
    }

    /// Removes the entry at `key`, preserving the order of the rest.
    /// Returns the removed value, if the key was present.
    pub fn delete(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.store.shift_remove(&key.into())
    }

    /// Removes every entry whose value matches `value` (loose comparison
    /// by default, exact when `strict`).
    pub fn remove(&mut self, value: impl Into<Value>, strict: bool) -> &mut Self {
        let needle = value.into();
        self.store.retain(|_, stored| {
            if strict {
                *stored != needle
            } else {
                !stored.loose_eq(&needle)
            }
        });
        self
    }

    /// Returns an independent copy; mutations on the copy do not affect
    /// the original.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // ==================== Bulk operations ====================

    /// Iterates entries in order, passing each value mutably.
    ///
    /// Returning [`ControlFlow::Break`] from the callback terminates the
    /// iteration early. Mutations applied by the callback bypass the
    /// validation pipeline, as direct reference mutation always does.
    pub fn each<F>(&mut self, mut callback: F) -> &mut Self
    where
        F: FnMut(&mut Value, &Key) -> ControlFlow<()>,
    {
        for (key, value) in &mut self.store {
            if callback(value, key).is_break() {
                break;
            }
        }
        self
    }

    /// Returns a new collection keeping entries the predicate accepts.
    /// Surviving entries keep their keys; the restriction and pipelines
    /// carry over.
    pub fn filter<F>(&self, predicate: F) -> Collection
    where
        F: Fn(&Value, &Key) -> bool,
    {
        let mut filtered = self.fresh_like();
        for (key, value) in &self.store {
            if predicate(value, key) {
                filtered.store.insert(key.clone(), value.clone());
            }
        }
        filtered
    }

    /// [`filter`](Self::filter) with the default truthiness predicate
    pub fn filter_default(&self) -> Collection {
        self.filter(|value, _| value.is_truthy())
    }

    /// Returns a new collection with the same keys and mapped values.
    ///
    /// # Errors
    ///
    /// Mapped values still run through the full pipeline, so a value
    /// violating the restriction fails the whole operation.
    pub fn map<F>(&self, callback: F) -> Result<Collection>
    where
        F: Fn(&Value, &Key) -> Value,
    {
        let mut mapped = self.fresh_like();
        for (key, value) in &self.store {
            mapped.set(key.clone(), callback(value, key))?;
        }
        Ok(mapped)
    }

    /// Inverts keys and values.
    ///
    /// Truthy entries become `value => key`. Falsy entries cannot land on
    /// a usable key (and would all collide), so they are emitted after the
    /// truthy ones at the next free integer index, which keeps them clear
    /// of any integer keys the truthy pass produced.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when a truthy value's kind cannot act as a key.
    pub fn flip(&self) -> Result<Collection> {
        let mut flipped = Collection::new();

        for (key, value) in &self.store {
            if value.is_falsy() {
                continue;
            }
            let new_key = value.as_key().ok_or_else(|| {
                PrimitiveError::invalid_parameter(format!(
                    "value of kind {} cannot be used as a key",
                    value.kind()
                ))
            })?;
            flipped.store.insert(new_key, Value::from(key.clone()));
        }

        for (key, value) in &self.store {
            if value.is_falsy() {
                let index = flipped.next_index();
                flipped.store.insert(index, Value::from(key.clone()));
            }
        }

        Ok(flipped)
    }

    /// Merges another collection into a copy of this one.
    ///
    /// For keys present on both sides, a registered merger computes the
    /// incoming value; otherwise the other side wins. All incoming entries
    /// run through the pipeline.
    ///
    /// # Errors
    ///
    /// Propagates pipeline and merger errors; `self` is never mutated.
    pub fn merge(&self, other: impl Into<Collection>) -> Result<Collection> {
        let other = other.into();
        trace!(incoming = other.len(), existing = self.len(), "merging collections");

        let mut merged = self.clone();
        for (key, incoming) in other.store {
            let value = match (self.store.get(&key), self.mergers.get(&key)) {
                (Some(existing), Some(merger)) => merger.merge(existing, &incoming)?,
                _ => incoming,
            };
            merged.set(key, value)?;
        }
        Ok(merged)
    }

    /// Combines with another collection, keeping this side's value when a
    /// key exists on both sides (first wins, unlike [`merge`](Self::merge)).
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors for the entries actually taken.
    pub fn union(&self, other: impl Into<Collection>) -> Result<Collection> {
        let other = other.into();
        let mut combined = self.clone();
        for (key, value) in other.store {
            if !combined.store.contains_key(&key) {
                combined.set(key, value)?;
            }
        }
        Ok(combined)
    }

    /// Appends values at the end of the sequence, each taking the next
    /// integer index and passing the full pipeline.
    ///
    /// # Errors
    ///
    /// Pipeline errors abort before the failing value is stored.
    pub fn append<I>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        for value in values {
            let key = self.next_index();
            self.set(key, value)?;
        }
        Ok(self)
    }

    /// Puts values at the beginning of the sequence.
    ///
    /// Integer keys are renumbered from 0 in resulting order; string keys
    /// are preserved. Every entry, existing ones included, re-runs the
    /// pipeline.
    ///
    /// # Errors
    ///
    /// Pipeline errors leave the collection unchanged.
    pub fn prepend<I>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut rebuilt = self.fresh_like();
        for value in values {
            let key = rebuilt.next_index();
            rebuilt.set(key, value)?;
        }
        for (key, value) in &self.store {
            match key {
                Key::Int(_) => {
                    let key = rebuilt.next_index();
                    rebuilt.set(key, value.clone())?;
                }
                Key::Str(_) => {
                    rebuilt.set(key.clone(), value.clone())?;
                }
            }
        }

        self.store = rebuilt.store;
        Ok(self)
    }

    /// Returns a new collection of the keys, re-indexed numerically
    pub fn keys(&self) -> Collection {
        self.store
            .keys()
            .cloned()
            .map(Value::from)
            .enumerate()
            .collect()
    }

    /// Returns a new collection of the values, re-indexed numerically
    pub fn values(&self) -> Collection {
        self.store.values().cloned().enumerate().collect()
    }

    /// Searches a value and returns its key.
    ///
    /// Non-strict search compares strings case-insensitively and numerics
    /// numerically; strict search requires exact kind and value equality.
    /// `None` means not found and is never confused with a real key of
    /// `0`.
    pub fn search(&self, value: impl Into<Value>, strict: bool) -> Option<Key> {
        let needle = value.into();
        self.store
            .iter()
            .find(|(_, stored)| {
                if strict {
                    **stored == needle
                } else {
                    stored.loose_eq(&needle)
                }
            })
            .map(|(key, _)| key.clone())
    }

    /// Does the collection contain the given value?
    pub fn contains(&self, value: impl Into<Value>, strict: bool) -> bool {
        self.search(value, strict).is_some()
    }

    /// Returns the first value in insertion order, which is not
    /// necessarily the one at the lowest numeric key.
    ///
    /// # Errors
    ///
    /// `Underflow` on an empty collection.
    pub fn first(&self) -> Result<&Value> {
        self.store
            .first()
            .map(|(_, value)| value)
            .ok_or_else(|| PrimitiveError::underflow("first"))
    }

    /// Returns the last value in insertion order.
    ///
    /// # Errors
    ///
    /// `Underflow` on an empty collection.
    pub fn last(&self) -> Result<&Value> {
        self.store
            .last()
            .map(|(_, value)| value)
            .ok_or_else(|| PrimitiveError::underflow("last"))
    }

    /// Replaces the key `from` with `to`, preserving the entry's position
    /// and the order of all other entries. Any entry already stored under
    /// `to` is dropped.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` when `from` is absent, `ForbiddenKey` when `to` is
    /// outside the allowed set.
    pub fn rename(&mut self, from: impl Into<Key>, to: impl Into<Key>) -> Result<&mut Self> {
        let from = from.into();
        let to = to.into();

        if !self.store.contains_key(&from) {
            return Err(PrimitiveError::key_not_found(from));
        }
        if from == to {
            return Ok(self);
        }
        if !self.is_key_allowed(&to) {
            return Err(PrimitiveError::forbidden_key(to));
        }

        self.store.shift_remove(&to);
        if let Some(index) = self.store.get_index_of(&from) {
            if let Some((_, value)) = self.store.shift_remove_index(index) {
                self.store.shift_insert(index, to, value);
            }
        }

        Ok(self)
    }

    /// Concatenates the values' string forms with `glue`, producing a
    /// [`Str`] wrapper.
    pub fn join(&self, glue: &str) -> Str {
        let joined = self
            .store
            .values()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(glue);
        Str::new(joined)
    }

    /// Serializes recursively into a JSON value; nested collections become
    /// maps, wrappers their scalar form. Non-finite floats come out as
    /// JSON null, as `serde_json` maps them.
    ///
    /// # Errors
    ///
    /// `Serialization` when the conversion fails.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    // ==================== Internals ====================

    /// Empty collection carrying this one's restriction, pipelines,
    /// allowed keys and mergers.
    fn fresh_like(&self) -> Collection {
        Collection {
            store: IndexMap::new(),
            restriction: self.restriction,
            allowed_keys: self.allowed_keys.clone(),
            normalizers: self.normalizers.clone(),
            key_normalizers: self.key_normalizers.clone(),
            validators: self.validators.clone(),
            mergers: self.mergers.clone(),
        }
    }

    /// Next free integer index, as sequence-style appends allocate it
    fn next_index(&self) -> Key {
        let next = self
            .store
            .keys()
            .filter_map(Key::as_int)
            .max()
            .map_or(0, |max| if max < 0 { 0 } else { max + 1 });
        Key::Int(next)
    }

    pub(crate) fn store(&self) -> &IndexMap<Key, Value> {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut IndexMap<Key, Value> {
        &mut self.store
    }

    pub(crate) fn into_store(self) -> IndexMap<Key, Value> {
        self.store
    }
}

/// Equality compares contents and order, not restrictions or pipelines.
impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.store.len() == other.store.len()
            && self.store.iter().zip(other.store.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("store", &self.store)
            .field("restriction", &self.restriction)
            .field("allowed_keys", &self.allowed_keys)
            .field("normalizers", &self.normalizers.len())
            .field("key_normalizers", &self.key_normalizers.len())
            .field("validators", &self.validators.len())
            .field("mergers", &self.mergers.len())
            .finish()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} entries}}", self.len())
    }
}

impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        match value {
            Value::Collection(collection) => collection,
            Value::Null => Collection::new(),
            scalar => {
                let mut collection = Collection::new();
                collection.store.insert(Key::Int(0), scalar);
                collection
            }
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Collection {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().map(Into::into).enumerate().collect()
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Collection {
    fn from(values: [T; N]) -> Self {
        values.into_iter().map(Into::into).enumerate().collect()
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.store.len()))?;
        for (key, value) in &self.store {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_appends_new_keys_and_overwrites_in_place() {
        let mut collection = Collection::new();
        collection.set("b", 1).unwrap();
        collection.set("a", 2).unwrap();
        collection.set("b", 3).unwrap();

        let keys: Vec<_> = collection.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![Key::from("b"), Key::from("a")]);
        assert_eq!(collection.get("b").unwrap(), Some(&Value::from(3)));
    }

    #[test]
    fn next_index_skips_string_keys() {
        let mut collection = Collection::new();
        collection.set("name", "x").unwrap();
        collection.append(["first"]).unwrap();
        collection.append(["second"]).unwrap();

        assert_eq!(collection.get(0).unwrap(), Some(&Value::from("first")));
        assert_eq!(collection.get(1).unwrap(), Some(&Value::from("second")));
    }

    #[test]
    fn fresh_like_carries_restriction() {
        let mut collection = Collection::new();
        collection.restrict_to(ValueKind::Text).unwrap();
        let fresh = collection.fresh_like();
        assert_eq!(fresh.kind(), Some(ValueKind::Text));
        assert!(fresh.is_empty());
    }

    #[test]
    fn display_counts_entries() {
        let collection = Collection::from(["a", "b"]);
        assert_eq!(collection.to_string(), "{2 entries}");
    }
}
