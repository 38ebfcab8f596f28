//! Merge policies and the value merger.
//!
//! A [`ValueMerger`] is a stateless strategy consulted by
//! [`Collection::merge`](crate::Collection::merge) for keys that both sides
//! define. `merge(first, second)` is a pure function of its inputs and the
//! configured policy.

use crate::collection::Collection;
use crate::error::Result;
use crate::value::Value;

/// How two values combine when their keys collide during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergePolicy {
    /// Native merge when the first value is a collection, replace otherwise
    Auto,
    /// Second value wins
    Replace,
    /// Collect both values into a collection, appending to the first value
    /// when it already is one
    Combine,
    /// Keep the first value unless it is null
    Skip,
    /// Key-wise union of both sides, first wins on collision
    Add,
    /// Key-wise merge of both sides, second wins on collision
    Native,
}

/// Stateless two-value merger driven by a [`MergePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueMerger {
    policy: MergePolicy,
}

impl ValueMerger {
    /// Creates a merger for the given policy
    pub fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    /// Returns the configured policy
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Merges two values according to the configured policy.
    ///
    /// Non-collection inputs of the key-wise policies (`Add`, `Native`) are
    /// cast to collections first, so the result of those policies is always
    /// a collection value.
    ///
    /// # Errors
    ///
    /// Propagates pipeline errors when combining into a restricted
    /// collection.
    pub fn merge(&self, first: &Value, second: &Value) -> Result<Value> {
        match self.policy {
            MergePolicy::Replace => Ok(second.clone()),

            MergePolicy::Skip => {
                if first.is_null() {
                    Ok(second.clone())
                } else {
                    Ok(first.clone())
                }
            }

            MergePolicy::Combine => match first {
                Value::Collection(collection) => {
                    let mut combined = collection.clone();
                    combined.append([second.clone()])?;
                    Ok(Value::Collection(combined))
                }
                other => Ok(Value::Collection(Collection::from(vec![
                    other.clone(),
                    second.clone(),
                ]))),
            },

            MergePolicy::Add => {
                let first = first.clone().into_collection();
                let second = second.clone().into_collection();
                Ok(Value::Collection(first.union(second)?))
            }

            MergePolicy::Native => {
                let first = first.clone().into_collection();
                let second = second.clone().into_collection();
                Ok(Value::Collection(first.merge(second)?))
            }

            MergePolicy::Auto => {
                let effective = if matches!(first, Value::Collection(_)) {
                    Self::new(MergePolicy::Native)
                } else {
                    Self::new(MergePolicy::Replace)
                };
                effective.merge(first, second)
            }
        }
    }
}

impl Default for ValueMerger {
    fn default() -> Self {
        Self::new(MergePolicy::Auto)
    }
}
