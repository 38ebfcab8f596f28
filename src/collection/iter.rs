//! Insertion-order iteration over collections.

use crate::collection::Collection;
use crate::key::Key;
use crate::value::Value;

/// Borrowing iterator over `(key, value)` pairs in insertion order.
pub struct Iter<'a> {
    inner: indexmap::map::Iter<'a, Key, Value>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

/// Owning iterator over `(key, value)` pairs in insertion order.
pub struct IntoIter {
    inner: indexmap::map::IntoIter<Key, Value>,
}

impl Iterator for IntoIter {
    type Item = (Key, Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl Collection {
    /// Iterates entries in insertion order.
    ///
    /// The sequence is restartable: each call produces a fresh iterator
    /// over the current contents.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.store().iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.into_store().into_iter(),
        }
    }
}

/// Builds an unrestricted collection; later keys overwrite earlier ones in
/// place, as `set` would.
impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Collection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for (key, value) in iter {
            collection.store_mut().insert(key.into(), value.into());
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_follows_insertion_order() {
        let collection: Collection = [("b", 1), ("a", 2)].into_iter().collect();
        let keys: Vec<_> = collection.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![Key::from("b"), Key::from("a")]);
    }

    #[test]
    fn into_iter_consumes_in_order() {
        let collection: Collection = [(5, "x"), (1, "y")].into_iter().collect();
        let entries: Vec<_> = collection.into_iter().collect();
        assert_eq!(entries[0], (Key::Int(5), Value::from("x")));
        assert_eq!(entries[1], (Key::Int(1), Value::from("y")));
    }
}
