//! Tests for merge policies and merger-driven collection merges.

use orderly::{Collection, MergePolicy, Value, ValueMerger};
use pretty_assertions::assert_eq;

#[test]
fn replace_policy_takes_the_second_value() {
    let merger = ValueMerger::new(MergePolicy::Replace);
    let merged = merger.merge(&Value::from("a"), &Value::from("b")).unwrap();
    assert_eq!(merged, Value::from("b"));
}

#[test]
fn skip_policy_keeps_the_first_value_unless_null() {
    let merger = ValueMerger::new(MergePolicy::Skip);

    let merged = merger.merge(&Value::from("a"), &Value::from("b")).unwrap();
    assert_eq!(merged, Value::from("a"));

    let merged = merger.merge(&Value::Null, &Value::from("b")).unwrap();
    assert_eq!(merged, Value::from("b"));
}

#[test]
fn combine_policy_collects_both_values() {
    let merger = ValueMerger::new(MergePolicy::Combine);

    let merged = merger.merge(&Value::from("a"), &Value::from("b")).unwrap();
    assert_eq!(merged, Value::Collection(Collection::from(["a", "b"])));

    // appending to a first value that already is a collection
    let first = Value::Collection(Collection::from(["a", "b"]));
    let appended = merger.merge(&first, &Value::from("c")).unwrap();
    assert_eq!(appended, Value::Collection(Collection::from(["a", "b", "c"])));
}

#[test]
fn add_policy_unions_key_wise_first_wins() {
    let merger = ValueMerger::new(MergePolicy::Add);

    let first = Value::Collection(Collection::from_entries([("x", "a"), ("y", "b")]));
    let second = Value::Collection(Collection::from_entries([("x", "skipped"), ("z", "c")]));

    let merged = merger.merge(&first, &second).unwrap();
    assert_eq!(
        merged,
        Value::Collection(Collection::from_entries([("x", "a"), ("y", "b"), ("z", "c")]))
    );
}

#[test]
fn native_policy_merges_key_wise_second_wins() {
    let merger = ValueMerger::new(MergePolicy::Native);

    let first = Value::Collection(Collection::from_entries([("x", "a"), ("y", "b")]));
    let second = Value::Collection(Collection::from_entries([
        ("x", "a was replaced"),
        ("z", "c"),
    ]));

    let merged = merger.merge(&first, &second).unwrap();
    assert_eq!(
        merged,
        Value::Collection(Collection::from_entries([
            ("x", "a was replaced"),
            ("y", "b"),
            ("z", "c"),
        ]))
    );
}

#[test]
fn auto_policy_dispatches_on_the_first_value() {
    let merger = ValueMerger::default();
    assert_eq!(merger.policy(), MergePolicy::Auto);

    // scalar first value: replace
    let merged = merger.merge(&Value::from("a"), &Value::from("b")).unwrap();
    assert_eq!(merged, Value::from("b"));

    // collection first value: native merge
    let first = Value::Collection(Collection::from_entries([("x", "a")]));
    let second = Value::Collection(Collection::from_entries([("y", "b")]));
    let merged = merger.merge(&first, &second).unwrap();
    assert_eq!(
        merged,
        Value::Collection(Collection::from_entries([("x", "a"), ("y", "b")]))
    );
}

#[test]
fn collection_merge_consults_registered_merger() {
    let mut collection = Collection::from_entries([("a", "x"), ("b", "kept")]);
    collection.add_merger(["a"], ValueMerger::new(MergePolicy::Combine));

    let merged = collection
        .merge(Collection::from_entries([("a", "z")]))
        .unwrap();

    // the merger's output, not a plain overwrite, lands at 'a'
    assert_eq!(
        merged.get("a").unwrap(),
        Some(&Value::Collection(Collection::from(["x", "z"])))
    );
    assert_eq!(merged.get("b").unwrap(), Some(&Value::from("kept")));
}

#[test]
fn merger_only_fires_when_both_sides_define_the_key() {
    let mut collection = Collection::from_entries([("a", "x")]);
    collection.add_merger(["missing"], ValueMerger::new(MergePolicy::Combine));

    let merged = collection
        .merge(Collection::from_entries([("missing", "incoming")]))
        .unwrap();

    // 'missing' exists only on the incoming side: plain insert, no combine
    assert_eq!(merged.get("missing").unwrap(), Some(&Value::from("incoming")));
}

#[test]
fn merger_registered_for_multiple_keys() {
    let mut collection = Collection::from_entries([("a", 1), ("b", 2), ("c", 3)]);
    collection.add_merger(["a", "b"], ValueMerger::new(MergePolicy::Skip));

    let merged = collection
        .merge(Collection::from_entries([("a", 10), ("b", 20), ("c", 30)]))
        .unwrap();

    assert_eq!(merged.get("a").unwrap(), Some(&Value::from(1)));
    assert_eq!(merged.get("b").unwrap(), Some(&Value::from(2)));
    assert_eq!(merged.get("c").unwrap(), Some(&Value::from(30)));
}
