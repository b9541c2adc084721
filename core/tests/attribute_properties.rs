//! Property-based tests for attribute merging.
//!
//! Records and updates are arbitrary JSON objects drawn from a small key
//! alphabet, so most generated updates overlap the record on some keys and
//! miss it on others.

use std::collections::BTreeSet;

use model_core::{AttributeStore, ModelAttributes, Record, UserProps};
use proptest::prelude::*;
use serde_json::{Map, Number, Value};

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_filter_map("finite", |f| Number::from_f64(f).map(Value::Number)),
        "[a-z ]{0,8}".prop_map(Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect())),
        ]
    })
}

fn json_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-f]{1,2}", json_value(), 0..8)
        .prop_map(|fields| fields.into_iter().collect())
}

fn user_props() -> impl Strategy<Value = UserProps> {
    (
        proptest::option::of(any::<u64>()),
        proptest::option::of("[A-Za-z]{1,10}"),
        proptest::option::of(any::<u32>()),
    )
        .prop_map(|(id, name, age)| UserProps { id, name, age })
}

proptest! {
    #[test]
    fn set_overwrites_update_keys_and_keeps_the_rest(
        record in json_object(),
        update in json_object(),
    ) {
        let store = AttributeStore::new(record.clone());
        store.set(update.clone());
        let merged = store.with_all(Map::clone);

        let expected_keys: BTreeSet<&String> = record.keys().chain(update.keys()).collect();
        let merged_keys: BTreeSet<&String> = merged.keys().collect();
        prop_assert_eq!(merged_keys, expected_keys);

        for (key, value) in &merged {
            match update.get(key) {
                Some(updated) => {
                    prop_assert_eq!(value, updated, "key {} must take the update", key);
                }
                None => {
                    prop_assert_eq!(Some(value), record.get(key), "key {} must be untouched", key);
                }
            }
        }
    }

    #[test]
    fn get_returns_the_written_value(
        record in json_object(),
        update in json_object(),
    ) {
        let store = AttributeStore::new(record);
        store.set(update.clone());

        for (key, value) in &update {
            let expected = if value.is_null() { None } else { Some(value.clone()) };
            prop_assert_eq!(store.get(key), expected, "key {}", key);
        }
    }

    #[test]
    fn successive_sets_last_write_wins(
        record in json_object(),
        first in json_object(),
        second in json_object(),
    ) {
        let store = AttributeStore::new(record);
        store.set(first.clone());
        store.set(second.clone());

        for (key, value) in &first {
            let expected = second.get(key).unwrap_or(value);
            prop_assert_eq!(store.with_all(|r| r.get(key).cloned()), Some(expected.clone()));
        }
    }

    #[test]
    fn user_merge_only_overwrites_present_fields(
        record in user_props(),
        update in user_props(),
    ) {
        let mut merged = record.clone();
        merged.merge(update.clone());

        prop_assert_eq!(merged.id, update.id.or(record.id));
        prop_assert_eq!(merged.name, update.name.or(record.name));
        prop_assert_eq!(merged.age, update.age.or(record.age));
    }
}
