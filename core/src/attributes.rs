//! In-memory attribute storage for a single record.
//!
//! # Design
//! `AttributeStore` owns its record for its whole lifetime and only ever
//! mutates it in place through `Record::merge`. Reads by name go through the
//! record's JSON form (see `record::field`). `with_all` lends the live
//! record to a closure rather than copying it; the borrow ends when the
//! closure returns, so it can never be held across a later write.
//!
//! Interior mutability is a `RefCell`: the model is single-threaded and every
//! method takes `&self` so in-flight fetch/save futures can share it.

use std::cell::RefCell;

use serde_json::Value;

use crate::record::{self, Record};

/// The attribute capability a `Model` composes.
pub trait ModelAttributes<T: Record> {
    /// Current value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> Option<Value>;

    /// Shallow-merge `update` into the record.
    ///
    /// # Panics
    ///
    /// `AttributeStore` panics if this is called from inside a `with_all`
    /// closure on the same store.
    fn set(&self, update: T::Patch);

    /// Run `f` against the live record and return its result.
    ///
    /// # Panics
    ///
    /// `AttributeStore` panics if `f` writes to the same store.
    fn with_all<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

/// Default `ModelAttributes` implementation backed by a `RefCell`.
#[derive(Debug, Default)]
pub struct AttributeStore<T> {
    data: RefCell<T>,
}

impl<T: Record> AttributeStore<T> {
    pub fn new(data: T) -> Self {
        Self {
            data: RefCell::new(data),
        }
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: Record> ModelAttributes<T> for AttributeStore<T> {
    fn get(&self, key: &str) -> Option<Value> {
        let value = record::field(&*self.data.borrow(), key);
        tracing::trace!(key, value = ?value, "attribute read");
        value
    }

    fn set(&self, update: T::Patch) {
        self.data.borrow_mut().merge(update);
    }

    fn with_all<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&*self.data.borrow())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;
    use crate::types::UserProps;

    fn ann() -> UserProps {
        UserProps {
            id: Some(1),
            name: Some("Ann".to_string()),
            age: Some(20),
        }
    }

    #[test]
    fn get_returns_stored_value() {
        let store = AttributeStore::new(ann());
        assert_eq!(store.get("name"), Some(json!("Ann")));
        assert_eq!(store.get("age"), Some(json!(20)));
    }

    #[test]
    fn get_missing_key_is_none() {
        let store = AttributeStore::new(UserProps::default());
        assert_eq!(store.get("name"), None);
        assert_eq!(store.get("no_such_field"), None);
    }

    #[test]
    fn set_merges_instead_of_replacing() {
        let store = AttributeStore::new(ann());
        store.set(UserProps {
            name: Some("Bea".to_string()),
            ..UserProps::default()
        });
        assert_eq!(
            store.with_all(UserProps::clone),
            UserProps {
                id: Some(1),
                name: Some("Bea".to_string()),
                age: Some(20),
            }
        );
    }

    #[test]
    fn successive_sets_are_cumulative_and_last_write_wins() {
        let store = AttributeStore::new(Map::new());
        let mut first = Map::new();
        first.insert("a".to_string(), json!(1));
        first.insert("b".to_string(), json!(1));
        store.set(first);
        let mut second = Map::new();
        second.insert("b".to_string(), json!(2));
        second.insert("c".to_string(), json!(3));
        store.set(second);

        assert_eq!(Value::Object(store.with_all(Map::clone)), json!({"a": 1, "b": 2, "c": 3}));
    }

    #[test]
    fn get_after_set_returns_new_value() {
        let store = AttributeStore::new(ann());
        store.set(UserProps {
            age: Some(42),
            ..UserProps::default()
        });
        assert_eq!(store.get("age"), Some(json!(42)));
    }

    #[test]
    fn write_after_reading_whole_record_succeeds() {
        let store = AttributeStore::new(ann());
        let before = store.with_all(|record| record.name.clone());
        store.set(UserProps {
            name: Some("Bea".to_string()),
            ..UserProps::default()
        });
        let after = store.with_all(|record| record.name.clone());
        assert_eq!(before.as_deref(), Some("Ann"));
        assert_eq!(after.as_deref(), Some("Bea"));
    }

    #[test]
    fn read_inside_with_all_succeeds() {
        let store = AttributeStore::new(ann());
        let name = store.with_all(|_| store.get("name"));
        assert_eq!(name, Some(json!("Ann")));
    }

    #[test]
    #[should_panic(expected = "already borrowed")]
    fn write_inside_with_all_panics() {
        let store = AttributeStore::new(ann());
        store.with_all(|_| store.set(UserProps::default()));
    }

    #[test]
    fn into_inner_returns_merged_record() {
        let store = AttributeStore::new(UserProps::default());
        store.set(ann());
        assert_eq!(store.into_inner(), ann());
    }
}
