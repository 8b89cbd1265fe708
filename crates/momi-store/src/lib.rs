pub mod memory;
pub mod migration;
pub mod schema;
pub mod sqlite;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use momi_core::error::MomiError;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Durable key-value storage of JSON values.
///
/// Writes are durable before the call returns. A failing medium surfaces as
/// [`MomiError::Storage`].
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Value>, MomiError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &Value) -> Result<(), MomiError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), MomiError>;

    /// Write several keys as one unit: either all are stored or none are.
    fn set_many(&self, entries: &[(&str, Value)]) -> Result<(), MomiError>;

    fn contains(&self, key: &str) -> Result<bool, MomiError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<Value>, MomiError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), MomiError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), MomiError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, Value)]) -> Result<(), MomiError> {
        (**self).set_many(entries)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<Value>, MomiError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), MomiError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), MomiError> {
        (**self).remove(key)
    }

    fn set_many(&self, entries: &[(&str, Value)]) -> Result<(), MomiError> {
        (**self).set_many(entries)
    }
}

/// Read `key` as `T`, or return `default` when it is missing.
///
/// A stored value that no longer deserializes as `T` is logged and treated as
/// missing; read failures of the medium still propagate.
pub fn load_or<S, T>(store: &S, key: &str, default: T) -> Result<T, MomiError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value unreadable, using default");
                Ok(default)
            }
        },
        None => Ok(default),
    }
}

/// Serialize `value` and store it under `key`.
pub fn save<S, T>(store: &S, key: &str, value: &T) -> Result<(), MomiError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let value = serde_json::to_value(value)?;
    store.set(key, &value)
}

/// Open (or create) the Momi database at the given path and run migrations.
pub fn open_store(path: &std::path::Path) -> Result<SqliteStore, MomiError> {
    SqliteStore::open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_or_default_when_missing() {
        let store = MemoryStore::new();
        let value: Vec<String> = load_or(&store, "categories", vec!["x".into()]).unwrap();
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[test]
    fn test_load_or_default_when_unreadable() {
        let store = MemoryStore::new();
        store.set("categories", &json!({"not": "a list"})).unwrap();
        let value: Vec<String> = load_or(&store, "categories", Vec::new()).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        save(&store, "activeBookId", "default").unwrap();
        let id: String = load_or(&store, "activeBookId", String::new()).unwrap();
        assert_eq!(id, "default");
    }

    #[test]
    fn test_store_through_reference_and_box() {
        let store = MemoryStore::new();
        let by_ref: &dyn KeyValueStore = &store;
        by_ref.set("a", &json!(1)).unwrap();
        let boxed: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        boxed.set("b", &json!(2)).unwrap();
        assert!(store.contains("a").unwrap());
        assert_eq!(boxed.get("b").unwrap(), Some(json!(2)));
    }
}
