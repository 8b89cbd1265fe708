use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use momi_core::error::MomiError;

use crate::KeyValueStore;

/// In-memory store for tests and throwaway sessions.
///
/// Writes can be switched to fail, which stands in for a full or
/// unavailable medium.
pub struct MemoryStore {
    slots: Mutex<HashMap<String, Value>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write fail with a storage error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Stored keys in sorted order.
    pub fn keys(&self) -> Result<Vec<String>, MomiError> {
        let mut keys: Vec<String> = self.lock()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Value>>, MomiError> {
        self.slots
            .lock()
            .map_err(|_| MomiError::storage("memory store lock poisoned"))
    }

    fn check_writable(&self) -> Result<(), MomiError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MomiError::storage("write rejected: storage quota exceeded"));
        }
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, MomiError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<(), MomiError> {
        self.check_writable()?;
        self.lock()?.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MomiError> {
        self.check_writable()?;
        self.lock()?.remove(key);
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, Value)]) -> Result<(), MomiError> {
        self.check_writable()?;
        let mut slots = self.lock()?;
        for (key, value) in entries {
            slots.insert(key.to_string(), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_crud() {
        let store = MemoryStore::new();
        assert_eq!(store.get("recipes").unwrap(), None);
        store.set("recipes", &json!([])).unwrap();
        assert_eq!(store.get("recipes").unwrap(), Some(json!([])));
        store.remove("recipes").unwrap();
        assert_eq!(store.get("recipes").unwrap(), None);
    }

    #[test]
    fn test_memory_store_remove_nonexistent() {
        let store = MemoryStore::new();
        store.remove("no-such-key").unwrap();
    }

    #[test]
    fn test_failing_writes_leave_slots_untouched() {
        let store = MemoryStore::new();
        store.set("activeBookId", &json!("a")).unwrap();
        store.fail_writes(true);
        assert!(matches!(
            store.set_many(&[("activeBookId", json!("b")), ("recipeBooks", json!([]))]),
            Err(MomiError::Storage { .. })
        ));
        assert_eq!(store.keys().unwrap(), vec!["activeBookId".to_string()]);
        assert_eq!(store.get("activeBookId").unwrap(), Some(json!("a")));
    }
}
