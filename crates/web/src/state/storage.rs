//! Key-value persistence for client state
//!
//! ## Table of Contents
//! - **KeyValueStore**: Trait for persistence backends
//! - **BrowserStorage**: `localStorage` via gloo-storage
//! - **MemoryStorage**: In-memory store (tests, non-browser targets)

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Persistence errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Synchronous JSON key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Get a value; missing keys and unreadable entries are both `None`.
    fn read(&self, key: &str) -> Option<Value>;

    fn write(&self, key: &str, value: &Value) -> Result<()>;

    fn remove(&self, key: &str);

    /// Store name for logging
    fn name(&self) -> &str;
}

/// Get and deserialize a typed value from the store
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let value = store.read(key)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            log::warn!("Ignoring malformed '{}' in {}: {}", key, store.name(), e);
            None
        }
    }
}

/// Serialize and set a typed value in the store
pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let value = serde_json::to_value(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    store.write(key, &value)
}

/// Browser `localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn read(&self, key: &str) -> Option<Value> {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::get::<Value>(key).ok()
    }

    fn write(&self, key: &str, value: &Value) -> Result<()> {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::set(key, value)
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn remove(&self, key: &str) {
        use gloo_storage::Storage;
        gloo_storage::LocalStorage::delete(key);
    }

    fn name(&self) -> &str {
        "localStorage"
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn read(&self, key: &str) -> Option<Value> {
        self.data.lock().get(key).cloned()
    }

    fn write(&self, key: &str, value: &Value) -> Result<()> {
        self.data.lock().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.data.lock().remove(key);
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Prefs {
        compact: bool,
    }

    #[test]
    fn memory_store_basic() {
        let store = MemoryStorage::new();
        store.write("key1", &json!({ "a": 1 })).unwrap();
        assert_eq!(store.read("key1"), Some(json!({ "a": 1 })));

        store.remove("key1");
        assert_eq!(store.read("key1"), None);
    }

    #[test]
    fn typed_helpers() {
        let store = MemoryStorage::new();
        write_json(&store, "prefs", &Prefs { compact: true }).unwrap();
        assert_eq!(read_json::<Prefs>(&store, "prefs"), Some(Prefs { compact: true }));

        store.write("prefs", &json!("garbage")).unwrap();
        assert_eq!(read_json::<Prefs>(&store, "prefs"), None);
    }
}
