// storage/mod.rs
//
// Key/value persistence for small JSON snapshots. Backends only move strings;
// the typed helpers below own serialization.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage backend unavailable: {0}")]
    Backend(String),
}

/// A string key/value store (browser localStorage, or memory in tests).
pub trait SaveStore {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn delete(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same map, which lets a test keep a
/// handle while the game owns another and later "restart" against it.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl SaveStore for MemoryStore {
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    fn delete(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Serialize `value` and overwrite whatever was stored under `key`.
pub fn save_json<T: Serialize>(store: &mut dyn SaveStore, key: &str, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    store.write(key, &json)
}

/// Load `key`, falling back to `T::default()` when it is absent, unreadable or corrupt.
pub fn load_json<T: DeserializeOwned + Default>(store: &dyn SaveStore, key: &str) -> T {
    let json = match store.read(key) {
        Ok(Some(json)) => json,
        Ok(None) => return T::default(),
        Err(err) => {
            log::warn!("load '{}': {}", key, err);
            return T::default();
        }
    };
    match serde_json::from_str(&json) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("load '{}': discarding corrupt data: {}", key, err);
            T::default()
        }
    }
}
