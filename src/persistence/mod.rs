//! Key/value persistence
//!
//! Progress is stored as small JSON values under fixed keys, the way the
//! browser's LocalStorage holds them. Reads fail closed: a missing or
//! malformed value decodes to the type's default.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to decode `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String key/value storage (LocalStorage on web, in-memory elsewhere)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove_item(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// Volatile store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Decode the value under `key`, if any
pub fn try_load<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, PersistenceError> {
    let Some(json) = store.get_item(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| PersistenceError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Decode the value under `key`, falling back to the default on any failure
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match try_load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("{e}; using default");
            T::default()
        }
    }
}

/// Encode and store `value` under `key`
pub fn save<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set_item(key, &json)
}

/// Store `value`, logging instead of failing
pub fn save_or_log<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = save(store, key, value) {
        log::warn!("Could not persist `{key}`: {e}");
    }
}
