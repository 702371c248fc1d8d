//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Run seeds (wall clock)
//! - Storage (LocalStorage on web)

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

/// Seed for a new run, taken from the wall clock
#[cfg(target_arch = "wasm32")]
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a new run, taken from the wall clock
#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
mod web {
    use crate::persistence::{KeyValueStore, PersistenceError};

    /// The browser's `window.localStorage`
    pub struct LocalStorage {
        storage: web_sys::Storage,
    }

    impl LocalStorage {
        pub fn open() -> Result<Self, PersistenceError> {
            let storage = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .ok_or_else(|| PersistenceError::Unavailable("no localStorage".to_string()))?;
            Ok(Self { storage })
        }
    }

    fn js_error(e: wasm_bindgen::JsValue) -> PersistenceError {
        PersistenceError::Unavailable(format!("{e:?}"))
    }

    impl KeyValueStore for LocalStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            self.storage.get_item(key).map_err(js_error)
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
            self.storage.set_item(key, value).map_err(js_error)
        }

        fn remove_item(&mut self, key: &str) -> Result<(), PersistenceError> {
            self.storage.remove_item(key).map_err(js_error)
        }
    }
}
