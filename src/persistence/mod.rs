//! Key-value persistence
//!
//! Features:
//! - `KvStore` trait over string keys and values
//! - `LocalStore` backed by `window.localStorage` (wasm only)
//! - `MemoryStore` for native runs and tests
//! - JSON helpers that report decode failures as `StoreError::Malformed`

pub mod best;

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

pub use best::{BestScore, CAKE_RUN_BEST_KEY, DRIVE_BEST_KEY, ScoreStore};

/// String key-value storage
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store. `fail` makes every call return `Unavailable`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    pub fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails
    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail: true,
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }
}

/// `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .ok_or(StoreError::Unavailable)?
            .local_storage()
            .map_err(|e| StoreError::Backend(format!("{e:?}")))?
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KvStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}

/// Read and decode a JSON value. `Ok(None)` when the key is missing.
pub fn load_json<T, K>(store: &K, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    K: KvStore + ?Sized,
{
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| StoreError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

pub fn save_json<T, K>(store: &mut K, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
    K: KvStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|e| StoreError::Malformed {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, &json)
}
