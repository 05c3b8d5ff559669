// crates/snapask-types/src/storage.rs
// Best-effort persisted settings
//
// Storage is a convenience. Every failure here is logged and treated as
// "value absent"; nothing propagates to the caller.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const AUTH_TOKEN_KEY: &str = "snapask.auth_token";
pub const MODEL_SELECTION_KEY: &str = "snapask.model_selection";
pub const STREAMING_KEY: &str = "snapask.streaming";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),
}

/// Persisted string key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read a raw string, `None` when absent or unreadable
pub fn load_raw(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to read '{}': {}", key, e);
            None
        }
    }
}

pub fn save_raw(store: &dyn KeyValueStore, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to write '{}': {}", key, e);
            false
        }
    }
}

/// Read a JSON value, falling back to `default` on any failure
pub fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    let Some(raw) = load_raw(store, key) else {
        return default;
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring malformed value for '{}': {}", key, e);
            default
        }
    }
}

/// Write a JSON value; returns whether it was stored
pub fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(raw) => save_raw(store, key, &raw),
        Err(e) => {
            log::warn!("Failed to serialize value for '{}': {}", key, e);
            false
        }
    }
}

/// Bearer token, if one is stored and non-blank
pub fn auth_token(store: &dyn KeyValueStore) -> Option<String> {
    load_raw(store, AUTH_TOKEN_KEY)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// In-memory store, used when the browser offers no storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
