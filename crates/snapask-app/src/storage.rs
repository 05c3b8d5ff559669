// crates/snapask-app/src/storage.rs
// Browser localStorage behind the shared KeyValueStore trait

use snapask_types::{KeyValueStore, MemoryStore, StorageError};

pub enum SettingsStore {
    Local(web_sys::Storage),
    /// Private windows and sandboxed frames may refuse localStorage
    Memory(MemoryStore),
}

impl SettingsStore {
    pub fn open() -> Self {
        match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => SettingsStore::Local(storage),
            Some(Err(e)) => {
                log::warn!("localStorage refused ({:?}); settings will not persist", e);
                SettingsStore::Memory(MemoryStore::default())
            }
            _ => {
                log::warn!("localStorage unavailable; settings will not persist");
                SettingsStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl KeyValueStore for SettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            SettingsStore::Local(storage) => storage
                .get_item(key)
                .map_err(|e| StorageError::Read(format!("{:?}", e))),
            SettingsStore::Memory(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            SettingsStore::Local(storage) => storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{:?}", e))),
            SettingsStore::Memory(store) => store.set(key, value),
        }
    }
}
