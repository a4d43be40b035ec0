//! Browser `localStorage` implementation for WASM.

use super::{KeyValueStorage, StorageError, StorageResult};

/// Storage backed by `window.localStorage`.
///
/// Other tabs writing the same keys raise `storage` events on the window;
/// the app listens for those and rehydrates the matching store entries.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> StorageResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("No window object".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("localStorage error: {:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage not available".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Other(format!("Failed to read {}: {:?}", key, e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {:?}", key, e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Other(format!("Failed to delete {}: {:?}", key, e)))
    }
}
