//! In-memory storage implementation.

use super::{KeyValueStorage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let storage = MemoryStorage::new();
        storage.set("theme", "\"dark\"").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("\"dark\""));
    }

    #[test]
    fn test_missing_key() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("nope").unwrap(), None);
    }

    #[test]
    fn test_overwrite_and_remove() {
        let storage = MemoryStorage::new();
        storage.set("k", "1").unwrap();
        storage.set("k", "2").unwrap();
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("2"));

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();
        assert!(storage.is_empty());
    }
}
