//! Storage abstraction for persistence.
//!
//! Backends store raw JSON strings under short keys. The [`Store`](crate::store::Store)
//! layers typed, defaulted values on top.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::{DATA_DIR_ENV, FileStorage};

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use std::sync::Arc;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for key-value storage backends.
///
/// A missing key reads as `Ok(None)`. Writes replace the whole value.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait KeyValueStorage: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Trait for key-value storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait KeyValueStorage {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// The storage an application session runs on.
///
/// Normally the platform backend; memory when that backend cannot be opened,
/// in which case nothing outlives the session.
pub enum PlatformStorage {
    #[cfg(not(target_arch = "wasm32"))]
    File(FileStorage),
    #[cfg(target_arch = "wasm32")]
    Local(LocalStorage),
    Memory(MemoryStorage),
}

impl PlatformStorage {
    /// Whether values survive a restart.
    pub fn is_persistent(&self) -> bool {
        !matches!(self, PlatformStorage::Memory(_))
    }

    fn backend(&self) -> &dyn KeyValueStorage {
        match self {
            #[cfg(not(target_arch = "wasm32"))]
            PlatformStorage::File(storage) => storage,
            #[cfg(target_arch = "wasm32")]
            PlatformStorage::Local(storage) => storage,
            PlatformStorage::Memory(storage) => storage,
        }
    }
}

impl KeyValueStorage for PlatformStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.backend().get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.backend().set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.backend().remove(key)
    }
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(PlatformStorage::File(FileStorage::default_location()?)))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<PlatformStorage>> {
    Ok(Arc::new(PlatformStorage::Local(LocalStorage::new()?)))
}

/// Open the platform backend, falling back to memory if it is unavailable.
pub fn open_platform_storage() -> Arc<PlatformStorage> {
    create_default_storage().unwrap_or_else(|e| {
        log::warn!("Persistent storage unavailable, using memory: {e}");
        Arc::new(PlatformStorage::Memory(MemoryStorage::new()))
    })
}
