//! File-based storage implementation for native platforms.

use super::{KeyValueStorage, StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the storage directory.
pub const DATA_DIR_ENV: &str = "BLOCKBOARD_DATA_DIR";

/// File-based storage for native platforms.
///
/// Stores each key as a JSON file in a directory.
#[derive(Debug)]
pub struct FileStorage {
    /// Base directory for stored entries.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// Uses `$BLOCKBOARD_DATA_DIR` when set, otherwise
    /// On Unix: `~/.local/share/blockboard/state/`
    /// On Windows: `%LOCALAPPDATA%\blockboard\state\`
    pub fn default_location() -> StorageResult<Self> {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
            return Self::new(PathBuf::from(dir));
        }

        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| {
                StorageError::Unavailable("Could not determine home directory".to_string())
            })?;

        Self::new(base.join("blockboard").join("state"))
    }

    /// Get the file path for a key.
    fn entry_path(&self, key: &str) -> PathBuf {
        // Sanitize key to be safe for filenames
        let safe_key: String = key
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.entry_path(key);
        // Replace via rename so readers never see a partial entry
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
