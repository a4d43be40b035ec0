//! Persisted application state.
//!
//! Three independently keyed JSON entries: the theme preference, the
//! zoom-lock flag, and the block list. Each is read once on open and written
//! back whole on every change.

use crate::block::{Block, BlockId};
use crate::storage::{KeyValueStorage, StorageError, StorageResult};
use crate::theme::ThemePreference;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";
/// Storage key of the zoom-lock flag.
pub const ZOOM_LOCK_KEY: &str = "isZoomLocked";
/// Storage key of the block list.
pub const BLOCKS_KEY: &str = "blocks";

/// Typed view over a [`KeyValueStorage`].
///
/// Missing or unreadable entries fall back to defaults. Failed writes are
/// logged and the in-memory value is kept.
pub struct Store<S: KeyValueStorage> {
    storage: Arc<S>,
    theme: ThemePreference,
    zoom_locked: bool,
    blocks: Vec<Block>,
}

impl<S: KeyValueStorage> Store<S> {
    /// Load every entry from `storage`.
    pub fn open(storage: Arc<S>) -> Self {
        let theme = load_or_default(storage.as_ref(), THEME_KEY);
        let zoom_locked = load_or_default(storage.as_ref(), ZOOM_LOCK_KEY);
        let blocks: Vec<Block> = load_or_default(storage.as_ref(), BLOCKS_KEY);
        log::info!(
            "Opened store: theme={:?} zoom_locked={} blocks={}",
            theme,
            zoom_locked,
            blocks.len()
        );
        Self {
            storage,
            theme,
            zoom_locked,
            blocks,
        }
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemePreference) {
        self.theme = theme;
        self.persist(THEME_KEY, &self.theme);
    }

    pub fn zoom_locked(&self) -> bool {
        self.zoom_locked
    }

    pub fn set_zoom_locked(&mut self, locked: bool) {
        self.zoom_locked = locked;
        self.persist(ZOOM_LOCK_KEY, &self.zoom_locked);
    }

    /// Blocks in rendering order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Look up a block by id.
    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| &b.id == id)
    }

    /// Append a block and persist the list.
    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
        self.persist(BLOCKS_KEY, &self.blocks);
    }

    /// Mutate the block with `id` and persist the list.
    ///
    /// Returns `None` without writing when no such block exists.
    pub fn update_block<R>(&mut self, id: &BlockId, f: impl FnOnce(&mut Block) -> R) -> Option<R> {
        let block = self.blocks.iter_mut().find(|b| &b.id == id)?;
        let result = f(block);
        self.persist(BLOCKS_KEY, &self.blocks);
        Some(result)
    }

    /// Re-read `key` from storage after an outside change.
    ///
    /// Returns true if `key` is one of the store's entries.
    pub fn rehydrate(&mut self, key: &str) -> bool {
        match key {
            THEME_KEY => self.theme = load_or_default(self.storage.as_ref(), THEME_KEY),
            ZOOM_LOCK_KEY => {
                self.zoom_locked = load_or_default(self.storage.as_ref(), ZOOM_LOCK_KEY)
            }
            BLOCKS_KEY => self.blocks = load_or_default(self.storage.as_ref(), BLOCKS_KEY),
            _ => return false,
        }
        log::debug!("Rehydrated store entry {key}");
        true
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = write_entry(self.storage.as_ref(), key, value) {
            log::warn!("Failed to persist {key}: {e}");
        }
    }
}

fn write_entry<S: KeyValueStorage, T: Serialize>(
    storage: &S,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let json =
        serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    storage.set(key, &json)
}

fn read_entry<S: KeyValueStorage, T: DeserializeOwned>(
    storage: &S,
    key: &str,
) -> StorageResult<Option<T>> {
    let Some(json) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

fn load_or_default<S: KeyValueStorage, T: DeserializeOwned + Default>(storage: &S, key: &str) -> T {
    match read_entry(storage, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Ignoring stored {key}: {e}");
            T::default()
        }
    }
}
