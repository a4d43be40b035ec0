//! Blockboard Core Library
//!
//! Platform-agnostic state and logic for the Blockboard canvas: the viewport
//! transform, blocks and their gestures, the persisted store, and theme
//! resolution.

pub mod block;
pub mod board;
pub mod gesture;
pub mod grid;
pub mod input;
pub mod snap;
pub mod storage;
pub mod store;
pub mod theme;
pub mod toolbar;
pub mod viewport;

pub use block::{Block, BlockId, BlockKind};
pub use board::{Board, FIT_PADDING, PlatformBoard};
pub use gesture::{BlockGesture, DragStart, MIN_BLOCK_SIZE, ResizeHandle};
pub use grid::Grid;
pub use input::{Modifiers, PointerTarget, WheelEvent};
pub use snap::{SNAP_GRID_SIZE, snap_to_grid};
pub use storage::{
    KeyValueStorage, PlatformStorage, StorageError, StorageResult, open_platform_storage,
};
pub use store::Store;
pub use theme::{ThemePreference, ThemeSwitcher};
pub use toolbar::{ToolbarAction, ToolbarState};
pub use viewport::Viewport;
