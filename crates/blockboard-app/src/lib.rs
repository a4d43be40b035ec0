//! Blockboard Application
//!
//! The application shell: windowing, GPU surface, the egui overlay that
//! hosts the toolbar, theme switcher and block cards, and the routing of
//! window input onto the board.

mod app;
mod event_handler;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{UiAction, UiState, render_ui};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
