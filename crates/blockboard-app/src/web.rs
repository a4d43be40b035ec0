//! WebAssembly entry point and platform-specific code.

use blockboard_core::store::{BLOCKS_KEY, THEME_KEY, ZOOM_LOCK_KEY};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    static PENDING_STORAGE_KEYS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Listen for `storage` events from other tabs of the same origin.
///
/// Changed keys are queued; use `take_pending_storage_keys()` to drain them.
pub fn listen_for_storage_changes() {
    use wasm_bindgen::closure::Closure;

    let Some(window) = web_sys::window() else {
        log::warn!("No window, storage changes from other tabs will be missed");
        return;
    };

    let on_storage = Closure::wrap(Box::new(move |event: web_sys::StorageEvent| {
        PENDING_STORAGE_KEYS.with(|cell| {
            let mut keys = cell.borrow_mut();
            match event.key() {
                Some(key) => keys.push(key),
                // A null key means the whole storage was cleared.
                None => keys.extend([THEME_KEY, ZOOM_LOCK_KEY, BLOCKS_KEY].map(String::from)),
            }
        });
    }) as Box<dyn Fn(_)>);

    if window
        .add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref())
        .is_err()
    {
        log::warn!("Failed to register storage listener");
    }
    on_storage.forget();
}

/// Take the storage keys changed by other tabs since the last call.
pub fn take_pending_storage_keys() -> Vec<String> {
    PENDING_STORAGE_KEYS.with(|cell| std::mem::take(&mut *cell.borrow_mut()))
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub async fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");

    log::info!("Starting Blockboard (WASM)");

    listen_for_storage_changes();

    crate::App::run().await;
}
