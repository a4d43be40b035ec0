//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    if std::env::args().any(|arg| arg == "--shortcuts") {
        blockboard_app::ShortcutRegistry::print_all();
        return;
    }

    log::info!("Starting Blockboard");
    pollster::block_on(blockboard_app::App::run());
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
