use wasm_bindgen::prelude::*;

mod app;
mod common;
mod logging;
mod platform;

pub use app::WasmApp;

/// Called automatically when the WASM module is instantiated.
/// Sets up panic hook so Rust panics appear as console.error in the browser,
/// and sends `tracing` events to the console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init_logging();
}
