//! Sign Web - hand keypoints to sign-language text
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules

mod bridge;
pub mod classifier;
pub mod config;
pub mod error;
pub mod hand;
pub mod motion;
pub mod pipeline;
pub mod sentence;
pub mod smoothing;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::*;

pub use config::RecognizerConfig;
pub use error::{RecognizerError, Result};
pub use pipeline::{FrameInput, FrameOutput, HandInput, HandOutput, Recognizer};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console.
/// Levels: trace, debug, info (default), warn, error.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("sign-web {} logging at {}", env!("CARGO_PKG_VERSION"), level);
}
