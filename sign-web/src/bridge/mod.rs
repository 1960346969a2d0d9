//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod recognizer;
mod samples;
mod secondary;

pub use recognizer::{
    add_phrase, add_space, backspace, clear_sentence, get_mode, get_sentence, init_recognizer,
    process_hands, reset_tracking, set_mode,
};
pub use samples::{
    clear_samples, export_samples, import_samples, is_recording, sample_counts, start_recording,
    stop_recording,
};
pub use secondary::{attach_learned_model, detach_learned_model, is_model_ready, set_pose_estimator};
