//! Training sample collection from the page
//!
//! Frames recorded here come from the primary hand as the recognizer
//! processes them.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::classifier::FRAMES_PER_SIGN;

use super::recognizer::with_recognizer;

/// Record the next `frames` primary-hand frames (default 30) under `label`
#[wasm_bindgen]
pub fn start_recording(label: &str, frames: Option<usize>) {
    let frames = frames.unwrap_or(FRAMES_PER_SIGN);
    with_recognizer(|r| r.recorder_mut().start(label, frames));
    log::info!("recording {} frames of '{}'", frames, label);
}

#[wasm_bindgen]
pub fn stop_recording() {
    with_recognizer(|r| r.recorder_mut().stop());
}

#[wasm_bindgen]
pub fn is_recording() -> bool {
    with_recognizer(|r| r.recorder().is_recording())
}

/// Plain object of label -> sample count
#[wasm_bindgen]
pub fn sample_counts() -> Result<JsValue, JsValue> {
    let counts = with_recognizer(|r| r.recorder().counts());
    Ok(counts.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

#[wasm_bindgen]
pub fn export_samples() -> Result<String, JsValue> {
    Ok(with_recognizer(|r| r.recorder().export_json())?)
}

/// Append samples from exported JSON; returns how many were added
#[wasm_bindgen]
pub fn import_samples(json: &str) -> Result<usize, JsValue> {
    Ok(with_recognizer(|r| r.recorder_mut().import_json(json))?)
}

#[wasm_bindgen]
pub fn clear_samples() {
    with_recognizer(|r| r.recorder_mut().clear());
}
