//! Recognizer storage and per-frame JS entry points
//!
//! JS calls `process_hands` once per detector result. The recognizer lives
//! in a thread-local; the browser runtime is single-threaded.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::classifier::DetectionMode;
use crate::config::RecognizerConfig;
use crate::hand::Handedness;
use crate::pipeline::{FrameInput, Recognizer};

thread_local! {
    static RECOGNIZER: RefCell<Recognizer> = RefCell::new(Recognizer::default());
}

/// Run `f` against the shared recognizer
pub(crate) fn with_recognizer<R>(f: impl FnOnce(&mut Recognizer) -> R) -> R {
    RECOGNIZER.with(|cell| f(&mut cell.borrow_mut()))
}

/// Milliseconds from the page's monotonic clock
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn is_missing(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

/// Replace the recognizer with one built from a (partial) config object.
/// Attached secondary classifiers carry over.
#[wasm_bindgen]
pub fn init_recognizer(config: JsValue) -> Result<(), JsValue> {
    let config: RecognizerConfig = if is_missing(&config) {
        RecognizerConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    let mut fresh = Recognizer::new(&config)?;

    with_recognizer(|current| {
        *fresh.fusion_mut() = std::mem::take(current.fusion_mut());
        *current = fresh;
    });
    log::info!("recognizer ready (mode {})", config.mode);
    Ok(())
}

/// Accepts "all", "letters", "numbers" or "phrases"
#[wasm_bindgen]
pub fn set_mode(mode: &str) -> Result<(), JsValue> {
    let mode: DetectionMode = mode.parse()?;
    with_recognizer(|r| r.set_mode(mode));
    Ok(())
}

#[wasm_bindgen]
pub fn get_mode() -> String {
    with_recognizer(|r| r.mode().to_string())
}

/// Process one detector result.
///
/// `flat` holds 63 floats (x, y, z per keypoint) for each hand, at most two
/// hands. `handedness` is an optional array of "Left"/"Right" labels in the
/// same order. Returns the frame output, or null when the frame is dropped
/// for arriving out of order.
#[wasm_bindgen]
pub fn process_hands(
    flat: &[f32],
    handedness: JsValue,
    timestamp_ms: Option<f64>,
) -> Result<JsValue, JsValue> {
    let labels: Vec<String> = if is_missing(&handedness) {
        Vec::new()
    } else {
        serde_wasm_bindgen::from_value(handedness)?
    };
    let handedness: Vec<Handedness> = labels.iter().map(|l| Handedness::from_label(l)).collect();

    let frame = FrameInput::from_flat(timestamp_ms.unwrap_or_else(now_ms), flat, &handedness)?;
    let output = with_recognizer(|r| r.process_frame(&frame))?;

    match output {
        Some(output) => Ok(serde_wasm_bindgen::to_value(&output)?),
        None => Ok(JsValue::NULL),
    }
}

/// Forget motion and smoothing history, e.g. after the camera restarts
#[wasm_bindgen]
pub fn reset_tracking() {
    with_recognizer(|r| r.reset_tracking());
}

// ============================================================================
// SENTENCE CONTROLS
// ============================================================================

#[wasm_bindgen]
pub fn get_sentence() -> String {
    with_recognizer(|r| r.sentence().text().to_string())
}

#[wasm_bindgen]
pub fn add_space() {
    with_recognizer(|r| r.sentence_mut().add_space());
}

#[wasm_bindgen]
pub fn backspace() {
    with_recognizer(|r| r.sentence_mut().backspace());
}

#[wasm_bindgen]
pub fn add_phrase(phrase: &str) {
    with_recognizer(|r| r.sentence_mut().add_phrase(phrase));
}

#[wasm_bindgen]
pub fn clear_sentence() {
    with_recognizer(|r| r.sentence_mut().clear());
}
