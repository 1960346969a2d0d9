//! Secondary classifier attachment
//!
//! The learned model is loaded by JS (e.g. a TensorFlow.js or ONNX
//! runtime). Rust only awaits the loader once, in the background, and
//! calls the resulting predict function synchronously every frame.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use crate::classifier::{FeatureVector, LearnedModel, PoseEstimator, Scorer, SecondarySlot};

use super::recognizer::with_recognizer;

/// Synchronous JS predict function: Float32Array(72) -> number[]
///
/// Called with the recognizer borrowed, so it must not re-enter the module.
struct JsScorer {
    predict: js_sys::Function,
}

impl Scorer for JsScorer {
    fn scores(&self, features: &FeatureVector) -> Option<Vec<f32>> {
        let input = js_sys::Float32Array::from(&features[..]);
        let output = match self.predict.call1(&JsValue::NULL, &input) {
            Ok(output) => output,
            Err(err) => {
                log::warn!("predict threw: {:?}", err);
                return None;
            }
        };
        match serde_wasm_bindgen::from_value::<Vec<f32>>(output) {
            Ok(scores) => Some(scores),
            Err(err) => {
                log::warn!("predict returned an unexpected value: {}", err);
                None
            }
        }
    }
}

/// Attach a learned model.
///
/// `loader` is called once and may return the predict function directly or
/// a promise of it. Until it resolves the model reports not-ready and
/// frames are fused without it. `labels` optionally overrides the output
/// label order.
///
/// The predict function runs inside `process_hands` while the recognizer
/// is borrowed. It must not call back into any function exported by this
/// module, or the borrow panics.
#[wasm_bindgen]
pub fn attach_learned_model(loader: js_sys::Function, labels: JsValue) -> Result<(), JsValue> {
    let (model, publisher) = if labels.is_undefined() || labels.is_null() {
        LearnedModel::<JsScorer>::new()
    } else {
        LearnedModel::with_labels(serde_wasm_bindgen::from_value(labels)?)
    };

    let pending = js_sys::Promise::resolve(&loader.call0(&JsValue::NULL)?);
    with_recognizer(|r| {
        r.fusion_mut()
            .attach(SecondarySlot::LearnedModel, Box::new(model))
    });

    spawn_local(async move {
        let loaded = match JsFuture::from(pending).await {
            Ok(loaded) => loaded,
            Err(err) => {
                log::warn!("learned model failed to load: {:?}", err);
                return;
            }
        };
        match loaded.dyn_into::<js_sys::Function>() {
            Ok(predict) => publisher.publish(JsScorer { predict }),
            Err(_) => log::warn!("model loader did not resolve to a function"),
        }
    });
    Ok(())
}

#[wasm_bindgen]
pub fn detach_learned_model() {
    with_recognizer(|r| r.fusion_mut().detach(SecondarySlot::LearnedModel));
}

#[wasm_bindgen]
pub fn is_model_ready() -> bool {
    with_recognizer(|r| r.fusion().is_ready(SecondarySlot::LearnedModel))
}

/// Toggle the built-in pose-description estimator
#[wasm_bindgen]
pub fn set_pose_estimator(enabled: bool) {
    with_recognizer(|r| {
        let fusion = r.fusion_mut();
        if enabled {
            fusion.attach(SecondarySlot::PoseEstimator, Box::new(PoseEstimator::new()));
        } else {
            fusion.detach(SecondarySlot::PoseEstimator);
        }
    });
}
