//! Error types for frame validation, configuration and sample data
//!
//! Geometry never errors; only structural problems with the input do.

use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, RecognizerError>;

#[derive(Error, Debug)]
pub enum RecognizerError {
    /// A hand arrived with the wrong number of keypoints
    #[error("expected {expected} keypoints per hand, got {actual}")]
    KeypointCount { expected: usize, actual: usize },

    /// Flat coordinate buffer does not split into whole hands
    #[error("flat keypoint buffer has {len} values, not a multiple of {per_hand}")]
    FlatBufferLength { len: usize, per_hand: usize },

    #[error("frame carries {actual} hands, at most {max} can be tracked")]
    TooManyHands { actual: usize, max: usize },

    #[error("unknown detection mode '{0}'")]
    UnknownMode(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Training sample with a feature vector of the wrong length
    #[error("sample '{label}' has {actual} features, expected {expected}")]
    SampleLength {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("sample data: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<RecognizerError> for JsValue {
    fn from(err: RecognizerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
