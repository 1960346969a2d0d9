//! Classifier module - static rule cascade, secondary classifiers and fusion
//!
//! Re-exports only. All logic in submodules.

mod dataset;
mod features;
mod fusion;
mod pose_estimator;
mod rules;
mod secondary;
mod types;

pub use dataset::{parse_samples, SampleRecorder, TrainingSample, FRAMES_PER_SIGN};
pub use features::{
    extract_features, extract_features_with_motion, finger_state_from_features,
    hand_from_features, FeatureVector, FEATURE_COUNT, FINGER_STATE_OFFSET, MOTION_OFFSET,
};
pub use fusion::{fuse, ClassifierFusion, SecondarySlot};
pub use pose_estimator::{Curl, Direction, HandPose, PoseEstimator, MIN_SCORE};
pub use rules::{classify_static, confidence, matching_rule, HandShape, Rule, RULES};
pub use secondary::{
    category_for_label, phrase_for_label, Absent, LearnedModel, ModelPublisher, Scorer,
    SecondaryClassifier, CLASS_LABELS,
};
pub use types::{clamp_confidence, Alternative, Category, Classification, DetectionMode, Source};
