//! Feature extraction for secondary classifiers
//!
//! Produces the 72-value vector the learned model was trained on.

use crate::hand::{distance_2d, FingerState, HandKeypoints, Keypoint, KEYPOINT_COUNT, MIDDLE_MCP};

/// Number of features per hand
pub const FEATURE_COUNT: usize = 72;

/// First finger-state slot
pub const FINGER_STATE_OFFSET: usize = KEYPOINT_COUNT * 3;

/// First of the four reserved motion-summary slots
pub const MOTION_OFFSET: usize = FINGER_STATE_OFFSET + 5;

pub type FeatureVector = [f32; FEATURE_COUNT];

/// Extract 72 features from one hand
///
/// Layout (matches the training data format):
/// - 0..63: x, y, z of each landmark, wrist-relative, divided by palm size
/// - 63..68: finger state (thumb, index, middle, ring, pinky) as 0/1
/// - 68..72: motion summary, left at zero unless supplied
pub fn extract_features(hand: &HandKeypoints, fingers: &FingerState) -> FeatureVector {
    extract_features_with_motion(hand, fingers, [0.0; 4])
}

pub fn extract_features_with_motion(
    hand: &HandKeypoints,
    fingers: &FingerState,
    motion: [f32; 4],
) -> FeatureVector {
    let mut features = [0.0; FEATURE_COUNT];

    let wrist = hand.wrist();
    let palm = distance_2d(wrist, hand.get(MIDDLE_MCP));
    // Degenerate hands keep raw offsets
    let scale = if palm > 0.001 { palm } else { 1.0 };

    for (i, point) in hand.points().iter().enumerate() {
        features[i * 3] = (point.x - wrist.x) / scale;
        features[i * 3 + 1] = (point.y - wrist.y) / scale;
        features[i * 3 + 2] = (point.z - wrist.z) / scale;
    }

    for (i, extended) in fingers.as_array().into_iter().enumerate() {
        features[FINGER_STATE_OFFSET + i] = if extended { 1.0 } else { 0.0 };
    }

    features[MOTION_OFFSET..].copy_from_slice(&motion);
    features
}

/// Wrist-relative, palm-scaled hand stored in the first 63 features
pub fn hand_from_features(features: &FeatureVector) -> HandKeypoints {
    let mut points = [Keypoint::default(); KEYPOINT_COUNT];
    for (point, xyz) in points.iter_mut().zip(features[..FINGER_STATE_OFFSET].chunks_exact(3)) {
        *point = Keypoint::new(xyz[0], xyz[1], xyz[2]);
    }
    HandKeypoints::new(points)
}

/// Finger flags stored in the feature vector
pub fn finger_state_from_features(features: &FeatureVector) -> FingerState {
    let flag = |i: usize| features[FINGER_STATE_OFFSET + i] > 0.5;
    FingerState {
        thumb: flag(0),
        index: flag(1),
        middle: flag(2),
        ring: flag(3),
        pinky: flag(4),
    }
}
