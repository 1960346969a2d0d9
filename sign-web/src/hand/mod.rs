//! Hand module - keypoint topology, geometry and finger extension
//!
//! Re-exports only. All logic in submodules.

mod finger_state;
mod geometry;
mod landmarks;

#[cfg(test)]
pub(crate) mod fixtures;

pub use finger_state::{FingerState, BENT_ANGLE_DEG, STRAIGHT_ANGLE_DEG, THUMB_STRAIGHT_ANGLE_DEG};
pub use geometry::{distance_2d, joint_angle_deg};
pub use landmarks::*;
