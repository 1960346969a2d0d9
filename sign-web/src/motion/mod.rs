//! Motion module - fingertip trajectories for the drawn letters J and Z
//!
//! Re-exports only. All logic in submodules.

mod buffer;
mod tracker;
pub(crate) mod trajectory;

pub use buffer::{TrajectoryBuffer, DEFAULT_CAPACITY};
pub use tracker::{MotionTracker, Prerequisite, DEFAULT_MIN_SHAPE_FRAMES};
pub use trajectory::{match_j, match_z, TrajectoryMatch, TrajectoryPoint, MIN_J_SAMPLES, MIN_Z_SAMPLES};
