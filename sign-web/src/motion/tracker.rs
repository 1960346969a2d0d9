//! Per-hand motion tracking
//!
//! Watches for the resting shapes of J (pinky up) and Z (index up) and, while
//! one is held, records the relevant fingertip. A drawn J or Z replaces the
//! static result for the frame it completes on.

use log::debug;

use crate::classifier::{Category, Classification};
use crate::hand::{HandKeypoints, INDEX_TIP, PINKY_TIP};

use super::buffer::{TrajectoryBuffer, DEFAULT_CAPACITY};
use super::trajectory::{
    match_j, match_z, TrajectoryMatch, TrajectoryPoint, MIN_J_SAMPLES, MIN_Z_SAMPLES,
};

/// Consecutive frames a resting shape must be held before matching
pub const DEFAULT_MIN_SHAPE_FRAMES: u32 = 10;

/// Resting shape a drawn letter starts from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prerequisite {
    /// I or a resting J; the pinky draws a J
    Pinky,
    /// D or a resting Z; the index draws a Z
    Index,
}

impl Prerequisite {
    pub fn for_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "I" | "J" => Some(Prerequisite::Pinky),
            "D" | "Z" => Some(Prerequisite::Index),
            _ => None,
        }
    }
}

pub struct MotionTracker {
    pinky: TrajectoryBuffer,
    index: TrajectoryBuffer,
    active: Option<Prerequisite>,
    shape_frames: u32,
    min_shape_frames: u32,
}

impl MotionTracker {
    pub fn new(capacity: usize, min_shape_frames: u32) -> Self {
        Self {
            pinky: TrajectoryBuffer::new(capacity),
            index: TrajectoryBuffer::new(capacity),
            active: None,
            shape_frames: 0,
            min_shape_frames,
        }
    }

    /// Feed one frame's static result; returns it, or the motion letter
    /// when a trajectory completes
    pub fn apply(
        &mut self,
        result: Classification,
        hand: &HandKeypoints,
        timestamp_ms: f64,
    ) -> Classification {
        let shape = Prerequisite::for_symbol(&result.symbol);
        if shape != self.active {
            self.pinky.clear();
            self.index.clear();
            self.active = shape;
            self.shape_frames = 0;
        }

        let Some(shape) = shape else {
            return result;
        };
        self.shape_frames = self.shape_frames.saturating_add(1);

        let (buffer, tip) = match shape {
            Prerequisite::Pinky => (&mut self.pinky, PINKY_TIP),
            Prerequisite::Index => (&mut self.index, INDEX_TIP),
        };
        buffer.push(TrajectoryPoint::new(hand.get(tip), timestamp_ms));

        if self.shape_frames < self.min_shape_frames {
            return result;
        }

        let (symbol, min_samples, matcher): (_, _, fn(&[TrajectoryPoint]) -> TrajectoryMatch) =
            match shape {
                Prerequisite::Pinky => ("J", MIN_J_SAMPLES, match_j),
                Prerequisite::Index => ("Z", MIN_Z_SAMPLES, match_z),
            };
        if buffer.len() < min_samples {
            return result;
        }

        let found = matcher(&buffer.to_vec());
        if !found.matched {
            return result;
        }

        buffer.clear();
        self.shape_frames = 0;
        debug!("motion {} matched ({:.2})", symbol, found.confidence);

        let mut upgraded = Classification::new(symbol, found.confidence, result.finger_state)
            .with_category(Category::Letter);
        upgraded.motion_detected = true;
        upgraded
    }

    /// Forget any partial trajectory
    pub fn reset(&mut self) {
        self.pinky.clear();
        self.index.clear();
        self.active = None;
        self.shape_frames = 0;
    }

    pub fn active_shape(&self) -> Option<Prerequisite> {
        self.active
    }

    pub fn shape_frames(&self) -> u32 {
        self.shape_frames
    }

    pub fn buffered(&self, shape: Prerequisite) -> usize {
        match shape {
            Prerequisite::Pinky => self.pinky.len(),
            Prerequisite::Index => self.index.len(),
        }
    }
}

impl Default for MotionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_MIN_SHAPE_FRAMES)
    }
}
