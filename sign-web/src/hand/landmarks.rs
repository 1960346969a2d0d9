//! Hand keypoint topology and storage
//!
//! MediaPipe Hands emits 21 landmarks per hand in a fixed order. Every
//! downstream stage indexes into that order, so a hand is only ever built
//! from exactly 21 points.

use serde::{Deserialize, Serialize};

use crate::error::{RecognizerError, Result};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmarks per hand
pub const KEYPOINT_COUNT: usize = 21;

/// Floats per hand in a flat `[x, y, z, x, y, z, ...]` buffer
pub const FLAT_HAND_LEN: usize = KEYPOINT_COUNT * 3;

/// Joint chains (base, middle, near-tip, tip) for the four non-thumb fingers
pub const FINGER_CHAINS: [[usize; 4]; 4] = [
    [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
    [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
    [RING_MCP, RING_PIP, RING_DIP, RING_TIP],
    [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
];

/// Thumb chain (base, MCP, IP, tip)
pub const THUMB_CHAIN: [usize; 4] = [THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single landmark: x,y normalized to the frame, z relative depth
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Keypoint {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Exactly 21 keypoints of one hand in MediaPipe order
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandKeypoints([Keypoint; KEYPOINT_COUNT]);

impl HandKeypoints {
    pub fn new(points: [Keypoint; KEYPOINT_COUNT]) -> Self {
        Self(points)
    }

    /// Build from an arbitrary slice, failing on any count other than 21
    pub fn from_slice(points: &[Keypoint]) -> Result<Self> {
        let array: [Keypoint; KEYPOINT_COUNT] =
            points
                .try_into()
                .map_err(|_| RecognizerError::KeypointCount {
                    expected: KEYPOINT_COUNT,
                    actual: points.len(),
                })?;
        Ok(Self(array))
    }

    /// Build from 63 floats (x, y, z per landmark)
    pub fn from_flat(data: &[f32]) -> Result<Self> {
        if data.len() != FLAT_HAND_LEN {
            return Err(RecognizerError::KeypointCount {
                expected: KEYPOINT_COUNT,
                actual: data.len() / 3,
            });
        }
        let mut points = [Keypoint::default(); KEYPOINT_COUNT];
        for (i, chunk) in data.chunks_exact(3).enumerate() {
            points[i] = Keypoint::new(chunk[0], chunk[1], chunk[2]);
        }
        Ok(Self(points))
    }

    #[inline]
    pub fn get(&self, index: usize) -> Keypoint {
        self.0[index]
    }

    pub fn points(&self) -> &[Keypoint; KEYPOINT_COUNT] {
        &self.0
    }

    pub fn wrist(&self) -> Keypoint {
        self.0[WRIST]
    }
}

/// Handedness label reported by the detector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Left" | "left" => Handedness::Left,
            "Right" | "right" => Handedness::Right,
            _ => Handedness::Unknown,
        }
    }
}
