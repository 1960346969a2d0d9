//! Per-finger extension from a single frame of keypoints
//!
//! Pure function of the current frame. Non-thumb fingers use a two-tier
//! rule: joint angles first, then a wrist-distance fallback for hands seen
//! at oblique angles where the angles are ambiguous. The thumb compares its
//! tip against the index base.

use serde::{Deserialize, Serialize};

use super::geometry::{distance_2d, joint_angle_deg};
use super::landmarks::{
    HandKeypoints, FINGER_CHAINS, INDEX_MCP, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
};

/// Both finger joints above this angle: extended
pub const STRAIGHT_ANGLE_DEG: f32 = 150.0;

/// Middle joint below this angle: curled
pub const BENT_ANGLE_DEG: f32 = 100.0;

/// Thumb IP joint above this angle counts as straight
pub const THUMB_STRAIGHT_ANGLE_DEG: f32 = 140.0;

/// One flag per finger, true = extended
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerState {
    pub fn from_keypoints(hand: &HandKeypoints) -> Self {
        let [index, middle, ring, pinky] =
            FINGER_CHAINS.map(|chain| is_finger_extended(hand, chain));
        Self {
            thumb: is_thumb_extended(hand),
            index,
            middle,
            ring,
            pinky,
        }
    }

    /// Flags in thumb → pinky order
    pub fn as_array(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    pub fn extended_count(&self) -> usize {
        self.as_array().iter().filter(|&&e| e).count()
    }

    /// Match against a pattern where `None` means "either"
    pub fn matches(&self, pattern: &[Option<bool>; 5]) -> bool {
        self.as_array()
            .iter()
            .zip(pattern)
            .all(|(actual, expected)| expected.map_or(true, |e| e == *actual))
    }
}

fn is_finger_extended(hand: &HandKeypoints, [mcp, pip, dip, tip]: [usize; 4]) -> bool {
    let pip_angle = joint_angle_deg(hand.get(mcp), hand.get(pip), hand.get(dip));
    let dip_angle = joint_angle_deg(hand.get(pip), hand.get(dip), hand.get(tip));

    if pip_angle > STRAIGHT_ANGLE_DEG && dip_angle > STRAIGHT_ANGLE_DEG {
        return true;
    }
    if pip_angle < BENT_ANGLE_DEG {
        return false;
    }

    // Ambiguous angles: an extended finger reaches farther from the wrist
    let wrist = hand.get(WRIST);
    distance_2d(hand.get(tip), wrist) > distance_2d(hand.get(pip), wrist)
}

fn is_thumb_extended(hand: &HandKeypoints) -> bool {
    let tip = hand.get(THUMB_TIP);
    let index_base = hand.get(INDEX_MCP);

    let tip_to_index = distance_2d(tip, index_base);
    let mcp_to_index = distance_2d(hand.get(THUMB_MCP), index_base);
    let ip_angle = joint_angle_deg(hand.get(THUMB_MCP), hand.get(THUMB_IP), tip);

    if ip_angle > THUMB_STRAIGHT_ANGLE_DEG && tip_to_index > mcp_to_index * 0.8 {
        return true;
    }
    // Tip collapsed toward the palm
    if tip_to_index < mcp_to_index * 0.5 {
        return false;
    }

    tip_to_index > mcp_to_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::fixtures::{HandBuilder, Thumb};
    use crate::hand::Keypoint;

    #[test]
    fn test_open_hand_all_extended() {
        let hand = HandBuilder::open().build();
        let state = FingerState::from_keypoints(&hand);
        assert_eq!(state.as_array(), [true; 5]);
        assert_eq!(state.extended_count(), 5);
    }

    #[test]
    fn test_fist_all_curled() {
        let hand = HandBuilder::fist().build();
        let state = FingerState::from_keypoints(&hand);
        assert_eq!(state.as_array(), [false; 5]);
    }

    #[test]
    fn test_index_only() {
        let hand = HandBuilder::fist().index(true).build();
        let state = FingerState::from_keypoints(&hand);
        assert_eq!(state.as_array(), [false, true, false, false, false]);
    }

    #[test]
    fn test_thumb_out_sideways() {
        let hand = HandBuilder::fist().thumb(Thumb::Side).build();
        let state = FingerState::from_keypoints(&hand);
        assert!(state.thumb);
        assert!(!state.index);
    }

    #[test]
    fn test_deterministic() {
        let hand = HandBuilder::fist().index(true).middle(true).build();
        assert_eq!(
            FingerState::from_keypoints(&hand),
            FingerState::from_keypoints(&hand)
        );
    }

    #[test]
    fn test_degenerate_hand_is_curled() {
        let hand = HandKeypoints::new([Keypoint::new(0.5, 0.5, 0.0); 21]);
        let state = FingerState::from_keypoints(&hand);
        assert_eq!(state.extended_count(), 0);
    }

    #[test]
    fn test_pattern_matching() {
        let state = FingerState {
            thumb: true,
            index: true,
            middle: false,
            ring: false,
            pinky: true,
        };
        assert!(state.matches(&[Some(true), Some(true), Some(false), None, Some(true)]));
        assert!(state.matches(&[None; 5]));
        assert!(!state.matches(&[Some(false), None, None, None, None]));
    }
}
