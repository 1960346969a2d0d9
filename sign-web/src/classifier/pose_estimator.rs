//! Pose-description estimator
//!
//! Each gesture is described by weighted expectations about how curled each
//! finger is and which way it points. A hand scores the matched share of
//! that weight on a 0-10 scale; a neighbouring compass direction earns half.
//! Works purely from the feature vector, so it runs as a secondary without
//! needing the raw keypoints.

use crate::hand::{
    joint_angle_deg, HandKeypoints, FINGER_CHAINS, THUMB_IP, THUMB_MCP, THUMB_TIP,
};

use super::features::{finger_state_from_features, hand_from_features, FeatureVector};
use super::secondary::SecondaryClassifier;
use super::types::{Alternative, Classification, Source};

/// Best gesture must reach this score (out of 10)
pub const MIN_SCORE: f32 = 7.0;

const MAX_SCORE: f32 = 10.0;
const NO_CURL_ANGLE: f32 = 150.0;
const HALF_CURL_ANGLE: f32 = 100.0;
const ALTERNATIVES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Curl {
    Straight,
    Half,
    Full,
}

impl Curl {
    fn from_angle(angle: f32) -> Self {
        if angle > NO_CURL_ANGLE {
            Curl::Straight
        } else if angle > HALF_CURL_ANGLE {
            Curl::Half
        } else {
            Curl::Full
        }
    }
}

/// Compass direction, counter-clockwise from image right
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Direction {
    const ALL: [Direction; 8] = [
        Direction::Right,
        Direction::UpRight,
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
    ];

    /// Image y grows downward, so it is flipped before taking the angle
    fn from_vector(dx: f32, dy: f32) -> Self {
        let degrees = (-dy).atan2(dx).to_degrees();
        let sector = (degrees / 45.0).round().rem_euclid(8.0) as usize;
        Self::ALL[sector % 8]
    }

    fn steps_to(self, other: Direction) -> usize {
        let diff = (self as usize + 8 - other as usize) % 8;
        diff.min(8 - diff)
    }
}

#[derive(Clone, Copy, Debug)]
enum Expect {
    Curl(Curl),
    Points(Direction),
}

#[derive(Clone, Copy, Debug)]
struct Expectation {
    /// 0 = thumb .. 4 = pinky
    finger: usize,
    expect: Expect,
    weight: f32,
}

const THUMB: usize = 0;
const INDEX: usize = 1;
const MIDDLE: usize = 2;
const RING: usize = 3;
const PINKY: usize = 4;

use Curl::{Full, Half, Straight};
use Direction::{Down, Up};

const fn curl(finger: usize, curl: Curl, weight: f32) -> Expectation {
    Expectation {
        finger,
        expect: Expect::Curl(curl),
        weight,
    }
}

const fn points(finger: usize, direction: Direction, weight: f32) -> Expectation {
    Expectation {
        finger,
        expect: Expect::Points(direction),
        weight,
    }
}

pub struct GestureDescription {
    pub name: &'static str,
    pub phrase: Option<&'static str>,
    expectations: &'static [Expectation],
}

impl GestureDescription {
    fn score(&self, pose: &HandPose) -> f32 {
        let mut total = 0.0;
        let mut matched = 0.0;
        for e in self.expectations {
            total += e.weight;
            matched += match e.expect {
                Expect::Curl(c) if pose.curls[e.finger] == c => e.weight,
                Expect::Points(d) => match pose.directions[e.finger].steps_to(d) {
                    0 => e.weight,
                    1 => e.weight * 0.5,
                    _ => 0.0,
                },
                _ => 0.0,
            };
        }
        if total > 0.0 {
            matched / total * MAX_SCORE
        } else {
            0.0
        }
    }
}

pub static GESTURES: &[GestureDescription] = &[
    GestureDescription {
        name: "A",
        phrase: None,
        expectations: &[
            curl(THUMB, Straight, 1.0),
            curl(INDEX, Full, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
        ],
    },
    GestureDescription {
        name: "B",
        phrase: None,
        expectations: &[
            curl(THUMB, Full, 1.0),
            curl(INDEX, Straight, 1.0),
            curl(MIDDLE, Straight, 1.0),
            curl(RING, Straight, 1.0),
            curl(PINKY, Straight, 1.0),
            points(INDEX, Up, 0.7),
        ],
    },
    GestureDescription {
        name: "C",
        phrase: None,
        expectations: &[
            curl(THUMB, Straight, 0.8),
            curl(INDEX, Half, 1.0),
            curl(MIDDLE, Half, 1.0),
            curl(RING, Half, 1.0),
            curl(PINKY, Half, 1.0),
        ],
    },
    GestureDescription {
        name: "D",
        phrase: None,
        expectations: &[
            curl(INDEX, Straight, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
            points(INDEX, Up, 0.7),
        ],
    },
    GestureDescription {
        name: "E",
        phrase: None,
        expectations: &[
            curl(THUMB, Half, 1.0),
            curl(INDEX, Full, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
        ],
    },
    GestureDescription {
        name: "F",
        phrase: None,
        expectations: &[
            curl(THUMB, Half, 0.8),
            curl(INDEX, Full, 0.8),
            curl(MIDDLE, Straight, 1.0),
            curl(RING, Straight, 1.0),
            curl(PINKY, Straight, 1.0),
        ],
    },
    GestureDescription {
        name: "I",
        phrase: None,
        expectations: &[
            curl(THUMB, Full, 0.8),
            curl(INDEX, Full, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Straight, 1.0),
            points(PINKY, Up, 0.7),
        ],
    },
    GestureDescription {
        name: "K",
        phrase: None,
        expectations: &[
            curl(THUMB, Straight, 0.8),
            curl(INDEX, Straight, 1.0),
            curl(MIDDLE, Straight, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
        ],
    },
    GestureDescription {
        name: "L",
        phrase: None,
        expectations: &[
            curl(THUMB, Straight, 1.0),
            curl(INDEX, Straight, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
            points(INDEX, Up, 0.7),
        ],
    },
    GestureDescription {
        name: "O",
        phrase: None,
        expectations: &[
            curl(THUMB, Half, 1.0),
            curl(INDEX, Half, 1.0),
            curl(MIDDLE, Full, 0.8),
            curl(RING, Full, 0.8),
            curl(PINKY, Full, 0.8),
        ],
    },
    GestureDescription {
        name: "S",
        phrase: None,
        expectations: &[
            curl(THUMB, Half, 0.8),
            curl(INDEX, Full, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
        ],
    },
    GestureDescription {
        name: "U",
        phrase: None,
        expectations: &[
            curl(THUMB, Full, 0.8),
            curl(INDEX, Straight, 1.0),
            curl(MIDDLE, Straight, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
            points(INDEX, Up, 0.7),
        ],
    },
    GestureDescription {
        name: "V",
        phrase: None,
        expectations: &[
            curl(THUMB, Full, 0.8),
            curl(INDEX, Straight, 1.0),
            curl(MIDDLE, Straight, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
        ],
    },
    GestureDescription {
        name: "W",
        phrase: None,
        expectations: &[
            curl(THUMB, Full, 0.8),
            curl(INDEX, Straight, 1.0),
            curl(MIDDLE, Straight, 1.0),
            curl(RING, Straight, 1.0),
            curl(PINKY, Full, 1.0),
        ],
    },
    GestureDescription {
        name: "Y",
        phrase: None,
        expectations: &[
            curl(THUMB, Straight, 1.0),
            curl(INDEX, Full, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Straight, 1.0),
        ],
    },
    GestureDescription {
        name: "ILY",
        phrase: Some("I LOVE YOU"),
        expectations: &[
            curl(THUMB, Straight, 1.0),
            curl(INDEX, Straight, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Straight, 1.0),
        ],
    },
    GestureDescription {
        name: "GOOD",
        phrase: Some("GOOD"),
        expectations: &[
            curl(THUMB, Straight, 1.0),
            points(THUMB, Up, 1.0),
            curl(INDEX, Full, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
        ],
    },
    GestureDescription {
        name: "BAD",
        phrase: Some("BAD"),
        expectations: &[
            curl(THUMB, Straight, 1.0),
            points(THUMB, Down, 1.0),
            curl(INDEX, Full, 1.0),
            curl(MIDDLE, Full, 1.0),
            curl(RING, Full, 1.0),
            curl(PINKY, Full, 1.0),
        ],
    },
];

/// Per-finger curl and pointing direction, thumb → pinky
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPose {
    pub curls: [Curl; 5],
    pub directions: [Direction; 5],
}

impl HandPose {
    pub fn from_keypoints(hand: &HandKeypoints) -> Self {
        let mut curls = [Curl::Full; 5];
        let mut directions = [Direction::Up; 5];

        curls[THUMB] = Curl::from_angle(joint_angle_deg(
            hand.get(THUMB_MCP),
            hand.get(THUMB_IP),
            hand.get(THUMB_TIP),
        ));
        directions[THUMB] = direction(hand, THUMB_MCP, THUMB_TIP);

        for (i, [mcp, pip, dip, tip]) in FINGER_CHAINS.into_iter().enumerate() {
            let middle = joint_angle_deg(hand.get(mcp), hand.get(pip), hand.get(dip));
            let outer = joint_angle_deg(hand.get(pip), hand.get(dip), hand.get(tip));
            curls[i + 1] = Curl::from_angle(middle.min(outer));
            directions[i + 1] = direction(hand, mcp, tip);
        }

        Self { curls, directions }
    }
}

fn direction(hand: &HandKeypoints, base: usize, tip: usize) -> Direction {
    let (b, t) = (hand.get(base), hand.get(tip));
    Direction::from_vector(t.x - b.x, t.y - b.y)
}

/// Rule-equivalent secondary built from gesture descriptions
pub struct PoseEstimator {
    min_score: f32,
}

impl PoseEstimator {
    pub fn new() -> Self {
        Self::with_min_score(MIN_SCORE)
    }

    pub fn with_min_score(min_score: f32) -> Self {
        Self { min_score }
    }

    /// Gestures at or above the minimum score, best first; ties keep table order
    pub fn estimate(&self, hand: &HandKeypoints) -> Vec<(&'static GestureDescription, f32)> {
        let pose = HandPose::from_keypoints(hand);
        let mut scored: Vec<_> = GESTURES
            .iter()
            .map(|g| (g, g.score(&pose)))
            .filter(|(_, score)| *score >= self.min_score)
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
    }
}

impl Default for PoseEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl SecondaryClassifier for PoseEstimator {
    fn name(&self) -> &'static str {
        "pose-estimator"
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn classify(&self, features: &FeatureVector) -> Option<Classification> {
        let scored = self.estimate(&hand_from_features(features));
        let (best, score) = scored.first()?;

        let mut result = Classification::new(
            best.name,
            score / MAX_SCORE,
            finger_state_from_features(features),
        )
        .with_source(Source::Secondary);
        if let Some(phrase) = best.phrase {
            result = result.with_phrase(phrase);
        }
        result.alternatives = scored
            .iter()
            .skip(1)
            .take(ALTERNATIVES)
            .map(|(g, s)| Alternative {
                symbol: g.name.to_string(),
                confidence: (s / MAX_SCORE).min(1.0),
            })
            .collect();
        Some(result)
    }
}
