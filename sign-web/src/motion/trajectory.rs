//! Trajectory shape matchers for the two drawn letters
//!
//! y grows downward in normalized image coordinates, so "down" is +y.

use serde::Serialize;

use crate::hand::Keypoint;

/// Fewest pinky samples a J can be judged on
pub const MIN_J_SAMPLES: usize = 10;

/// Fewest index samples a Z can be judged on
pub const MIN_Z_SAMPLES: usize = 12;

const MAX_MOTION_CONFIDENCE: f32 = 0.95;
const MOTION_BASE_CONFIDENCE: f32 = 0.75;
const MOTION_CONFIDENCE_RANGE: f32 = 0.2;

// J
const J_MIN_DROP: f32 = 0.06;
const J_FULL_DROP: f32 = 0.12;
const J_MIN_CHORD: f32 = 0.01;
const J_MIN_CURVATURE: f32 = 1.2;
const J_CURVATURE_RANGE: f32 = 0.5;
const J_VERTICAL_RATIO: f32 = 0.8;
const J_MIN_HOOK: f32 = 0.02;

// Z
const Z_SMOOTH_WINDOW: usize = 3;
const Z_MIN_VELOCITIES: usize = 6;
const Z_VELOCITY_FLOOR: f32 = 0.001;
const Z_MIN_REVERSALS: usize = 1;
const Z_MAX_REVERSALS: usize = 4;
const Z_IDEAL_REVERSALS: usize = 2;
const Z_MIN_X_SPAN: f32 = 0.03;
const Z_MIN_Y_SPAN: f32 = 0.02;
const Z_FULL_SPAN: f32 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub position: Keypoint,
    pub timestamp_ms: f64,
}

impl TrajectoryPoint {
    pub fn new(position: Keypoint, timestamp_ms: f64) -> Self {
        Self {
            position,
            timestamp_ms,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrajectoryMatch {
    pub matched: bool,
    pub confidence: f32,
}

impl TrajectoryMatch {
    const NONE: Self = Self {
        matched: false,
        confidence: 0.0,
    };

    fn hit(strength: f32) -> Self {
        Self {
            matched: true,
            confidence: (MOTION_BASE_CONFIDENCE + MOTION_CONFIDENCE_RANGE * strength)
                .min(MAX_MOTION_CONFIDENCE),
        }
    }
}

/// Downward stroke that hooks sideways at the bottom
pub fn match_j(points: &[TrajectoryPoint]) -> TrajectoryMatch {
    if points.len() < MIN_J_SAMPLES {
        return TrajectoryMatch::NONE;
    }

    let first = points[0].position;
    let last = points[points.len() - 1].position;

    let drop = last.y - first.y;
    if drop < J_MIN_DROP {
        return TrajectoryMatch::NONE;
    }

    let path: f32 = points
        .windows(2)
        .map(|w| planar(w[0].position, w[1].position))
        .sum();
    let chord = planar(first, last);
    if chord < J_MIN_CHORD {
        return TrajectoryMatch::NONE;
    }

    let curvature = path / chord;
    if curvature < J_MIN_CURVATURE {
        return TrajectoryMatch::NONE;
    }

    let mid = points[points.len() / 2].position;
    let first_half_vertical = mid.y - first.y > (mid.x - first.x).abs() * J_VERTICAL_RATIO;
    let second_half_hooks = (last.x - mid.x).abs() > J_MIN_HOOK;
    if !first_half_vertical || !second_half_hooks {
        return TrajectoryMatch::NONE;
    }

    let drop_strength = (drop / J_FULL_DROP).min(1.0);
    let curve_strength = ((curvature - J_MIN_CURVATURE) / J_CURVATURE_RANGE).min(1.0);
    TrajectoryMatch::hit(drop_strength * 0.5 + curve_strength * 0.5)
}

/// Horizontal zigzag: strokes that reverse x direction one to four times
pub fn match_z(points: &[TrajectoryPoint]) -> TrajectoryMatch {
    if points.len() < MIN_Z_SAMPLES {
        return TrajectoryMatch::NONE;
    }

    let velocities = smoothed_x_velocity(points);
    if velocities.len() < Z_MIN_VELOCITIES {
        return TrajectoryMatch::NONE;
    }

    let reversals = count_reversals(&velocities);
    if !(Z_MIN_REVERSALS..=Z_MAX_REVERSALS).contains(&reversals) {
        return TrajectoryMatch::NONE;
    }

    let (x_span, y_span) = spans(points);
    if x_span < Z_MIN_X_SPAN || y_span < Z_MIN_Y_SPAN {
        return TrajectoryMatch::NONE;
    }

    let reversal_score = if reversals == Z_IDEAL_REVERSALS { 1.0 } else { 0.7 };
    let span_score = ((x_span + y_span) / Z_FULL_SPAN).min(1.0);
    TrajectoryMatch::hit(reversal_score * 0.6 + span_score * 0.4)
}

fn planar(a: Keypoint, b: Keypoint) -> f32 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Centered moving average of per-step x velocity, ±3 steps
fn smoothed_x_velocity(points: &[TrajectoryPoint]) -> Vec<f32> {
    let n = (Z_SMOOTH_WINDOW * 2 + 1) as f32;
    (Z_SMOOTH_WINDOW..points.len().saturating_sub(Z_SMOOTH_WINDOW))
        .map(|i| {
            let sum: f32 = (i - Z_SMOOTH_WINDOW..=i + Z_SMOOTH_WINDOW)
                .filter(|&k| k + 1 < points.len())
                .map(|k| points[k + 1].position.x - points[k].position.x)
                .sum();
            sum / n
        })
        .collect()
}

/// Sign changes in x velocity, ignoring samples under the noise floor
fn count_reversals(velocities: &[f32]) -> usize {
    let mut reversals = 0;
    let mut previous = sign(velocities[0]);

    for &v in &velocities[1..] {
        if v.abs() <= Z_VELOCITY_FLOOR {
            continue;
        }
        let current = sign(v);
        if current != 0 && previous != 0 && current != previous {
            reversals += 1;
        }
        previous = current;
    }
    reversals
}

fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

fn spans(points: &[TrajectoryPoint]) -> (f32, f32) {
    let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.position.x);
        max_x = max_x.max(p.position.x);
        min_y = min_y.min(p.position.y);
        max_y = max_y.max(p.position.y);
    }
    (max_x - min_x, max_y - min_y)
}
