//! Distance and joint-angle helpers
//!
//! All functions are total: coincident points give a 0° angle instead of
//! NaN, so a degenerate finger reads as curled.

use super::landmarks::Keypoint;

/// Planar distance (x, y only)
pub fn distance_2d(a: Keypoint, b: Keypoint) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Interior angle at `joint` formed by `parent`-`joint`-`child`, in degrees
///
/// Uses the dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// - 180° = the three points are collinear (straight finger)
/// - 0° = degenerate input, or the segment folds back on itself
pub fn joint_angle_deg(parent: Keypoint, joint: Keypoint, child: Keypoint) -> f32 {
    let v1 = (parent.x - joint.x, parent.y - joint.y, parent.z - joint.z);
    let v2 = (child.x - joint.x, child.y - joint.y, child.z - joint.z);

    let dot = v1.0 * v2.0 + v1.1 * v2.1 + v1.2 * v2.2;
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1 + v1.2 * v1.2).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1 + v2.2 * v2.2).sqrt();

    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}
