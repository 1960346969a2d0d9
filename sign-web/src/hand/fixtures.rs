//! Synthetic hands for tests
//!
//! Builds an upright right hand (wrist at the bottom, y grows downward) and
//! optionally rotates it about the wrist. Rotation preserves every angle and
//! planar distance, so finger state does not depend on orientation.

use super::landmarks::*;

#[derive(Clone, Copy, Debug)]
pub enum Thumb {
    /// Folded against the index side of the palm
    Tucked,
    /// Straight, pointing up and away from the palm
    Side,
    /// Straight and vertical, clear of the palm
    Up,
    /// Bent across the palm from a wide base; pair with `thumb_on` or
    /// `thumb_near` to rest the tip on a knuckle
    Across,
}

#[derive(Clone, Copy, Debug)]
pub enum Orientation {
    Up,
    Down,
    /// Fingers point along +x
    Side,
}

const WRIST_POS: Keypoint = Keypoint::new(0.5, 0.8, 0.0);

const MCPS: [Keypoint; 4] = [
    Keypoint::new(0.44, 0.60, 0.0),
    Keypoint::new(0.50, 0.58, 0.0),
    Keypoint::new(0.56, 0.60, 0.0),
    Keypoint::new(0.61, 0.63, 0.0),
];

/// Tip targets for fingers held together (gaps of 0.015)
const TOGETHER_TIPS: [Keypoint; 4] = [
    Keypoint::new(0.475, 0.46, 0.0),
    Keypoint::new(0.49, 0.46, 0.0),
    Keypoint::new(0.505, 0.46, 0.0),
    Keypoint::new(0.52, 0.46, 0.0),
];

#[derive(Clone, Debug)]
pub struct HandBuilder {
    fingers: [bool; 4],
    thumb: Thumb,
    together: bool,
    hooked_index: bool,
    orientation: Orientation,
    /// Landmark the thumb tip rests on, plus an offset from it
    thumb_tip: Option<(usize, Keypoint)>,
    overrides: Vec<(usize, Keypoint)>,
}

impl HandBuilder {
    /// All five fingers extended and spread
    pub fn open() -> Self {
        Self {
            fingers: [true; 4],
            thumb: Thumb::Side,
            together: false,
            hooked_index: false,
            orientation: Orientation::Up,
            thumb_tip: None,
            overrides: Vec::new(),
        }
    }

    /// Every finger curled, thumb tucked
    pub fn fist() -> Self {
        Self {
            fingers: [false; 4],
            thumb: Thumb::Tucked,
            ..Self::open()
        }
    }

    pub fn thumb(mut self, thumb: Thumb) -> Self {
        self.thumb = thumb;
        self
    }

    pub fn index(mut self, extended: bool) -> Self {
        self.fingers[0] = extended;
        self
    }

    pub fn middle(mut self, extended: bool) -> Self {
        self.fingers[1] = extended;
        self
    }

    pub fn ring(mut self, extended: bool) -> Self {
        self.fingers[2] = extended;
        self
    }

    pub fn pinky(mut self, extended: bool) -> Self {
        self.fingers[3] = extended;
        self
    }

    pub fn together(mut self) -> Self {
        self.together = true;
        self
    }

    /// Index straight at the PIP but bent ~63° at the DIP
    pub fn hooked_index(mut self) -> Self {
        self.hooked_index = true;
        self
    }

    pub fn oriented(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Rest the thumb tip exactly on `landmark`
    pub fn thumb_on(self, landmark: usize) -> Self {
        self.thumb_near(landmark, 0.0, 0.0, 0.0)
    }

    /// Rest the thumb tip on `landmark` shifted by (dx, dy, dz) in image
    /// space. Negative dz is nearer the camera.
    pub fn thumb_near(mut self, landmark: usize, dx: f32, dy: f32, dz: f32) -> Self {
        self.thumb_tip = Some((landmark, Keypoint::new(dx, dy, dz)));
        self
    }

    /// Replace a point after orientation is applied
    pub fn with_point(mut self, index: usize, point: Keypoint) -> Self {
        self.overrides.push((index, point));
        self
    }

    pub fn build(&self) -> HandKeypoints {
        let mut points = [Keypoint::default(); KEYPOINT_COUNT];
        points[WRIST] = WRIST_POS;

        let thumb = match self.thumb {
            Thumb::Tucked => [
                Keypoint::new(0.44, 0.76, 0.0),
                Keypoint::new(0.40, 0.70, 0.0),
                Keypoint::new(0.42, 0.65, 0.0),
                Keypoint::new(0.46, 0.63, -0.02),
            ],
            Thumb::Side => [
                Keypoint::new(0.44, 0.76, 0.0),
                Keypoint::new(0.38, 0.70, 0.0),
                Keypoint::new(0.345, 0.65, 0.0),
                Keypoint::new(0.31, 0.60, 0.0),
            ],
            Thumb::Up => [
                Keypoint::new(0.42, 0.76, 0.0),
                Keypoint::new(0.36, 0.70, 0.0),
                Keypoint::new(0.36, 0.60, 0.0),
                Keypoint::new(0.36, 0.50, 0.0),
            ],
            Thumb::Across => [
                Keypoint::new(0.44, 0.76, 0.0),
                Keypoint::new(0.34, 0.72, 0.0),
                Keypoint::new(0.38, 0.62, 0.0),
                Keypoint::new(0.50, 0.66, -0.02),
            ],
        };
        for (slot, point) in THUMB_CHAIN.iter().zip(thumb) {
            points[*slot] = point;
        }

        for (finger, chain) in FINGER_CHAINS.iter().enumerate() {
            let mcp = MCPS[finger];
            let [_, pip, dip, tip] = *chain;
            points[chain[0]] = mcp;

            if finger == 0 && self.hooked_index {
                points[pip] = offset(mcp, 0.0, -0.06, 0.0);
                points[dip] = offset(mcp, 0.0, -0.10, 0.0);
                points[tip] = offset(mcp, 0.0, -0.08, -0.04);
            } else if self.fingers[finger] {
                let target = if self.together {
                    TOGETHER_TIPS[finger]
                } else {
                    offset(mcp, 0.0, -0.13, 0.0)
                };
                points[pip] = lerp(mcp, target, 0.46);
                points[dip] = lerp(mcp, target, 0.77);
                points[tip] = target;
            } else {
                points[pip] = offset(mcp, 0.0, -0.05, -0.02);
                points[dip] = offset(mcp, 0.0, -0.02, -0.05);
                points[tip] = offset(mcp, 0.0, 0.01, -0.03);
            }
        }

        for point in points.iter_mut() {
            *point = self.rotate(*point);
        }
        if let Some((landmark, shift)) = self.thumb_tip {
            let anchor = points[landmark];
            points[THUMB_TIP] = offset(anchor, shift.x, shift.y, shift.z);
        }
        for (index, point) in &self.overrides {
            points[*index] = *point;
        }

        HandKeypoints::new(points)
    }

    fn rotate(&self, p: Keypoint) -> Keypoint {
        let dx = p.x - WRIST_POS.x;
        let dy = p.y - WRIST_POS.y;
        let (rx, ry) = match self.orientation {
            Orientation::Up => (dx, dy),
            Orientation::Down => (-dx, -dy),
            Orientation::Side => (-dy, dx),
        };
        Keypoint::new(WRIST_POS.x + rx, WRIST_POS.y + ry, p.z)
    }
}

/// Translate a whole hand so `landmark` lands on (x, y)
pub fn moved_to(hand: &HandKeypoints, landmark: usize, x: f32, y: f32) -> HandKeypoints {
    let anchor = hand.get(landmark);
    let (dx, dy) = (x - anchor.x, y - anchor.y);
    HandKeypoints::new(hand.points().map(|p| offset(p, dx, dy, 0.0)))
}

fn offset(p: Keypoint, dx: f32, dy: f32, dz: f32) -> Keypoint {
    Keypoint::new(p.x + dx, p.y + dy, p.z + dz)
}

fn lerp(a: Keypoint, b: Keypoint, t: f32) -> Keypoint {
    Keypoint::new(
        a.x + (b.x - a.x) * t,
        a.y + (b.y - a.y) * t,
        a.z + (b.z - a.z) * t,
    )
}
