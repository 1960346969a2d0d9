//! Static sign classification as an ordered rule table
//!
//! Rules are evaluated top to bottom and the first match wins. Several rules
//! share a finger pattern and differ only in orientation or spacing, so the
//! order of `RULES` is part of the contract: phrases first, then numbers,
//! then letters from most to least distinctive, then closed-hand letters.
//! When nothing matches, the extended-finger count picks a low-confidence
//! fallback.

use crate::hand::{
    distance_2d, joint_angle_deg, FingerState, HandKeypoints, Keypoint, INDEX_DIP, INDEX_MCP,
    INDEX_PIP, INDEX_TIP, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP, PINKY_TIP, RING_MCP, RING_TIP,
    THUMB_MCP, THUMB_TIP,
};

use super::types::{Category, Classification, DetectionMode};

/// Hand-tuned confidence per rule. Calibration constants, not learned.
pub mod confidence {
    pub const ILY: f32 = 0.95;
    pub const GOOD: f32 = 0.85;
    pub const BAD: f32 = 0.8;
    pub const OK: f32 = 0.85;
    pub const STOP: f32 = 0.8;
    pub const HELLO: f32 = 0.75;

    pub const NUMBER: f32 = 0.8;
    pub const NUMBER_TEN: f32 = 0.7;

    pub const Y: f32 = 0.9;
    pub const J_STATIC: f32 = 0.4;
    pub const I: f32 = 0.85;
    pub const X: f32 = 0.75;
    pub const Q: f32 = 0.7;
    pub const G: f32 = 0.7;
    pub const L: f32 = 0.9;
    pub const P: f32 = 0.7;
    pub const H: f32 = 0.75;
    pub const V: f32 = 0.85;
    pub const U_NO_THUMB: f32 = 0.75;
    pub const U_TOGETHER: f32 = 0.8;
    pub const R: f32 = 0.7;
    pub const K: f32 = 0.65;
    pub const W: f32 = 0.9;
    pub const F: f32 = 0.85;
    pub const Z_STATIC: f32 = 0.4;
    pub const D_THUMB_TOUCH: f32 = 0.8;
    pub const D: f32 = 0.6;
    pub const B: f32 = 0.85;
    pub const B_OPEN: f32 = 0.6;

    pub const T: f32 = 0.75;
    pub const O: f32 = 0.8;
    pub const E: f32 = 0.75;
    pub const N: f32 = 0.65;
    pub const M: f32 = 0.6;
    pub const C: f32 = 0.7;
    pub const A: f32 = 0.8;
    pub const S: f32 = 0.6;

    pub const FALLBACK: f32 = 0.3;
}

// Distance thresholds, as fractions of palm size
const TOUCH: f32 = 0.3;
const OK_SPREAD: f32 = 0.08;
const STOP_TIGHT: f32 = 0.12;
const HELLO_SPREAD: f32 = 0.1;
const V_SPREAD: f32 = 0.15;
const R_CROSSED: f32 = 0.05;
const CLOSED_TOUCH: f32 = 0.25;

// Raw normalized-coordinate margins
const POINT_DOWN_MARGIN: f32 = 0.05;
const J_BELOW_WRIST: f32 = 0.04;
const THUMB_VERTICAL_MIN: f32 = 0.05;

/// Fallback symbol by extended-finger count (0..=5)
const FALLBACKS: [&str; 6] = ["S", "D", "V", "W", "B", "B"];

/// Neighbouring fingertips, index → pinky
const ADJACENT_TIPS: [(usize, usize); 3] = [
    (INDEX_TIP, MIDDLE_TIP),
    (MIDDLE_TIP, RING_TIP),
    (RING_TIP, PINKY_TIP),
];

const EXT: Option<bool> = Some(true);
const CURL: Option<bool> = Some(false);
const ANY: Option<bool> = None;

/// Finger pattern in thumb → pinky order
pub type Pattern = [Option<bool>; 5];

/// Measurements shared by every rule, computed once per frame
pub struct HandShape<'a> {
    pub hand: &'a HandKeypoints,
    pub fingers: FingerState,
    pub extended: usize,
    /// Wrist to middle-finger base; normalizes every distance threshold
    pub palm: f32,
    pub thumb_index_touching: bool,
    pub thumb_middle_touching: bool,
    /// Middle fingertip clearly below the wrist
    pub points_down: bool,
    /// Index tip offset from the wrist, absolute per axis
    pub index_dx: f32,
    pub index_dy: f32,
}

impl<'a> HandShape<'a> {
    pub fn new(hand: &'a HandKeypoints, fingers: FingerState) -> Self {
        let wrist = hand.wrist();
        let palm = distance_2d(wrist, hand.get(MIDDLE_MCP));
        let index_tip = hand.get(INDEX_TIP);

        Self {
            hand,
            fingers,
            extended: fingers.extended_count(),
            palm,
            thumb_index_touching: distance_2d(hand.get(THUMB_TIP), index_tip) < palm * TOUCH,
            thumb_middle_touching: distance_2d(hand.get(THUMB_TIP), hand.get(MIDDLE_TIP))
                < palm * TOUCH,
            points_down: hand.get(MIDDLE_TIP).y > wrist.y + POINT_DOWN_MARGIN,
            index_dx: (index_tip.x - wrist.x).abs(),
            index_dy: (index_tip.y - wrist.y).abs(),
        }
    }

    #[inline]
    fn at(&self, index: usize) -> Keypoint {
        self.hand.get(index)
    }

    /// Strictly below `factor` palm units apart
    fn within(&self, a: usize, b: usize, factor: f32) -> bool {
        distance_2d(self.at(a), self.at(b)) < self.palm * factor
    }

    /// Strictly above `factor` palm units apart. Coincident points never are,
    /// even on a collapsed hand with no palm.
    fn apart(&self, a: usize, b: usize, factor: f32) -> bool {
        distance_2d(self.at(a), self.at(b)) > self.palm * factor
    }

    fn sideways(&self) -> bool {
        self.index_dx > self.index_dy
    }

    fn tips_within(&self, factor: f32) -> bool {
        ADJACENT_TIPS.iter().all(|&(a, b)| self.within(a, b, factor))
    }

    fn tips_apart(&self, factor: f32) -> bool {
        ADJACENT_TIPS.iter().all(|&(a, b)| self.apart(a, b, factor))
    }

    fn thumb_vertical(&self) -> Option<f32> {
        let tip = self.at(THUMB_TIP);
        let base = self.at(THUMB_MCP);
        let dy = tip.y - base.y;
        let dx = (tip.x - base.x).abs();
        (dy.abs() > dx * 1.5).then_some(dy)
    }
}

/// One row of the cascade
pub struct Rule {
    pub name: &'static str,
    pub category: Category,
    pub symbol: &'static str,
    pub phrase: Option<&'static str>,
    pub confidence: f32,
    pub fingers: Pattern,
    pub when: fn(&HandShape, DetectionMode) -> bool,
}

impl Rule {
    pub fn matches(&self, shape: &HandShape, mode: DetectionMode) -> bool {
        mode.allows(self.category) && shape.fingers.matches(&self.fingers) && (self.when)(shape, mode)
    }

    fn classify(&self, fingers: FingerState) -> Classification {
        let result = Classification::new(self.symbol, self.confidence, fingers);
        match self.phrase {
            Some(phrase) => result.with_phrase(phrase),
            None => result.with_category(self.category),
        }
    }
}

fn always(_: &HandShape, _: DetectionMode) -> bool {
    true
}

fn numbers_only(_: &HandShape, mode: DetectionMode) -> bool {
    mode == DetectionMode::Numbers
}

macro_rules! rule {
    ($name:literal, phrase $sym:literal => $text:literal, $conf:expr, $fingers:expr, $when:expr) => {
        Rule {
            name: $name,
            category: Category::Phrase,
            symbol: $sym,
            phrase: Some($text),
            confidence: $conf,
            fingers: $fingers,
            when: $when,
        }
    };
    ($name:literal, $cat:ident, $sym:literal, $conf:expr, $fingers:expr, $when:expr) => {
        Rule {
            name: $name,
            category: Category::$cat,
            symbol: $sym,
            phrase: None,
            confidence: $conf,
            fingers: $fingers,
            when: $when,
        }
    };
}

/// The cascade, in evaluation order
pub static RULES: &[Rule] = &[
    // ---- Phrases ----
    rule!("i-love-you", phrase "ILY" => "I LOVE YOU", confidence::ILY,
        [EXT, EXT, CURL, CURL, EXT], always),
    // Thumb must be clearly vertical so the sideways thumb of A is not caught
    rule!("thumbs-up", phrase "GOOD" => "GOOD", confidence::GOOD,
        [EXT, CURL, CURL, CURL, CURL],
        |s, _| matches!(s.thumb_vertical(), Some(dy) if dy < -THUMB_VERTICAL_MIN)
            && s.at(THUMB_TIP).y < s.hand.wrist().y),
    rule!("thumbs-down", phrase "BAD" => "BAD", confidence::BAD,
        [EXT, CURL, CURL, CURL, CURL],
        |s, _| matches!(s.thumb_vertical(), Some(dy) if dy > THUMB_VERTICAL_MIN)
            && s.at(THUMB_TIP).y > s.hand.wrist().y),
    // Circle plus three spread fingers; F holds them together
    rule!("ok", phrase "OK" => "OK", confidence::OK,
        [ANY, ANY, EXT, EXT, EXT],
        |s, _| s.thumb_index_touching
            && s.apart(MIDDLE_TIP, RING_TIP, OK_SPREAD)
            && s.apart(RING_TIP, PINKY_TIP, OK_SPREAD)),
    rule!("stop", phrase "STOP" => "STOP", confidence::STOP,
        [CURL, EXT, EXT, EXT, EXT],
        |s, _| s.tips_within(STOP_TIGHT)),
    rule!("hello", phrase "HI" => "HELLO", confidence::HELLO,
        [EXT, EXT, EXT, EXT, EXT],
        |s, _| s.tips_apart(HELLO_SPREAD)),
    // ---- Numbers ----
    rule!("six", Number, "6", confidence::NUMBER,
        [ANY, EXT, EXT, EXT, ANY], |s, _| s.within(THUMB_TIP, PINKY_TIP, TOUCH)),
    rule!("seven", Number, "7", confidence::NUMBER,
        [ANY, EXT, EXT, ANY, EXT], |s, _| s.within(THUMB_TIP, RING_TIP, TOUCH)),
    rule!("eight", Number, "8", confidence::NUMBER,
        [ANY, EXT, ANY, EXT, EXT], |s, _| s.thumb_middle_touching),
    // Same shape as F; only a number in numbers mode
    rule!("nine", Number, "9", confidence::NUMBER,
        [ANY, ANY, EXT, EXT, EXT],
        |s, mode| s.thumb_index_touching && numbers_only(s, mode)),
    rule!("one", Number, "1", confidence::NUMBER,
        [ANY, EXT, CURL, CURL, CURL], numbers_only),
    rule!("two", Number, "2", confidence::NUMBER,
        [CURL, EXT, EXT, CURL, CURL], numbers_only),
    rule!("three", Number, "3", confidence::NUMBER,
        [EXT, EXT, EXT, CURL, CURL], numbers_only),
    rule!("four", Number, "4", confidence::NUMBER,
        [CURL, EXT, EXT, EXT, EXT], numbers_only),
    rule!("five", Number, "5", confidence::NUMBER,
        [EXT, EXT, EXT, EXT, EXT], numbers_only),
    rule!("ten", Number, "10", confidence::NUMBER_TEN,
        [EXT, CURL, CURL, CURL, CURL], numbers_only),
    // ---- Letters ----
    rule!("y", Letter, "Y", confidence::Y, [EXT, CURL, CURL, CURL, EXT], always),
    // Resting J; the motion tracker upgrades it on a drawn J
    rule!("j-static", Letter, "J", confidence::J_STATIC,
        [CURL, CURL, CURL, CURL, EXT],
        |s, _| s.at(PINKY_TIP).y > s.hand.wrist().y + J_BELOW_WRIST),
    rule!("i", Letter, "I", confidence::I, [CURL, CURL, CURL, CURL, EXT], always),
    rule!("x", Letter, "X", confidence::X, [CURL, ANY, CURL, CURL, CURL], |s, _| {
        let pip = joint_angle_deg(s.at(INDEX_MCP), s.at(INDEX_PIP), s.at(INDEX_DIP));
        let dip = joint_angle_deg(s.at(INDEX_PIP), s.at(INDEX_DIP), s.at(INDEX_TIP));
        pip > 120.0 && dip < 140.0 && dip > 60.0
    }),
    rule!("q", Letter, "Q", confidence::Q, [EXT, EXT, CURL, CURL, CURL],
        |s, _| s.points_down),
    rule!("g", Letter, "G", confidence::G, [EXT, EXT, CURL, CURL, CURL],
        |s, _| s.index_dx > s.index_dy * 1.5),
    rule!("l", Letter, "L", confidence::L, [EXT, EXT, CURL, CURL, CURL], always),
    rule!("p", Letter, "P", confidence::P, [EXT, EXT, EXT, CURL, CURL],
        |s, _| s.points_down),
    rule!("h", Letter, "H", confidence::H, [CURL, EXT, EXT, CURL, CURL],
        |s, _| s.sideways()),
    rule!("v", Letter, "V", confidence::V, [CURL, EXT, EXT, CURL, CURL],
        |s, _| s.apart(INDEX_TIP, MIDDLE_TIP, V_SPREAD)),
    rule!("u", Letter, "U", confidence::U_NO_THUMB, [CURL, EXT, EXT, CURL, CURL], always),
    rule!("u-together", Letter, "U", confidence::U_TOGETHER, [ANY, EXT, EXT, CURL, CURL],
        |s, _| s.within(INDEX_TIP, MIDDLE_TIP, V_SPREAD)),
    rule!("r", Letter, "R", confidence::R, [ANY, EXT, EXT, CURL, CURL],
        |s, _| (s.at(INDEX_TIP).x - s.at(MIDDLE_TIP).x).abs() < s.palm * R_CROSSED),
    rule!("k", Letter, "K", confidence::K, [EXT, EXT, EXT, CURL, CURL], always),
    rule!("w", Letter, "W", confidence::W, [CURL, EXT, EXT, EXT, CURL], always),
    rule!("f", Letter, "F", confidence::F, [ANY, ANY, EXT, EXT, EXT],
        |s, _| s.thumb_index_touching),
    // Resting Z; the motion tracker upgrades it on a drawn zigzag
    rule!("z-static", Letter, "Z", confidence::Z_STATIC, [ANY, EXT, CURL, CURL, CURL],
        |s, _| s.sideways()),
    rule!("d-thumb-touch", Letter, "D", confidence::D_THUMB_TOUCH, [ANY, EXT, CURL, CURL, CURL],
        |s, _| s.thumb_middle_touching),
    rule!("d", Letter, "D", confidence::D, [ANY, EXT, CURL, CURL, CURL], always),
    rule!("b", Letter, "B", confidence::B, [CURL, EXT, EXT, EXT, EXT], always),
    rule!("b-open", Letter, "B", confidence::B_OPEN, [EXT, EXT, EXT, EXT, EXT], always),
    // ---- Closed hand: thumb placement and depth ----
    rule!("t", Letter, "T", confidence::T, [CURL, CURL, CURL, CURL, CURL], |s, _| {
        let to_pip = distance_2d(s.at(THUMB_TIP), s.at(INDEX_PIP));
        to_pip < s.palm * TOUCH && to_pip < distance_2d(s.at(THUMB_TIP), s.at(INDEX_TIP))
    }),
    rule!("o", Letter, "O", confidence::O, [CURL, CURL, CURL, CURL, CURL],
        |s, _| s.thumb_index_touching),
    rule!("e", Letter, "E", confidence::E, [CURL, CURL, CURL, CURL, CURL],
        |s, _| (s.within(THUMB_TIP, MIDDLE_TIP, CLOSED_TOUCH)
            || s.within(THUMB_TIP, RING_TIP, CLOSED_TOUCH))
            && !s.thumb_index_touching),
    rule!("n", Letter, "N", confidence::N, [CURL, CURL, CURL, CURL, CURL],
        |s, _| s.within(THUMB_TIP, MIDDLE_PIP, CLOSED_TOUCH)),
    rule!("m", Letter, "M", confidence::M, [CURL, CURL, CURL, CURL, CURL],
        |s, _| s.within(THUMB_TIP, RING_MCP, CLOSED_TOUCH)),
    rule!("c", Letter, "C", confidence::C, [CURL, CURL, CURL, CURL, CURL],
        |s, _| s.at(THUMB_TIP).z < s.at(INDEX_MCP).z),
    rule!("a", Letter, "A", confidence::A, [EXT, CURL, CURL, CURL, CURL], always),
    // Thumb behind the index knuckle; in front of it already reads as C
    rule!("s", Letter, "S", confidence::S, [CURL, CURL, CURL, CURL, CURL], always),
];

/// Classify one hand's static shape
pub fn classify_static(hand: &HandKeypoints, fingers: FingerState, mode: DetectionMode) -> Classification {
    let shape = HandShape::new(hand, fingers);
    match matching_rule(&shape, mode) {
        Some(rule) => rule.classify(fingers),
        None => fallback(&shape),
    }
}

/// First rule in the cascade that fires, if any
pub fn matching_rule(shape: &HandShape, mode: DetectionMode) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(shape, mode))
}

fn fallback(shape: &HandShape) -> Classification {
    let symbol = FALLBACKS.get(shape.extended).copied().unwrap_or("?");
    Classification::new(symbol, confidence::FALLBACK, shape.fingers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::fixtures::{HandBuilder, Orientation, Thumb};

    fn classify(builder: HandBuilder, mode: DetectionMode) -> Classification {
        let hand = builder.build();
        classify_static(&hand, FingerState::from_keypoints(&hand), mode)
    }

    fn symbol(builder: HandBuilder) -> String {
        classify(builder, DetectionMode::All).symbol
    }

    #[test]
    fn test_rule_names_unique() {
        let mut names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn test_confidences_in_range() {
        for rule in RULES {
            assert!(
                (0.3..=0.95).contains(&rule.confidence),
                "{} has confidence {}",
                rule.name,
                rule.confidence
            );
        }
    }

    #[test]
    fn test_index_up_is_d() {
        let result = classify(HandBuilder::fist().index(true), DetectionMode::All);
        assert_eq!(result.symbol, "D");
        assert!((0.6..=0.8).contains(&result.confidence));
        assert_eq!(result.category, Category::Letter);
    }

    #[test]
    fn test_index_up_is_one_in_numbers_mode() {
        let result = classify(HandBuilder::fist().index(true), DetectionMode::Numbers);
        assert_eq!(result.symbol, "1");
        assert_eq!(result.category, Category::Number);
    }

    #[test]
    fn test_index_sideways_is_static_z() {
        let result = classify(
            HandBuilder::fist().index(true).oriented(Orientation::Side),
            DetectionMode::All,
        );
        assert_eq!(result.symbol, "Z");
        assert_eq!(result.confidence, confidence::Z_STATIC);
    }

    #[test]
    fn test_i_love_you_phrase() {
        let result = classify(
            HandBuilder::fist().thumb(Thumb::Side).index(true).pinky(true),
            DetectionMode::All,
        );
        assert_eq!(result.symbol, "ILY");
        assert_eq!(result.phrase.as_deref(), Some("I LOVE YOU"));
        assert_eq!(result.category, Category::Phrase);
        assert_eq!(result.confidence, confidence::ILY);
    }

    #[test]
    fn test_thumb_direction_splits_good_bad_and_a() {
        assert_eq!(symbol(HandBuilder::fist().thumb(Thumb::Up)), "GOOD");
        assert_eq!(
            symbol(HandBuilder::fist().thumb(Thumb::Up).oriented(Orientation::Down)),
            "BAD"
        );
        // Sideways thumb is not vertical enough for a phrase
        assert_eq!(symbol(HandBuilder::fist().thumb(Thumb::Side)), "A");
    }

    #[test]
    fn test_thumb_up_is_ten_in_numbers_mode() {
        // Phrases are not eligible in numbers mode
        let result = classify(HandBuilder::fist().thumb(Thumb::Up), DetectionMode::Numbers);
        assert_eq!(result.symbol, "10");
    }

    #[test]
    fn test_open_hand_spread_vs_together() {
        assert_eq!(symbol(HandBuilder::open()), "HI");
        assert_eq!(symbol(HandBuilder::open().thumb(Thumb::Tucked).together()), "STOP");
        assert_eq!(symbol(HandBuilder::open().thumb(Thumb::Tucked)), "B");
    }

    #[test]
    fn test_thumb_circle_spread_is_ok_together_is_f() {
        let circle = HandBuilder::fist()
            .middle(true)
            .ring(true)
            .pinky(true)
            .thumb_on(INDEX_TIP);

        let ok = classify(circle.clone(), DetectionMode::All);
        assert_eq!(ok.symbol, "OK");
        assert_eq!(ok.phrase.as_deref(), Some("OK"));
        assert_eq!(ok.confidence, confidence::OK);

        let f = classify(circle.together(), DetectionMode::All);
        assert_eq!(f.symbol, "F");
        assert_eq!(f.category, Category::Letter);
        assert_eq!(f.confidence, confidence::F);
    }

    #[test]
    fn test_nine_only_in_numbers_mode() {
        let circle = HandBuilder::fist()
            .middle(true)
            .ring(true)
            .pinky(true)
            .thumb_on(INDEX_TIP);

        for mode in [DetectionMode::All, DetectionMode::Letters] {
            let result = classify(circle.clone().together(), mode);
            assert_eq!(result.symbol, "F", "{:?}", mode);
            assert_eq!(result.confidence, confidence::F);
        }
        for builder in [circle.clone(), circle.together()] {
            let result = classify(builder, DetectionMode::Numbers);
            assert_eq!(result.symbol, "9");
            assert_eq!(result.category, Category::Number);
            assert_eq!(result.confidence, confidence::NUMBER);
        }
    }

    #[test]
    fn test_thumb_on_fingertip_counts_six_seven_eight() {
        let cases = [
            (HandBuilder::fist().index(true).middle(true).ring(true).thumb_on(PINKY_TIP), "6"),
            (HandBuilder::fist().index(true).middle(true).pinky(true).thumb_on(RING_TIP), "7"),
            (HandBuilder::fist().index(true).ring(true).pinky(true).thumb_on(MIDDLE_TIP), "8"),
        ];
        for (builder, expected) in cases {
            for mode in [DetectionMode::All, DetectionMode::Numbers] {
                let result = classify(builder.clone(), mode);
                assert_eq!(result.symbol, expected, "{:?}", mode);
                assert_eq!(result.category, Category::Number);
                assert_eq!(result.confidence, confidence::NUMBER);
            }
        }
    }

    #[test]
    fn test_closed_hand_by_thumb_placement() {
        let fist = HandBuilder::fist().thumb(Thumb::Across);
        let cases = [
            (fist.clone().thumb_on(INDEX_PIP), "T", confidence::T),
            (fist.clone().thumb_on(INDEX_TIP), "O", confidence::O),
            (fist.clone().thumb_near(MIDDLE_TIP, 0.03, 0.01, 0.0), "E", confidence::E),
            // Between middle and ring, clear of the index PIP
            (fist.clone().thumb_near(MIDDLE_PIP, 0.01, -0.01, 0.0), "N", confidence::N),
            (fist.thumb_near(RING_MCP, 0.02, -0.045, 0.0), "M", confidence::M),
        ];
        for (builder, expected, conf) in cases {
            let result = classify(builder, DetectionMode::All);
            assert_eq!(result.finger_state.extended_count(), 0, "{}", expected);
            assert_eq!(result.symbol, expected);
            assert_eq!(result.confidence, conf);
        }
    }

    #[test]
    fn test_thumb_depth_splits_c_and_s() {
        // Thumb clear of every knuckle, only depth differs
        let fist = HandBuilder::fist().thumb(Thumb::Across);

        let c = classify(fist.clone().thumb_near(INDEX_MCP, 0.0, 0.09, -0.04), DetectionMode::All);
        assert_eq!(c.symbol, "C");
        assert_eq!(c.confidence, confidence::C);

        let s = classify(fist.thumb_near(INDEX_MCP, 0.0, 0.09, 0.04), DetectionMode::All);
        assert_eq!(s.symbol, "S");
        assert_eq!(s.confidence, confidence::S);
    }

    #[test]
    fn test_two_fingers_with_thumb_out() {
        let two = HandBuilder::fist().thumb(Thumb::Side).index(true).middle(true);
        // Middle tip leans over onto the index line
        let crossed = Keypoint::new(0.445, 0.43, 0.0);
        let cases = [
            (two.clone(), "K", confidence::K),
            (two.clone().oriented(Orientation::Down), "P", confidence::P),
            (two.clone().together(), "U", confidence::U_TOGETHER),
            (two.with_point(MIDDLE_TIP, crossed), "R", confidence::R),
        ];
        for (builder, expected, conf) in cases {
            let result = classify(builder, DetectionMode::All);
            assert_eq!(result.symbol, expected);
            assert_eq!(result.confidence, conf, "{}", expected);
        }

        let tucked = classify(
            HandBuilder::fist().index(true).middle(true).together(),
            DetectionMode::All,
        );
        assert_eq!(tucked.symbol, "U");
        assert_eq!(tucked.confidence, confidence::U_NO_THUMB);
    }

    #[test]
    fn test_l_g_q_by_orientation() {
        let base = HandBuilder::fist().thumb(Thumb::Side).index(true);
        assert_eq!(symbol(base.clone()), "L");
        assert_eq!(symbol(base.clone().oriented(Orientation::Side)), "G");
        assert_eq!(symbol(base.oriented(Orientation::Down)), "Q");
    }

    #[test]
    fn test_two_fingers_v_u_h() {
        let two = HandBuilder::fist().index(true).middle(true);
        assert_eq!(symbol(two.clone()), "V");
        assert_eq!(symbol(two.clone().together()), "U");
        assert_eq!(symbol(two.oriented(Orientation::Side)), "H");
    }

    #[test]
    fn test_pinky_shapes() {
        assert_eq!(symbol(HandBuilder::fist().pinky(true)), "I");
        assert_eq!(symbol(HandBuilder::fist().thumb(Thumb::Side).pinky(true)), "Y");
        // Pinky below the wrist reads as a resting J
        let down = classify(
            HandBuilder::fist().pinky(true).oriented(Orientation::Down),
            DetectionMode::All,
        );
        assert_eq!(down.symbol, "J");
        assert_eq!(down.confidence, confidence::J_STATIC);
    }

    #[test]
    fn test_three_fingers_w() {
        assert_eq!(symbol(HandBuilder::fist().index(true).middle(true).ring(true)), "W");
    }

    #[test]
    fn test_hooked_index_is_x() {
        assert_eq!(symbol(HandBuilder::fist().hooked_index()), "X");
    }

    #[test]
    fn test_letters_mode_skips_phrases() {
        // ILY shape has no letter rule; count fallback with 3 fingers
        let result = classify(
            HandBuilder::fist().thumb(Thumb::Side).index(true).pinky(true),
            DetectionMode::Letters,
        );
        assert_eq!(result.symbol, "W");
        assert_eq!(result.confidence, confidence::FALLBACK);
    }

    #[test]
    fn test_phrases_mode_falls_back_for_letters() {
        let result = classify(HandBuilder::fist().index(true), DetectionMode::Phrases);
        assert_eq!(result.symbol, "D");
        assert_eq!(result.confidence, confidence::FALLBACK);
    }

    #[test]
    fn test_first_match_wins() {
        let hand = HandBuilder::fist().thumb(Thumb::Side).index(true).pinky(true).build();
        let shape = HandShape::new(&hand, FingerState::from_keypoints(&hand));
        let rule = matching_rule(&shape, DetectionMode::All).unwrap();
        assert_eq!(rule.name, "i-love-you");
    }

    #[test]
    fn test_total_on_degenerate_hand() {
        let hand = HandKeypoints::new([Keypoint::new(0.5, 0.5, 0.0); 21]);
        let result = classify_static(&hand, FingerState::from_keypoints(&hand), DetectionMode::All);
        assert!((0.0..=1.0).contains(&result.confidence));
        assert_eq!(result.symbol, "S");
    }

    #[test]
    fn test_collapsed_hand_is_never_spread() {
        // Zero palm: coincident tips must not pass the spread checks
        let hand = HandKeypoints::new([Keypoint::new(0.5, 0.5, 0.0); 21]);
        let open = FingerState {
            thumb: true,
            index: true,
            middle: true,
            ring: true,
            pinky: true,
        };
        let result = classify_static(&hand, open, DetectionMode::All);
        assert_eq!(result.symbol, "B");
        assert_eq!(result.confidence, confidence::B_OPEN);

        let two = FingerState {
            index: true,
            middle: true,
            ..FingerState::default()
        };
        let result = classify_static(&hand, two, DetectionMode::All);
        assert_eq!(result.symbol, "U");
        assert_eq!(result.confidence, confidence::U_NO_THUMB);
    }
}
