//! Per-frame orchestration
//!
//! keypoints → finger state → rule cascade → motion upgrade → fusion, for
//! every hand; then smoothing and sentence accumulation for the primary hand.
//!
//! Each hand keeps its slot across frames by handedness, whatever order the
//! detector reports hands in. Each slot owns its motion state, so two hands
//! never share a trajectory. The primary hand is the first one seen and
//! stays primary until it leaves while another hand is still in view.

use log::{debug, trace, warn};
use serde::Serialize;

use crate::classifier::{
    classify_static, extract_features, Classification, ClassifierFusion, DetectionMode,
    SampleRecorder,
};
use crate::config::RecognizerConfig;
use crate::error::{RecognizerError, Result};
use crate::hand::{FingerState, HandKeypoints, Handedness, FLAT_HAND_LEN};
use crate::motion::MotionTracker;
use crate::sentence::SentenceAccumulator;
use crate::smoothing::TemporalSmoother;

/// Hands tracked at once
pub const MAX_HANDS: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct HandInput {
    pub keypoints: HandKeypoints,
    pub handedness: Handedness,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameInput {
    pub timestamp_ms: f64,
    pub hands: Vec<HandInput>,
}

impl FrameInput {
    pub fn new(timestamp_ms: f64, hands: Vec<HandInput>) -> Self {
        Self { timestamp_ms, hands }
    }

    /// Split a flat buffer of 63 floats per hand; missing labels are `Unknown`
    pub fn from_flat(timestamp_ms: f64, flat: &[f32], handedness: &[Handedness]) -> Result<Self> {
        if flat.len() % FLAT_HAND_LEN != 0 {
            return Err(RecognizerError::FlatBufferLength {
                len: flat.len(),
                per_hand: FLAT_HAND_LEN,
            });
        }
        let count = flat.len() / FLAT_HAND_LEN;
        if count > MAX_HANDS {
            return Err(RecognizerError::TooManyHands {
                actual: count,
                max: MAX_HANDS,
            });
        }

        let hands = flat
            .chunks_exact(FLAT_HAND_LEN)
            .enumerate()
            .map(|(i, chunk)| {
                Ok(HandInput {
                    keypoints: HandKeypoints::from_flat(chunk)?,
                    handedness: handedness.get(i).copied().unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(timestamp_ms, hands))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandOutput {
    pub slot: usize,
    pub handedness: Handedness,
    pub classification: Classification,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutput {
    pub timestamp_ms: f64,
    pub hands: Vec<HandOutput>,
    /// Smoothed result for the primary hand
    pub primary: Option<Classification>,
    pub sentence: String,
    /// Text appended on this frame
    pub committed: Option<String>,
}

/// Per-hand state that follows one tracked hand
struct HandSlot {
    /// Handedness of the hand that last occupied the slot
    identity: Option<Handedness>,
    tracker: MotionTracker,
}

impl HandSlot {
    fn new(config: &RecognizerConfig) -> Self {
        Self {
            identity: None,
            tracker: MotionTracker::new(config.motion_buffer_capacity, config.min_shape_frames),
        }
    }
}

/// Slot index for each input hand, in input order
fn assign_slots(slots: &[HandSlot; MAX_HANDS], hands: &[HandInput]) -> [Option<usize>; MAX_HANDS] {
    let mut assigned = [None; MAX_HANDS];
    let mut claimed = [false; MAX_HANDS];

    // Returning hands go back to the slot that last held their label
    for (i, hand) in hands.iter().enumerate() {
        let found = (0..MAX_HANDS)
            .find(|&s| !claimed[s] && slots[s].identity == Some(hand.handedness));
        if let Some(s) = found {
            claimed[s] = true;
            assigned[i] = Some(s);
        }
    }

    // Everything else takes a free slot, never-used slots first
    for (i, _) in hands.iter().enumerate() {
        if assigned[i].is_some() {
            continue;
        }
        let found = (0..MAX_HANDS)
            .find(|&s| !claimed[s] && slots[s].identity.is_none())
            .or_else(|| (0..MAX_HANDS).find(|&s| !claimed[s]));
        if let Some(s) = found {
            claimed[s] = true;
            assigned[i] = Some(s);
        }
    }
    assigned
}

pub struct Recognizer {
    mode: DetectionMode,
    slots: [HandSlot; MAX_HANDS],
    primary: Option<usize>,
    fusion: ClassifierFusion,
    smoother: TemporalSmoother,
    sentence: SentenceAccumulator,
    recorder: SampleRecorder,
    last_timestamp: Option<f64>,
}

impl Recognizer {
    pub fn new(config: &RecognizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &RecognizerConfig) -> Self {
        Self {
            mode: config.mode,
            slots: [HandSlot::new(config), HandSlot::new(config)],
            primary: None,
            fusion: ClassifierFusion::new(),
            smoother: TemporalSmoother::new(config.history_size, config.min_consensus),
            sentence: SentenceAccumulator::new(
                config.hold_duration_ms,
                config.min_commit_confidence,
            ),
            recorder: SampleRecorder::new(),
            last_timestamp: None,
        }
    }

    /// Run one frame; `Ok(None)` when it is dropped for arriving out of order
    pub fn process_frame(&mut self, frame: &FrameInput) -> Result<Option<FrameOutput>> {
        if frame.hands.len() > MAX_HANDS {
            warn!("rejecting frame with {} hands", frame.hands.len());
            return Err(RecognizerError::TooManyHands {
                actual: frame.hands.len(),
                max: MAX_HANDS,
            });
        }
        if !frame.timestamp_ms.is_finite() {
            debug!("dropping frame with timestamp {}", frame.timestamp_ms);
            return Ok(None);
        }
        if let Some(last) = self.last_timestamp {
            if frame.timestamp_ms <= last {
                debug!(
                    "dropping frame at {}ms, last processed {}ms",
                    frame.timestamp_ms, last
                );
                return Ok(None);
            }
        }
        self.last_timestamp = Some(frame.timestamp_ms);

        let assigned = assign_slots(&self.slots, &frame.hands);
        let mut occupant: [Option<&HandInput>; MAX_HANDS] = [None; MAX_HANDS];
        for (input, slot) in frame.hands.iter().zip(assigned) {
            if let Some(slot) = slot {
                occupant[slot] = Some(input);
            }
        }

        self.update_primary(&occupant);

        let mut hands = Vec::with_capacity(frame.hands.len());
        let mut primary_features = None;
        for (slot, state) in self.slots.iter_mut().enumerate() {
            let Some(input) = occupant[slot] else {
                state.tracker.reset();
                continue;
            };
            if state.identity != Some(input.handedness) {
                if state.identity.is_some() {
                    debug!("slot {} now holds a {:?} hand", slot, input.handedness);
                }
                state.tracker.reset();
                state.identity = Some(input.handedness);
            }

            let fingers = FingerState::from_keypoints(&input.keypoints);
            let features = extract_features(&input.keypoints, &fingers);
            let rule = classify_static(&input.keypoints, fingers, self.mode);
            let staged = state.tracker.apply(rule, &input.keypoints, frame.timestamp_ms);
            let classification = self.fusion.classify(staged, &features);
            trace!(
                "slot {}: {} ({:.2}, {:?})",
                slot,
                classification.symbol,
                classification.confidence,
                classification.source
            );

            if self.primary == Some(slot) {
                primary_features = Some(features);
            }
            hands.push(HandOutput {
                slot,
                handedness: input.handedness,
                classification,
            });
        }

        if let Some(features) = primary_features {
            self.recorder.record(&features, frame.timestamp_ms);
        }

        let raw = hands
            .iter()
            .find(|h| Some(h.slot) == self.primary)
            .map(|h| h.classification.clone());
        let primary = self.smoother.smooth(raw);
        let committed = self.sentence.process(primary.as_ref(), frame.timestamp_ms);

        Ok(Some(FrameOutput {
            timestamp_ms: frame.timestamp_ms,
            hands,
            primary,
            sentence: self.sentence.text().to_string(),
            committed,
        }))
    }

    /// Keep the primary hand while it is in view; hand over to another
    /// visible hand only when it leaves
    fn update_primary(&mut self, occupant: &[Option<&HandInput>; MAX_HANDS]) {
        if let Some(slot) = self.primary {
            if occupant[slot].is_some() {
                // Same slot, but a different hand took it over
                if self.slots[slot].identity != occupant[slot].map(|h| h.handedness) {
                    self.smoother.reset();
                }
                return;
            }
        }
        let Some(next) = occupant.iter().position(Option::is_some) else {
            return;
        };
        if self.primary.is_some() {
            debug!("primary hand moved to slot {}", next);
            self.smoother.reset();
        }
        self.primary = Some(next);
    }

    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DetectionMode) {
        if mode != self.mode {
            debug!("detection mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn fusion(&self) -> &ClassifierFusion {
        &self.fusion
    }

    pub fn fusion_mut(&mut self) -> &mut ClassifierFusion {
        &mut self.fusion
    }

    pub fn sentence(&self) -> &SentenceAccumulator {
        &self.sentence
    }

    pub fn sentence_mut(&mut self) -> &mut SentenceAccumulator {
        &mut self.sentence
    }

    pub fn recorder(&self) -> &SampleRecorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut SampleRecorder {
        &mut self.recorder
    }

    pub fn tracker(&self, slot: usize) -> Option<&MotionTracker> {
        self.slots.get(slot).map(|s| &s.tracker)
    }

    /// Slot whose results feed the smoother and the sentence
    pub fn primary_slot(&self) -> Option<usize> {
        self.primary
    }

    /// Drop hand identities, motion and vote history; the sentence is kept
    pub fn reset_tracking(&mut self) {
        for slot in &mut self.slots {
            slot.tracker.reset();
            slot.identity = None;
        }
        self.primary = None;
        self.smoother.reset();
        self.last_timestamp = None;
    }
}

impl Default for Recognizer {
    fn default() -> Self {
        Self::build(&RecognizerConfig::default())
    }
}
