//! Merging the rule cascade with secondary classifiers
//!
//! Policy, first match wins:
//! 1. No secondary has an opinion: rule result.
//! 2. A secondary above 0.8: trust it, keeping the rule's finger state.
//! 3. Both secondaries answered and two of the three sources agree: fused
//!    vote at the mean agreeing confidence × 1.1.
//! 4. Rule above 0.75 and secondary below 0.5: rule result.
//! 5. Rule and secondary agree: rule symbol at (a + b) / 1.5.
//! 6. Otherwise the more confident of the two; the rule wins ties.
//!
//! Whatever loses is listed as an alternative. Deterministic: ties always
//! resolve by slot order.

use log::{trace, warn};

use super::features::FeatureVector;
use super::secondary::{Absent, SecondaryClassifier};
use super::types::{clamp_confidence, Alternative, Classification, Source};

pub const TRUST_SECONDARY: f32 = 0.8;
pub const TRUST_RULE: f32 = 0.75;
pub const WEAK_SECONDARY: f32 = 0.5;
pub const MAJORITY_BOOST: f32 = 1.1;
pub const AGREEMENT_DIVISOR: f32 = 1.5;

/// Secondary classifier slots, in tie-break order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SecondarySlot {
    LearnedModel = 0,
    PoseEstimator = 1,
}

pub struct ClassifierFusion {
    slots: [Box<dyn SecondaryClassifier>; 2],
}

impl ClassifierFusion {
    pub fn new() -> Self {
        Self {
            slots: [Box::new(Absent), Box::new(Absent)],
        }
    }

    pub fn attach(&mut self, slot: SecondarySlot, classifier: Box<dyn SecondaryClassifier>) {
        self.slots[slot as usize] = classifier;
    }

    pub fn detach(&mut self, slot: SecondarySlot) {
        self.slots[slot as usize] = Box::new(Absent);
    }

    pub fn is_ready(&self, slot: SecondarySlot) -> bool {
        self.slots[slot as usize].is_ready()
    }

    /// Fuse the rule result with every ready secondary
    pub fn classify(&self, rule: Classification, features: &FeatureVector) -> Classification {
        // Motion letters have no static counterpart to vote against
        if rule.motion_detected {
            return rule.with_source(Source::Rule);
        }

        let secondary: Vec<Classification> = self
            .slots
            .iter()
            .filter(|c| c.is_ready())
            .filter_map(|c| c.classify(features).and_then(|r| sanitize(c.name(), r)))
            .collect();

        fuse(rule, secondary)
    }
}

impl Default for ClassifierFusion {
    fn default() -> Self {
        Self::new()
    }
}

/// Malformed secondary output counts as no opinion
fn sanitize(name: &str, mut result: Classification) -> Option<Classification> {
    if result.symbol.trim().is_empty() || !result.confidence.is_finite() {
        warn!("{} returned a malformed result, ignoring", name);
        return None;
    }
    result.confidence = clamp_confidence(result.confidence);
    Some(result)
}

/// Apply the fusion policy to already-collected results
pub fn fuse(rule: Classification, mut secondary: Vec<Classification>) -> Classification {
    if secondary.is_empty() {
        return rule.with_source(Source::Rule);
    }

    // 2. A confident secondary wins outright
    let confident = secondary
        .iter()
        .enumerate()
        .filter(|(_, s)| s.confidence > TRUST_SECONDARY)
        .fold(None, |best: Option<(usize, f32)>, (i, s)| match best {
            Some((_, top)) if top >= s.confidence => best,
            _ => Some((i, s.confidence)),
        });
    if let Some((index, _)) = confident {
        let chosen = secondary.swap_remove(index);
        trace!("fusion: secondary {} above trust threshold", chosen.symbol);
        return adopt_secondary(chosen, &rule);
    }

    // 3. Majority vote across all three sources
    let mut leftover = None;
    if secondary.len() >= 2 {
        let second = secondary.swap_remove(1);
        let first = secondary.swap_remove(0);
        if let Some(result) = majority(&rule, &first, &second) {
            return result;
        }
        // No majority: continue with the stronger secondary
        let (stronger, weaker) = if second.confidence > first.confidence {
            (second, first)
        } else {
            (first, second)
        };
        secondary = vec![stronger];
        leftover = Some(weaker);
    }

    let Some(other) = secondary.pop() else {
        return rule.with_source(Source::Rule);
    };
    let mut result = pairwise(rule, other);
    if let Some(weaker) = leftover {
        result = result.with_alternative(&weaker);
    }
    result
}

/// Rules 4-6 for the rule result and a single secondary
fn pairwise(rule: Classification, other: Classification) -> Classification {
    if rule.confidence > TRUST_RULE && other.confidence < WEAK_SECONDARY {
        trace!("fusion: confident rule over weak secondary");
        return rule.with_source(Source::Rule).with_alternative(&other);
    }

    if rule.symbol == other.symbol {
        let confidence = ((rule.confidence + other.confidence) / AGREEMENT_DIVISOR).min(1.0);
        trace!("fusion: rule and secondary agree on {}", rule.symbol);
        return rule.with_confidence(confidence).with_source(Source::Fused);
    }

    if other.confidence > rule.confidence {
        adopt_secondary(other, &rule)
    } else {
        rule.with_source(Source::Rule).with_alternative(&other)
    }
}

fn majority(
    rule: &Classification,
    first: &Classification,
    second: &Classification,
) -> Option<Classification> {
    let sources = [rule, first, second];
    let winner = if rule.symbol == first.symbol || rule.symbol == second.symbol {
        &rule.symbol
    } else if first.symbol == second.symbol {
        &first.symbol
    } else {
        return None;
    };

    let agreeing: Vec<&Classification> =
        sources.iter().copied().filter(|s| &s.symbol == winner).collect();
    let mean = agreeing.iter().map(|s| s.confidence).sum::<f32>() / agreeing.len() as f32;
    let confidence = (mean * MAJORITY_BOOST).min(1.0);

    // Base on the rule when it agrees, otherwise the first agreeing secondary
    let base = agreeing[0];
    let mut result = base
        .clone()
        .with_confidence(confidence)
        .with_source(Source::Fused);
    result.finger_state = rule.finger_state;
    result.alternatives.clear();
    for dissent in sources.iter().filter(|s| &s.symbol != winner) {
        result = result.with_alternative(dissent);
    }
    trace!("fusion: {} of 3 sources agree on {}", agreeing.len(), winner);
    Some(result)
}

fn adopt_secondary(mut chosen: Classification, rule: &Classification) -> Classification {
    chosen.finger_state = rule.finger_state;
    chosen.source = Some(Source::Secondary);
    chosen.alternatives.insert(
        0,
        Alternative {
            symbol: rule.symbol.clone(),
            confidence: rule.confidence,
        },
    );
    chosen
}
