//! Optional secondary classifiers
//!
//! Fusion only sees the `SecondaryClassifier` capability. A learned model
//! lives behind a shared slot that a one-shot loader fills in later; until
//! then it reports not ready and the frame loop never waits on it.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};

use super::features::{finger_state_from_features, FeatureVector};
use super::types::{Category, Classification, Source};

/// Output order of the learned model; must match its label encoding
pub const CLASS_LABELS: [&str; 38] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z", "ILY", "GOOD", "BAD", "OK", "STOP", "HI", "THANK_YOU",
    "YES", "NO", "PLEASE", "SORRY", "DONE",
];

/// Labels that stand for a whole phrase, and the text they commit
const PHRASE_MAP: [(&str, &str); 12] = [
    ("ILY", "I LOVE YOU"),
    ("GOOD", "GOOD"),
    ("BAD", "BAD"),
    ("OK", "OK"),
    ("STOP", "STOP"),
    ("HI", "HELLO"),
    ("THANK_YOU", "THANK YOU"),
    ("YES", "YES"),
    ("NO", "NO"),
    ("PLEASE", "PLEASE"),
    ("SORRY", "SORRY"),
    ("DONE", "DONE"),
];

pub fn phrase_for_label(label: &str) -> Option<&'static str> {
    PHRASE_MAP
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, text)| *text)
}

/// Category a bare label belongs to
pub fn category_for_label(label: &str) -> Category {
    if phrase_for_label(label).is_some() {
        Category::Phrase
    } else if !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()) {
        Category::Number
    } else {
        Category::Letter
    }
}

/// A classifier consulted alongside the rule cascade
pub trait SecondaryClassifier {
    fn name(&self) -> &'static str;

    /// Checked every frame; must not block
    fn is_ready(&self) -> bool;

    /// `None` means no opinion for this frame
    fn classify(&self, features: &FeatureVector) -> Option<Classification>;
}

/// Placeholder for an empty slot
pub struct Absent;

impl SecondaryClassifier for Absent {
    fn name(&self) -> &'static str {
        "absent"
    }

    fn is_ready(&self) -> bool {
        false
    }

    fn classify(&self, _features: &FeatureVector) -> Option<Classification> {
        None
    }
}

/// Raw per-label scores from a model
pub trait Scorer {
    fn scores(&self, features: &FeatureVector) -> Option<Vec<f32>>;
}

impl<F> Scorer for F
where
    F: Fn(&FeatureVector) -> Option<Vec<f32>>,
{
    fn scores(&self, features: &FeatureVector) -> Option<Vec<f32>> {
        self(features)
    }
}

/// Argmax adapter over an externally loaded model
pub struct LearnedModel<S> {
    slot: Rc<RefCell<Option<S>>>,
    labels: Vec<String>,
}

/// Write side of a `LearnedModel`, handed to the loader task
pub struct ModelPublisher<S> {
    slot: Rc<RefCell<Option<S>>>,
}

impl<S: Scorer> LearnedModel<S> {
    pub fn new() -> (Self, ModelPublisher<S>) {
        Self::with_labels(CLASS_LABELS.iter().map(|l| l.to_string()).collect())
    }

    pub fn with_labels(labels: Vec<String>) -> (Self, ModelPublisher<S>) {
        let slot = Rc::new(RefCell::new(None));
        let publisher = ModelPublisher { slot: slot.clone() };
        (Self { slot, labels }, publisher)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn pick(&self, scores: &[f32]) -> Option<(usize, f32)> {
        if scores.len() != self.labels.len() {
            warn!(
                "model returned {} scores for {} labels",
                scores.len(),
                self.labels.len()
            );
            return None;
        }
        if scores.iter().any(|s| !s.is_finite()) {
            warn!("model returned a non-finite score");
            return None;
        }
        // First index wins ties
        scores
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, s)| match best {
                Some((_, top)) if top >= s => best,
                _ => Some((i, s)),
            })
    }
}

impl<S> ModelPublisher<S> {
    pub fn publish(&self, scorer: S) {
        *self.slot.borrow_mut() = Some(scorer);
        info!("learned model ready");
    }

    pub fn withdraw(&self) {
        self.slot.borrow_mut().take();
    }
}

impl<S: Scorer> SecondaryClassifier for LearnedModel<S> {
    fn name(&self) -> &'static str {
        "learned-model"
    }

    fn is_ready(&self) -> bool {
        self.slot.borrow().is_some()
    }

    fn classify(&self, features: &FeatureVector) -> Option<Classification> {
        let slot = self.slot.borrow();
        let scores = slot.as_ref()?.scores(features)?;
        let (index, score) = self.pick(&scores)?;

        let label = &self.labels[index];
        let result = Classification::new(label.as_str(), score, finger_state_from_features(features))
            .with_source(Source::Secondary);
        Some(match phrase_for_label(label) {
            Some(phrase) => result.with_phrase(phrase),
            None => result.with_category(category_for_label(label)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::FEATURE_COUNT;

    type ScoreFn = Box<dyn Fn(&FeatureVector) -> Option<Vec<f32>>>;

    fn one_hot(label: &'static str, score: f32) -> ScoreFn {
        Box::new(move |_: &FeatureVector| {
            let mut scores = vec![0.01; CLASS_LABELS.len()];
            let index = CLASS_LABELS.iter().position(|l| *l == label)?;
            scores[index] = score;
            Some(scores)
        })
    }

    #[test]
    fn test_absent_is_never_ready() {
        assert!(!Absent.is_ready());
        assert!(Absent.classify(&[0.0; FEATURE_COUNT]).is_none());
    }

    #[test]
    fn test_not_ready_until_published() {
        let (model, publisher) = LearnedModel::<ScoreFn>::new();
        assert!(!model.is_ready());
        assert!(model.classify(&[0.0; FEATURE_COUNT]).is_none());

        publisher.publish(one_hot("B", 0.9));
        assert!(model.is_ready());
        let result = model.classify(&[0.0; FEATURE_COUNT]).unwrap();
        assert_eq!(result.symbol, "B");
        assert!((result.confidence - 0.9).abs() < 1e-6);
        assert_eq!(result.source, Some(Source::Secondary));

        publisher.withdraw();
        assert!(!model.is_ready());
    }

    #[test]
    fn test_phrase_labels_map_to_text() {
        let (model, publisher) = LearnedModel::<ScoreFn>::new();
        publisher.publish(one_hot("THANK_YOU", 0.7));
        let result = model.classify(&[0.0; FEATURE_COUNT]).unwrap();
        assert_eq!(result.category, Category::Phrase);
        assert_eq!(result.output_text(), "THANK YOU");
    }

    #[test]
    fn test_malformed_scores_give_no_result() {
        let (model, publisher) = LearnedModel::<ScoreFn>::new();
        publisher.publish(Box::new(|_: &FeatureVector| Some(vec![0.5; 3])));
        assert!(model.classify(&[0.0; FEATURE_COUNT]).is_none());

        publisher.publish(Box::new(|_: &FeatureVector| {
            let mut scores = vec![0.0; CLASS_LABELS.len()];
            scores[2] = f32::NAN;
            Some(scores)
        }));
        assert!(model.classify(&[0.0; FEATURE_COUNT]).is_none());

        publisher.publish(Box::new(|_: &FeatureVector| None));
        assert!(model.classify(&[0.0; FEATURE_COUNT]).is_none());
    }

    #[test]
    fn test_custom_labels_and_tie_break() {
        let labels = vec!["1".to_string(), "2".to_string(), "X".to_string()];
        let (model, publisher) = LearnedModel::<ScoreFn>::with_labels(labels);
        publisher.publish(Box::new(|_: &FeatureVector| Some(vec![0.4, 0.4, 0.2])));
        let result = model.classify(&[0.0; FEATURE_COUNT]).unwrap();
        assert_eq!(result.symbol, "1");
        assert_eq!(result.category, Category::Number);
    }

    #[test]
    fn test_label_table() {
        assert_eq!(CLASS_LABELS.len(), 38);
        assert_eq!(phrase_for_label("HI"), Some("HELLO"));
        assert_eq!(phrase_for_label("A"), None);
        assert_eq!(category_for_label("7"), Category::Number);
    }
}
