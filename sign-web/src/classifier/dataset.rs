//! Training sample capture
//!
//! Records labelled feature vectors in bursts of a fixed number of frames
//! and round-trips them through JSON for an offline trainer.

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{RecognizerError, Result};

use super::features::{FeatureVector, FEATURE_COUNT};

/// Frames captured per recording burst
pub const FRAMES_PER_SIGN: usize = 30;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub label: String,
    pub features: Vec<f32>,
    #[serde(default)]
    pub timestamp: f64,
}

impl TrainingSample {
    fn validate(&self) -> Result<()> {
        if self.features.len() != FEATURE_COUNT {
            return Err(RecognizerError::SampleLength {
                label: self.label.clone(),
                expected: FEATURE_COUNT,
                actual: self.features.len(),
            });
        }
        Ok(())
    }
}

struct Burst {
    label: String,
    remaining: usize,
}

#[derive(Default)]
pub struct SampleRecorder {
    samples: Vec<TrainingSample>,
    burst: Option<Burst>,
}

impl SampleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start capturing `frames` samples under `label`, replacing any burst in progress
    pub fn start(&mut self, label: &str, frames: usize) {
        self.burst = (frames > 0).then(|| Burst {
            label: label.to_string(),
            remaining: frames,
        });
    }

    pub fn stop(&mut self) {
        self.burst = None;
    }

    pub fn is_recording(&self) -> bool {
        self.burst.is_some()
    }

    /// Label of the burst in progress
    pub fn current_label(&self) -> Option<&str> {
        self.burst.as_ref().map(|b| b.label.as_str())
    }

    /// Store one frame if a burst is active; returns whether it was kept
    pub fn record(&mut self, features: &FeatureVector, timestamp: f64) -> bool {
        let Some(burst) = self.burst.as_mut() else {
            return false;
        };

        self.samples.push(TrainingSample {
            label: burst.label.clone(),
            features: features.to_vec(),
            timestamp,
        });
        burst.remaining -= 1;

        if burst.remaining == 0 {
            info!("captured burst for '{}'", burst.label);
            self.burst = None;
        }
        true
    }

    pub fn samples(&self) -> &[TrainingSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples per label, sorted by label
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for sample in &self.samples {
            *counts.entry(sample.label.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.burst = None;
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.samples)?)
    }

    /// Append samples from JSON; nothing is added if any sample is malformed
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let imported = parse_samples(json)?;
        let count = imported.len();
        self.samples.extend(imported);
        Ok(count)
    }
}

pub fn parse_samples(json: &str) -> Result<Vec<TrainingSample>> {
    let samples: Vec<TrainingSample> = serde_json::from_str(json)?;
    for sample in &samples {
        sample.validate()?;
    }
    Ok(samples)
}
