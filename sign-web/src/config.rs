//! Recognizer configuration
//!
//! Defaults reproduce the tuned constants. JS may pass a partial object;
//! missing fields fall back to the default.

use serde::{Deserialize, Serialize};

use crate::classifier::DetectionMode;
use crate::error::{RecognizerError, Result};
use crate::motion::MIN_Z_SAMPLES;

/// Minimum continuous hold before a symbol is committed
pub const HOLD_DURATION_MS: f64 = 800.0;

/// Smoothed confidence required to start or continue a hold
pub const MIN_COMMIT_CONFIDENCE: f32 = 0.6;

/// Smoothing window length
pub const HISTORY_SIZE: usize = 8;

/// Fraction of the window that must agree on the winner
pub const MIN_CONSENSUS: f32 = 0.5;

/// Trajectory samples kept per fingertip (~0.5s at 60fps)
pub const MOTION_BUFFER_CAPACITY: usize = 30;

/// Consecutive frames a prerequisite shape must be held before matching
pub const MIN_SHAPE_FRAMES: u32 = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecognizerConfig {
    pub mode: DetectionMode,
    pub hold_duration_ms: f64,
    pub min_commit_confidence: f32,
    pub history_size: usize,
    pub min_consensus: f32,
    pub motion_buffer_capacity: usize,
    pub min_shape_frames: u32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            mode: DetectionMode::All,
            hold_duration_ms: HOLD_DURATION_MS,
            min_commit_confidence: MIN_COMMIT_CONFIDENCE,
            history_size: HISTORY_SIZE,
            min_consensus: MIN_CONSENSUS,
            motion_buffer_capacity: MOTION_BUFFER_CAPACITY,
            min_shape_frames: MIN_SHAPE_FRAMES,
        }
    }
}

impl RecognizerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.hold_duration_ms.is_finite() || self.hold_duration_ms < 0.0 {
            return Err(invalid(format!(
                "holdDurationMs must be a non-negative number, got {}",
                self.hold_duration_ms
            )));
        }
        if !(0.0..=1.0).contains(&self.min_commit_confidence) {
            return Err(invalid(format!(
                "minCommitConfidence must lie in [0, 1], got {}",
                self.min_commit_confidence
            )));
        }
        if self.history_size == 0 {
            return Err(invalid("historySize must be at least 1".to_string()));
        }
        if !(self.min_consensus > 0.0 && self.min_consensus <= 1.0) {
            return Err(invalid(format!(
                "minConsensus must lie in (0, 1], got {}",
                self.min_consensus
            )));
        }
        if self.motion_buffer_capacity < MIN_Z_SAMPLES {
            return Err(invalid(format!(
                "motionBufferCapacity must be at least {}, got {}",
                MIN_Z_SAMPLES, self.motion_buffer_capacity
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> RecognizerError {
    RecognizerError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(RecognizerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: RecognizerConfig =
            serde_json::from_str(r#"{ "mode": "numbers", "holdDurationMs": 500 }"#).unwrap();
        assert_eq!(config.mode, DetectionMode::Numbers);
        assert_eq!(config.hold_duration_ms, 500.0);
        assert_eq!(config.history_size, HISTORY_SIZE);
        assert_eq!(config.min_shape_frames, MIN_SHAPE_FRAMES);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut config = RecognizerConfig::default();
        config.history_size = 0;
        assert!(matches!(config.validate(), Err(RecognizerError::InvalidConfig(_))));

        let mut config = RecognizerConfig::default();
        config.min_consensus = 1.5;
        assert!(config.validate().is_err());

        let mut config = RecognizerConfig::default();
        config.motion_buffer_capacity = 5;
        assert!(config.validate().is_err());

        let mut config = RecognizerConfig::default();
        config.hold_duration_ms = f64::NAN;
        assert!(config.validate().is_err());
    }
}
