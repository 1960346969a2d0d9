//! Hold-to-commit text accumulation
//!
//! A symbol is appended once it has been held continuously for the hold
//! duration. After a commit the hold restarts, and the same symbol is not
//! appended again until a low-confidence gap (or a manual edit) releases it.

use log::info;

use crate::classifier::{Category, Classification};
use crate::config::{HOLD_DURATION_MS, MIN_COMMIT_CONFIDENCE};

#[derive(Clone, Debug, PartialEq)]
struct Hold {
    symbol: String,
    started_ms: f64,
}

pub struct SentenceAccumulator {
    text: String,
    hold: Option<Hold>,
    last_appended: Option<String>,
    hold_duration_ms: f64,
    min_confidence: f32,
}

impl SentenceAccumulator {
    pub fn new(hold_duration_ms: f64, min_confidence: f32) -> Self {
        Self {
            text: String::new(),
            hold: None,
            last_appended: None,
            hold_duration_ms,
            min_confidence,
        }
    }

    /// Advance the state machine by one frame; returns the text appended, if any
    pub fn process(&mut self, result: Option<&Classification>, now_ms: f64) -> Option<String> {
        let result = match result {
            Some(r) if r.confidence >= self.min_confidence => r,
            _ => {
                self.hold = None;
                self.last_appended = None;
                return None;
            }
        };

        let started_ms = match &self.hold {
            Some(hold) if hold.symbol == result.symbol => hold.started_ms,
            _ => {
                self.hold = Some(Hold {
                    symbol: result.symbol.clone(),
                    started_ms: now_ms,
                });
                return None;
            }
        };

        if now_ms - started_ms < self.hold_duration_ms {
            return None;
        }

        // Held long enough: release the timer either way
        self.hold = None;
        if self.last_appended.as_deref() == Some(result.symbol.as_str()) {
            return None;
        }

        let appended = match (&result.category, &result.phrase) {
            (Category::Phrase, Some(phrase)) => self.push_phrase(phrase),
            _ => {
                self.text.push_str(&result.symbol);
                result.symbol.clone()
            }
        };
        self.last_appended = Some(result.symbol.clone());
        info!("committed '{}'", appended);
        Some(appended)
    }

    pub fn add_space(&mut self) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.last_appended = None;
    }

    /// Remove the final character
    pub fn backspace(&mut self) {
        self.text.pop();
        self.last_appended = None;
    }

    /// Insert a whole phrase, spaced like a committed phrase gesture
    pub fn add_phrase(&mut self, phrase: &str) {
        self.push_phrase(phrase);
        self.last_appended = None;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.last_appended = None;
        self.hold = None;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Symbol currently being held and when the hold started
    pub fn held(&self) -> Option<(&str, f64)> {
        self.hold.as_ref().map(|h| (h.symbol.as_str(), h.started_ms))
    }

    fn push_phrase(&mut self, phrase: &str) -> String {
        if !self.text.is_empty() && !self.text.ends_with(' ') {
            self.text.push(' ');
        }
        self.text.push_str(phrase);
        phrase.to_string()
    }
}

impl Default for SentenceAccumulator {
    fn default() -> Self {
        Self::new(HOLD_DURATION_MS, MIN_COMMIT_CONFIDENCE)
    }
}
