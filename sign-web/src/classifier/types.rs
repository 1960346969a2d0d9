//! Classification values shared by every stage of the pipeline

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecognizerError;
use crate::hand::FingerState;

/// Which symbol families the static classifier may emit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    #[default]
    All,
    Letters,
    Numbers,
    #[serde(alias = "words")]
    Phrases,
}

impl DetectionMode {
    pub fn allows(&self, category: Category) -> bool {
        matches!(
            (self, category),
            (DetectionMode::All, _)
                | (DetectionMode::Letters, Category::Letter)
                | (DetectionMode::Numbers, Category::Number)
                | (DetectionMode::Phrases, Category::Phrase)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionMode::All => "all",
            DetectionMode::Letters => "letters",
            DetectionMode::Numbers => "numbers",
            DetectionMode::Phrases => "phrases",
        }
    }
}

impl FromStr for DetectionMode {
    type Err = RecognizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(DetectionMode::All),
            "letters" => Ok(DetectionMode::Letters),
            "numbers" => Ok(DetectionMode::Numbers),
            "phrases" | "words" => Ok(DetectionMode::Phrases),
            _ => Err(RecognizerError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Letter,
    Number,
    Phrase,
}

/// Which classifier produced the final decision
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Rule,
    Secondary,
    Fused,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub symbol: String,
    pub confidence: f32,
}

/// One hand's decision for one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub symbol: String,
    /// Always within [0, 1]
    pub confidence: f32,
    pub finger_state: FingerState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
    #[serde(default)]
    pub motion_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<Alternative>,
}

impl Classification {
    pub fn new(symbol: impl Into<String>, confidence: f32, finger_state: FingerState) -> Self {
        Self {
            symbol: symbol.into(),
            confidence: clamp_confidence(confidence),
            finger_state,
            phrase: None,
            motion_detected: false,
            source: None,
            category: Category::Letter,
            alternatives: Vec::new(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Marks the result as a whole phrase
    pub fn with_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.phrase = Some(phrase.into());
        self.category = Category::Phrase;
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = clamp_confidence(confidence);
        self
    }

    pub fn with_alternative(mut self, other: &Classification) -> Self {
        self.alternatives.push(Alternative {
            symbol: other.symbol.clone(),
            confidence: other.confidence,
        });
        self
    }

    /// Text appended to the sentence when this result is committed
    pub fn output_text(&self) -> &str {
        match (&self.category, &self.phrase) {
            (Category::Phrase, Some(phrase)) => phrase,
            _ => &self.symbol,
        }
    }
}

/// NaN maps to 0
pub fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}
