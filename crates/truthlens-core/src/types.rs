//! Core types for TruthLens

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the pipeline distinguishes between.
///
/// Anything the detector reports outside this set is treated as English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    /// English (also the fallback for every unsupported language)
    #[default]
    En,
    /// Hindi
    Hi,
    /// Kannada
    Kn,
    /// Tamil
    Ta,
    /// Telugu
    Te,
}

impl LanguageCode {
    /// All supported languages, in lexicon order
    pub const ALL: [LanguageCode; 5] = [Self::En, Self::Hi, Self::Kn, Self::Ta, Self::Te];

    /// Two-letter ISO 639-1 code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Kn => "kn",
            Self::Ta => "ta",
            Self::Te => "te",
        }
    }

    /// Map an arbitrary detector code onto the supported set.
    ///
    /// Codes are matched by prefix, so regional variants such as `hi-IN`
    /// resolve to their base language. Everything else maps to English.
    pub fn from_detected(code: &str) -> Self {
        if code.starts_with("hi") {
            Self::Hi
        } else if code.starts_with("kn") {
            Self::Kn
        } else if code.starts_with("ta") {
            Self::Ta
        } else if code.starts_with("te") {
            Self::Te
        } else {
            Self::En
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credibility label assigned to a news statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    /// Looks credible
    Real,
    /// Looks like misinformation
    Fake,
    /// Input falls outside the training distribution of the loaded model
    Unpredictable,
}

impl Label {
    /// Display name of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Real => "Real",
            Self::Fake => "Fake",
            Self::Unpredictable => "Unpredictable",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring a single statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Assigned label
    pub label: Label,

    /// Confidence score in percent.
    ///
    /// Normally within 0..=100, but the keyword heuristic is not clamped and
    /// may go below zero for keyword-heavy input.
    pub score: i32,
}

impl PredictionResult {
    /// Create a new prediction result
    pub fn new(label: Label, score: i32) -> Self {
        Self { label, score }
    }
}

/// Reader vote recorded against a news identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    /// Value stored in the feedback file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vote {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(Error::invalid_input(format!(
                "unknown vote '{other}', expected 'like' or 'dislike'"
            ))),
        }
    }
}
