//! Credibility scoring
//!
//! Two mutually exclusive strategies, chosen once when the analyzer is built:
//!
//! - [`Scorer::Heuristic`]: no trained model. Start at 50 and subtract 10 for
//!   every lexicon keyword of the detected language found in the raw text.
//! - [`Scorer::ModelBacked`]: defer to the trained classifier, but only for
//!   statements present in its training corpus. Everything else is
//!   `Unpredictable`.

use crate::classifier::{TextModel, CLASS_REAL};
use crate::dataset::DatasetMatcher;
use crate::language::LanguageDetector;
use crate::lexicon::KeywordLexicon;
use crate::normalize::TextNormalizer;
use std::sync::Arc;
use tracing::{debug, warn};
use truthlens_core::{Label, PredictionResult};

/// Heuristic starting score
pub const BASE_SCORE: i32 = 50;

/// Deducted per matched keyword in heuristic mode
pub const KEYWORD_PENALTY: i32 = 10;

/// Score reported for statements outside the training corpus
pub const UNPREDICTABLE_SCORE: i32 = 50;

/// Fixed confidence reported when the model predicts the real class
pub const MODEL_REAL_SCORE: i32 = 80;

/// Fixed confidence reported when the model predicts the fake class
pub const MODEL_FAKE_SCORE: i32 = 35;

/// Scoring strategy, fixed for the lifetime of the process
#[derive(Clone)]
pub enum Scorer {
    /// Keyword counting only
    Heuristic,

    /// Trained classifier gated by training-corpus membership
    ModelBacked {
        model: Arc<dyn TextModel>,
        matcher: Arc<DatasetMatcher>,
    },
}

/// Shared read-only resources the scorer consults
pub struct ScoringContext<'a> {
    pub normalizer: &'a TextNormalizer,
    pub detector: &'a LanguageDetector,
    pub lexicon: &'a KeywordLexicon,
}

impl Scorer {
    /// Stable name of the active strategy
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::ModelBacked { .. } => "model_backed",
        }
    }

    /// Score a raw (non-normalized) news text
    pub fn score(&self, text: &str, ctx: &ScoringContext<'_>) -> PredictionResult {
        match self {
            Self::Heuristic => {
                let lang = ctx.detector.detect(text);
                let hits = ctx.lexicon.detected_keywords(text, lang).len() as i32;
                heuristic_score(hits)
            }
            Self::ModelBacked { model, matcher } => {
                if !matcher.is_known(text) {
                    debug!("Input not present in training corpus");
                    return PredictionResult::new(Label::Unpredictable, UNPREDICTABLE_SCORE);
                }

                let normalized = ctx.normalizer.normalize(text);
                match model.predict(&normalized) {
                    Ok(class) => model_score(class),
                    Err(e) => {
                        warn!("Model '{}' failed to predict: {}", model.name(), e);
                        PredictionResult::new(Label::Unpredictable, UNPREDICTABLE_SCORE)
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heuristic => f.write_str("Scorer::Heuristic"),
            Self::ModelBacked { model, matcher } => f
                .debug_struct("Scorer::ModelBacked")
                .field("model", &model.name())
                .field("corpus_texts", &matcher.distinct_texts())
                .finish(),
        }
    }
}

/// Heuristic score for a number of keyword hits. Not clamped.
pub fn heuristic_score(keyword_hits: i32) -> PredictionResult {
    let score = BASE_SCORE - KEYWORD_PENALTY * keyword_hits;
    let label = if score < BASE_SCORE {
        Label::Fake
    } else {
        Label::Real
    };
    PredictionResult::new(label, score)
}

/// Map a predicted class onto the fixed label/confidence pair
pub fn model_score(class: i64) -> PredictionResult {
    if class == CLASS_REAL {
        PredictionResult::new(Label::Real, MODEL_REAL_SCORE)
    } else {
        PredictionResult::new(Label::Fake, MODEL_FAKE_SCORE)
    }
}
