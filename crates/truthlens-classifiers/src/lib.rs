//! TruthLens Classifiers
//!
//! Multilingual credibility classification for short news statements.
//!
//! The pipeline combines:
//! - Text normalization into a canonical comparable form
//! - Language detection folded onto English, Hindi, Kannada, Tamil and Telugu
//! - A fixed per-language lexicon of fake-indicator keywords
//! - An optional trained classifier, trusted only for statements from its
//!   training corpus
//! - Markdown explanations of every decision
//!
//! All resources are loaded once and shared read-only across requests.

pub mod classifier;
pub mod dataset;
pub mod explanation;
pub mod language;
pub mod lexicon;
pub mod model_loader;
pub mod normalize;
pub mod pipeline;
pub mod scorer;
pub mod translate;

pub use classifier::TextModel;
pub use dataset::{DatasetMatcher, TrainingCorpus, TrainingExample};
pub use explanation::ExplanationBuilder;
pub use language::{LanguageBackend, LanguageDetector, WhatlangBackend};
pub use lexicon::KeywordLexicon;
pub use model_loader::{LinearModelSpec, LinearTextModel, ModelStore, TfidfVectorizer, VectorizerSpec};
pub use normalize::TextNormalizer;
pub use pipeline::{Analysis, AnalyzerBuilder, NewsAnalyzer};
pub use scorer::Scorer;
pub use translate::{HttpTranslator, PassthroughTranslator, Translator};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::TextModel;
    pub use crate::language::LanguageDetector;
    pub use crate::pipeline::{Analysis, NewsAnalyzer};
    pub use crate::scorer::Scorer;
    pub use crate::translate::Translator;
}
