//! News analysis pipeline
//!
//! Wires normalization, language detection, corpus gating, scoring and
//! explanation into one shared, read-only analyzer:
//!
//! ```text
//! raw text ─┬─ TextNormalizer ── DatasetMatcher / Scorer ──┐
//!           ├─ LanguageDetector ── KeywordLexicon ─────────┼─ ExplanationBuilder
//!           └─ NewsId (identity, for feedback correlation) ┘
//! ```
//!
//! The analyzer is built once at startup and shared behind an `Arc`. Every
//! analysis is a pure function of the input text and these resources, apart
//! from the optional translation call.

use crate::classifier::TextModel;
use crate::dataset::{DatasetMatcher, TrainingCorpus};
use crate::explanation::ExplanationBuilder;
use crate::language::LanguageDetector;
use crate::lexicon::KeywordLexicon;
use crate::model_loader::ModelStore;
use crate::normalize::TextNormalizer;
use crate::scorer::{Scorer, ScoringContext};
use crate::translate::{PassthroughTranslator, Translator};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use truthlens_core::{Error, Label, LanguageCode, NewsId, PredictionResult, Result};

/// Complete result of analyzing one statement
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Identifier of the raw input, used to join feedback
    pub news_id: NewsId,

    /// Language the pipeline settled on
    pub language: LanguageCode,

    /// Assigned label
    pub label: Label,

    /// Confidence score in percent
    pub score: i32,

    /// Lexicon keywords found verbatim in the input
    pub keywords: Vec<String>,

    /// Input with keywords wrapped in `<mark>` tags
    pub highlighted: String,

    /// English translation, present only when it differs from the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated: Option<String>,

    /// Markdown explanation
    pub explanation: String,

    /// Scoring strategy that produced the result
    pub mode: &'static str,

    /// Pipeline latency in microseconds
    pub latency_us: u64,
}

impl Analysis {
    /// Label and score pair
    pub fn prediction(&self) -> PredictionResult {
        PredictionResult::new(self.label, self.score)
    }
}

/// Shared analyzer holding every process-wide resource
pub struct NewsAnalyzer {
    normalizer: TextNormalizer,
    detector: LanguageDetector,
    lexicon: KeywordLexicon,
    scorer: Scorer,
    explainer: ExplanationBuilder,
    translator: Arc<dyn Translator>,
}

impl NewsAnalyzer {
    /// Start building an analyzer
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::default()
    }

    /// Name of the scoring strategy in effect
    pub fn mode(&self) -> &'static str {
        self.scorer.mode()
    }

    /// The scoring strategy in effect
    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Normalizer shared by the pipeline
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Language detector shared by the pipeline
    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    /// Keyword lexicon shared by the pipeline
    pub fn lexicon(&self) -> &KeywordLexicon {
        &self.lexicon
    }

    /// Score a statement without building the full analysis
    pub fn predict(&self, text: &str) -> Result<PredictionResult> {
        ensure_not_blank(text)?;
        Ok(self.scorer.score(text, &self.context()))
    }

    /// Run the full pipeline, including best-effort translation
    pub async fn analyze(&self, text: &str) -> Result<Analysis> {
        ensure_not_blank(text)?;
        let start = Instant::now();

        let news_id = NewsId::from_text(text);
        let language = self.detector.detect(text);
        let prediction = self.scorer.score(text, &self.context());
        let keywords = self.lexicon.detected_keywords(text, language);
        let highlighted = self.lexicon.highlight(text, language);
        let explanation =
            self.explainer
                .explain(text, prediction.label, prediction.score, &keywords);
        let translated = self.translate(text).await;

        let latency_us = start.elapsed().as_micros() as u64;
        metrics::counter!(
            "truthlens_analyses_total",
            "label" => prediction.label.as_str(),
            "mode" => self.mode()
        )
        .increment(1);
        metrics::histogram!("truthlens_analysis_latency_us").record(latency_us as f64);

        Ok(Analysis {
            news_id,
            language,
            label: prediction.label,
            score: prediction.score,
            keywords: keywords.into_iter().map(str::to_string).collect(),
            highlighted,
            translated,
            explanation,
            mode: self.mode(),
            latency_us,
        })
    }

    /// Translate when the detector reports a non-English language
    async fn translate(&self, text: &str) -> Option<String> {
        let code = self.detector.detect_raw(text)?;
        if code == "en" {
            return None;
        }
        let translated = self.translator.translate(text).await;
        (translated != text).then_some(translated)
    }

    fn context(&self) -> ScoringContext<'_> {
        ScoringContext {
            normalizer: &self.normalizer,
            detector: &self.detector,
            lexicon: &self.lexicon,
        }
    }
}

impl std::fmt::Debug for NewsAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsAnalyzer")
            .field("scorer", &self.scorer)
            .finish_non_exhaustive()
    }
}

fn ensure_not_blank(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        metrics::counter!("truthlens_rejected_total").increment(1);
        return Err(Error::EmptyInput);
    }
    Ok(())
}

/// Where the scorer's model comes from
enum ModelSource {
    None,
    Store(PathBuf),
    Loaded(Arc<dyn TextModel>),
}

/// Builder for [`NewsAnalyzer`]
pub struct AnalyzerBuilder {
    detector: Option<LanguageDetector>,
    translator: Arc<dyn Translator>,
    corpus: TrainingCorpus,
    model: ModelSource,
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self {
            detector: None,
            translator: Arc::new(PassthroughTranslator),
            corpus: TrainingCorpus::default(),
            model: ModelSource::None,
        }
    }
}

impl AnalyzerBuilder {
    /// Use a specific language detector (whatlang by default)
    pub fn detector(mut self, detector: LanguageDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Use a translation service (pass-through by default)
    pub fn translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = translator;
        self
    }

    /// Training corpus gating the model
    pub fn corpus(mut self, corpus: TrainingCorpus) -> Self {
        self.corpus = corpus;
        self
    }

    /// Load the corpus from CSV; a missing or malformed file leaves it empty
    pub fn corpus_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.corpus = match TrainingCorpus::from_csv_path(&path) {
            Ok(corpus) => corpus,
            Err(e) => {
                warn!("Training corpus unavailable, using an empty corpus: {}", e);
                TrainingCorpus::default()
            }
        };
        self
    }

    /// Load model artifacts from a directory when the analyzer is built
    pub fn model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model = ModelSource::Store(dir.into());
        self
    }

    /// Use an already-constructed model
    pub fn model(mut self, model: Arc<dyn TextModel>) -> Self {
        self.model = ModelSource::Loaded(model);
        self
    }

    /// Build the analyzer, selecting the scoring strategy once.
    ///
    /// A model that fails to load is not an error: the analyzer falls back to
    /// heuristic scoring for its whole lifetime.
    pub fn build(self) -> Result<NewsAnalyzer> {
        let normalizer = TextNormalizer::new()?;
        let detector = self.detector.unwrap_or_default();
        let lexicon = KeywordLexicon::new()?;

        let model: Option<Arc<dyn TextModel>> = match self.model {
            ModelSource::None => None,
            ModelSource::Loaded(model) => Some(model),
            ModelSource::Store(dir) => match ModelStore::new(dir).load() {
                Ok(model) => Some(Arc::new(model)),
                Err(e) => {
                    warn!("Model unavailable, using keyword heuristics: {}", e);
                    None
                }
            },
        };

        let scorer = match model {
            Some(model) => Scorer::ModelBacked {
                model,
                matcher: Arc::new(DatasetMatcher::new(&self.corpus, normalizer.clone())),
            },
            None => Scorer::Heuristic,
        };
        info!("News analyzer ready ({} mode)", scorer.mode());

        Ok(NewsAnalyzer {
            explainer: ExplanationBuilder::new(detector.clone()),
            normalizer,
            detector,
            lexicon,
            scorer,
            translator: self.translator,
        })
    }
}
