//! Pipeline integration tests
//!
//! Exercise the analyzer end to end with configurable mock models, language
//! backends and translators.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use truthlens_classifiers::{
    LanguageBackend, LanguageDetector, NewsAnalyzer, Scorer, TextModel, TrainingCorpus,
    TrainingExample, Translator,
};
use truthlens_core::{Error, Label, LanguageCode, NewsId, PredictionResult, Result};

/// A model that always predicts the same class and counts its calls
struct MockModel {
    class: i64,
    call_count: AtomicU32,
}

impl MockModel {
    fn predicting(class: i64) -> Self {
        Self {
            class,
            call_count: AtomicU32::new(0),
        }
    }

    fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl TextModel for MockModel {
    fn predict(&self, _normalized: &str) -> Result<i64> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.class)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A model that always fails - for testing error paths
struct FailingModel;

impl TextModel for FailingModel {
    fn predict(&self, _normalized: &str) -> Result<i64> {
        Err(Error::model("Simulated inference failure"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Records the normalized text it was asked about
#[derive(Default)]
struct RecordingModel {
    seen: Mutex<Vec<String>>,
}

impl TextModel for RecordingModel {
    fn predict(&self, normalized: &str) -> Result<i64> {
        self.seen.lock().unwrap().push(normalized.to_string());
        Ok(1)
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Language backend returning a fixed code
struct FixedLanguage(&'static str);

impl LanguageBackend for FixedLanguage {
    fn detect_code(&self, _text: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Translator returning a canned string and counting calls
struct CannedTranslator {
    output: &'static str,
    call_count: AtomicU32,
}

impl CannedTranslator {
    fn new(output: &'static str) -> Self {
        Self {
            output,
            call_count: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl Translator for CannedTranslator {
    async fn translate(&self, _text: &str) -> String {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.output.to_string()
    }
}

fn fixed(code: &'static str) -> LanguageDetector {
    LanguageDetector::new(Arc::new(FixedLanguage(code)))
}

fn corpus() -> TrainingCorpus {
    TrainingCorpus::new(vec![
        TrainingExample {
            text: "Government launches new health scheme".to_string(),
            label: "1".to_string(),
        },
        TrainingExample {
            text: "Aliens landed in Delhi, click this link!".to_string(),
            label: "0".to_string(),
        },
    ])
}

fn model_backed(model: Arc<dyn TextModel>) -> NewsAnalyzer {
    NewsAnalyzer::builder()
        .detector(fixed("en"))
        .corpus(corpus())
        .model(model)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_heuristic_keyword_example() {
    let analyzer = NewsAnalyzer::builder().build().unwrap();

    let analysis = analyzer
        .analyze("This is shocking and unbelievable, click this link")
        .await
        .unwrap();

    assert_eq!(analysis.language, LanguageCode::En);
    assert_eq!(
        analysis.keywords,
        vec!["shocking", "unbelievable", "click this link"]
    );
    assert_eq!(analysis.score, 20);
    assert_eq!(analysis.label, Label::Fake);
    assert_eq!(analysis.mode, "heuristic");
    assert!(analysis
        .explanation
        .contains("**Keywords Detected:** shocking, unbelievable, click this link"));
    assert!(analysis.explanation.ends_with("**Final Confidence Score:** 20%"));
}

#[tokio::test]
async fn test_heuristic_clean_text_is_real() {
    let analyzer = NewsAnalyzer::builder().detector(fixed("en")).build().unwrap();

    let analysis = analyzer
        .analyze("Parliament passed the annual budget today")
        .await
        .unwrap();

    assert_eq!(analysis.prediction(), PredictionResult::new(Label::Real, 50));
    assert!(analysis.keywords.is_empty());
    assert!(!analysis.explanation.contains("Keywords Detected"));
    assert!(analysis.explanation.contains("**Detected Language:** en"));
}

#[tokio::test]
async fn test_heuristic_counts_raw_case_sensitive_matches() {
    let analyzer = NewsAnalyzer::builder().detector(fixed("en")).build().unwrap();

    // Upper-case keywords are highlighted but not counted
    let analysis = analyzer.analyze("SHOCKING: free tickets").await.unwrap();
    assert_eq!(analysis.keywords, vec!["free"]);
    assert_eq!(analysis.prediction(), PredictionResult::new(Label::Fake, 40));
    assert_eq!(
        analysis.highlighted,
        "<mark>shocking</mark>: <mark>free</mark> tickets"
    );
}

#[tokio::test]
async fn test_heuristic_score_goes_negative() {
    let analyzer = NewsAnalyzer::builder().detector(fixed("en")).build().unwrap();

    let prediction = analyzer
        .predict("fake shocking unbelievable click this link: died in accident, free")
        .unwrap();
    assert_eq!(prediction, PredictionResult::new(Label::Fake, -20));
}

#[tokio::test]
async fn test_heuristic_tamil_keywords() {
    let analyzer = NewsAnalyzer::builder().build().unwrap();

    let analysis = analyzer
        .analyze("இது ஒரு வதந்தி மற்றும் பொய் செய்தி")
        .await
        .unwrap();

    assert_eq!(analysis.language, LanguageCode::Ta);
    assert_eq!(analysis.keywords, vec!["வதந்தி", "பொய்"]);
    assert_eq!(analysis.prediction(), PredictionResult::new(Label::Fake, 30));
    assert!(analysis.explanation.contains("**Detected Language:** ta"));
}

#[tokio::test]
async fn test_unknown_input_is_unpredictable_without_calling_model() {
    let model = Arc::new(MockModel::predicting(1));
    let analyzer = model_backed(model.clone());

    let analysis = analyzer
        .analyze("Government launches new education scheme")
        .await
        .unwrap();

    assert_eq!(
        analysis.prediction(),
        PredictionResult::new(Label::Unpredictable, 50)
    );
    assert_eq!(model.call_count(), 0);
    assert!(analysis
        .explanation
        .contains("does not match any known training data"));
    assert!(!analysis.explanation.contains("Final Confidence Score"));
}

#[tokio::test]
async fn test_known_input_real_class() {
    let model = Arc::new(MockModel::predicting(1));
    let analyzer = model_backed(model.clone());

    let prediction = analyzer
        .predict("government launches NEW health scheme.")
        .unwrap();

    assert_eq!(prediction, PredictionResult::new(Label::Real, 80));
    assert_eq!(model.call_count(), 1);
    assert_eq!(analyzer.mode(), "model_backed");
}

#[tokio::test]
async fn test_known_input_fake_class() {
    let analyzer = model_backed(Arc::new(MockModel::predicting(0)));

    let analysis = analyzer
        .analyze("Aliens landed in Delhi, click this link!")
        .await
        .unwrap();

    assert_eq!(analysis.prediction(), PredictionResult::new(Label::Fake, 35));
    // Keywords are still reported even though the model decided
    assert_eq!(analysis.keywords, vec!["click this link"]);
}

#[tokio::test]
async fn test_model_receives_normalized_text() {
    let model = Arc::new(RecordingModel::default());
    let analyzer = model_backed(model.clone());

    analyzer
        .predict("Aliens landed in Delhi, click this link!")
        .unwrap();

    let seen = model.seen.lock().unwrap();
    assert_eq!(seen.as_slice(), ["aliens landed in delhi click this link"]);
}

#[tokio::test]
async fn test_model_failure_degrades_to_unpredictable() {
    let analyzer = model_backed(Arc::new(FailingModel));

    let prediction = analyzer
        .predict("Government launches new health scheme")
        .unwrap();
    assert_eq!(prediction, PredictionResult::new(Label::Unpredictable, 50));
}

#[tokio::test]
async fn test_model_with_empty_corpus_never_predicts() {
    let model = Arc::new(MockModel::predicting(1));
    let analyzer = NewsAnalyzer::builder()
        .detector(fixed("en"))
        .model(model.clone())
        .build()
        .unwrap();

    let prediction = analyzer.predict("Anything at all").unwrap();
    assert_eq!(prediction.label, Label::Unpredictable);
    assert_eq!(model.call_count(), 0);
    assert!(matches!(analyzer.scorer(), Scorer::ModelBacked { .. }));
}

#[tokio::test]
async fn test_identical_input_same_identity() {
    let analyzer = NewsAnalyzer::builder().detector(fixed("en")).build().unwrap();

    let first = analyzer.analyze("Free laptops for students").await.unwrap();
    let second = analyzer.analyze("Free laptops for students").await.unwrap();
    let padded = analyzer.analyze("Free laptops for students ").await.unwrap();

    assert_eq!(first.news_id, second.news_id);
    assert_eq!(first.news_id, NewsId::from_text("Free laptops for students"));
    assert_ne!(first.news_id, padded.news_id);
    assert_eq!(first.prediction(), second.prediction());
    assert_eq!(first.explanation, second.explanation);
}

#[tokio::test]
async fn test_translation_only_for_non_english() {
    let translator = Arc::new(CannedTranslator::new("This news is fake"));

    let hindi = NewsAnalyzer::builder()
        .detector(fixed("hi"))
        .translator(translator.clone())
        .build()
        .unwrap();
    let analysis = hindi.analyze("यह खबर झूठ है").await.unwrap();
    assert_eq!(analysis.translated.as_deref(), Some("This news is fake"));
    assert_eq!(analysis.language, LanguageCode::Hi);

    let english = NewsAnalyzer::builder()
        .detector(fixed("en"))
        .translator(translator.clone())
        .build()
        .unwrap();
    let analysis = english.analyze("This news is fake").await.unwrap();
    assert_eq!(analysis.translated, None);

    assert_eq!(translator.call_count.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn test_unsupported_language_is_translated_but_scored_as_english() {
    let translator = Arc::new(CannedTranslator::new("Breaking news"));
    let analyzer = NewsAnalyzer::builder()
        .detector(fixed("fr"))
        .translator(translator)
        .build()
        .unwrap();

    let analysis = analyzer.analyze("Dernières nouvelles").await.unwrap();
    assert_eq!(analysis.language, LanguageCode::En);
    assert_eq!(analysis.translated.as_deref(), Some("Breaking news"));
}

#[tokio::test]
async fn test_unchanged_translation_not_reported() {
    let analyzer = NewsAnalyzer::builder()
        .detector(fixed("ta"))
        .translator(Arc::new(CannedTranslator::new("வதந்தி")))
        .build()
        .unwrap();

    let analysis = analyzer.analyze("வதந்தி").await.unwrap();
    assert_eq!(analysis.translated, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_analyzer_across_tasks() {
    let analyzer = Arc::new(model_backed(Arc::new(MockModel::predicting(1))));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let analyzer = analyzer.clone();
            tokio::spawn(async move {
                let text = if i % 2 == 0 {
                    "Government launches new health scheme"
                } else {
                    "Something never seen before"
                };
                analyzer.analyze(text).await.unwrap().label
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let label = handle.await.unwrap();
        let expected = if i % 2 == 0 {
            Label::Real
        } else {
            Label::Unpredictable
        };
        assert_eq!(label, expected);
    }
}
