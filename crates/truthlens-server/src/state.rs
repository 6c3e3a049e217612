//! Shared application state

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;
use truthlens_classifiers::{LanguageDetector, NewsAnalyzer};
use truthlens_feedback::FeedbackStore;

use crate::config::AppConfig;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<AppConfig>,

    /// Analysis pipeline, built once at startup
    pub analyzer: Arc<NewsAnalyzer>,

    /// Feedback persistence
    pub feedback: Arc<FeedbackStore>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Initialize application state from configuration
    pub fn new(config: AppConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        let analyzer = build_analyzer(&config)?;
        let feedback = FeedbackStore::new(config.feedback_path.clone());
        info!("Feedback store: {}", feedback.path().display());

        Ok(Self::from_parts(config, analyzer, feedback, metrics_handle))
    }

    /// Assemble state from already-built components
    pub fn from_parts(
        config: AppConfig,
        analyzer: NewsAnalyzer,
        feedback: FeedbackStore,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            config: Arc::new(config),
            analyzer: Arc::new(analyzer),
            feedback: Arc::new(feedback),
            metrics_handle,
        }
    }
}

/// Build the analyzer described by the configuration
pub fn build_analyzer(config: &AppConfig) -> Result<NewsAnalyzer> {
    info!("Loading training corpus from: {}", config.corpus_path.display());
    info!("Loading model from: {}", config.model_dir.display());

    let analyzer = NewsAnalyzer::builder()
        .detector(LanguageDetector::whatlang())
        .translator(config.translation.build()?)
        .corpus_path(&config.corpus_path)
        .model_dir(&config.model_dir)
        .build()?;

    Ok(analyzer)
}
