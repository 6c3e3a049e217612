//! Language detection
//!
//! Wraps a statistical detector and folds its answer onto the closed set of
//! languages the lexicon knows about. Detection never fails from the
//! caller's point of view: anything unexpected resolves to English.

use std::sync::Arc;
use tracing::debug;
use truthlens_core::{Error, LanguageCode, Result};
use whatlang::{Detector, Lang};

/// A statistical language identifier returning ISO codes
pub trait LanguageBackend: Send + Sync {
    /// Detect the language of `text`, returning an ISO 639-1 code where one exists
    fn detect_code(&self, text: &str) -> Result<String>;
}

/// Trigram-based backend using the whatlang crate
pub struct WhatlangBackend {
    detector: Detector,
}

impl WhatlangBackend {
    /// Create a new whatlang backend
    pub fn new() -> Self {
        Self {
            detector: Detector::new(),
        }
    }
}

impl Default for WhatlangBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageBackend for WhatlangBackend {
    fn detect_code(&self, text: &str) -> Result<String> {
        let info = self
            .detector
            .detect(text)
            .ok_or_else(|| Error::detection("no language features found"))?;

        let code = match info.lang() {
            Lang::Eng => "en",
            Lang::Hin => "hi",
            Lang::Kan => "kn",
            Lang::Tam => "ta",
            Lang::Tel => "te",
            Lang::Mar => "mr",
            Lang::Nep => "ne",
            Lang::Ben => "bn",
            Lang::Guj => "gu",
            Lang::Pan => "pa",
            Lang::Mal => "ml",
            Lang::Ori => "or",
            Lang::Urd => "ur",
            Lang::Fra => "fr",
            Lang::Spa => "es",
            Lang::Deu => "de",
            Lang::Por => "pt",
            Lang::Ita => "it",
            Lang::Rus => "ru",
            Lang::Ara => "ar",
            Lang::Cmn => "zh",
            Lang::Jpn => "ja",
            Lang::Kor => "ko",
            // Fall back to the 3-letter code if not explicitly mapped
            l => l.code(),
        };

        Ok(code.to_string())
    }
}

/// Maps detector output onto [`LanguageCode`]
#[derive(Clone)]
pub struct LanguageDetector {
    backend: Arc<dyn LanguageBackend>,
}

impl LanguageDetector {
    /// Create a detector on top of an arbitrary backend
    pub fn new(backend: Arc<dyn LanguageBackend>) -> Self {
        Self { backend }
    }

    /// Detector backed by whatlang
    pub fn whatlang() -> Self {
        Self::new(Arc::new(WhatlangBackend::new()))
    }

    /// Detect the language of `text`; defaults to English on any failure
    pub fn detect(&self, text: &str) -> LanguageCode {
        match self.backend.detect_code(text) {
            Ok(code) => LanguageCode::from_detected(&code),
            Err(e) => {
                debug!("Language detection failed, assuming en: {}", e);
                LanguageCode::En
            }
        }
    }

    /// Unmapped detector code, `None` when the backend could not decide
    pub fn detect_raw(&self, text: &str) -> Option<String> {
        self.backend.detect_code(text).ok()
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::whatlang()
    }
}

impl std::fmt::Debug for LanguageDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageDetector").finish_non_exhaustive()
    }
}
