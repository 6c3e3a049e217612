//! Best-effort translation to English
//!
//! Translation is decorative: it never blocks an analysis. Every failure
//! (network, HTTP status, unexpected payload) falls back to the input text.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use truthlens_core::{Error, Result};

/// Public endpoint used by [`HttpTranslator`] unless configured otherwise
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Translation service
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text`, returning it unchanged on any failure
    async fn translate(&self, text: &str) -> String;
}

/// Returns every input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    async fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Translator backed by the public Google translate web endpoint
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
    target: String,
}

impl HttpTranslator {
    /// Create a translator with a request timeout
    pub fn new(
        endpoint: impl Into<String>,
        target: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::translation(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            target: target.into(),
        })
    }

    async fn request(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", self.target.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| Error::translation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::translation(format!(
                "translation service returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::translation(e.to_string()))?;

        parse_translation(&body)
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str) -> String {
        match self.request(text).await {
            Ok(translated) => {
                debug!("Translated {} chars", text.chars().count());
                translated
            }
            Err(e) => {
                warn!("Translation failed, keeping original text: {}", e);
                text.to_string()
            }
        }
    }
}

/// Extract the translated text from a response shaped like
/// `[[["translated", "original", ...], ...], ...]`
fn parse_translation(body: &serde_json::Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| Error::translation("unexpected response shape"))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(Error::translation("empty translation"));
    }
    Ok(translated)
}
