//! Human-readable justification for a prediction
//!
//! Output is Markdown. The language line is always present; the keyword line
//! only when keywords were detected.

use crate::language::LanguageDetector;
use std::fmt::Write;
use truthlens_core::Label;

/// Renders explanations, re-deriving the language with the pipeline's detector
#[derive(Debug, Clone)]
pub struct ExplanationBuilder {
    detector: LanguageDetector,
}

impl ExplanationBuilder {
    /// Create a builder using the same detector as the rest of the pipeline
    pub fn new(detector: LanguageDetector) -> Self {
        Self { detector }
    }

    /// Explain why `text` received `label` with `score`
    pub fn explain(&self, text: &str, label: Label, score: i32, keywords: &[&str]) -> String {
        let lang = self.detector.detect(text);
        let mut out = format!("**Detected Language:** {lang}\n\n");

        if !keywords.is_empty() {
            let _ = write!(out, "**Keywords Detected:** {}\n\n", keywords.join(", "));
        }

        match label {
            Label::Unpredictable => {
                out.push_str(
                    "**Reason:** This text does not match any known training data. \
                     Hence model cannot validate it correctly.\n\
                     > Default confidence (50%) applied.\n",
                );
                return out;
            }
            Label::Fake => out.push_str(
                "**Reason for Fake:**\n\
                 - Contains patterns similar to misinformation.\n\
                 - May include misleading tone or context.\n\
                 - ML model low credibility score.\n",
            ),
            Label::Real => out.push_str(
                "**Reason for Real:**\n\
                 - No fake-indicator keywords detected.\n\
                 - Matches patterns of verified real news in training data.\n\
                 - ML model high confidence.\n",
            ),
        }

        let _ = write!(out, "\n**Final Confidence Score:** {score}%");
        out
    }
}
