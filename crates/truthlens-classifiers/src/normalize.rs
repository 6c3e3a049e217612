//! Text normalization
//!
//! Produces the canonical form used for corpus membership checks and model
//! input: lower-cased, URLs removed, restricted to ASCII letters/digits plus
//! the Devanagari, Tamil, Telugu and Kannada blocks, single-spaced.

use regex::Regex;
use truthlens_core::{Error, Result};

/// URL-like tokens (`http...` / `www...` up to the next whitespace)
const URL_PATTERN: &str = r"http\S+|www\S+";

/// Everything outside the whitelist. Block ranges:
/// Devanagari U+0900-097F, Tamil U+0B80-0BFF, Kannada U+0C80-0CFF, Telugu U+0C00-0C7F
const DISALLOWED_PATTERN: &str =
    r"[^a-zA-Z0-9\s\x{0900}-\x{097F}\x{0B80}-\x{0BFF}\x{0C80}-\x{0CFF}\x{0C00}-\x{0C7F}]";

const WHITESPACE_PATTERN: &str = r"\s+";

/// Deterministic text cleaner
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    url: Regex,
    disallowed: Regex,
    whitespace: Regex,
}

impl TextNormalizer {
    /// Compile the normalization patterns
    pub fn new() -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| {
                Error::classifier(format!("Failed to compile normalizer pattern: {e}"))
            })
        };

        Ok(Self {
            url: compile(URL_PATTERN)?,
            disallowed: compile(DISALLOWED_PATTERN)?,
            whitespace: compile(WHITESPACE_PATTERN)?,
        })
    }

    /// Normalize a text. Never fails; empty input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let without_urls = self.url.replace_all(&lowered, "");
        // Replace rather than delete so that "a-b" stays two tokens.
        let whitelisted = self.disallowed.replace_all(&without_urls, " ");
        let collapsed = self.whitespace.replace_all(&whitelisted, " ");
        collapsed.trim().to_string()
    }

    /// Whether a character may appear in normalized output
    pub fn is_allowed_char(c: char) -> bool {
        c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || c == ' '
            || ('\u{0900}'..='\u{097F}').contains(&c)
            || ('\u{0B80}'..='\u{0BFF}').contains(&c)
            || ('\u{0C00}'..='\u{0C7F}').contains(&c)
            || ('\u{0C80}'..='\u{0CFF}').contains(&c)
    }
}
