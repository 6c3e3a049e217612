//! Fake-indicator keyword lexicon (Tier A)
//!
//! A fixed per-language list of terms that commonly show up in
//! misinformation. The list order is significant: highlighting and keyword
//! reporting both follow it.

use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use truthlens_core::{Error, LanguageCode, Result};

/// Opening marker wrapped around highlighted keywords
pub const MARK_OPEN: &str = "<mark>";

/// Closing marker wrapped around highlighted keywords
pub const MARK_CLOSE: &str = "</mark>";

const KEYWORDS: &[(LanguageCode, &[&str])] = &[
    (
        LanguageCode::En,
        &[
            "fake",
            "shocking",
            "unbelievable",
            "click this link",
            "died",
            "accident",
            "free",
        ],
    ),
    (LanguageCode::Hi, &["असत्य", "झूठ", "फर्जी", "अविश्वसनीय"]),
    (LanguageCode::Kn, &["ಸುಳ್ಳು", "ಅಸತ್ಯ", "ಮಿಥ್ಯಾ"]),
    (LanguageCode::Ta, &["வதந்தி", "பொய்", "சத்தியமில்லாதது"]),
    (LanguageCode::Te, &["అసత్యం", "మోసం", "తప్పు"]),
];

/// Matchers compiled for one language's keyword list
struct LanguageEntry {
    keywords: &'static [&'static str],
    /// Case-sensitive literal matcher over the raw text
    literal: Option<AhoCorasick>,
    /// One case-insensitive pattern per keyword, in list order
    highlighters: Vec<Regex>,
}

/// Immutable keyword table with compiled matchers
pub struct KeywordLexicon {
    entries: HashMap<LanguageCode, LanguageEntry>,
}

impl KeywordLexicon {
    /// Build the lexicon and compile its matchers
    pub fn new() -> Result<Self> {
        let mut entries = HashMap::with_capacity(KEYWORDS.len());

        for &(lang, keywords) in KEYWORDS {
            let literal = if keywords.is_empty() {
                None
            } else {
                Some(
                    AhoCorasick::builder()
                        .match_kind(MatchKind::Standard)
                        .build(keywords.iter())
                        .map_err(|e| {
                            Error::classifier(format!(
                                "Failed to build keyword matcher for {lang}: {e}"
                            ))
                        })?,
                )
            };

            let highlighters = keywords
                .iter()
                .map(|kw| {
                    Regex::new(&format!("(?i){}", regex::escape(kw))).map_err(|e| {
                        Error::classifier(format!("Failed to compile highlighter for '{kw}': {e}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            entries.insert(
                lang,
                LanguageEntry {
                    keywords,
                    literal,
                    highlighters,
                },
            );
        }

        Ok(Self { entries })
    }

    /// Keywords for a language, in lexicon order
    pub fn keywords_for(&self, lang: LanguageCode) -> &[&'static str] {
        self.entries
            .get(&lang)
            .map(|entry| entry.keywords)
            .unwrap_or(&[])
    }

    /// Keywords for a free-form language code; unknown codes have none
    pub fn keywords_for_code(&self, code: &str) -> &[&'static str] {
        LanguageCode::ALL
            .iter()
            .find(|lang| lang.as_str() == code)
            .map(|lang| self.keywords_for(*lang))
            .unwrap_or(&[])
    }

    /// Keywords occurring verbatim (case-sensitive) in the raw text, in lexicon order
    pub fn detected_keywords(&self, text: &str, lang: LanguageCode) -> Vec<&'static str> {
        let Some(entry) = self.entries.get(&lang) else {
            return Vec::new();
        };
        let Some(matcher) = &entry.literal else {
            return Vec::new();
        };

        let hits: BTreeSet<usize> = matcher
            .find_overlapping_iter(text)
            .map(|m| m.pattern().as_usize())
            .collect();

        entry
            .keywords
            .iter()
            .enumerate()
            .filter(|(idx, _)| hits.contains(idx))
            .map(|(_, kw)| *kw)
            .collect()
    }

    /// Wrap every case-insensitive keyword occurrence in `<mark>` tags.
    ///
    /// Keywords are substituted one after another in lexicon order, each as an
    /// independent global replacement. The replacement text is the keyword as
    /// listed, not the matched span. A keyword contained in another keyword
    /// (or in the marker itself) gets wrapped twice.
    pub fn highlight(&self, text: &str, lang: LanguageCode) -> String {
        let Some(entry) = self.entries.get(&lang) else {
            return text.to_string();
        };

        let mut highlighted = text.to_string();
        for (kw, pattern) in entry.keywords.iter().zip(&entry.highlighters) {
            let replacement = format!("{MARK_OPEN}{kw}{MARK_CLOSE}");
            highlighted = pattern
                .replace_all(&highlighted, regex::NoExpand(&replacement))
                .into_owned();
        }
        highlighted
    }
}

impl std::fmt::Debug for KeywordLexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordLexicon")
            .field("languages", &self.entries.len())
            .finish()
    }
}
