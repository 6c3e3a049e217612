//! Training corpus and membership gating
//!
//! The model-backed scorer only trusts the classifier for statements it was
//! trained on. [`DatasetMatcher`] answers that question by comparing
//! normalized text against every normalized corpus entry.

use crate::normalize::TextNormalizer;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use truthlens_core::{Error, Result};

/// One labeled training example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingExample {
    pub text: String,
    pub label: String,
}

/// Labeled examples loaded once at startup, read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct TrainingCorpus {
    examples: Vec<TrainingExample>,
}

impl TrainingCorpus {
    /// Create a corpus from in-memory examples
    pub fn new(examples: Vec<TrainingExample>) -> Self {
        Self { examples }
    }

    /// Load a CSV file with at least `text` and `label` columns
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| {
            Error::dataset(format!("Failed to open corpus {}: {}", path.display(), e))
        })?;
        let corpus = Self::from_reader(file)?;
        info!(
            "Loaded {} training examples from {}",
            corpus.len(),
            path.display()
        );
        Ok(corpus)
    }

    /// Parse CSV content with a header row.
    ///
    /// Header names are trimmed and stripped of a leading byte-order mark
    /// before the `text` / `label` columns are located.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::dataset(format!("Corpus is missing the '{name}' column")))
        };
        let text_idx = column("text")?;
        let label_idx = column("label")?;

        let mut examples = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let Some(text) = record.get(text_idx) else {
                debug!("Skipping corpus row {} without a text cell", idx + 1);
                continue;
            };
            examples.push(TrainingExample {
                text: text.to_string(),
                label: record.get(label_idx).unwrap_or_default().to_string(),
            });
        }

        Ok(Self { examples })
    }

    /// All examples in file order
    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    /// Number of examples
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Whether the corpus holds no examples
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

/// Exact-match lookup of normalized text against a training corpus
#[derive(Debug, Clone)]
pub struct DatasetMatcher {
    normalizer: TextNormalizer,
    known: HashSet<String>,
}

impl DatasetMatcher {
    /// Index the normalized form of every corpus text
    pub fn new(corpus: &TrainingCorpus, normalizer: TextNormalizer) -> Self {
        let known = corpus
            .examples()
            .iter()
            .map(|example| normalizer.normalize(&example.text))
            .collect();
        Self { normalizer, known }
    }

    /// Whether `text` normalizes to the same string as some corpus entry
    pub fn is_known(&self, text: &str) -> bool {
        self.known.contains(&self.normalizer.normalize(text))
    }

    /// Number of distinct normalized corpus texts
    pub fn distinct_texts(&self) -> usize {
        self.known.len()
    }
}
