//! Model artifact loading and linear text classification
//!
//! The offline trainer writes two JSON artifacts into the model directory:
//!
//! - `vectorizer.json`: TF-IDF vocabulary and inverse document frequencies
//! - `model.json`: logistic regression coefficients, intercept and classes
//!
//! Both are loaded once at startup. Any failure here is reported as
//! [`Error::Model`]; callers treat it as "no model available".

use crate::classifier::TextModel;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;
use truthlens_core::{Error, Result};

/// File name of the vectorizer artifact
pub const VECTORIZER_FILE: &str = "vectorizer.json";

/// File name of the classifier artifact
pub const MODEL_FILE: &str = "model.json";

/// Tokens are runs of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Serialized TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerSpec {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    pub idf: Vec<f64>,

    /// Lower-case input before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,
}

/// Serialized binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelSpec {
    /// One weight per vectorizer column
    pub coefficients: Vec<f64>,

    /// Bias term
    #[serde(default)]
    pub intercept: f64,

    /// Class values for negative and positive decisions
    #[serde(default = "default_classes")]
    pub classes: Vec<i64>,
}

fn default_true() -> bool {
    true
}

fn default_classes() -> Vec<i64> {
    vec![0, 1]
}

/// Sparse TF-IDF transform
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    token_regex: Regex,
}

impl TfidfVectorizer {
    /// Build a vectorizer from its serialized form
    pub fn from_spec(spec: VectorizerSpec) -> Result<Self> {
        if let Some((term, col)) = spec
            .vocabulary
            .iter()
            .find(|(_, col)| **col >= spec.idf.len())
        {
            return Err(Error::model(format!(
                "vocabulary term '{}' maps to column {} but only {} idf weights are present",
                term,
                col,
                spec.idf.len()
            )));
        }

        let token_regex = Regex::new(TOKEN_PATTERN)
            .map_err(|e| Error::model(format!("Failed to compile token pattern: {e}")))?;

        Ok(Self {
            vocabulary: spec.vocabulary,
            idf: spec.idf,
            lowercase: spec.lowercase,
            token_regex,
        })
    }

    /// Number of feature columns
    pub fn width(&self) -> usize {
        self.idf.len()
    }

    /// Transform text into an L2-normalized sparse vector of `(column, weight)`
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in self.token_regex.find_iter(&text) {
            if let Some(&col) = self.vocabulary.get(token.as_str()) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut weights: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(col, tf)| (col, tf * self.idf[col]))
            .collect();
        weights.sort_by_key(|(col, _)| *col);

        let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut weights {
                *w /= norm;
            }
        }
        weights
    }
}

/// TF-IDF features fed into a logistic regression decision function
#[derive(Debug, Clone)]
pub struct LinearTextModel {
    name: String,
    vectorizer: TfidfVectorizer,
    coefficients: Vec<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LinearTextModel {
    /// Combine a vectorizer and a classifier, checking that they agree on width
    pub fn new(
        name: impl Into<String>,
        vectorizer: TfidfVectorizer,
        model: LinearModelSpec,
    ) -> Result<Self> {
        if model.coefficients.len() != vectorizer.width() {
            return Err(Error::model(format!(
                "classifier has {} coefficients but vectorizer produces {} features",
                model.coefficients.len(),
                vectorizer.width()
            )));
        }

        let classes: [i64; 2] = model.classes.as_slice().try_into().map_err(|_| {
            Error::model(format!(
                "binary classifier needs exactly 2 classes, found {}",
                model.classes.len()
            ))
        })?;

        Ok(Self {
            name: name.into(),
            vectorizer,
            coefficients: model.coefficients,
            intercept: model.intercept,
            classes,
        })
    }

    /// Raw decision value; positive means the second class
    pub fn decision(&self, text: &str) -> f64 {
        self.vectorizer
            .transform(text)
            .into_iter()
            .map(|(col, w)| self.coefficients[col] * w)
            .sum::<f64>()
            + self.intercept
    }
}

impl TextModel for LinearTextModel {
    fn predict(&self, normalized: &str) -> Result<i64> {
        let decision = self.decision(normalized);
        if !decision.is_finite() {
            return Err(Error::model(format!(
                "non-finite decision value {decision} from {}",
                self.name
            )));
        }
        Ok(if decision > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Location of the model artifacts on disk
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the vectorizer artifact
    pub fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(VECTORIZER_FILE)
    }

    /// Path of the classifier artifact
    pub fn model_path(&self) -> PathBuf {
        self.dir.join(MODEL_FILE)
    }

    /// Load and validate both artifacts
    pub fn load(&self) -> Result<LinearTextModel> {
        let vectorizer: VectorizerSpec = read_json(&self.vectorizer_path())?;
        let model: LinearModelSpec = read_json(&self.model_path())?;

        let vectorizer = TfidfVectorizer::from_spec(vectorizer)?;
        let model = LinearTextModel::new("tfidf-logreg", vectorizer, model)?;

        info!(
            "Loaded model '{}' with {} features from {}",
            model.name(),
            model.vectorizer.width(),
            self.dir.display()
        );
        Ok(model)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::model(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::model(format!("Failed to parse {}: {}", path.display(), e)))
}
