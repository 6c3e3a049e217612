//! Classifier trait and common types

use truthlens_core::Result;

/// Class index the model uses for credible news
pub const CLASS_REAL: i64 = 1;

/// Class index the model uses for misinformation
pub const CLASS_FAKE: i64 = 0;

/// Trait for trained binary text classifiers
pub trait TextModel: Send + Sync {
    /// Predict the class of an already-normalized text
    fn predict(&self, normalized: &str) -> Result<i64>;

    /// Get the model name
    fn name(&self) -> &str;
}
