//! TruthLens Core
//!
//! Core types, traits, and utilities shared across TruthLens components.
//!
//! This crate provides:
//! - Common types for languages, labels, and prediction results
//! - Error types and result handling
//! - Content-based news identifiers used to correlate predictions with feedback

pub mod error;
pub mod identity;
pub mod types;

pub use error::{Error, Result};
pub use identity::NewsId;
pub use types::{Label, LanguageCode, PredictionResult, Vote};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::identity::NewsId;
    pub use crate::types::{Label, LanguageCode, PredictionResult, Vote};
}
