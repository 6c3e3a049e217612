//! TruthLens Feedback
//!
//! Community feedback on analyzed statements.
//!
//! Provides:
//! - An append-only CSV store keyed by news identifier
//! - Like/dislike aggregation with submitter names

pub mod store;

pub use store::{FeedbackRecord, FeedbackStore, FeedbackSummary};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::store::{FeedbackRecord, FeedbackStore, FeedbackSummary};
}
