//! Error types for TruthLens

/// Result type alias using TruthLens' Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for TruthLens operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Blank input rejected before entering the pipeline
    #[error("input text is empty")]
    EmptyInput,

    /// Malformed request field (unknown vote, blank name)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Language backend could not identify the text
    #[error("language detection error: {0}")]
    Detection(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Model artifact loading or inference errors
    #[error("model error: {0}")]
    Model(String),

    /// Training corpus errors
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Feedback store errors
    #[error("feedback error: {0}")]
    Feedback(String),

    /// Translation service errors
    #[error("translation error: {0}")]
    Translation(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV read/write errors
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new language detection error
    pub fn detection(msg: impl Into<String>) -> Self {
        Self::Detection(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a new dataset error
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// Create a new feedback error
    pub fn feedback(msg: impl Into<String>) -> Self {
        Self::Feedback(msg.into())
    }

    /// Create a new translation error
    pub fn translation(msg: impl Into<String>) -> Self {
        Self::Translation(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error was caused by the caller's input rather than the system
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InvalidInput(_))
    }
}
