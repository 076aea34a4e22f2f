//! Error types for rapid_lingo
//!
//! Only configuration problems are reported as errors: a missing language
//! resource or an out-of-range parameter is fatal and surfaced before any
//! processing begins. Degenerate inputs (empty document lists, documents
//! with no usable tokens, rank larger than the corpus) are absorbed into a
//! valid, trivial result instead.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ClusteringError>;

/// Main error type for rapid_lingo
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusteringError {
    /// No stemmer/stop-list resources are available for the requested
    /// language. Silently skipping them would corrupt label quality
    /// undetectably, so this is fatal.
    #[error("No language resources for '{language}'")]
    MissingLanguage { language: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ClusteringError {
    /// Create a missing language error
    pub fn missing_language(language: impl Into<String>) -> Self {
        Self::MissingLanguage {
            language: language.into(),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
