//! Core types for rapid_lingo
//!
//! This module defines the data structures shared across the pipeline:
//! input documents, token classification, the clustering configuration,
//! and the cluster tree returned to the caller.

use crate::errors::{ClusteringError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Documents
// ============================================================================

/// A single input document: a short title plus an optional snippet of body
/// text, as returned by a search or retrieval step.
///
/// Both fields are optional; a document with neither contributes no tokens
/// and ends up in the "other" group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Title text, if any
    #[serde(default)]
    pub title: Option<String>,
    /// Snippet/body text, if any
    #[serde(default)]
    pub snippet: Option<String>,
}

impl Document {
    /// Create a document with both title and snippet
    pub fn new(title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            snippet: Some(snippet.into()),
        }
    }

    /// Create a document with only a title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            snippet: None,
        }
    }

    /// Create a document with only a snippet
    pub fn with_snippet(snippet: impl Into<String>) -> Self {
        Self {
            title: None,
            snippet: Some(snippet.into()),
        }
    }
}

/// The document field a token came from.
///
/// The field code participates in the secondary LCP comparison so the miner
/// can tell apart otherwise identical phrases occurring in different fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Title,
    Snippet,
}

impl Field {
    /// Compact code used as the variant component of masked stream tokens
    pub fn code(self) -> u8 {
        match self {
            Field::Title => 0,
            Field::Snippet => 1,
        }
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// Classification of a scanned span of text.
///
/// Unknown or unsupported characters never fail tokenization; they are
/// treated as separators and simply never produce a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// A word containing at least one alphabetic character
    Word,
    /// A numeric token (digits, possibly with decimal/thousands marks)
    Number,
    /// Punctuation characters, including sentence-ending marks
    Punctuation,
    /// Non-punctuation symbols (currency, math, etc.)
    Symbol,
}

impl TokenType {
    /// Whether entries of this type may ever carry a cluster label.
    ///
    /// Pure-punctuation and numeric entries are countable but never
    /// label-bearing.
    pub fn is_label_bearing(self) -> bool {
        matches!(self, TokenType::Word)
    }
}

/// Structural marker in a document token sequence.
///
/// Boundaries are invariant: no windowed algorithm may treat them as
/// ordinary tokens, and no phrase may span one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    /// Between the title and snippet fields of one document
    Field,
    /// Between two documents
    Document,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the clustering pipeline.
///
/// All parameters are validated at engine construction; invalid values are
/// fatal configuration errors, never partially applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Language code used to select stemmer/stop-list resources (e.g. "en")
    pub language: String,
    /// Target number of clusters (factorization rank k). Clamped to the
    /// document count at runtime.
    pub cluster_count: usize,
    /// Word document frequency threshold. Words appearing in fewer
    /// documents are dropped from the label vocabulary (their token
    /// occurrences remain in the sequences). Inclusive minimum 1.
    pub word_df_threshold: u32,
    /// Minimum phrase candidate length in tokens
    pub min_phrase_length: usize,
    /// Maximum phrase candidate length in tokens
    pub max_phrase_length: usize,
    /// Minimum number of occurrences for a phrase candidate
    pub min_phrase_support: u32,
    /// Relative membership threshold: a document joins its best cluster
    /// only if that weight is at least this fraction of the strongest
    /// document-cluster weight in the request; otherwise it routes to
    /// the "other" group.
    pub membership_threshold: f64,
    /// Maximum factorization iterations
    pub max_iterations: usize,
    /// Stop iterating once the approximation error improves by less than
    /// this amount between iterations
    pub convergence_threshold: f64,
    /// Seed for the factorization's pseudo-random initialization; identical
    /// seeds and inputs reproduce identical results
    #[serde(default)]
    pub seed: u64,
    /// Additional stopwords extending the built-in list for the language
    #[serde(default)]
    pub stopwords: Vec<String>,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            cluster_count: 10,
            word_df_threshold: 1,
            min_phrase_length: 2,
            max_phrase_length: 8,
            min_phrase_support: 2,
            membership_threshold: 0.10,
            max_iterations: 25,
            convergence_threshold: 1e-4,
            seed: 0,
            stopwords: Vec::new(),
        }
    }
}

impl ClusteringConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.cluster_count == 0 {
            return Err(ClusteringError::invalid_config("cluster_count must be > 0"));
        }

        if !(1..=100).contains(&self.word_df_threshold) {
            return Err(ClusteringError::invalid_config(format!(
                "word_df_threshold must be between 1 and 100, got {}",
                self.word_df_threshold
            )));
        }

        if self.min_phrase_length < 2 {
            return Err(ClusteringError::invalid_config(
                "min_phrase_length must be >= 2",
            ));
        }

        if self.max_phrase_length < self.min_phrase_length {
            return Err(ClusteringError::invalid_config(
                "max_phrase_length must be >= min_phrase_length",
            ));
        }

        if self.min_phrase_support < 2 {
            return Err(ClusteringError::invalid_config(
                "min_phrase_support must be >= 2",
            ));
        }

        if !(0.0..=1.0).contains(&self.membership_threshold) {
            return Err(ClusteringError::invalid_config(format!(
                "membership_threshold must be between 0 and 1, got {}",
                self.membership_threshold
            )));
        }

        if self.max_iterations == 0 {
            return Err(ClusteringError::invalid_config("max_iterations must be > 0"));
        }

        if self.convergence_threshold <= 0.0 {
            return Err(ClusteringError::invalid_config(
                "convergence_threshold must be > 0",
            ));
        }

        Ok(())
    }

    /// Builder method: set language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder method: set target cluster count
    pub fn with_cluster_count(mut self, cluster_count: usize) -> Self {
        self.cluster_count = cluster_count;
        self
    }

    /// Builder method: set word document frequency threshold
    pub fn with_word_df_threshold(mut self, threshold: u32) -> Self {
        self.word_df_threshold = threshold;
        self
    }

    /// Builder method: set minimum phrase length
    pub fn with_min_phrase_length(mut self, len: usize) -> Self {
        self.min_phrase_length = len;
        self
    }

    /// Builder method: set maximum phrase length
    pub fn with_max_phrase_length(mut self, len: usize) -> Self {
        self.max_phrase_length = len;
        self
    }

    /// Builder method: set minimum phrase support
    pub fn with_min_phrase_support(mut self, support: u32) -> Self {
        self.min_phrase_support = support;
        self
    }

    /// Builder method: set the relative membership threshold
    pub fn with_membership_threshold(mut self, threshold: f64) -> Self {
        self.membership_threshold = threshold;
        self
    }

    /// Builder method: set max factorization iterations
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Builder method: set convergence threshold
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Builder method: set the factorization seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method: extend the stopword list
    pub fn with_stopwords(mut self, stopwords: Vec<String>) -> Self {
        self.stopwords = stopwords;
        self
    }
}

// ============================================================================
// Clusters
// ============================================================================

/// A member document reference with its membership score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// Index into the input document collection
    pub index: usize,
    /// Membership strength (coefficient-matrix weight); 0 for "other"
    pub score: f64,
}

/// A labeled group of documents.
///
/// Clusters form a tree via `subclusters`; this algorithm emits a flat
/// level, so `subclusters` is empty in its output. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Human-readable label chosen from phrase candidates or single terms
    pub label: String,
    /// Ranking score: label frequency combined with aggregate member weight
    pub score: f64,
    /// Member documents, strongest membership first
    pub documents: Vec<ScoredDocument>,
    /// Optional sub-clusters
    #[serde(default)]
    pub subclusters: Vec<Cluster>,
    /// Whether this is the distinguished "other/unclustered" group
    #[serde(default)]
    pub other: bool,
}

impl Cluster {
    /// Create an empty labeled cluster
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            score: 0.0,
            documents: Vec::new(),
            subclusters: Vec::new(),
            other: false,
        }
    }

    /// Create the distinguished "other" cluster
    pub fn other_cluster() -> Self {
        Self {
            label: "Other topics".to_string(),
            score: 0.0,
            documents: Vec::new(),
            subclusters: Vec::new(),
            other: true,
        }
    }

    /// Number of member documents at this level
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the cluster has no member documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// The result of one clustering request: ranked clusters plus the special
/// "other" group for documents that fit nowhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringResult {
    /// Clusters ordered by descending score (ties: stable by discovery
    /// order)
    pub clusters: Vec<Cluster>,
    /// Documents below the membership threshold for every cluster
    pub other: Cluster,
}

impl ClusteringResult {
    /// An empty result for an empty document collection
    pub fn empty() -> Self {
        Self {
            clusters: Vec::new(),
            other: Cluster::other_cluster(),
        }
    }

    /// Total number of documents referenced across clusters and "other"
    pub fn document_count(&self) -> usize {
        self.clusters.iter().map(Cluster::len).sum::<usize>() + self.other.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let config = ClusteringConfig::default();
        assert!(config.validate().is_ok());

        let bad = ClusteringConfig::default().with_cluster_count(0);
        assert!(bad.validate().is_err());

        let bad = ClusteringConfig::default().with_word_df_threshold(0);
        assert!(bad.validate().is_err());

        let bad = ClusteringConfig::default().with_word_df_threshold(101);
        assert!(bad.validate().is_err());

        let bad = ClusteringConfig::default().with_min_phrase_length(1);
        assert!(bad.validate().is_err());

        let bad = ClusteringConfig::default()
            .with_min_phrase_length(5)
            .with_max_phrase_length(4);
        assert!(bad.validate().is_err());

        let bad = ClusteringConfig::default().with_membership_threshold(1.5);
        assert!(bad.validate().is_err());

        let bad = ClusteringConfig::default().with_convergence_threshold(0.0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_config_serde_missing_seed_defaults() {
        // Simulates deserializing an old config without newer fields.
        let json = r#"{
            "language": "en",
            "cluster_count": 5,
            "word_df_threshold": 1,
            "min_phrase_length": 2,
            "max_phrase_length": 8,
            "min_phrase_support": 2,
            "membership_threshold": 0.1,
            "max_iterations": 25,
            "convergence_threshold": 1e-4
        }"#;
        let cfg: ClusteringConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.seed, 0);
        assert!(cfg.stopwords.is_empty());
    }

    #[test]
    fn test_token_type_label_bearing() {
        assert!(TokenType::Word.is_label_bearing());
        assert!(!TokenType::Number.is_label_bearing());
        assert!(!TokenType::Punctuation.is_label_bearing());
        assert!(!TokenType::Symbol.is_label_bearing());
    }

    #[test]
    fn test_field_codes_distinct() {
        assert_ne!(Field::Title.code(), Field::Snippet.code());
    }

    #[test]
    fn test_other_cluster() {
        let other = Cluster::other_cluster();
        assert!(other.other);
        assert!(other.is_empty());
    }

    #[test]
    fn test_empty_result() {
        let result = ClusteringResult::empty();
        assert!(result.clusters.is_empty());
        assert_eq!(result.document_count(), 0);
    }
}
