//! # rapid_lingo
//!
//! Fast unsupervised clustering of search results into labeled topic
//! groups.
//!
//! Given a set of short documents (title + snippet, optionally a user
//! query), the library returns a ranked list of human-labeled clusters —
//! without supervised training, without precomputed taxonomies, fast
//! enough for interactive per-request use.
//!
//! ## Pipeline
//!
//! 1. **Preprocessing** — tokenization, case normalization, stemming, and
//!    stop marking build an immutable per-request index
//! 2. **Phrase mining** — a generalized suffix array with dual LCP arrays
//!    discovers frequently repeated word sequences as label candidates
//! 3. **Factorization** — a seeded non-negative matrix factorization of
//!    the term-document matrix discovers latent topic groupings
//! 4. **Assembly** — phrase candidates, factor weights, and frequency
//!    metadata merge into scored, labeled clusters plus an "other" group
//!
//! ## Example
//!
//! ```
//! use rapid_lingo::{ClusteringConfig, ClusteringEngine, Document};
//!
//! let engine = ClusteringEngine::new(ClusteringConfig::default())?;
//! let documents = vec![
//!     Document::new("Solar subsidies", "New solar energy subsidies announced."),
//!     Document::new("Solar growth", "Solar energy adoption keeps growing."),
//!     Document::new("Rate decision", "The central bank raised interest rates."),
//!     Document::new("Rates up again", "Another interest rate increase."),
//! ];
//! let result = engine.cluster(&documents, None)?;
//! for cluster in &result.clusters {
//!     println!("{} ({} documents)", cluster.label, cluster.len());
//! }
//! # Ok::<(), rapid_lingo::ClusteringError>(())
//! ```
//!
//! ## Concurrency
//!
//! Every request builds and owns its own state; the engine itself is
//! immutable and freely shareable. Components with per-call scratch state
//! can be reused across requests through the bounded [`pool`].

pub mod assemble;
pub mod engine;
pub mod errors;
pub mod factorize;
pub mod language;
pub mod pool;
pub mod preprocess;
pub mod suffix;
pub mod types;

// Re-export commonly used types
pub use errors::{ClusteringError, Result};
pub use types::{
    Boundary, Cluster, ClusteringConfig, ClusteringResult, Document, Field, ScoredDocument,
    TokenType,
};

// Re-export main functionality
pub use assemble::ClusterAssembler;
pub use engine::ClusteringEngine;
pub use factorize::{NonnegativeFactorization, TermDocumentMatrix};
pub use language::{EnglishStemmer, IdentityStemmer, LanguageComponents, Stemmer, StopwordFilter};
pub use pool::{ComponentPool, PooledComponent};
pub use preprocess::{PreprocessingContext, PreprocessingPipeline};
pub use suffix::{PhraseCandidate, PhraseMiner};
