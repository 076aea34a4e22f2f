//! The clustering engine
//!
//! Orchestrates one clustering request: resolve language components,
//! preprocess, mine phrases, factorize, assemble. Each request builds and
//! owns its own context, matrix, and factors — no state is shared between
//! concurrent requests, so the engine is freely shareable across threads
//! while each individual call stays synchronous and CPU-bound.
//!
//! The factorization stopping policy lives here, not in the factorization
//! engine: iterate until the error improvement drops below the configured
//! threshold or the iteration budget is exhausted.

use crate::assemble::ClusterAssembler;
use crate::errors::{ClusteringError, Result};
use crate::factorize::{NonnegativeFactorization, TermDocumentMatrix};
use crate::language::LanguageComponents;
use crate::preprocess::PreprocessingPipeline;
use crate::suffix::PhraseMiner;
use crate::types::{ClusteringConfig, ClusteringResult, Document, ScoredDocument};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `trace` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "trace")]
        let _span = tracing::info_span!("clustering_stage", stage = $name).entered();
    };
}

/// The per-request clustering façade.
///
/// Construction validates the configuration; invalid parameters are fatal
/// configuration errors reported before any processing begins.
#[derive(Debug, Clone)]
pub struct ClusteringEngine {
    config: ClusteringConfig,
}

impl Default for ClusteringEngine {
    fn default() -> Self {
        Self {
            config: ClusteringConfig::default(),
        }
    }
}

impl ClusteringEngine {
    /// Create an engine, validating the configuration up front.
    pub fn new(config: ClusteringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration
    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Cluster a document collection with the configured language.
    ///
    /// Fails fast with [`ClusteringError::MissingLanguage`] when no
    /// resources exist for the configured language; an empty document list
    /// is a valid request yielding an empty result.
    pub fn cluster(&self, documents: &[Document], query: Option<&str>) -> Result<ClusteringResult> {
        let components = LanguageComponents::for_language(&self.config.language)
            .ok_or_else(|| ClusteringError::missing_language(&self.config.language))?
            .with_extra_stopwords(&self.config.stopwords);
        Ok(self.cluster_with_components(documents, query, &components))
    }

    /// Cluster with caller-supplied language components.
    ///
    /// This is the entry point for languages the built-in registry does
    /// not cover. It cannot fail: every degenerate input degrades to a
    /// valid, trivial result.
    pub fn cluster_with_components(
        &self,
        documents: &[Document],
        query: Option<&str>,
        components: &LanguageComponents,
    ) -> ClusteringResult {
        if documents.is_empty() {
            return ClusteringResult::empty();
        }

        trace_stage!("preprocess");
        let context = PreprocessingPipeline::new(self.config.word_df_threshold)
            .preprocess(documents, query, components);

        trace_stage!("mine_phrases");
        let candidates = PhraseMiner::new(
            self.config.min_phrase_length,
            self.config.max_phrase_length,
            self.config.min_phrase_support,
        )
        .mine(&context);

        trace_stage!("factorize");
        let matrix = TermDocumentMatrix::build(&context);
        let rank = self.config.cluster_count.min(context.doc_count);
        if matrix.row_count() == 0 || context.doc_count < 2 || rank == 0 {
            return trivial_result(documents.len());
        }

        let mut factorization = NonnegativeFactorization::new(&matrix, rank, self.config.seed);
        let mut previous = f64::INFINITY;
        for _ in 0..self.config.max_iterations {
            factorization.iterate(&matrix);
            let error = factorization.approximation_error();
            if previous - error < self.config.convergence_threshold {
                break;
            }
            previous = error;
        }

        trace_stage!("assemble");
        ClusterAssembler::new(self.config.membership_threshold).assemble(
            &context,
            &candidates,
            &matrix,
            &factorization,
        )
    }

    /// Cluster several independent requests in parallel.
    ///
    /// Parallelism is applied at request granularity only; each request
    /// still runs the synchronous single-threaded pipeline over its own
    /// state.
    #[cfg(feature = "parallel")]
    pub fn cluster_batch(
        &self,
        requests: &[(Vec<Document>, Option<String>)],
    ) -> Result<Vec<ClusteringResult>> {
        use rayon::prelude::*;

        let components = LanguageComponents::for_language(&self.config.language)
            .ok_or_else(|| ClusteringError::missing_language(&self.config.language))?
            .with_extra_stopwords(&self.config.stopwords);

        Ok(requests
            .par_iter()
            .map(|(documents, query)| {
                self.cluster_with_components(documents, query.as_deref(), &components)
            })
            .collect())
    }
}

/// All documents routed to "other": the degenerate but valid result shape.
fn trivial_result(doc_count: usize) -> ClusteringResult {
    let mut result = ClusteringResult::empty();
    result.other.documents = (0..doc_count)
        .map(|index| ScoredDocument { index, score: 0.0 })
        .collect();
    result
}
