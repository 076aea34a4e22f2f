//! Text preprocessing pipeline
//!
//! Performs the basic preprocessing steps on the input documents, in
//! order:
//!
//! 1. [`Tokenizer`] — typed token streams per document field
//! 2. [`CaseNormalizer`] — case folding, canonical forms, document
//!    frequencies
//! 3. [`StemmerStage`] — stem merging and query-term flagging
//! 4. [`StopMarker`] — stop-word and punctuation/number flagging
//!
//! The result is a [`PreprocessingContext`], the shared read-only index
//! consumed by the phrase miner and the factorization engine.

pub mod context;
pub mod normalizer;
pub mod stemming;
pub mod stop_marker;
pub mod tokenizer;

pub use context::{MaskedStream, PreprocessingContext, SeqToken, StemEntry, StreamToken, WordEntry};
pub use normalizer::CaseNormalizer;
pub use stemming::StemmerStage;
pub use stop_marker::StopMarker;
pub use tokenizer::{RawToken, TokenizedDocument, Tokenizer};

use crate::language::LanguageComponents;
use crate::types::Document;

/// The staged preprocessing pipeline.
///
/// A fresh context is produced per clustering request; the pipeline itself
/// holds only configuration and may be reused across requests by one
/// caller at a time.
#[derive(Debug, Clone, Copy)]
pub struct PreprocessingPipeline {
    word_df_threshold: u32,
}

impl PreprocessingPipeline {
    /// Create a pipeline with the given word document-frequency threshold
    pub fn new(word_df_threshold: u32) -> Self {
        Self { word_df_threshold }
    }

    /// Run all stages over the documents and optional query.
    ///
    /// An empty document list yields an empty but valid context; language
    /// availability is the caller's responsibility (resolved components are
    /// passed in).
    pub fn preprocess(
        &self,
        documents: &[Document],
        query: Option<&str>,
        components: &LanguageComponents,
    ) -> PreprocessingContext {
        let tokenizer = Tokenizer::new();
        let tokenized: Vec<TokenizedDocument> = documents
            .iter()
            .map(|d| tokenizer.tokenize_document(d))
            .collect();

        let (mut words, sequences) =
            CaseNormalizer::new(self.word_df_threshold).normalize(&tokenized);

        let mut stems =
            StemmerStage::new(components, self.word_df_threshold).stem(&mut words, &sequences, query);

        StopMarker::new(&components.stopwords).mark(&mut words, &mut stems);

        PreprocessingContext {
            doc_count: documents.len(),
            words,
            stems,
            sequences,
        }
    }
}
