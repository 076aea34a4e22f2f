//! The preprocessing context
//!
//! The shared, read-only-after-build index consumed by both the phrase
//! miner and the factorization engine: the word table, the stem table, and
//! the per-document token sequences with explicit boundary markers.
//!
//! A context is created per clustering request, never shared between
//! requests, and never mutated after the pipeline finishes building it.
//! That invariant is what makes concurrent per-request use safe without
//! locking.

use crate::types::{Boundary, Field, TokenType};

/// A distinct normalized surface form.
///
/// Word entries are deduplicated across the whole corpus; identity is the
/// case-normalized image.
#[derive(Debug, Clone)]
pub struct WordEntry {
    /// Canonical case-normalized text (most frequent surface form)
    pub image: String,
    /// Number of distinct documents containing this word
    pub df: u32,
    /// Token classification shared by all occurrences
    pub token_type: TokenType,
    /// Index of the stem this word reduces to (filled by the stemming
    /// stage)
    pub stem: u32,
    /// Stop-listed or pure punctuation/number: never label-bearing
    pub is_stop: bool,
    /// The word occurs in the user query
    pub is_query: bool,
    /// Document frequency below the configured threshold: dropped from the
    /// label vocabulary, occurrences kept in the sequences
    pub is_common: bool,
}

/// A distinct language stem owning one or more word entries.
#[derive(Debug, Clone)]
pub struct StemEntry {
    /// Representative image: the most frequent member surface form
    pub image: String,
    /// Combined document frequency: distinct documents containing any
    /// member word
    pub df: u32,
    /// Member word indices, in first-seen order
    pub words: Vec<u32>,
    /// Token classification inherited from the members
    pub token_type: TokenType,
    /// Merged stop flag (set only when every member word is stop)
    pub is_stop: bool,
    /// A query word reduces to this stem
    pub is_query: bool,
    /// Combined document frequency below the configured threshold
    pub is_common: bool,
}

impl StemEntry {
    /// Whether this stem may appear in cluster labels and the term-document
    /// matrix. Query stems are protected from stop-filtering.
    pub fn is_label_bearing(&self) -> bool {
        !self.is_common && (!self.is_stop || self.is_query)
    }
}

/// One element of a document token sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqToken {
    /// An occurrence of a word entry
    Word {
        /// Index into the word table
        word: u32,
        /// Field the occurrence came from
        field: Field,
    },
    /// A structural boundary; never an ordinary token
    Boundary(Boundary),
}

/// The immutable preprocessing result shared by downstream engines.
#[derive(Debug, Clone, Default)]
pub struct PreprocessingContext {
    /// Number of input documents
    pub doc_count: usize,
    /// Deduplicated word table
    pub words: Vec<WordEntry>,
    /// Deduplicated stem table
    pub stems: Vec<StemEntry>,
    /// Per-document token sequences, with a field boundary between title
    /// and snippet
    pub sequences: Vec<Vec<SeqToken>>,
}

impl PreprocessingContext {
    /// Whether the context holds no usable tokens at all
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Stem index for a word index
    pub fn stem_of(&self, word: u32) -> u32 {
        self.words[word as usize].stem
    }

    /// Indices of stems eligible for labels and the term-document matrix
    pub fn label_bearing_stems(&self) -> Vec<u32> {
        (0..self.stems.len() as u32)
            .filter(|&s| self.stems[s as usize].is_label_bearing())
            .collect()
    }

    /// Build the boundary-masked token stream for the suffix miner.
    ///
    /// Word occurrences carry their stem id, so stemmed and case variants
    /// compare equal during suffix sorting. Every boundary receives a
    /// unique id that repeats nowhere, which structurally prevents any
    /// phrase (frequency >= 2) from spanning a document or field boundary.
    pub fn masked_stream(&self) -> MaskedStream {
        let separator_base = self.stems.len() as u32;
        let mut next_separator = separator_base;
        let mut separator = || {
            let id = next_separator;
            next_separator += 1;
            id
        };

        let mut tokens = Vec::new();
        for (doc, sequence) in self.sequences.iter().enumerate() {
            for entry in sequence {
                match *entry {
                    SeqToken::Word { word, field } => tokens.push(StreamToken {
                        id: self.words[word as usize].stem,
                        variant: field.code(),
                        doc: doc as u32,
                        word,
                    }),
                    SeqToken::Boundary(_) => tokens.push(StreamToken {
                        id: separator(),
                        variant: 0,
                        doc: doc as u32,
                        word: u32::MAX,
                    }),
                }
            }
            // Trailing document boundary, also after the last document.
            tokens.push(StreamToken {
                id: separator(),
                variant: 0,
                doc: doc as u32,
                word: u32::MAX,
            });
        }

        MaskedStream {
            tokens,
            separator_base,
        }
    }

    /// Contiguous per-field stem runs, for boundary-containment checks.
    ///
    /// Returns one `(document index, stem sequence)` pair per field run;
    /// every legal phrase occurrence is a contiguous subsequence of exactly
    /// one run.
    pub fn field_stem_runs(&self) -> Vec<(u32, Vec<u32>)> {
        let mut runs = Vec::new();
        for (doc, sequence) in self.sequences.iter().enumerate() {
            let mut current: Vec<u32> = Vec::new();
            for entry in sequence {
                match *entry {
                    SeqToken::Word { word, .. } => {
                        current.push(self.words[word as usize].stem);
                    }
                    SeqToken::Boundary(_) => {
                        if !current.is_empty() {
                            runs.push((doc as u32, std::mem::take(&mut current)));
                        }
                    }
                }
            }
            if !current.is_empty() {
                runs.push((doc as u32, current));
            }
        }
        runs
    }
}

/// One element of the boundary-masked token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamToken {
    /// Stem id for words; a unique never-repeating id for boundaries
    pub id: u32,
    /// Field variant code, compared only by the secondary LCP
    pub variant: u8,
    /// Source document index
    pub doc: u32,
    /// Source word index, or `u32::MAX` for boundaries
    pub word: u32,
}

/// The concatenated, boundary-masked token stream over all documents.
#[derive(Debug, Clone, Default)]
pub struct MaskedStream {
    /// Stream tokens in corpus order
    pub tokens: Vec<StreamToken>,
    /// Ids at or above this value are boundary separators
    pub separator_base: u32,
}

impl MaskedStream {
    /// Number of stream tokens (including separators)
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream is empty
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the token at `pos` is a boundary separator
    pub fn is_separator(&self, pos: usize) -> bool {
        self.tokens[pos].id >= self.separator_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(image: &str, stem: u32) -> WordEntry {
        WordEntry {
            image: image.to_string(),
            df: 1,
            token_type: TokenType::Word,
            stem,
            is_stop: false,
            is_query: false,
            is_common: false,
        }
    }

    fn stem(image: &str) -> StemEntry {
        StemEntry {
            image: image.to_string(),
            df: 1,
            words: Vec::new(),
            token_type: TokenType::Word,
            is_stop: false,
            is_query: false,
            is_common: false,
        }
    }

    fn two_doc_context() -> PreprocessingContext {
        // doc 0: title [a b] | snippet [b]
        // doc 1: snippet [a b]
        PreprocessingContext {
            doc_count: 2,
            words: vec![word("a", 0), word("b", 1)],
            stems: vec![stem("a"), stem("b")],
            sequences: vec![
                vec![
                    SeqToken::Word {
                        word: 0,
                        field: Field::Title,
                    },
                    SeqToken::Word {
                        word: 1,
                        field: Field::Title,
                    },
                    SeqToken::Boundary(Boundary::Field),
                    SeqToken::Word {
                        word: 1,
                        field: Field::Snippet,
                    },
                ],
                vec![
                    SeqToken::Word {
                        word: 0,
                        field: Field::Snippet,
                    },
                    SeqToken::Word {
                        word: 1,
                        field: Field::Snippet,
                    },
                ],
            ],
        }
    }

    #[test]
    fn test_masked_stream_separators_unique() {
        let ctx = two_doc_context();
        let stream = ctx.masked_stream();

        let mut seen = std::collections::HashSet::new();
        for (i, token) in stream.tokens.iter().enumerate() {
            if stream.is_separator(i) {
                assert!(seen.insert(token.id), "separator id repeated");
            }
        }
        // One field boundary + one document boundary per document.
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_masked_stream_uses_stem_ids() {
        let ctx = two_doc_context();
        let stream = ctx.masked_stream();
        let word_ids: Vec<u32> = stream
            .tokens
            .iter()
            .filter(|t| t.id < stream.separator_base)
            .map(|t| t.id)
            .collect();
        assert_eq!(word_ids, vec![0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_field_stem_runs_split_on_boundaries() {
        let ctx = two_doc_context();
        let runs = ctx.field_stem_runs();
        assert_eq!(
            runs,
            vec![(0, vec![0, 1]), (0, vec![1]), (1, vec![0, 1])]
        );
    }

    #[test]
    fn test_label_bearing_respects_flags() {
        let mut ctx = two_doc_context();
        ctx.stems[0].is_stop = true;
        assert_eq!(ctx.label_bearing_stems(), vec![1]);

        // Query stems are protected from stop filtering.
        ctx.stems[0].is_query = true;
        assert_eq!(ctx.label_bearing_stems(), vec![0, 1]);

        ctx.stems[1].is_common = true;
        assert_eq!(ctx.label_bearing_stems(), vec![0]);
    }
}
