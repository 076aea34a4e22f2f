//! Case normalization and document frequency counting
//!
//! Groups tokens by case-insensitive image, selects one canonical surface
//! form per group (the most frequent, ties broken by first occurrence),
//! computes per-word document frequencies, and flags words below the
//! document-frequency threshold as "common". Common words are dropped from
//! the label vocabulary but their occurrences stay in the sequences so
//! boundary and frequency math elsewhere remains correct.

use crate::preprocess::context::{SeqToken, WordEntry};
use crate::preprocess::tokenizer::TokenizedDocument;
use crate::types::Boundary;
use rustc_hash::FxHashMap;

/// Per-group accumulator while scanning the corpus
#[derive(Debug)]
struct WordGroup {
    /// Surface variants with occurrence counts, in first-seen order
    variants: Vec<(String, u32)>,
    df: u32,
    last_doc: u32,
    token_type: crate::types::TokenType,
}

/// The case normalizer, second stage of the preprocessing pipeline
#[derive(Debug, Clone, Copy)]
pub struct CaseNormalizer {
    word_df_threshold: u32,
}

impl CaseNormalizer {
    /// Create a normalizer with the given document-frequency threshold
    pub fn new(word_df_threshold: u32) -> Self {
        Self { word_df_threshold }
    }

    /// Build the deduplicated word table and per-document sequences
    pub fn normalize(
        &self,
        documents: &[TokenizedDocument],
    ) -> (Vec<WordEntry>, Vec<Vec<SeqToken>>) {
        let mut index: FxHashMap<String, u32> = FxHashMap::default();
        let mut groups: Vec<WordGroup> = Vec::new();
        let mut sequences = Vec::with_capacity(documents.len());

        for (doc, tokenized) in documents.iter().enumerate() {
            let mut sequence = Vec::new();
            for (field_pos, (field, tokens)) in tokenized.fields.iter().enumerate() {
                if field_pos > 0 {
                    sequence.push(SeqToken::Boundary(Boundary::Field));
                }
                for token in tokens {
                    let key = token.image.to_lowercase();
                    let word = match index.get(&key) {
                        Some(&w) => w,
                        None => {
                            let w = groups.len() as u32;
                            index.insert(key, w);
                            groups.push(WordGroup {
                                variants: Vec::new(),
                                df: 0,
                                last_doc: u32::MAX,
                                token_type: token.kind,
                            });
                            w
                        }
                    };

                    let group = &mut groups[word as usize];
                    match group.variants.iter_mut().find(|(v, _)| v == &token.image) {
                        Some((_, count)) => *count += 1,
                        None => group.variants.push((token.image.clone(), 1)),
                    }
                    if group.last_doc != doc as u32 {
                        group.last_doc = doc as u32;
                        group.df += 1;
                    }

                    sequence.push(SeqToken::Word {
                        word,
                        field: *field,
                    });
                }
            }
            sequences.push(sequence);
        }

        let words = groups
            .into_iter()
            .map(|group| {
                // Most frequent surface form; strict comparison keeps the
                // first-seen variant on ties.
                let mut canonical = 0;
                for (i, (_, count)) in group.variants.iter().enumerate() {
                    if *count > group.variants[canonical].1 {
                        canonical = i;
                    }
                }
                WordEntry {
                    image: group.variants[canonical].0.clone(),
                    df: group.df,
                    token_type: group.token_type,
                    stem: u32::MAX,
                    is_stop: false,
                    is_query: false,
                    is_common: group.df < self.word_df_threshold,
                }
            })
            .collect();

        (words, sequences)
    }
}
