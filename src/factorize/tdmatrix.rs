//! Term-document matrix construction
//!
//! Rows are the label-bearing stems, columns are documents, and each cell
//! holds a smoothed tf-idf weight. Columns are L2-normalized so document
//! length does not dominate the factorization. The matrix is built fresh
//! per request from the preprocessing context and is read-only afterwards:
//! the factorization writes only to its own factor matrices.

use crate::preprocess::{PreprocessingContext, SeqToken};
use rustc_hash::FxHashMap;

/// A dense terms × documents weight matrix.
#[derive(Debug, Clone)]
pub struct TermDocumentMatrix {
    /// Stem index for each row
    pub rows: Vec<u32>,
    /// Row-major values, `rows.len() * docs` entries
    pub values: Vec<f64>,
    /// Number of document columns
    pub docs: usize,
    row_of_stem: FxHashMap<u32, usize>,
}

impl TermDocumentMatrix {
    /// Build the matrix from a preprocessing context.
    pub fn build(context: &PreprocessingContext) -> Self {
        let rows = context.label_bearing_stems();
        let docs = context.doc_count;
        let row_of_stem: FxHashMap<u32, usize> =
            rows.iter().enumerate().map(|(r, &s)| (s, r)).collect();

        let mut values = vec![0.0; rows.len() * docs];

        // Term frequencies per document.
        for (doc, sequence) in context.sequences.iter().enumerate() {
            for entry in sequence {
                if let SeqToken::Word { word, .. } = *entry {
                    let stem = context.stem_of(word);
                    if let Some(&r) = row_of_stem.get(&stem) {
                        values[r * docs + doc] += 1.0;
                    }
                }
            }
        }

        // Smoothed inverse document frequency; strictly positive so terms
        // present in every document still contribute.
        let n = docs as f64;
        for (r, &stem) in rows.iter().enumerate() {
            let df = context.stems[stem as usize].df as f64;
            if df <= 0.0 {
                continue;
            }
            let idf = 1.0 + (n / df).ln();
            for doc in 0..docs {
                values[r * docs + doc] *= idf;
            }
        }

        // L2-normalize columns.
        for doc in 0..docs {
            let mut norm = 0.0;
            for r in 0..rows.len() {
                let x = values[r * docs + doc];
                norm += x * x;
            }
            if norm > 0.0 {
                let norm = norm.sqrt();
                for r in 0..rows.len() {
                    values[r * docs + doc] /= norm;
                }
            }
        }

        Self {
            rows,
            values,
            docs,
            row_of_stem,
        }
    }

    /// Number of term rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell value at (row, document)
    pub fn get(&self, row: usize, doc: usize) -> f64 {
        self.values[row * self.docs + doc]
    }

    /// Row index for a stem, if the stem is label-bearing
    pub fn row_of_stem(&self, stem: u32) -> Option<usize> {
        self.row_of_stem.get(&stem).copied()
    }
}
