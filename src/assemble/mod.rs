//! Cluster assembly
//!
//! Joins the phrase candidates, the factorization output, and the
//! frequency/stop metadata into the final scored, labeled clusters plus
//! the distinguished "other" group.
//!
//! Label selection per basis column prefers the phrase candidate whose
//! constituent stems carry the largest basis weight, scaled by phrase
//! frequency; a single highest-weight stem is the fallback when no
//! multi-word candidate qualifies. Membership is a partition: every
//! document lands in exactly one cluster or in "other", never zero, never
//! two.

use crate::factorize::{NonnegativeFactorization, TermDocumentMatrix};
use crate::preprocess::PreprocessingContext;
use crate::suffix::PhraseCandidate;
use crate::types::{Cluster, ClusteringResult, ScoredDocument};

/// A chosen label with its source frequency
#[derive(Debug, Clone)]
struct ChosenLabel {
    text: String,
    frequency: u32,
}

/// The cluster assembler.
#[derive(Debug, Clone, Copy)]
pub struct ClusterAssembler {
    membership_threshold: f64,
}

impl ClusterAssembler {
    /// Create an assembler with the relative membership threshold
    pub fn new(membership_threshold: f64) -> Self {
        Self {
            membership_threshold,
        }
    }

    /// Assemble the final cluster list from the pipeline outputs.
    pub fn assemble(
        &self,
        context: &PreprocessingContext,
        candidates: &[PhraseCandidate],
        matrix: &TermDocumentMatrix,
        factorization: &NonnegativeFactorization,
    ) -> ClusteringResult {
        let k = factorization.rank();
        let docs = context.doc_count;

        // Pick a label per basis column; columns without any usable label
        // produce no cluster.
        let mut labeled: Vec<(usize, ChosenLabel)> = Vec::new();
        for column in 0..k {
            if let Some(label) = self.select_label(context, candidates, matrix, factorization, column)
            {
                labeled.push((column, label));
            }
        }

        // Strongest document-cluster weight in the request; membership is
        // relative to it so the arbitrary scale of the factors cancels.
        let mut strongest = 0.0f64;
        for &(column, _) in &labeled {
            for doc in 0..docs {
                strongest = strongest.max(factorization.coefficient(column, doc));
            }
        }

        // Partition the documents: each goes to its best qualifying
        // column, ties to the lower cluster index, the rest to "other".
        let mut members: Vec<Vec<ScoredDocument>> = vec![Vec::new(); labeled.len()];
        let mut other = Cluster::other_cluster();
        let cutoff = self.membership_threshold * strongest;
        for doc in 0..docs {
            let mut best: Option<(usize, f64)> = None;
            for (slot, &(column, _)) in labeled.iter().enumerate() {
                let weight = factorization.coefficient(column, doc);
                let better = match best {
                    None => true,
                    Some((_, best_weight)) => weight > best_weight,
                };
                if better {
                    best = Some((slot, weight));
                }
            }
            match best {
                Some((slot, weight)) if weight > 0.0 && weight >= cutoff => {
                    members[slot].push(ScoredDocument { index: doc, score: weight });
                }
                _ => other.documents.push(ScoredDocument {
                    index: doc,
                    score: 0.0,
                }),
            }
        }

        // Materialize non-empty clusters, scored by label frequency and
        // aggregate member weight.
        let mut clusters: Vec<(usize, Cluster)> = Vec::new();
        for (slot, (column, label)) in labeled.into_iter().enumerate() {
            let mut documents = std::mem::take(&mut members[slot]);
            if documents.is_empty() {
                continue;
            }
            documents.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.index.cmp(&b.index))
            });
            let aggregate: f64 = documents.iter().map(|d| d.score).sum();
            let cluster = Cluster {
                label: label.text,
                score: label.frequency as f64 * aggregate,
                documents,
                subclusters: Vec::new(),
                other: false,
            };
            clusters.push((column, cluster));
        }

        // Order by score descending; ties go to the lower cluster index.
        clusters.sort_by(|(ia, a), (ib, b)| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| ia.cmp(ib))
        });

        ClusteringResult {
            clusters: clusters.into_iter().map(|(_, c)| c).collect(),
            other,
        }
    }

    /// Choose the best label for one basis column.
    fn select_label(
        &self,
        context: &PreprocessingContext,
        candidates: &[PhraseCandidate],
        matrix: &TermDocumentMatrix,
        factorization: &NonnegativeFactorization,
        column: usize,
    ) -> Option<ChosenLabel> {
        // Prefer the highest-scoring stop-filtered phrase candidate.
        let mut best_phrase: Option<(f64, usize)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            if !candidate.label_eligible(context) {
                continue;
            }
            let mut weight = 0.0;
            for &stem in &candidate.stems {
                if let Some(row) = matrix.row_of_stem(stem) {
                    weight += factorization.basis_weight(row, column);
                }
            }
            if weight <= 0.0 {
                continue;
            }
            let score = weight * candidate.frequency as f64;
            let better = match best_phrase {
                None => true,
                Some((best_score, _)) => score > best_score,
            };
            if better {
                best_phrase = Some((score, i));
            }
        }
        if let Some((_, i)) = best_phrase {
            let candidate = &candidates[i];
            return Some(ChosenLabel {
                text: candidate.display(context),
                frequency: candidate.frequency,
            });
        }

        // Fall back to the single highest-weight label-bearing stem.
        let mut best_stem: Option<(f64, usize)> = None;
        for (row, &stem) in matrix.rows.iter().enumerate() {
            let weight = factorization.basis_weight(row, column);
            if weight <= 0.0 {
                continue;
            }
            let better = match best_stem {
                None => true,
                Some((best_weight, _)) => weight > best_weight,
            };
            if better {
                best_stem = Some((weight, stem as usize));
            }
        }
        best_stem.map(|(_, stem)| {
            let entry = &context.stems[stem];
            ChosenLabel {
                text: entry.image.clone(),
                frequency: entry.df,
            }
        })
    }
}
