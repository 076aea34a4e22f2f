//! Frequent phrase mining
//!
//! Enumerates repeated multi-token sequences from the suffix array by
//! walking the primary LCP array with an interval stack: every maximal run
//! of adjacent suffixes sharing a prefix of length >= `min_phrase_length`
//! yields one candidate per distinct prefix, with frequency equal to the
//! run size and a document set equal to the union of the member suffixes'
//! source documents.
//!
//! Boundary separators have unique stream ids, so a repeated prefix can
//! never contain one — phrases structurally cannot span two documents or
//! the title/snippet fields of one document.

use crate::preprocess::{MaskedStream, PreprocessingContext};
use crate::suffix::lcp::dual_lcp_suffix_sort;
use rustc_hash::{FxHashMap, FxHashSet};

/// A repeated token subsequence meeting the minimum support.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseCandidate {
    /// Constituent stem indices, in phrase order
    pub stems: Vec<u32>,
    /// Word indices of the earliest occurrence, for surface display
    pub words: Vec<u32>,
    /// Number of occurrences across the corpus
    pub frequency: u32,
    /// Sorted distinct indices of documents containing the phrase
    pub documents: Vec<u32>,
}

impl PhraseCandidate {
    /// Whether every constituent stem may appear in a cluster label.
    ///
    /// Stop-flagged and common stems exclude a candidate from label
    /// selection; query stems are protected from the stop filter.
    pub fn label_eligible(&self, context: &PreprocessingContext) -> bool {
        self.stems
            .iter()
            .all(|&s| context.stems[s as usize].is_label_bearing())
    }

    /// Reconstruct the display form from the canonical word images.
    pub fn display(&self, context: &PreprocessingContext) -> String {
        let images: Vec<&str> = self
            .words
            .iter()
            .map(|&w| context.words[w as usize].image.as_str())
            .collect();
        images.join(" ")
    }
}

/// The suffix/LCP phrase miner.
#[derive(Debug, Clone, Copy)]
pub struct PhraseMiner {
    min_phrase_length: usize,
    max_phrase_length: usize,
    min_support: u32,
}

impl PhraseMiner {
    /// Create a miner with the given length bounds and minimum support
    pub fn new(min_phrase_length: usize, max_phrase_length: usize, min_support: u32) -> Self {
        Self {
            min_phrase_length,
            max_phrase_length,
            min_support,
        }
    }

    /// Mine all phrase candidates from the context's masked stream.
    ///
    /// The result is sorted by descending frequency, ties broken by stem
    /// sequence, so downstream index-based tie-breaking is deterministic.
    pub fn mine(&self, context: &PreprocessingContext) -> Vec<PhraseCandidate> {
        let stream = context.masked_stream();
        let n = stream.len();
        if n == 0 {
            return Vec::new();
        }

        let sorted = dual_lcp_suffix_sort(&stream);
        let mut found: FxHashMap<Vec<u32>, PhraseCandidate> = FxHashMap::default();

        // Interval stack over the primary LCP array: (prefix length, first
        // boundary index of the run).
        let mut stack: Vec<(usize, usize)> = Vec::new();
        for i in 1..=n {
            let l = if i < n { sorted.lcp[i] as usize } else { 0 };
            let mut left = i;
            while let Some(&(v, s)) = stack.last() {
                if v <= l {
                    break;
                }
                stack.pop();
                // Suffixes SA[s-1 ..= i-1] share a prefix of length v.
                self.report(
                    context,
                    &stream,
                    &sorted.suffix_array,
                    v,
                    s - 1,
                    i - 1,
                    &mut found,
                );
                left = s;
            }
            let top = stack.last().map_or(0, |&(v, _)| v);
            if l > top {
                stack.push((l, left.min(i)));
            }
        }

        let mut candidates: Vec<PhraseCandidate> = found
            .into_values()
            .filter(|c| c.frequency >= self.min_support)
            .collect();
        candidates.sort_unstable_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.stems.cmp(&b.stems))
        });
        candidates
    }

    /// Record one LCP interval as a candidate if it qualifies.
    #[allow(clippy::too_many_arguments)]
    fn report(
        &self,
        context: &PreprocessingContext,
        stream: &MaskedStream,
        suffix_array: &[u32],
        prefix_len: usize,
        first: usize,
        last: usize,
        found: &mut FxHashMap<Vec<u32>, PhraseCandidate>,
    ) {
        let len = prefix_len.min(self.max_phrase_length);
        if len < self.min_phrase_length {
            return;
        }

        let members = &suffix_array[first..=last];
        let frequency = members.len() as u32;

        // Drop candidates that always extend one token to the left: the
        // longer phrase covers them with the same frequency.
        if self.always_left_extended(context, stream, members) {
            return;
        }

        let origin = *members.iter().min().unwrap() as usize;
        let stems: Vec<u32> = (0..len)
            .map(|k| {
                let token = &stream.tokens[origin + k];
                debug_assert!(token.id < stream.separator_base);
                token.id
            })
            .collect();

        let mut documents: FxHashSet<u32> = FxHashSet::default();
        for &p in members {
            documents.insert(stream.tokens[p as usize].doc);
        }
        let mut documents: Vec<u32> = documents.into_iter().collect();
        documents.sort_unstable();

        let words: Vec<u32> = (0..len).map(|k| stream.tokens[origin + k].word).collect();

        let candidate = PhraseCandidate {
            stems,
            words,
            frequency,
            documents,
        };

        // Length capping can map a nested interval onto its parent's key;
        // the parent covers a superset of occurrences, so the larger
        // frequency wins.
        match found.get_mut(&candidate.stems) {
            Some(existing) => {
                if candidate.frequency > existing.frequency {
                    *existing = candidate;
                }
            }
            None => {
                found.insert(candidate.stems.clone(), candidate);
            }
        }
    }

    /// Whether every occurrence is preceded by the same label-bearing
    /// token.
    ///
    /// Such a candidate is covered by the longer phrase at the same
    /// frequency. A shared stop-word or common predecessor does not count:
    /// the longer phrase it forms is label-ineligible, so the inner phrase
    /// is the one worth keeping.
    fn always_left_extended(
        &self,
        context: &PreprocessingContext,
        stream: &MaskedStream,
        members: &[u32],
    ) -> bool {
        let mut common: Option<u32> = None;
        for &p in members {
            if p == 0 {
                return false;
            }
            let pred = &stream.tokens[p as usize - 1];
            if pred.id >= stream.separator_base {
                return false;
            }
            match common {
                None => common = Some(pred.id),
                Some(id) if id != pred.id => return false,
                Some(_) => {}
            }
        }
        match common {
            Some(id) => context.stems[id as usize].is_label_bearing(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageComponents;
    use crate::preprocess::PreprocessingPipeline;
    use crate::types::Document;

    fn mine(docs: &[Document]) -> (PreprocessingContext, Vec<PhraseCandidate>) {
        let components = LanguageComponents::for_language("en").unwrap();
        let ctx = PreprocessingPipeline::new(1).preprocess(docs, None, &components);
        let candidates = PhraseMiner::new(2, 8, 2).mine(&ctx);
        (ctx, candidates)
    }

    fn displays(ctx: &PreprocessingContext, candidates: &[PhraseCandidate]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| c.display(ctx).to_lowercase())
            .collect()
    }

    #[test]
    fn test_shared_phrase_found_across_documents() {
        let docs = [
            Document::with_snippet("new climate change policy announced"),
            Document::with_snippet("experts debate climate change policy"),
        ];
        let (ctx, candidates) = mine(&docs);

        let phrase = candidates
            .iter()
            .find(|c| c.display(&ctx).to_lowercase() == "climate change policy")
            .expect("shared phrase must be mined");
        assert!(phrase.frequency >= 2);
        assert_eq!(phrase.documents, vec![0, 1]);
    }

    #[test]
    fn test_phrase_never_spans_documents() {
        // "alpha beta" only exists across the document boundary.
        let docs = [
            Document::with_snippet("one two alpha"),
            Document::with_snippet("beta one two"),
        ];
        let (ctx, candidates) = mine(&docs);
        assert!(!displays(&ctx, &candidates).iter().any(|d| d.contains("alpha beta")));
    }

    #[test]
    fn test_phrase_never_spans_title_and_snippet() {
        // "solar wind" would only appear across the field boundary.
        let docs = [
            Document::new("big solar", "wind farm"),
            Document::new("big solar", "wind farm"),
        ];
        let (ctx, candidates) = mine(&docs);
        let found = displays(&ctx, &candidates);
        assert!(!found.iter().any(|d| d.contains("solar wind")));
        // Whereas within-field repeats are found.
        assert!(found.iter().any(|d| d == "big solar"));
        assert!(found.iter().any(|d| d == "wind farm"));
    }

    #[test]
    fn test_min_support_respected() {
        let docs = [
            Document::with_snippet("rare pair here"),
            Document::with_snippet("nothing shared at all"),
        ];
        let components = LanguageComponents::for_language("en").unwrap();
        let ctx = PreprocessingPipeline::new(1).preprocess(&docs, None, &components);
        let candidates = PhraseMiner::new(2, 8, 2).mine(&ctx);
        assert!(candidates.iter().all(|c| c.frequency >= 2));
    }

    #[test]
    fn test_stemmed_variants_collapse() {
        let docs = [
            Document::with_snippet("energy markets rally"),
            Document::with_snippet("energy market rally"),
        ];
        let (ctx, candidates) = mine(&docs);
        // "markets"/"market" share a stem, so the three-token phrase
        // repeats at the stem level.
        assert!(displays(&ctx, &candidates)
            .iter()
            .any(|d| d.starts_with("energy market")));
    }

    #[test]
    fn test_left_extension_suppressed() {
        let docs = [
            Document::with_snippet("solar panel subsidy plan"),
            Document::with_snippet("solar panel subsidy scheme"),
        ];
        let (ctx, candidates) = mine(&docs);
        let found = displays(&ctx, &candidates);
        // "panel subsidy" always follows "solar"; only the full phrase
        // survives.
        assert!(found.iter().any(|d| d == "solar panel subsidy"));
        assert!(!found.iter().any(|d| d == "panel subsidy"));
    }

    #[test]
    fn test_stop_word_left_context_kept() {
        let docs = [
            Document::with_snippet("near the climate summit entrance"),
            Document::with_snippet("inside the climate summit hall"),
        ];
        let (ctx, candidates) = mine(&docs);
        // "climate summit" always follows "the", but a stop-word prefix
        // must not suppress the label-worthy inner phrase.
        assert!(displays(&ctx, &candidates)
            .iter()
            .any(|d| d == "climate summit"));
    }

    #[test]
    fn test_empty_and_single_document() {
        let (_, candidates) = mine(&[]);
        assert!(candidates.is_empty());

        let docs = [Document::with_snippet("just one document")];
        let (_, candidates) = mine(&docs);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_repeat_within_single_document() {
        let docs = [Document::with_snippet(
            "stock market news and more stock market news",
        )];
        let (ctx, candidates) = mine(&docs);
        let phrase = candidates
            .iter()
            .find(|c| c.display(&ctx) == "stock market news")
            .expect("repeated phrase within one document");
        assert_eq!(phrase.frequency, 2);
        assert_eq!(phrase.documents, vec![0]);
    }

    #[test]
    fn test_deterministic() {
        let docs = [
            Document::new("climate change", "climate change policy here"),
            Document::new("policy debate", "climate change policy there"),
        ];
        let (_, a) = mine(&docs);
        let (_, b) = mine(&docs);
        assert_eq!(a, b);
    }
}
