//! Stem merging
//!
//! Maps every word entry to a language stem, merges words sharing a stem
//! into one stem entry, and flags the stems of query words so later stages
//! can protect them from stop-filtering.

use crate::language::LanguageComponents;
use crate::preprocess::context::{SeqToken, StemEntry, WordEntry};
use crate::preprocess::tokenizer::Tokenizer;
use rustc_hash::{FxHashMap, FxHashSet};

/// The stemming stage, third stage of the preprocessing pipeline
pub struct StemmerStage<'a> {
    components: &'a LanguageComponents,
    word_df_threshold: u32,
}

impl<'a> StemmerStage<'a> {
    /// Create the stage with resolved language components
    pub fn new(components: &'a LanguageComponents, word_df_threshold: u32) -> Self {
        Self {
            components,
            word_df_threshold,
        }
    }

    /// Merge words into stems, filling each word's stem index.
    pub fn stem(
        &self,
        words: &mut [WordEntry],
        sequences: &[Vec<SeqToken>],
        query: Option<&str>,
    ) -> Vec<StemEntry> {
        let mut index: FxHashMap<String, u32> = FxHashMap::default();
        let mut stems: Vec<StemEntry> = Vec::new();

        for w in 0..words.len() {
            let stem_image = self
                .components
                .stemmer
                .stem(&words[w].image.to_lowercase());
            let s = match index.get(&stem_image) {
                Some(&s) => s,
                None => {
                    let s = stems.len() as u32;
                    index.insert(stem_image, s);
                    stems.push(StemEntry {
                        image: String::new(),
                        df: 0,
                        words: Vec::new(),
                        token_type: words[w].token_type,
                        is_stop: false,
                        is_query: false,
                        is_common: false,
                    });
                    s
                }
            };
            stems[s as usize].words.push(w as u32);
            words[w].stem = s;
        }

        // Representative image: the member word with the highest document
        // frequency; ties keep the first-seen member.
        for stem in &mut stems {
            let mut best = stem.words[0];
            for &w in &stem.words[1..] {
                if words[w as usize].df > words[best as usize].df {
                    best = w;
                }
            }
            stem.image = words[best as usize].image.clone();
        }

        // Combined document frequency: distinct documents containing any
        // member word, counted over the actual sequences.
        let mut last_doc = vec![u32::MAX; stems.len()];
        for (doc, sequence) in sequences.iter().enumerate() {
            for entry in sequence {
                if let SeqToken::Word { word, .. } = *entry {
                    let s = words[word as usize].stem as usize;
                    if last_doc[s] != doc as u32 {
                        last_doc[s] = doc as u32;
                        stems[s].df += 1;
                    }
                }
            }
        }
        for stem in &mut stems {
            stem.is_common = stem.df < self.word_df_threshold;
        }

        self.mark_query(words, &mut stems, &index, query);

        stems
    }

    /// Flag the stems (and exact words) of the user query.
    fn mark_query(
        &self,
        words: &mut [WordEntry],
        stems: &mut [StemEntry],
        index: &FxHashMap<String, u32>,
        query: Option<&str>,
    ) {
        let Some(query) = query else { return };

        let tokenizer = Tokenizer::new();
        let mut query_images: FxHashSet<String> = FxHashSet::default();
        for token in tokenizer.tokenize_field(query) {
            if !token.kind.is_label_bearing() {
                continue;
            }
            let lower = token.image.to_lowercase();
            let stem_image = self.components.stemmer.stem(&lower);
            if let Some(&s) = index.get(&stem_image) {
                stems[s as usize].is_query = true;
            }
            query_images.insert(lower);
        }

        for word in words.iter_mut() {
            if query_images.contains(&word.image.to_lowercase()) {
                word.is_query = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::normalizer::CaseNormalizer;
    use crate::types::Document;

    fn preprocess(
        docs: &[Document],
        query: Option<&str>,
    ) -> (Vec<WordEntry>, Vec<StemEntry>) {
        let tokenizer = Tokenizer::new();
        let tokenized: Vec<_> = docs.iter().map(|d| tokenizer.tokenize_document(d)).collect();
        let (mut words, sequences) = CaseNormalizer::new(1).normalize(&tokenized);
        let components = LanguageComponents::for_language("en").unwrap();
        let stems = StemmerStage::new(&components, 1).stem(&mut words, &sequences, query);
        (words, stems)
    }

    fn find<'a>(stems: &'a [StemEntry], image: &str) -> &'a StemEntry {
        stems
            .iter()
            .find(|s| s.image.eq_ignore_ascii_case(image))
            .unwrap()
    }

    #[test]
    fn test_inflections_merge_to_one_stem() {
        let docs = [
            Document::with_snippet("policy policies"),
            Document::with_snippet("policy"),
        ];
        let (words, stems) = preprocess(&docs, None);

        let stem = find(&stems, "policy");
        assert_eq!(stem.words.len(), 2);
        // Both word entries point at the merged stem.
        let s = words
            .iter()
            .find(|w| w.image == "policy")
            .unwrap()
            .stem;
        assert_eq!(words.iter().filter(|w| w.stem == s).count(), 2);
    }

    #[test]
    fn test_representative_image_is_most_frequent_member() {
        let docs = [
            Document::with_snippet("policies"),
            Document::with_snippet("policy"),
            Document::with_snippet("policy"),
        ];
        let (_, stems) = preprocess(&docs, None);
        assert_eq!(find(&stems, "policy").image, "policy");
    }

    #[test]
    fn test_combined_df_counts_distinct_docs() {
        let docs = [
            // Both variants in one document count it once.
            Document::with_snippet("policy policies"),
            Document::with_snippet("policies"),
        ];
        let (_, stems) = preprocess(&docs, None);
        assert_eq!(find(&stems, "policy").df, 2);
    }

    #[test]
    fn test_query_stems_flagged() {
        let docs = [Document::with_snippet("climate policies here")];
        let (words, stems) = preprocess(&docs, Some("climate policy"));

        assert!(find(&stems, "climate").is_query);
        assert!(find(&stems, "policies").is_query);
        assert!(!find(&stems, "here").is_query);
        assert!(words.iter().any(|w| w.image == "climate" && w.is_query));
    }

    #[test]
    fn test_no_query_flags_without_query() {
        let docs = [Document::with_snippet("climate policy")];
        let (_, stems) = preprocess(&docs, None);
        assert!(stems.iter().all(|s| !s.is_query));
    }
}
