//! Stop marking
//!
//! Flags word and stem entries that must never carry a cluster label:
//! stop-listed words and pure punctuation, symbol, or numeric tokens.
//! Flagged entries remain searchable and countable; they are excluded only
//! from phrase-candidate and label selection.

use crate::language::StopwordFilter;
use crate::preprocess::context::{StemEntry, WordEntry};

/// The stop marker, final stage of the preprocessing pipeline
pub struct StopMarker<'a> {
    stopwords: &'a StopwordFilter,
}

impl<'a> StopMarker<'a> {
    /// Create the stage with a resolved stop-word filter
    pub fn new(stopwords: &'a StopwordFilter) -> Self {
        Self { stopwords }
    }

    /// Flag non-label-bearing words and stems in place.
    pub fn mark(&self, words: &mut [WordEntry], stems: &mut [StemEntry]) {
        for word in words.iter_mut() {
            word.is_stop =
                !word.token_type.is_label_bearing() || self.stopwords.is_stopword(&word.image);
        }

        // A stem is stop only when every surface member is.
        for stem in stems.iter_mut() {
            stem.is_stop = stem
                .words
                .iter()
                .all(|&w| words[w as usize].is_stop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageComponents;
    use crate::preprocess::normalizer::CaseNormalizer;
    use crate::preprocess::stemming::StemmerStage;
    use crate::preprocess::tokenizer::Tokenizer;
    use crate::types::Document;

    fn marked(docs: &[Document]) -> (Vec<WordEntry>, Vec<StemEntry>) {
        let tokenizer = Tokenizer::new();
        let tokenized: Vec<_> = docs.iter().map(|d| tokenizer.tokenize_document(d)).collect();
        let (mut words, sequences) = CaseNormalizer::new(1).normalize(&tokenized);
        let components = LanguageComponents::for_language("en").unwrap();
        let mut stems = StemmerStage::new(&components, 1).stem(&mut words, &sequences, None);
        StopMarker::new(&components.stopwords).mark(&mut words, &mut stems);
        (words, stems)
    }

    #[test]
    fn test_stoplist_words_flagged() {
        let docs = [Document::with_snippet("the climate of change")];
        let (words, _) = marked(&docs);

        assert!(words.iter().find(|w| w.image == "the").unwrap().is_stop);
        assert!(words.iter().find(|w| w.image == "of").unwrap().is_stop);
        assert!(!words.iter().find(|w| w.image == "climate").unwrap().is_stop);
    }

    #[test]
    fn test_punctuation_and_numbers_flagged() {
        let docs = [Document::with_snippet("climate, 2024!")];
        let (words, _) = marked(&docs);

        assert!(words.iter().find(|w| w.image == ",").unwrap().is_stop);
        assert!(words.iter().find(|w| w.image == "2024").unwrap().is_stop);
        assert!(words.iter().find(|w| w.image == "!").unwrap().is_stop);
    }

    #[test]
    fn test_stems_inherit_stop_flags() {
        let docs = [Document::with_snippet("the these climate")];
        let (_, stems) = marked(&docs);

        assert!(stems.iter().find(|s| s.image == "the").unwrap().is_stop);
        assert!(!stems.iter().find(|s| s.image == "climate").unwrap().is_stop);
    }

    #[test]
    fn test_stop_stems_still_countable() {
        let docs = [
            Document::with_snippet("the climate"),
            Document::with_snippet("the policy"),
        ];
        let (_, stems) = marked(&docs);
        // Stop entries keep their frequency data.
        assert_eq!(stems.iter().find(|s| s.image == "the").unwrap().df, 2);
    }
}
