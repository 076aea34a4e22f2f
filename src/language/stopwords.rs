//! Stop-word filtering
//!
//! Stop-listed entries remain searchable and countable but are excluded
//! from phrase-candidate and cluster-label selection.

use rustc_hash::FxHashSet;

/// English stop words. A compact list of function words; callers can extend
/// it per request through the configuration.
const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
    "you", "your", "yours", "yourself", "yourselves",
];

/// A case-insensitive stop-word predicate for one language.
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    words: FxHashSet<String>,
}

impl StopwordFilter {
    /// Create a filter with the built-in list for the given language code.
    ///
    /// Unknown codes yield an empty filter; language availability is
    /// enforced one level up, in [`crate::language::LanguageComponents`].
    pub fn new(language: &str) -> Self {
        let words = match language {
            "en" | "english" => ENGLISH_STOPWORDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            _ => FxHashSet::default(),
        };
        Self { words }
    }

    /// Create an empty filter.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add extra stop words.
    pub fn extend<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(extra.into_iter().map(|s| s.as_ref().to_lowercase()));
    }

    /// Check whether a word is stop-listed (case-insensitive).
    pub fn is_stopword(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        // Avoid allocating for the common already-lowercase case.
        if word.chars().any(|c| c.is_uppercase()) {
            return self.words.contains(&word.to_lowercase());
        }
        false
    }

    /// Number of stop words in the filter
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the filter contains no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_stopwords() {
        let filter = StopwordFilter::new("en");
        assert!(filter.is_stopword("the"));
        assert!(filter.is_stopword("The"));
        assert!(filter.is_stopword("AND"));
        assert!(!filter.is_stopword("climate"));
        assert!(!filter.is_stopword("policy"));
    }

    #[test]
    fn test_unknown_language_empty() {
        let filter = StopwordFilter::new("xx");
        assert!(filter.is_empty());
        assert!(!filter.is_stopword("the"));
    }

    #[test]
    fn test_extend() {
        let mut filter = StopwordFilter::empty();
        filter.extend(["Sponsored", "ad"]);
        assert!(filter.is_stopword("sponsored"));
        assert!(filter.is_stopword("AD"));
        assert!(!filter.is_stopword("the"));
    }
}
