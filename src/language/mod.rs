//! Language resources: stemming and stop-word filtering
//!
//! The core consumes language resources, it does not produce them. A
//! [`LanguageComponents`] bundle supplies a [`Stemmer`] and a
//! [`StopwordFilter`] for one language; the engine fails fast with a
//! configuration error when resources for the requested language are
//! absent.

pub mod stemmer;
pub mod stopwords;

pub use stemmer::{EnglishStemmer, IdentityStemmer, Stemmer};
pub use stopwords::StopwordFilter;

/// The stemmer and stop-list for one language, resolved once per request.
pub struct LanguageComponents {
    /// Language-specific stemming function
    pub stemmer: Box<dyn Stemmer>,
    /// Language-specific stop-word predicate
    pub stopwords: StopwordFilter,
}

impl std::fmt::Debug for LanguageComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageComponents")
            .field("stopwords", &self.stopwords)
            .finish_non_exhaustive()
    }
}

impl LanguageComponents {
    /// Build components from explicit parts, for callers supplying their
    /// own language resources.
    pub fn new(stemmer: Box<dyn Stemmer>, stopwords: StopwordFilter) -> Self {
        Self { stemmer, stopwords }
    }

    /// Resolve the built-in components for a language code.
    ///
    /// Returns `None` for languages without built-in resources; the engine
    /// turns that into a fatal configuration error rather than silently
    /// degrading label quality.
    pub fn for_language(language: &str) -> Option<Self> {
        match language {
            "en" | "english" => Some(Self {
                stemmer: Box::new(EnglishStemmer),
                stopwords: StopwordFilter::new("en"),
            }),
            _ => None,
        }
    }

    /// Extend the stop-word list with caller-supplied entries.
    pub fn with_extra_stopwords<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stopwords.extend(extra);
        self
    }
}
