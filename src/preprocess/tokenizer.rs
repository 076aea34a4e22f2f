//! Unicode-aware input tokenization
//!
//! Scans each document field and emits a typed token stream using UAX #29
//! word segmentation. Unknown or unsupported characters are treated as
//! separators and never cause a failure. Tokenization is deterministic:
//! identical input text always yields an identical token sequence.

use crate::types::{Document, Field, TokenType};
use unicode_segmentation::UnicodeSegmentation;

/// A single scanned token before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    /// The surface form exactly as it appeared in the text
    pub image: String,
    /// Token classification
    pub kind: TokenType,
}

/// One document's token streams, one per non-empty field
#[derive(Debug, Clone, Default)]
pub struct TokenizedDocument {
    /// Field streams in document order (title before snippet)
    pub fields: Vec<(Field, Vec<RawToken>)>,
}

/// The input tokenizer, first stage of the preprocessing pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    /// Tokenize one document, producing a stream per non-empty field
    pub fn tokenize_document(&self, document: &Document) -> TokenizedDocument {
        let mut fields = Vec::new();
        if let Some(title) = &document.title {
            let tokens = self.tokenize_field(title);
            if !tokens.is_empty() {
                fields.push((Field::Title, tokens));
            }
        }
        if let Some(snippet) = &document.snippet {
            let tokens = self.tokenize_field(snippet);
            if !tokens.is_empty() {
                fields.push((Field::Snippet, tokens));
            }
        }
        TokenizedDocument { fields }
    }

    /// Tokenize a single field's text
    pub fn tokenize_field(&self, text: &str) -> Vec<RawToken> {
        text.split_word_bounds()
            .filter_map(|segment| {
                classify(segment).map(|kind| RawToken {
                    image: segment.to_string(),
                    kind,
                })
            })
            .collect()
    }
}

/// Classify a word-bound segment, or `None` for separator spans
/// (whitespace, control characters, unsupported codepoints).
fn classify(segment: &str) -> Option<TokenType> {
    if segment
        .chars()
        .all(|c| c.is_whitespace() || c.is_control())
    {
        return None;
    }
    if segment.chars().any(char::is_alphabetic) {
        return Some(TokenType::Word);
    }
    if segment.chars().any(|c| c.is_numeric())
        && segment.chars().all(|c| c.is_numeric() || c == '.' || c == ',')
    {
        return Some(TokenType::Number);
    }
    if segment.chars().all(is_punctuation_char) {
        return Some(TokenType::Punctuation);
    }
    Some(TokenType::Symbol)
}

fn is_punctuation_char(c: char) -> bool {
    matches!(
        c,
        '.' | ','
            | ';'
            | ':'
            | '!'
            | '?'
            | '\''
            | '"'
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '-'
            | '_'
            | '/'
            | '\\'
            | '&'
            | '*'
            | '#'
            | '@'
            | '…'
            | '–'
            | '—'
            | '‘'
            | '’'
            | '“'
            | '”'
            | '«'
            | '»'
            | '¿'
            | '¡'
            | '·'
    )
}
