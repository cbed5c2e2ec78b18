//! Stop filter implementation.
//!
//! Removes common words (stop words) that rarely help a query match. Removed
//! tokens leave a gap in the positions of the stream, so phrase queries built
//! from the remaining tokens still respect the original distances.
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::token_filter::Filter;
//! use querydsl::analysis::token_filter::stop::StopFilter;
//! use querydsl::analysis::token::Token;
//!
//! let filter = StopFilter::new(); // Uses default English stop words
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("quick", 1),
//!     Token::new("brown", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "quick");
//! assert_eq!(result[1].position, 2);
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{QueryDslError, Result};

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<Arc<HashSet<String>>> = LazyLock::new(|| {
    Arc::new(
        DEFAULT_ENGLISH_STOP_WORDS
            .iter()
            .map(|&s| s.to_string())
            .collect(),
    )
});

/// A filter that removes stop words from the token stream.
///
/// ## Custom Stop Words
///
/// ```
/// use querydsl::analysis::token_filter::stop::StopFilter;
///
/// let filter = StopFilter::from_words(vec!["foo", "bar", "baz"]);
/// assert_eq!(filter.len(), 3);
/// assert!(filter.is_stop_word("bar"));
/// ```
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default English stop words.
    pub fn new() -> Self {
        StopFilter {
            stop_words: Arc::clone(&DEFAULT_ENGLISH_STOP_WORDS_SET),
        }
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(|s| s.into()).collect())
    }

    /// Create a stop filter from a predefined list name.
    ///
    /// `_english_` selects the default English list and `_none_` an empty one.
    pub fn from_list_name(name: &str) -> Result<Self> {
        match name {
            "_english_" => Ok(Self::new()),
            "_none_" => Ok(Self::with_stop_words(HashSet::new())),
            other => Err(QueryDslError::x_content_parse(format!(
                "[stop] unknown stop words list [{other}]"
            ))),
        }
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| !self.is_stop_word(&token.text))
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["the", "and", "or"]);
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
            Token::new("and", 3),
            Token::new("test", 4),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[1].position, 2);
        assert_eq!(result[2].text, "test");
        assert_eq!(result[2].position, 4);
    }

    #[test]
    fn test_default_english_stop_words() {
        let filter = StopFilter::default();
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("with"));
        assert!(!filter.is_stop_word("hello"));
        assert_eq!(filter.len(), 33);
    }

    #[test]
    fn test_list_names() {
        assert_eq!(StopFilter::from_list_name("_english_").unwrap().len(), 33);
        assert!(StopFilter::from_list_name("_none_").unwrap().is_empty());
        assert!(StopFilter::from_list_name("_klingon_").is_err());
    }
}
