//! N-gram tokenizer implementation.

use super::char_group::CharClass;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{QueryDslError, Result};

/// A tokenizer that generates character n-grams.
///
/// Text is first split into words made of the configured `token_chars`
/// classes (the whole text is one word when no class is configured), then
/// every word is cut into grams between `min_gram` and `max_gram` characters.
/// In edge mode only the grams anchored at the start of a word are emitted.
///
/// # Examples
///
/// ```
/// use querydsl::analysis::tokenizer::ngram::NgramTokenizer;
/// use querydsl::analysis::tokenizer::Tokenizer;
///
/// let tokenizer = NgramTokenizer::new(2, 3).unwrap();
/// let tokens: Vec<_> = tokenizer.tokenize("abc").unwrap()
///     .map(|t| t.text.to_string())
///     .collect();
/// assert_eq!(tokens, vec!["ab", "abc", "bc"]);
///
/// let tokenizer = NgramTokenizer::edge(1, 3).unwrap();
/// let tokens: Vec<_> = tokenizer.tokenize("quick").unwrap()
///     .map(|t| t.text.to_string())
///     .collect();
/// assert_eq!(tokens, vec!["q", "qu", "qui"]);
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    /// Minimum n-gram size
    min_gram: usize,
    /// Maximum n-gram size
    max_gram: usize,
    /// Only emit grams anchored at the start of each word
    edge: bool,
    /// Character classes that make up words
    token_chars: Vec<CharClass>,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an `IllegalArgumentException` if `min_gram` is 0 or
    /// `max_gram` is less than `min_gram`.
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        validate_gram_sizes(min_gram, max_gram)?;
        Ok(Self {
            min_gram,
            max_gram,
            edge: false,
            token_chars: Vec::new(),
        })
    }

    /// Create a new edge n-gram tokenizer.
    pub fn edge(min_gram: usize, max_gram: usize) -> Result<Self> {
        Ok(Self {
            edge: true,
            ..Self::new(min_gram, max_gram)?
        })
    }

    /// Restrict words to the given character classes.
    pub fn with_token_chars(mut self, token_chars: Vec<CharClass>) -> Self {
        self.token_chars = token_chars;
        self
    }

    fn is_token_char(&self, c: char) -> bool {
        self.token_chars.is_empty() || self.token_chars.iter().any(|class| class.matches(c))
    }
}

pub(crate) fn validate_gram_sizes(min_gram: usize, max_gram: usize) -> Result<()> {
    if min_gram == 0 {
        return Err(QueryDslError::illegal_argument("min_gram must be at least 1"));
    }
    if max_gram < min_gram {
        return Err(QueryDslError::illegal_argument(format!(
            "max_gram ({max_gram}) must be >= min_gram ({min_gram})"
        )));
    }
    Ok(())
}

/// Cut `chars` (with their byte offsets) into grams, appending to `tokens`.
pub(crate) fn push_grams(
    chars: &[(usize, char)],
    word_end: usize,
    min_gram: usize,
    max_gram: usize,
    edge: bool,
    tokens: &mut Vec<Token>,
) {
    let starts = if edge { 0..chars.len().min(1) } else { 0..chars.len() };
    for start in starts {
        for size in min_gram..=max_gram {
            let end = start + size;
            if end > chars.len() {
                break;
            }
            let gram: String = chars[start..end].iter().map(|(_, c)| c).collect();
            let start_offset = chars[start].0;
            let end_offset = chars.get(end).map(|(o, _)| *o).unwrap_or(word_end);
            let position = tokens.len();
            tokens.push(Token::with_offsets(gram, position, start_offset, end_offset));
        }
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut word: Vec<(usize, char)> = Vec::new();

        for (offset, c) in text.char_indices() {
            if self.is_token_char(c) {
                word.push((offset, c));
            } else if !word.is_empty() {
                push_grams(&word, offset, self.min_gram, self.max_gram, self.edge, &mut tokens);
                word.clear();
            }
        }
        if !word.is_empty() {
            push_grams(&word, text.len(), self.min_gram, self.max_gram, self.edge, &mut tokens);
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        if self.edge { "edge_ngram" } else { "ngram" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigram() {
        let tokenizer = NgramTokenizer::new(2, 2).unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("hello").unwrap().collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["he", "el", "ll", "lo"]);
        assert_eq!(tokens[3].start_offset, 3);
        assert_eq!(tokens[3].end_offset, 5);
    }

    #[test]
    fn test_token_chars_split_words() {
        let tokenizer = NgramTokenizer::edge(2, 10)
            .unwrap()
            .with_token_chars(vec![CharClass::Letter]);
        let tokens: Vec<Token> = tokenizer.tokenize("2 Quick").unwrap().collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["Qu", "Qui", "Quic", "Quick"]);
        assert_eq!(tokens[0].start_offset, 2);
    }

    #[test]
    fn test_multibyte_offsets() {
        let tokenizer = NgramTokenizer::new(1, 1).unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("日本").unwrap().collect();

        assert_eq!(tokens[1].text, "本");
        assert_eq!(tokens[1].start_offset, 3);
        assert_eq!(tokens[1].end_offset, 6);
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(NgramTokenizer::new(0, 2).is_err());
        assert!(NgramTokenizer::new(3, 2).is_err());
    }
}
