//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first token-producing step of an analysis pipeline,
//! splitting (already char-filtered) text into tokens with byte offsets.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`keyword::KeywordTokenizer`] - The whole input as one token (`keyword`, `single`)
//! - [`unicode_word::UnicodeWordTokenizer`] - Unicode word boundaries (`standard`)
//! - [`letter::LetterTokenizer`] - Runs of letters (`letter`, `lowercase`)
//! - [`char_group::CharGroupTokenizer`] - Splits on configured characters or classes
//! - [`regex::RegexTokenizer`] - Custom regex-based tokenization
//! - [`ngram::NgramTokenizer`] - Character n-grams and edge n-grams
//! - [`path_hierarchy::PathHierarchyTokenizer`] - Path prefixes
//! - [`web::WebTokenizer`] - URLs, emails and tags kept whole
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::tokenizer::Tokenizer;
//! use querydsl::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so analyzers can be shared by concurrent
/// query translations.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use querydsl::analysis::token::{Token, TokenStream};
/// use querydsl::analysis::tokenizer::Tokenizer;
/// use querydsl::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens: Vec<Token> = text
///             .split(',')
///             .enumerate()
///             .map(|(i, s)| Token::new(s.trim(), i))
///             .collect();
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Split `text` into maximal runs of characters accepted by `keep`,
/// producing tokens with byte offsets.
pub(crate) fn split_runs<F>(text: &str, keep: F) -> Vec<crate::analysis::token::Token>
where
    F: Fn(char) -> bool,
{
    use crate::analysis::token::{Token, TokenType};

    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (keep(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                let word = &text[s..i];
                tokens.push(
                    Token::with_offsets(word, tokens.len(), s, i)
                        .with_token_type(TokenType::classify(word)),
                );
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        let word = &text[s..];
        tokens.push(
            Token::with_offsets(word, tokens.len(), s, text.len())
                .with_token_type(TokenType::classify(word)),
        );
    }

    tokens
}

// Individual tokenizer modules
pub mod char_group;
pub mod keyword;
pub mod letter;
pub mod ngram;
pub mod path_hierarchy;
pub mod regex;
pub mod unicode_word;
pub mod web;
pub mod whitespace;
