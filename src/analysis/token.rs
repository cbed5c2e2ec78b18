//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through an analysis pipeline: the
//! tokenizer produces them, token filters rewrite, drop, or multiply them,
//! and query builders finally read their text.
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::token::{Token, TokenType};
//!
//! let token = Token::with_offsets("world", 1, 6, 11).with_token_type(TokenType::Alphanum);
//! assert_eq!(token.text, "world");
//! assert_eq!(token.start_offset, 6);
//! assert_eq!(token.end_offset, 11);
//! assert!(!token.is_keyword());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token represents a single unit of text after tokenization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// Classification of the token content
    pub token_type: TokenType,

    /// Keyword tokens are protected from stemming.
    pub keyword: bool,
}

/// Token type classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Alphanumeric text
    Alphanum,
    /// Numeric values
    Num,
    /// Ideographic characters (CJK)
    Ideographic,
    /// A token glued from several input tokens
    Shingle,
    /// URLs
    Url,
    /// Email addresses
    Email,
    /// Hashtags and mentions
    Tag,
    /// Other/unknown token types
    Other,
}

impl TokenType {
    /// Guess the type of a word from its characters.
    pub fn classify(text: &str) -> TokenType {
        if text.is_empty() {
            TokenType::Other
        } else if text.chars().all(|c| c.is_numeric()) {
            TokenType::Num
        } else if text.chars().any(is_ideographic) {
            TokenType::Ideographic
        } else if text.chars().any(|c| c.is_alphanumeric()) {
            TokenType::Alphanum
        } else {
            TokenType::Other
        }
    }
}

fn is_ideographic(c: char) -> bool {
    matches!(c as u32,
        0x3040..=0x30FF | 0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xAC00..=0xD7AF | 0xF900..=0xFAFF)
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset: 0,
            end_offset: 0,
            token_type: TokenType::Alphanum,
            keyword: false,
        }
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            start_offset,
            end_offset,
            ..Token::new(text, position)
        }
    }

    /// Get the length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Mark this token as a keyword.
    pub fn as_keyword(mut self) -> Self {
        self.keyword = true;
        self
    }

    /// Check if this token is a keyword.
    pub fn is_keyword(&self) -> bool {
        self.keyword
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// Clone this token with updated position.
    pub fn with_position(&self, position: usize) -> Self {
        let mut token = self.clone();
        token.position = position;
        token
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
