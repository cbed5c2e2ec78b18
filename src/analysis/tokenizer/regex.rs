//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::{QueryDslError, Result};

/// A regex-based tokenizer that extracts tokens using regular expressions.
///
/// In gap mode the pattern describes the separators (the `pattern` tokenizer
/// splits on `\W+` by default); otherwise every match is a token.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
    /// Whether to extract gaps (text between matches) instead of matches
    gaps: bool,
}

impl RegexTokenizer {
    /// Create a new regex tokenizer with the default pattern.
    ///
    /// The default pattern `r"\w+"` matches sequences of word characters.
    pub fn new() -> Result<Self> {
        Self::with_pattern(r"\w+")
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(compile(pattern)?),
            gaps: false,
        })
    }

    /// Create a tokenizer that extracts gaps (text between matches) instead of matches.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(compile(pattern)?),
            gaps: true,
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Check if this tokenizer extracts gaps.
    pub fn gaps(&self) -> bool {
        self.gaps
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        QueryDslError::x_content_parse(format!("[tokenizer] invalid pattern [{pattern}]: {e}"))
    })
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        let mut push = |start: usize, end: usize| {
            let word = &text[start..end];
            if !word.is_empty() {
                let position = tokens.len();
                tokens.push(
                    Token::with_offsets(word, position, start, end)
                        .with_token_type(TokenType::classify(word)),
                );
            }
        };

        if self.gaps {
            let mut last_end = 0;
            for mat in self.pattern.find_iter(text) {
                push(last_end, mat.start());
                last_end = mat.end();
            }
            push(last_end, text.len());
        } else {
            for mat in self.pattern.find_iter(text) {
                push(mat.start(), mat.end());
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "pattern"
    }
}
