//! Letter tokenizer implementation.

use super::{Tokenizer, split_runs};

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// A tokenizer that emits maximal runs of letters.
///
/// With lowercasing enabled it doubles as the `lowercase` tokenizer.
#[derive(Clone, Debug, Default)]
pub struct LetterTokenizer {
    lowercase: bool,
}

impl LetterTokenizer {
    /// Create a new letter tokenizer.
    pub fn new() -> Self {
        LetterTokenizer { lowercase: false }
    }

    /// Create a letter tokenizer that lowercases every token.
    pub fn lowercasing() -> Self {
        LetterTokenizer { lowercase: true }
    }
}

impl Tokenizer for LetterTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = split_runs(text, char::is_alphabetic);
        if self.lowercase {
            for token in &mut tokens {
                token.text = token.text.to_lowercase();
            }
        }
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        if self.lowercase { "lowercase" } else { "letter" }
    }
}
