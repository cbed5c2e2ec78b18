//! The `keyword` tokenizer (also registered as `single`).

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

/// Emits the whole input as one token at position 0, typed by its content.
///
/// Empty input yields no token. Whitespace is kept, so `" a "` stays three
/// bytes wide.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordTokenizer;

impl KeywordTokenizer {
    pub fn new() -> Self {
        KeywordTokenizer
    }
}

impl Tokenizer for KeywordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let token = (!text.is_empty()).then(|| {
            Token::with_offsets(text, 0, 0, text.len()).with_token_type(TokenType::classify(text))
        });
        Ok(Box::new(token.into_iter()))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
