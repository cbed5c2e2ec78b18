//! Web tokenizer implementation.

use std::sync::LazyLock;

use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::error::Result;

static WEB_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?P<url>[a-zA-Z][a-zA-Z0-9+.-]*://[^\s<>]+)|(?P<email>[\w.+-]+@[\w-]+(?:\.[\w-]+)+)|(?P<tag>[#@]\w+)|(?P<word>\w+(?:['.]\w+)*)",
    )
    .ok()
});

/// A tokenizer that keeps URLs, email addresses, hashtags and mentions
/// whole, and splits everything else into words.
#[derive(Clone, Debug, Default)]
pub struct WebTokenizer;

impl WebTokenizer {
    /// Create a new web tokenizer.
    pub fn new() -> Self {
        WebTokenizer
    }
}

impl Tokenizer for WebTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let Some(pattern) = WEB_PATTERN.as_ref() else {
            return Ok(Box::new(std::iter::empty()));
        };

        let tokens: Vec<Token> = pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let (mat, token_type) = if let Some(m) = caps.name("url") {
                    (m, TokenType::Url)
                } else if let Some(m) = caps.name("email") {
                    (m, TokenType::Email)
                } else if let Some(m) = caps.name("tag") {
                    (m, TokenType::Tag)
                } else {
                    let m = caps.name("word")?;
                    (m, TokenType::classify(m.as_str()))
                };
                Some((mat.as_str(), mat.start(), mat.end(), token_type))
            })
            .enumerate()
            .map(|(position, (word, start, end, token_type))| {
                Token::with_offsets(word, position, start, end).with_token_type(token_type)
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "web"
    }
}
