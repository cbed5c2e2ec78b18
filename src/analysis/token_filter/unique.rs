//! Unique filter implementation.

use ahash::AHashSet;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that drops tokens whose text was already seen earlier in the stream.
#[derive(Clone, Debug, Default)]
pub struct UniqueFilter;

impl UniqueFilter {
    pub fn new() -> Self {
        UniqueFilter
    }
}

impl Filter for UniqueFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut seen = AHashSet::new();
        let unique: Vec<Token> = tokens
            .filter(|token| seen.insert(token.text.clone()))
            .collect();
        Ok(Box::new(unique.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unique"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_filter() {
        let tokens = vec![
            Token::new("fox", 0),
            Token::new("dog", 1),
            Token::new("fox", 2),
        ];
        let result: Vec<Token> = UniqueFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[1].text, "dog");
    }
}
