//! Length filter implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{QueryDslError, Result};

/// A filter that keeps only tokens whose character count lies in `min..=max`.
#[derive(Clone, Debug)]
pub struct LengthFilter {
    min: usize,
    max: usize,
}

impl LengthFilter {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if max < min {
            return Err(QueryDslError::illegal_argument(format!(
                "[length] max ({max}) must be >= min ({min})"
            )));
        }
        Ok(LengthFilter { min, max })
    }
}

impl Default for LengthFilter {
    fn default() -> Self {
        LengthFilter {
            min: 0,
            max: usize::MAX,
        }
    }
}

impl Filter for LengthFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let kept: Vec<Token> = tokens
            .filter(|token| {
                let len = token.text.chars().count();
                len >= self.min && len <= self.max
            })
            .collect();
        Ok(Box::new(kept.into_iter()))
    }

    fn name(&self) -> &'static str {
        "length"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_filter() {
        let filter = LengthFilter::new(2, 4).unwrap();
        let tokens = vec![
            Token::new("a", 0),
            Token::new("ab", 1),
            Token::new("日本語", 2),
            Token::new("abcde", 3),
        ];
        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["ab", "日本語"]);
    }

    #[test]
    fn test_inverted_bounds() {
        assert!(LengthFilter::new(5, 2).is_err());
    }
}
