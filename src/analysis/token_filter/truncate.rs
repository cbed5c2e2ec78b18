//! Truncate filter implementation.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::{QueryDslError, Result};

/// A filter that truncates tokens to at most `length` characters.
#[derive(Clone, Debug)]
pub struct TruncateFilter {
    length: usize,
}

impl TruncateFilter {
    /// Create a truncate filter. `length` must be positive.
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(QueryDslError::illegal_argument(
                "[truncate] length must be greater than 0",
            ));
        }
        Ok(TruncateFilter { length })
    }
}

impl Default for TruncateFilter {
    fn default() -> Self {
        TruncateFilter { length: 10 }
    }
}

impl Filter for TruncateFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let length = self.length;
        Ok(map_text(tokens, false, move |text| text.chars().take(length).collect()))
    }

    fn name(&self) -> &'static str {
        "truncate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_truncate_filter() {
        let tokens = vec![Token::new("internationalization", 0), Token::new("abc", 1)];
        let result: Vec<Token> = TruncateFilter::new(5)
            .unwrap()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();
        assert_eq!(result[0].text, "inter");
        assert_eq!(result[1].text, "abc");
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(TruncateFilter::new(0).is_err());
    }
}
