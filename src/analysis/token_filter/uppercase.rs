//! Uppercase filter implementation.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::Result;

/// A filter that converts tokens to uppercase.
#[derive(Clone, Debug, Default)]
pub struct UppercaseFilter;

impl UppercaseFilter {
    pub fn new() -> Self {
        UppercaseFilter
    }
}

impl Filter for UppercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(map_text(tokens, false, str::to_uppercase))
    }

    fn name(&self) -> &'static str {
        "uppercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_uppercase_filter() {
        let tokens = vec![Token::new("straße", 0)];
        let result: Vec<Token> = UppercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();
        assert_eq!(result[0].text, "STRASSE");
    }
}
