//! Apostrophe filter implementation.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::Result;

/// A filter that strips everything from the first apostrophe onwards,
/// including the apostrophe itself (`Türkiye'de` becomes `Türkiye`).
#[derive(Clone, Debug, Default)]
pub struct ApostropheFilter;

impl ApostropheFilter {
    pub fn new() -> Self {
        ApostropheFilter
    }
}

impl Filter for ApostropheFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(map_text(tokens, false, |text| {
            match text.find(['\'', '\u{2019}']) {
                Some(i) => text[..i].to_string(),
                None => text.to_string(),
            }
        }))
    }

    fn name(&self) -> &'static str {
        "apostrophe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_apostrophe_filter() {
        let tokens = vec![Token::new("Istanbul'a", 0), Token::new("plain", 1)];
        let result: Vec<Token> = ApostropheFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();
        assert_eq!(result[0].text, "Istanbul");
        assert_eq!(result[1].text, "plain");
    }
}
