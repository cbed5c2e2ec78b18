//! Trim filter implementation.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::Result;

/// A filter that removes leading and trailing whitespace from tokens.
#[derive(Clone, Debug, Default)]
pub struct TrimFilter;

impl TrimFilter {
    pub fn new() -> Self {
        TrimFilter
    }
}

impl Filter for TrimFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(map_text(tokens, false, |text| text.trim().to_string()))
    }

    fn name(&self) -> &'static str {
        "trim"
    }
}
