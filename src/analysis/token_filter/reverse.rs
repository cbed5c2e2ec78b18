//! Reverse filter implementation.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::Result;

/// A filter that reverses the characters of every token.
///
/// Indexing reversed terms turns suffix searches into prefix searches.
#[derive(Clone, Debug, Default)]
pub struct ReverseFilter;

impl ReverseFilter {
    pub fn new() -> Self {
        ReverseFilter
    }
}

impl Filter for ReverseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(map_text(tokens, false, |text| text.chars().rev().collect()))
    }

    fn name(&self) -> &'static str {
        "reverse"
    }
}
