//! ASCII folding filter implementation.

use crate::analysis::char_filter::ascii_folding::fold;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::Result;

/// A filter that folds accented characters of every token to ASCII.
#[derive(Clone, Debug, Default)]
pub struct AsciiFoldingFilter;

impl AsciiFoldingFilter {
    pub fn new() -> Self {
        AsciiFoldingFilter
    }
}

impl Filter for AsciiFoldingFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(map_text(tokens, false, |text| fold(text).into_owned()))
    }

    fn name(&self) -> &'static str {
        "ascii_folding"
    }
}
