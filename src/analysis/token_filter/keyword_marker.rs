//! Keyword marker filter implementation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that marks the configured words as keywords, which protects
/// them from the stemmers further down the pipeline.
#[derive(Clone, Debug)]
pub struct KeywordMarkerFilter {
    keywords: Arc<HashSet<String>>,
}

impl KeywordMarkerFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeywordMarkerFilter {
            keywords: Arc::new(keywords.into_iter().map(Into::into).collect()),
        }
    }
}

impl Filter for KeywordMarkerFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let marked: Vec<Token> = tokens
            .map(|token| {
                if self.keywords.contains(&token.text) {
                    token.as_keyword()
                } else {
                    token
                }
            })
            .collect();
        Ok(Box::new(marked.into_iter()))
    }

    fn name(&self) -> &'static str {
        "keyword_marker"
    }
}
