//! Pattern replace filter implementation.

use regex::Regex;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::{QueryDslError, Result};

/// A filter replacing every match of a regular expression inside each token.
///
/// The replacement may reference capture groups (`$1`, `${name}`).
#[derive(Clone, Debug)]
pub struct PatternReplaceFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceFilter {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            QueryDslError::x_content_parse(format!(
                "[pattern_replace] invalid pattern [{pattern}]: {e}"
            ))
        })?;
        Ok(PatternReplaceFilter {
            pattern,
            replacement: replacement.to_string(),
        })
    }
}

impl Filter for PatternReplaceFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(map_text(tokens, false, |text| {
            self.pattern
                .replace_all(text, self.replacement.as_str())
                .into_owned()
        }))
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}
