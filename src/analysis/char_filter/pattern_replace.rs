//! Pattern replace char filter.

use regex::Regex;

use super::{CharFilter, Transformation, rewrite};
use crate::error::{QueryDslError, Result};

/// A char filter that replaces text matching a regex pattern.
///
/// The replacement may reference capture groups (`$1`, `${name}`).
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            QueryDslError::x_content_parse(format!("[char_filter] invalid pattern [{pattern}]: {e}"))
        })?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        rewrite(
            input,
            self.pattern.captures_iter(input).filter_map(|caps| {
                let m = caps.get(0)?;
                let mut replaced = String::new();
                caps.expand(&self.replacement, &mut replaced);
                Some((m.start(), m.end(), replaced.into()))
            }),
        )
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}
