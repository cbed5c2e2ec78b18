//! Pattern analyzer: extracts the matches of a regular expression as tokens.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Default token pattern of the pattern analyzer.
pub const DEFAULT_PATTERN: &str = r"\w+";

/// An analyzer whose tokens are the matches of a pattern, optionally
/// lowercased and stop-filtered.
///
/// # Examples
///
/// ```
/// use querydsl::analysis::analyzer::Analyzer;
/// use querydsl::analysis::analyzer::pattern::PatternAnalyzer;
///
/// let analyzer = PatternAnalyzer::new("[^,]+", true, None).unwrap();
/// let tokens: Vec<_> = analyzer.analyze("Red,GREEN,blue").unwrap().collect();
/// assert_eq!(tokens[1].text, "green");
/// ```
pub struct PatternAnalyzer {
    inner: PipelineAnalyzer,
}

impl PatternAnalyzer {
    /// Create a pattern analyzer.
    ///
    /// # Errors
    ///
    /// Returns an `XContentParseException` when `pattern` is not a valid regex.
    pub fn new(pattern: &str, lowercase: bool, stop: Option<StopFilter>) -> Result<Self> {
        let mut analyzer = PipelineAnalyzer::new(Arc::new(RegexTokenizer::with_pattern(pattern)?));
        if lowercase {
            analyzer = analyzer.add_filter(Arc::new(LowercaseFilter::new()));
        }
        if let Some(stop) = stop {
            analyzer = analyzer.add_filter(Arc::new(stop));
        }
        Ok(PatternAnalyzer {
            inner: analyzer.with_name("pattern"),
        })
    }

    /// Turn this analyzer into its pipeline, to extend it with more filters.
    pub fn into_pipeline(self) -> PipelineAnalyzer {
        self.inner
    }
}

impl Analyzer for PatternAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

impl std::fmt::Debug for PatternAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_default_pattern() {
        let analyzer = PatternAnalyzer::new(DEFAULT_PATTERN, true, None).unwrap();
        let tokens: Vec<Token> = analyzer
            .analyze("The foo_bar-size is 42")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["the", "foo_bar", "size", "is", "42"]);
    }

    #[test]
    fn test_keep_case_with_stop_words() {
        let analyzer =
            PatternAnalyzer::new(DEFAULT_PATTERN, false, Some(StopFilter::from_words(["is"])))
                .unwrap();
        let tokens: Vec<Token> = analyzer.analyze("Rust is FAST").unwrap().collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Rust", "FAST"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(PatternAnalyzer::new("(", true, None).is_err());
    }
}
