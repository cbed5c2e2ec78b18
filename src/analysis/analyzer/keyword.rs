//! Keyword analyzer that treats the entire input as a single token.
//!
//! Used for `keyword` fields and wherever exact matching is required.
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::analyzer::Analyzer;
//! use querydsl::analysis::analyzer::keyword::KeywordAnalyzer;
//!
//! let analyzer = KeywordAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("user-123-ABC").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "user-123-ABC");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::analyzer::simple::SimpleAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::keyword::KeywordTokenizer;
use crate::error::Result;

/// A keyword analyzer that treats the entire input as a single token.
pub struct KeywordAnalyzer {
    inner: SimpleAnalyzer,
}

impl KeywordAnalyzer {
    /// Create a new keyword analyzer.
    pub fn new() -> Self {
        KeywordAnalyzer {
            inner: SimpleAnalyzer::new(Arc::new(KeywordTokenizer::new())),
        }
    }

    /// Turn this analyzer into a pipeline with the same tokenizer.
    pub fn into_pipeline(self) -> PipelineAnalyzer {
        self.inner.into_pipeline().with_name("keyword")
    }
}

impl Default for KeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for KeywordAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

impl std::fmt::Debug for KeywordAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordAnalyzer").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_keyword_analyzer() {
        let tokens: Vec<Token> = KeywordAnalyzer::new()
            .analyze("New York City")
            .unwrap()
            .collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "New York City");
        assert_eq!(tokens[0].end_offset, 13);
    }

    #[test]
    fn test_keyword_analyzer_empty_input() {
        let tokens: Vec<Token> = KeywordAnalyzer::new().analyze("").unwrap().collect();
        assert!(tokens.is_empty());
    }
}
