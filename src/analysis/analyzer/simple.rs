//! Simple analyzer: a tokenizer without any filtering.
//!
//! The `simple` built-in uses the lowercasing letter tokenizer, so it splits
//! on anything that is not a letter.
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::analyzer::Analyzer;
//! use querydsl::analysis::analyzer::simple::SimpleAnalyzer;
//! use querydsl::analysis::tokenizer::regex::RegexTokenizer;
//! use std::sync::Arc;
//!
//! let tokens: Vec<_> = SimpleAnalyzer::default().analyze("Don't STOP").unwrap().collect();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "don");
//!
//! let analyzer = SimpleAnalyzer::new(Arc::new(RegexTokenizer::new().unwrap()));
//! let tokens: Vec<_> = analyzer.analyze("Hello World").unwrap().collect();
//! assert_eq!(tokens[0].text, "Hello");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::letter::LetterTokenizer;
use crate::error::Result;

/// A simple analyzer that just tokenizes without any filtering.
#[derive(Clone)]
pub struct SimpleAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
}

impl SimpleAnalyzer {
    /// Create a new simple analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        SimpleAnalyzer { tokenizer }
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Turn this analyzer into a pipeline with the same tokenizer.
    pub fn into_pipeline(self) -> PipelineAnalyzer {
        PipelineAnalyzer::new(self.tokenizer).with_name("simple")
    }
}

impl Default for SimpleAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(LetterTokenizer::lowercasing()))
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &str {
        "simple"
    }
}

impl std::fmt::Debug for SimpleAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleAnalyzer")
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_simple_analyzer() {
        let tokens: Vec<Token> = SimpleAnalyzer::default()
            .analyze("Rust-2024 Edition")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["rust", "edition"]);
        assert_eq!(tokens[1].start_offset, 10);
    }
}
