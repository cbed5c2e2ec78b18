//! Whitespace analyzer: splits on whitespace and keeps case.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::analyzer::simple::SimpleAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// An analyzer that only splits on whitespace.
pub struct WhitespaceAnalyzer {
    inner: SimpleAnalyzer,
}

impl WhitespaceAnalyzer {
    pub fn new() -> Self {
        WhitespaceAnalyzer {
            inner: SimpleAnalyzer::new(Arc::new(WhitespaceTokenizer::new())),
        }
    }

    /// Turn this analyzer into a pipeline with the same tokenizer.
    pub fn into_pipeline(self) -> PipelineAnalyzer {
        self.inner.into_pipeline().with_name("whitespace")
    }
}

impl Default for WhitespaceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for WhitespaceAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        "whitespace"
    }
}

impl std::fmt::Debug for WhitespaceAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhitespaceAnalyzer").finish()
    }
}
