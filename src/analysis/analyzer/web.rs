//! Web analyzer: keeps URLs, email addresses and tags as single tokens.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::web::WebTokenizer;
use crate::error::Result;

pub struct WebAnalyzer {
    inner: PipelineAnalyzer,
}

impl WebAnalyzer {
    pub fn new() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(WebTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .with_name("web");
        WebAnalyzer { inner: analyzer }
    }

    /// Turn this analyzer into its pipeline, to extend it with more filters.
    pub fn into_pipeline(self) -> PipelineAnalyzer {
        self.inner
    }
}

impl Default for WebAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for WebAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        "web"
    }
}

impl std::fmt::Debug for WebAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
