//! Stop analyzer: the simple analyzer plus stop word removal.

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::letter::LetterTokenizer;
use crate::error::Result;

/// Letters, lowercased, with stop words removed (English by default).
pub struct StopAnalyzer {
    inner: PipelineAnalyzer,
}

impl StopAnalyzer {
    pub fn new() -> Self {
        Self::with_stop_words(StopFilter::new())
    }

    pub fn with_stop_words(stop: StopFilter) -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(LetterTokenizer::lowercasing()))
            .add_filter(Arc::new(stop))
            .with_name("stop");
        StopAnalyzer { inner: analyzer }
    }

    /// Turn this analyzer into its pipeline, to extend it with more filters.
    pub fn into_pipeline(self) -> PipelineAnalyzer {
        self.inner
    }
}

impl Default for StopAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for StopAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        "stop"
    }
}

impl std::fmt::Debug for StopAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
