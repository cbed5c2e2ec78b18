//! Pipeline analyzer that combines char filters, a tokenizer and token filters.
//!
//! This is the building block for every analyzer declared in index settings.
//! The PipelineAnalyzer applies processing in this order:
//! 1. Char Filters: rewrite raw text
//! 2. Tokenizer: splits text into tokens
//! 3. Token Filters: applied sequentially in the order they were added
//!
//! Token offsets always refer to the text given to [`Analyzer::analyze`],
//! whatever the char filters did to it.
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::analyzer::Analyzer;
//! use querydsl::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use querydsl::analysis::tokenizer::regex::RegexTokenizer;
//! use querydsl::analysis::token_filter::lowercase::LowercaseFilter;
//! use querydsl::analysis::token_filter::stop::StopFilter;
//! use std::sync::Arc;
//!
//! let tokenizer = Arc::new(RegexTokenizer::new().unwrap());
//! let analyzer = PipelineAnalyzer::new(tokenizer)
//!     .add_filter(Arc::new(LowercaseFilter::new()))
//!     .add_filter(Arc::new(StopFilter::from_words(vec!["the", "and"])))
//!     .with_name("my_custom_analyzer");
//!
//! let tokens: Vec<_> = analyzer.analyze("Hello THE world AND test").unwrap().collect();
//!
//! assert_eq!(analyzer.name(), "my_custom_analyzer");
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].text, "test");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::{CharFilter, Transformation};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a chain of filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    char_filters: Vec<Arc<dyn CharFilter>>,
    filters: Vec<Arc<dyn Filter>>,
    name: String,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            name: format!("pipeline_{}", tokenizer.name()),
            tokenizer,
            char_filters: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// Add a char filter to the pipeline.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set a custom name for this analyzer.
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Maps an offset in the filtered text back to the text before the filter ran.
    fn correct_offset(offset: usize, transformations: &[Transformation]) -> usize {
        let mut corrected = offset as isize;
        // Transformations are ordered by position
        for t in transformations {
            let original_len = (t.original_end - t.original_start) as isize;
            let new_len = (t.new_end - t.new_start) as isize;

            if offset >= t.new_end {
                corrected += original_len - new_len;
            } else if offset >= t.new_start {
                // Inside a rewritten span: interpolate.
                let offset_in_new = offset - t.new_start;
                return t.original_start
                    + offset_in_new * (t.original_end - t.original_start)
                        / (t.new_end - t.new_start);
            } else {
                break;
            }
        }
        corrected.max(0) as usize
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        // Apply char filters
        let mut filtered_text = text.to_string();
        let mut filter_transformations = Vec::with_capacity(self.char_filters.len());

        for char_filter in &self.char_filters {
            let (new_text, transformations) = char_filter.filter(&filtered_text);
            filtered_text = new_text;
            filter_transformations.push(transformations);
        }

        let mut tokens = self.tokenizer.tokenize(&filtered_text)?;

        for filter in &self.filters {
            tokens = filter.filter(tokens)?;
        }

        if filter_transformations.iter().all(|t| t.is_empty()) {
            return Ok(tokens);
        }

        // Map from Final -> Filter N -> ... -> Filter 1 -> Original
        let collected: Vec<_> = tokens
            .map(|mut token| {
                for transformations in filter_transformations.iter().rev() {
                    token.start_offset = Self::correct_offset(token.start_offset, transformations);
                    token.end_offset = Self::correct_offset(token.end_offset, transformations);
                }
                token
            })
            .collect();
        Ok(Box::new(collected.into_iter()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "char_filters",
                &self
                    .char_filters
                    .iter()
                    .map(|f| f.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::html_strip::HtmlStripCharFilter;
    use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
    use crate::analysis::char_filter::unicode_normalize::{
        NormalizationForm, UnicodeNormalizationCharFilter,
    };
    use crate::analysis::token::Token;
    use crate::analysis::token_filter::lowercase::LowercaseFilter;
    use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;

    #[test]
    fn test_pipeline_with_char_filter() {
        let tokenizer = Arc::new(WhitespaceTokenizer::new());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(UnicodeNormalizationCharFilter::new(
                NormalizationForm::NFKC,
            )))
            .add_filter(Arc::new(LowercaseFilter::new()));

        // U+FF21 is Fullwidth Latin Capital Letter A
        let tokens: Vec<Token> = analyzer.analyze("\u{ff21}BC DEF").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "abc");
        assert_eq!(tokens[0].end_offset, 5);
        assert_eq!(tokens[1].text, "def");
        assert_eq!(tokens[1].start_offset, 6);
    }

    #[test]
    fn test_offset_correction_normalization() {
        let tokenizer = Arc::new(WhitespaceTokenizer::new());
        let analyzer = PipelineAnalyzer::new(tokenizer).add_char_filter(Arc::new(
            UnicodeNormalizationCharFilter::new(NormalizationForm::NFKC),
        ));

        // "㌂" (3 bytes) becomes "アンペア" (12 bytes)
        let tokens: Vec<Token> = analyzer.analyze("㌂").unwrap().collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "アンペア");
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 3);
    }

    #[test]
    fn test_offset_correction_pattern_replace() {
        let tokenizer = Arc::new(WhitespaceTokenizer::new());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(r"-", "").unwrap()));

        let tokens: Vec<Token> = analyzer.analyze("foo-bar baz").unwrap().collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "foobar");
        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 7);
        assert_eq!(tokens[1].start_offset, 8);
        assert_eq!(tokens[1].end_offset, 11);
    }

    #[test]
    fn test_chained_char_filters() {
        let tokenizer = Arc::new(WhitespaceTokenizer::new());
        let analyzer = PipelineAnalyzer::new(tokenizer)
            .add_char_filter(Arc::new(HtmlStripCharFilter::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::new(r"-", "").unwrap()))
            .with_name("html");

        let text = "<b>foo-bar</b> baz";
        let tokens: Vec<Token> = analyzer.analyze(text).unwrap().collect();

        assert_eq!(tokens[0].text, "foobar");
        assert_eq!(tokens[1].text, "baz");
        assert_eq!(&text[tokens[1].start_offset..tokens[1].end_offset], "baz");
    }

    #[test]
    fn test_debug_lists_components() {
        let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));
        let debug = format!("{analyzer:?}");

        assert!(debug.contains("pipeline_whitespace"));
        assert!(debug.contains("lowercase"));
    }
}
