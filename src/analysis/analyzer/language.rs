//! Language analyzers: standard tokenization followed by a snowball stemmer.
//!
//! English additionally removes the default English stop words.
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::analyzer::Analyzer;
//! use querydsl::analysis::analyzer::language::LanguageAnalyzer;
//! use querydsl::analysis::token_filter::stem::StemLanguage;
//!
//! let analyzer = LanguageAnalyzer::new(StemLanguage::English);
//! let tokens: Vec<_> = analyzer.analyze("The foxes were running").unwrap().collect();
//!
//! let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["fox", "were", "run"]);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stem::{StemFilter, StemLanguage};
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// Names of the built-in language analyzers and their stemmers.
pub const LANGUAGE_ANALYZERS: &[(&str, StemLanguage)] = &[
    ("arabic", StemLanguage::Arabic),
    ("danish", StemLanguage::Danish),
    ("dutch", StemLanguage::Dutch),
    ("english", StemLanguage::English),
    ("finnish", StemLanguage::Finnish),
    ("french", StemLanguage::French),
    ("german", StemLanguage::German),
    ("greek", StemLanguage::Greek),
    ("hungarian", StemLanguage::Hungarian),
    ("italian", StemLanguage::Italian),
    ("norwegian", StemLanguage::Norwegian),
    ("portuguese", StemLanguage::Portuguese),
    ("romanian", StemLanguage::Romanian),
    ("russian", StemLanguage::Russian),
    ("spanish", StemLanguage::Spanish),
    ("swedish", StemLanguage::Swedish),
    ("tamil", StemLanguage::Tamil),
    ("turkish", StemLanguage::Turkish),
];

pub struct LanguageAnalyzer {
    language: StemLanguage,
    inner: PipelineAnalyzer,
}

impl LanguageAnalyzer {
    pub fn new(language: StemLanguage) -> Self {
        let name = LANGUAGE_ANALYZERS
            .iter()
            .find(|(_, l)| *l == language)
            .map_or("language", |(name, _)| *name);

        let mut analyzer = PipelineAnalyzer::new(Arc::new(UnicodeWordTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()));
        if language == StemLanguage::English {
            analyzer = analyzer.add_filter(Arc::new(StopFilter::new()));
        }
        let analyzer = analyzer
            .add_filter(Arc::new(StemFilter::new(language)))
            .with_name(name);

        LanguageAnalyzer {
            language,
            inner: analyzer,
        }
    }

    /// Look a language analyzer up by its built-in name (`english`, `german`, ...).
    pub fn by_name(name: &str) -> Option<Self> {
        LANGUAGE_ANALYZERS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, language)| Self::new(*language))
    }

    pub fn language(&self) -> StemLanguage {
        self.language
    }

    /// Turn this analyzer into its pipeline, to extend it with more filters.
    pub fn into_pipeline(self) -> PipelineAnalyzer {
        self.inner
    }
}

impl Analyzer for LanguageAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

impl std::fmt::Debug for LanguageAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageAnalyzer")
            .field("language", &self.language)
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_english_analyzer() {
        let analyzer = LanguageAnalyzer::new(StemLanguage::English);
        let tokens: Vec<Token> = analyzer
            .analyze("The runners are jumping")
            .unwrap()
            .collect();

        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["runner", "jump"]);
        assert_eq!(analyzer.name(), "english");
    }

    #[test]
    fn test_german_keeps_stop_words() {
        let analyzer = LanguageAnalyzer::by_name("german").unwrap();
        let tokens: Vec<Token> = analyzer.analyze("die Häuser").unwrap().collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "haus");
    }

    #[test]
    fn test_unknown_language() {
        assert!(LanguageAnalyzer::by_name("klingon").is_none());
    }
}
