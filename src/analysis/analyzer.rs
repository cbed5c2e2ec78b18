//! Analyzers turning text into the terms of a query.
//!
//! An analyzer is the complete text processing pipeline:
//!
//! ```text
//! Raw Text → Char Filters → Tokenizer → Filter 1 → ... → Filter N → terms
//! ```
//!
//! # Available Implementations
//!
//! - [`StandardAnalyzer`](standard::StandardAnalyzer) - Unicode words, lowercased
//! - [`SimpleAnalyzer`](simple::SimpleAnalyzer) - Tokenization only, no filtering
//! - [`KeywordAnalyzer`](keyword::KeywordAnalyzer) - Treats entire input as one token
//! - [`WhitespaceAnalyzer`](whitespace::WhitespaceAnalyzer) - Splits on whitespace only
//! - [`StopAnalyzer`](stop::StopAnalyzer) - Letters, lowercased, English stop words removed
//! - [`PatternAnalyzer`](pattern::PatternAnalyzer) - Splits on a regular expression
//! - [`WebAnalyzer`](web::WebAnalyzer) - Keeps URLs, emails and tags whole
//! - [`LanguageAnalyzer`](language::LanguageAnalyzer) - Snowball stemming per language
//! - [`PipelineAnalyzer`](pipeline::PipelineAnalyzer) - Custom char filter, tokenizer and filter chains
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::analyzer::Analyzer;
//! use querydsl::analysis::analyzer::standard::StandardAnalyzer;
//!
//! let analyzer = StandardAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("Hello World").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "hello");
//! assert_eq!(tokens[1].text, "world");
//! ```
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use querydsl::analysis::analyzer::Analyzer;
//! use querydsl::analysis::token::TokenStream;
//! use querydsl::error::Result;
//!
//! struct NothingAnalyzer;
//!
//! impl Analyzer for NothingAnalyzer {
//!     fn analyze(&self, _text: &str) -> Result<TokenStream> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "nothing"
//!     }
//! }
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync`: analyzers are resolved from a shared
/// registry and used by concurrent query translations.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// The name of this analyzer, as referenced by mappings and queries.
    fn name(&self) -> &str;
}

pub mod keyword;
pub mod language;
pub mod pattern;
pub mod pipeline;
pub mod simple;
pub mod standard;
pub mod stop;
pub mod web;
pub mod whitespace;
