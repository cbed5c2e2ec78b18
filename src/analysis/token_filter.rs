//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream produced by a tokenizer and rewrite,
//! drop, or multiply tokens. They are applied in order by an analyzer:
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Stemmer → terms
//! ```
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::token_filter::Filter;
//! use querydsl::analysis::token_filter::lowercase::LowercaseFilter;
//! use querydsl::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` so analyzers can be shared by concurrent
/// query translations.
///
/// # Examples
///
/// Implementing a custom filter:
///
/// ```
/// use querydsl::analysis::token::{Token, TokenStream};
/// use querydsl::analysis::token_filter::Filter;
/// use querydsl::error::Result;
///
/// struct ShoutFilter;
///
/// impl Filter for ShoutFilter {
///     fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
///         Ok(Box::new(tokens.map(|t| {
///             let text = format!("{}!", t.text);
///             t.with_text(text)
///         })))
///     }
///
///     fn name(&self) -> &'static str {
///         "shout"
///     }
/// }
/// ```
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Rewrite the text of every token, keeping keyword tokens untouched when
/// `skip_keywords` is set.
pub(crate) fn map_text<F>(tokens: TokenStream, skip_keywords: bool, f: F) -> TokenStream
where
    F: Fn(&str) -> String,
{
    let mapped: Vec<Token> = tokens
        .map(|mut token| {
            if !(skip_keywords && token.keyword) {
                token.text = f(&token.text);
            }
            token
        })
        .collect();
    Box::new(mapped.into_iter())
}

// Individual filter modules
pub mod apostrophe;
pub mod ascii_folding;
pub mod camel_case;
pub mod dict;
pub mod elision;
pub mod keyword_marker;
pub mod length;
pub mod lowercase;
pub mod ngram;
pub mod pattern_replace;
pub mod reverse;
pub mod shingle;
pub mod stem;
pub mod stop;
pub mod trim;
pub mod truncate;
pub mod unicode_norm;
pub mod unique;
pub mod uppercase;
