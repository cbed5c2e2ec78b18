//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the text before it reaches the tokenizer. Each
//! filter reports the [`Transformation`]s it made so the pipeline can map
//! token offsets back onto the original text.
//!
//! # Available Filters
//!
//! - [`mapping::MappingCharFilter`] - `old => new` string replacement
//! - [`pattern_replace::PatternReplaceCharFilter`] - Regex-based replacement
//! - [`html_strip::HtmlStripCharFilter`] - Removes markup, decodes entities
//! - [`ascii_folding::AsciiFoldingCharFilter`] - Folds accented characters to ASCII
//! - [`unicode_normalize::UnicodeNormalizationCharFilter`] - NFC, NFD, NFKC, NFKD
//! - [`zero_width::ZeroWidthNonJoinerCharFilter`] - Replaces U+200C with a space
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::char_filter::CharFilter;
//! use querydsl::analysis::char_filter::html_strip::HtmlStripCharFilter;
//!
//! let (text, _) = HtmlStripCharFilter::new().filter("<p>fish &amp; chips</p>");
//! assert_eq!(text.trim(), "fish & chips");
//! ```

use std::borrow::Cow;

/// Represents a change in the text, mapping a range in the original text
/// to a range in the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }
}

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    ///
    /// Returns the filtered text along with the transformations that
    /// occurred, ordered by position.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// Replace the given non-overlapping, ordered byte ranges of `input`.
///
/// Every replacement whose text differs from the original slice is recorded
/// as a transformation.
pub(crate) fn rewrite<'a, I>(input: &str, replacements: I) -> (String, Vec<Transformation>)
where
    I: IntoIterator<Item = (usize, usize, Cow<'a, str>)>,
{
    let mut output = String::with_capacity(input.len());
    let mut transformations = Vec::new();
    let mut last_end = 0;

    for (start, end, replacement) in replacements {
        output.push_str(&input[last_end..start]);
        let new_start = output.len();
        output.push_str(&replacement);
        if replacement != input[start..end] {
            transformations.push(Transformation::new(start, end, new_start, output.len()));
        }
        last_end = end;
    }
    output.push_str(&input[last_end..]);

    (output, transformations)
}

pub mod ascii_folding;
pub mod html_strip;
pub mod mapping;
pub mod pattern_replace;
pub mod unicode_normalize;
pub mod zero_width;
