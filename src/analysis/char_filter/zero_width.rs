//! Zero width non-joiner char filter.

use std::borrow::Cow;

use super::{CharFilter, Transformation, rewrite};

const ZERO_WIDTH_NON_JOINER: char = '\u{200C}';

/// A char filter replacing U+200C ZERO WIDTH NON-JOINER with a space, so
/// the tokenizer splits words at it (common in Persian text).
#[derive(Clone, Debug, Default)]
pub struct ZeroWidthNonJoinerCharFilter;

impl ZeroWidthNonJoinerCharFilter {
    pub fn new() -> Self {
        ZeroWidthNonJoinerCharFilter
    }
}

impl CharFilter for ZeroWidthNonJoinerCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        rewrite(
            input,
            input
                .match_indices(ZERO_WIDTH_NON_JOINER)
                .map(|(i, m)| (i, i + m.len(), Cow::Borrowed(" "))),
        )
    }

    fn name(&self) -> &'static str {
        "zero_width_non_joiner"
    }
}
