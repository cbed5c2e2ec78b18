//! Camel case filter implementation.

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that splits camel case tokens into their parts.
///
/// `XMLHttpRequest2` becomes `XML`, `Http`, `Request`, `2`. Each part takes
/// its own position and later tokens are shifted accordingly.
#[derive(Clone, Debug, Default)]
pub struct CamelCaseFilter;

impl CamelCaseFilter {
    pub fn new() -> Self {
        CamelCaseFilter
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharKind {
    Lower,
    Upper,
    Digit,
    Other,
}

fn kind_of(c: char) -> CharKind {
    if c.is_lowercase() {
        CharKind::Lower
    } else if c.is_uppercase() {
        CharKind::Upper
    } else if c.is_numeric() {
        CharKind::Digit
    } else {
        CharKind::Other
    }
}

/// Byte ranges of the camel case parts of `text`.
pub(crate) fn split_camel_case(text: &str) -> Vec<(usize, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let prev = kind_of(chars[i - 1].1);
        let cur = kind_of(chars[i].1);
        let next = chars.get(i + 1).map(|&(_, c)| kind_of(c));

        let boundary = match (prev, cur) {
            (CharKind::Lower, CharKind::Upper) => true,
            (CharKind::Upper, CharKind::Upper) => next == Some(CharKind::Lower),
            (a, b) => {
                a != b && [a, b].iter().any(|k| matches!(k, CharKind::Digit | CharKind::Other))
            }
        };
        if boundary {
            parts.push((start, chars[i].0));
            start = chars[i].0;
        }
    }
    if !text.is_empty() {
        parts.push((start, text.len()));
    }
    parts
}

impl Filter for CamelCaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut result = Vec::new();
        let mut shift = 0;

        for token in tokens {
            let parts = split_camel_case(&token.text);
            let exact_offsets = token.end_offset - token.start_offset == token.text.len();
            let base = token.position + shift;

            for (i, &(start, end)) in parts.iter().enumerate() {
                let part = &token.text[start..end];
                let (start_offset, end_offset) = if exact_offsets {
                    (token.start_offset + start, token.start_offset + end)
                } else {
                    (token.start_offset, token.end_offset)
                };
                let mut split = Token::with_offsets(part, base + i, start_offset, end_offset)
                    .with_token_type(TokenType::classify(part));
                split.keyword = token.keyword;
                result.push(split);
            }
            shift += parts.len().saturating_sub(1);
        }

        Ok(Box::new(result.into_iter()))
    }

    fn name(&self) -> &'static str {
        "camel_case"
    }
}
