//! Path hierarchy tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that emits every ancestor prefix of a path-like value.
///
/// `/usr/local/bin` becomes `/usr`, `/usr/local` and `/usr/local/bin`.
#[derive(Clone, Debug)]
pub struct PathHierarchyTokenizer {
    delimiter: char,
    replacement: char,
    skip: usize,
}

impl PathHierarchyTokenizer {
    /// Create a tokenizer splitting on `/`.
    pub fn new() -> Self {
        PathHierarchyTokenizer {
            delimiter: '/',
            replacement: '/',
            skip: 0,
        }
    }

    /// Use another delimiter. The replacement follows unless set explicitly.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        if self.replacement == self.delimiter {
            self.replacement = delimiter;
        }
        self.delimiter = delimiter;
        self
    }

    /// Write `replacement` instead of the delimiter in emitted tokens.
    pub fn with_replacement(mut self, replacement: char) -> Self {
        self.replacement = replacement;
        self
    }

    /// Skip the first `skip` path components.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }
}

impl Default for PathHierarchyTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for PathHierarchyTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        // (start, end, preceded by a delimiter)
        let mut segments: Vec<(usize, usize, bool)> = Vec::new();
        let mut start = 0;
        let mut preceded = false;
        for (i, c) in text.char_indices() {
            if c == self.delimiter {
                if i > start {
                    segments.push((start, i, preceded));
                }
                start = i + c.len_utf8();
                preceded = true;
            }
        }
        if text.len() > start {
            segments.push((start, text.len(), preceded));
        }

        let mut tokens = Vec::new();
        if self.skip < segments.len() {
            let (first_start, _, first_preceded) = segments[self.skip];
            let start_offset = if first_preceded {
                first_start - self.delimiter.len_utf8()
            } else {
                first_start
            };

            let mut path = String::new();
            for (i, &(seg_start, seg_end, seg_preceded)) in
                segments.iter().enumerate().skip(self.skip)
            {
                if seg_preceded {
                    path.push(self.replacement);
                }
                path.push_str(&text[seg_start..seg_end]);
                tokens.push(Token::with_offsets(
                    path.clone(),
                    i - self.skip,
                    start_offset,
                    seg_end,
                ));
            }
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "path_hierarchy"
    }
}
