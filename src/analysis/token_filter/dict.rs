//! Dictionary compound word filter implementation.

use std::collections::HashSet;
use std::sync::Arc;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::{QueryDslError, Result};

const DEFAULT_MIN_SUBWORD_SIZE: usize = 2;
const DEFAULT_MAX_SUBWORD_SIZE: usize = 15;

/// A filter that decomposes compound words using a dictionary.
///
/// The original token is kept and every dictionary word found inside it is
/// emitted at the same position, so `Donaudampfschiff` with a dictionary of
/// `donau` and `dampf` yields all three terms.
#[derive(Clone, Debug)]
pub struct DictionaryCompoundFilter {
    words: Arc<HashSet<String>>,
    min_subword_size: usize,
    max_subword_size: usize,
}

impl DictionaryCompoundFilter {
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: HashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        if words.is_empty() {
            return Err(QueryDslError::parsing(
                "[dict_compound] option [words] should be a non-empty list",
            ));
        }
        Ok(DictionaryCompoundFilter {
            words: Arc::new(words),
            min_subword_size: DEFAULT_MIN_SUBWORD_SIZE,
            max_subword_size: DEFAULT_MAX_SUBWORD_SIZE,
        })
    }

    /// Restrict the size (in characters) of emitted subwords.
    pub fn with_subword_size(mut self, min: usize, max: usize) -> Self {
        self.min_subword_size = min.max(1);
        self.max_subword_size = max.max(self.min_subword_size);
        self
    }

    fn decompose(&self, token: &Token, out: &mut Vec<Token>) {
        let lowered = token.text.to_lowercase();
        let chars: Vec<(usize, char)> = lowered.char_indices().collect();

        for start in 0..chars.len() {
            for size in self.min_subword_size..=self.max_subword_size {
                let end = start + size;
                if end > chars.len() {
                    break;
                }
                let from = chars[start].0;
                let to = chars.get(end).map(|&(o, _)| o).unwrap_or(lowered.len());
                let candidate = &lowered[from..to];
                if candidate != lowered && self.words.contains(candidate) {
                    out.push(token.with_text(candidate));
                }
            }
        }
    }
}

impl Filter for DictionaryCompoundFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut result = Vec::new();
        for token in tokens {
            let mut subwords = Vec::new();
            self.decompose(&token, &mut subwords);
            result.push(token);
            result.extend(subwords);
        }
        Ok(Box::new(result.into_iter()))
    }

    fn name(&self) -> &'static str {
        "dict_compound"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_compound() {
        let filter = DictionaryCompoundFilter::new(["donau", "dampf", "schiff"]).unwrap();
        let tokens = vec![Token::new("Donaudampfschiff", 3)];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
        let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["Donaudampfschiff", "donau", "dampf", "schiff"]);
        assert!(result.iter().all(|t| t.position == 3));
    }

    #[test]
    fn test_empty_dictionary() {
        let words: Vec<&str> = Vec::new();
        assert!(DictionaryCompoundFilter::new(words).is_err());
    }
}
