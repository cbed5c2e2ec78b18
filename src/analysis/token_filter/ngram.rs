//! N-gram filter implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::ngram::{push_grams, validate_gram_sizes};
use crate::error::Result;

/// A filter that cuts every token into character n-grams (or edge n-grams).
///
/// Grams keep the position and offsets of the token they come from. Edge
/// grams are anchored at the front of the token unless `from_back` is set.
#[derive(Clone, Debug)]
pub struct NgramFilter {
    min_gram: usize,
    max_gram: usize,
    edge: bool,
    back: bool,
}

impl NgramFilter {
    pub fn new(min_gram: usize, max_gram: usize) -> Result<Self> {
        validate_gram_sizes(min_gram, max_gram)?;
        Ok(NgramFilter {
            min_gram,
            max_gram,
            edge: false,
            back: false,
        })
    }

    pub fn edge(min_gram: usize, max_gram: usize) -> Result<Self> {
        Ok(NgramFilter {
            edge: true,
            ..Self::new(min_gram, max_gram)?
        })
    }

    /// Anchor edge grams at the end of the token.
    pub fn from_back(mut self) -> Self {
        self.back = true;
        self
    }

    fn back_grams(&self, token: &Token, out: &mut Vec<Token>) {
        let chars: Vec<char> = token.text.chars().collect();
        for size in self.min_gram..=self.max_gram.min(chars.len()) {
            let gram: String = chars[chars.len() - size..].iter().collect();
            out.push(token.with_text(gram));
        }
    }
}

impl Filter for NgramFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mut result = Vec::new();
        for token in tokens {
            if self.edge && self.back {
                self.back_grams(&token, &mut result);
                continue;
            }
            let chars: Vec<(usize, char)> = token.text.char_indices().collect();
            let mut grams = Vec::new();
            push_grams(
                &chars,
                token.text.len(),
                self.min_gram,
                self.max_gram,
                self.edge,
                &mut grams,
            );
            result.extend(grams.into_iter().map(|gram| Token {
                position: token.position,
                start_offset: token.start_offset,
                end_offset: token.end_offset,
                ..gram
            }));
        }
        Ok(Box::new(result.into_iter()))
    }

    fn name(&self) -> &'static str {
        if self.edge { "edge_ngram" } else { "ngram" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ngram_filter() {
        let tokens = vec![Token::with_offsets("abc", 4, 10, 13)];
        let result: Vec<Token> = NgramFilter::new(1, 2)
            .unwrap()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();
        let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["a", "ab", "b", "bc", "c"]);
        assert!(result.iter().all(|t| t.position == 4 && t.start_offset == 10));
    }

    #[test]
    fn test_edge_ngram_filter() {
        let tokens = vec![Token::new("quick", 0), Token::new("a", 1)];
        let result: Vec<String> = NgramFilter::edge(2, 3)
            .unwrap()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["qu", "qui"]);
    }

    #[test]
    fn test_edge_ngram_from_back() {
        let tokens = vec![Token::new("quick", 0)];
        let result: Vec<String> = NgramFilter::edge(1, 3)
            .unwrap()
            .from_back()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["k", "ck", "ick"]);
    }
}
