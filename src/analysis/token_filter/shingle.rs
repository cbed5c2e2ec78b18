//! Shingle filter implementation.

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::{QueryDslError, Result};

/// A filter that glues adjacent tokens into shingles (word n-grams).
///
/// Positions left empty by earlier filters (removed stop words) are filled
/// with `filler_token`.
///
/// # Examples
///
/// ```
/// use querydsl::analysis::token_filter::Filter;
/// use querydsl::analysis::token_filter::shingle::ShingleFilter;
/// use querydsl::analysis::token::Token;
///
/// let tokens = vec![Token::new("quick", 0), Token::new("fox", 1)];
/// let texts: Vec<String> = ShingleFilter::new()
///     .filter(Box::new(tokens.into_iter()))
///     .unwrap()
///     .map(|t| t.text)
///     .collect();
/// assert_eq!(texts, vec!["quick", "quick fox", "fox"]);
/// ```
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    min_shingle_size: usize,
    max_shingle_size: usize,
    output_unigrams: bool,
    token_separator: String,
    filler_token: String,
}

impl ShingleFilter {
    pub fn new() -> Self {
        ShingleFilter {
            min_shingle_size: 2,
            max_shingle_size: 2,
            output_unigrams: true,
            token_separator: " ".to_string(),
            filler_token: "_".to_string(),
        }
    }

    pub fn with_sizes(mut self, min: usize, max: usize) -> Result<Self> {
        if min < 2 || max < min {
            return Err(QueryDslError::illegal_argument(format!(
                "[shingle] invalid shingle sizes min [{min}] max [{max}]"
            )));
        }
        self.min_shingle_size = min;
        self.max_shingle_size = max;
        Ok(self)
    }

    pub fn with_output_unigrams(mut self, output_unigrams: bool) -> Self {
        self.output_unigrams = output_unigrams;
        self
    }

    pub fn with_token_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.token_separator = separator.into();
        self
    }

    pub fn with_filler_token<S: Into<String>>(mut self, filler: S) -> Self {
        self.filler_token = filler.into();
        self
    }
}

impl Default for ShingleFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let tokens: Vec<Token> = tokens.collect();
        let Some(first) = tokens.iter().map(|t| t.position).min() else {
            return Ok(Box::new(std::iter::empty()));
        };
        let last = tokens.iter().map(|t| t.position).max().unwrap_or(first);

        // One slot per position, empty where the stream has a gap.
        let mut slots: Vec<Option<&Token>> = vec![None; last - first + 1];
        for token in &tokens {
            let slot = &mut slots[token.position - first];
            if slot.is_none() {
                *slot = Some(token);
            }
        }

        let mut result = Vec::new();
        for token in &tokens {
            if self.output_unigrams {
                result.push(token.clone());
            }
            let start = token.position - first;
            if !slots[start].is_some_and(|t| std::ptr::eq(t, token)) {
                continue;
            }
            for size in self.min_shingle_size..=self.max_shingle_size {
                let end = start + size;
                if end > slots.len() {
                    break;
                }
                let window = &slots[start..end];
                let Some(tail) = window.iter().rev().flatten().next() else {
                    continue;
                };
                let text = window
                    .iter()
                    .map(|slot| slot.map_or(self.filler_token.as_str(), |t| t.text.as_str()))
                    .collect::<Vec<_>>()
                    .join(&self.token_separator);
                result.push(
                    Token::with_offsets(text, token.position, token.start_offset, tail.end_offset)
                        .with_token_type(TokenType::Shingle),
                );
            }
        }

        Ok(Box::new(result.into_iter()))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigram_shingles_without_unigrams() {
        let tokens = vec![
            Token::with_offsets("a", 0, 0, 1),
            Token::with_offsets("b", 1, 2, 3),
            Token::with_offsets("c", 2, 4, 5),
        ];
        let result: Vec<Token> = ShingleFilter::new()
            .with_sizes(2, 3)
            .unwrap()
            .with_output_unigrams(false)
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();
        let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();

        assert_eq!(texts, vec!["a b", "a b c", "b c"]);
        assert_eq!(result[1].end_offset, 5);
        assert_eq!(result[1].token_type, TokenType::Shingle);
    }

    #[test]
    fn test_filler_for_gaps() {
        let tokens = vec![Token::new("quick", 0), Token::new("fox", 2)];
        let result: Vec<String> = ShingleFilter::new()
            .with_sizes(2, 3)
            .unwrap()
            .with_output_unigrams(false)
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["quick _", "quick _ fox"]);
    }

    #[test]
    fn test_invalid_sizes() {
        assert!(ShingleFilter::new().with_sizes(1, 2).is_err());
        assert!(ShingleFilter::new().with_sizes(3, 2).is_err());
    }
}
