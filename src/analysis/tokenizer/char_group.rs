//! Char group tokenizer implementation.

use super::{Tokenizer, split_runs};

use crate::analysis::token::TokenStream;
use crate::error::{QueryDslError, Result};

/// A class of characters, as named in `tokenize_on_chars` and `token_chars`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Letter,
    Digit,
    Punctuation,
    Symbol,
    /// A single literal character.
    Char(char),
}

impl CharClass {
    /// Parse a class name, or a single (possibly escaped) character.
    pub fn parse(spec: &str) -> Result<Self> {
        let class = match spec {
            "whitespace" => CharClass::Whitespace,
            "letter" => CharClass::Letter,
            "digit" => CharClass::Digit,
            "punctuation" => CharClass::Punctuation,
            "symbol" => CharClass::Symbol,
            "\\n" => CharClass::Char('\n'),
            "\\t" => CharClass::Char('\t'),
            "\\r" => CharClass::Char('\r'),
            _ => {
                let mut chars = spec.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => CharClass::Char(c),
                    _ => {
                        return Err(QueryDslError::x_content_parse(format!(
                            "[tokenizer] unknown character class [{spec}]"
                        )));
                    }
                }
            }
        };
        Ok(class)
    }

    /// Check whether `c` belongs to this class.
    pub fn matches(&self, c: char) -> bool {
        match self {
            CharClass::Whitespace => c.is_whitespace(),
            CharClass::Letter => c.is_alphabetic(),
            CharClass::Digit => c.is_numeric(),
            CharClass::Punctuation => c.is_ascii_punctuation() || is_general_punctuation(c),
            CharClass::Symbol => !c.is_alphanumeric() && !c.is_whitespace() && !c.is_ascii_punctuation(),
            CharClass::Char(expected) => c == *expected,
        }
    }
}

fn is_general_punctuation(c: char) -> bool {
    matches!(c as u32, 0x2010..=0x2027 | 0x2030..=0x205E | 0x3000..=0x303F)
}

/// A tokenizer that splits text whenever it meets a character of one of
/// the configured classes.
#[derive(Clone, Debug)]
pub struct CharGroupTokenizer {
    split_on: Vec<CharClass>,
}

impl CharGroupTokenizer {
    /// Create a tokenizer splitting on the given classes.
    pub fn new(split_on: Vec<CharClass>) -> Self {
        CharGroupTokenizer { split_on }
    }

    /// Create a tokenizer from `tokenize_on_chars` entries.
    pub fn from_specs<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        let split_on = specs
            .iter()
            .map(|s| CharClass::parse(s.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(split_on))
    }
}

impl Tokenizer for CharGroupTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens = split_runs(text, |c| !self.split_on.iter().any(|class| class.matches(c)));
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "char_group"
    }
}
