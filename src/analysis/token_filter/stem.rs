//! Snowball stemming filter implementation.

use std::fmt;
use std::str::FromStr;

use rust_stemmers::{Algorithm, Stemmer};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::{QueryDslError, Result};

/// Languages with a snowball stemmer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StemLanguage {
    Arabic,
    Danish,
    Dutch,
    English,
    Finnish,
    French,
    German,
    Greek,
    Hungarian,
    Italian,
    Norwegian,
    Portuguese,
    Romanian,
    Russian,
    Spanish,
    Swedish,
    Tamil,
    Turkish,
}

impl StemLanguage {
    fn algorithm(self) -> Algorithm {
        match self {
            StemLanguage::Arabic => Algorithm::Arabic,
            StemLanguage::Danish => Algorithm::Danish,
            StemLanguage::Dutch => Algorithm::Dutch,
            StemLanguage::English => Algorithm::English,
            StemLanguage::Finnish => Algorithm::Finnish,
            StemLanguage::French => Algorithm::French,
            StemLanguage::German => Algorithm::German,
            StemLanguage::Greek => Algorithm::Greek,
            StemLanguage::Hungarian => Algorithm::Hungarian,
            StemLanguage::Italian => Algorithm::Italian,
            StemLanguage::Norwegian => Algorithm::Norwegian,
            StemLanguage::Portuguese => Algorithm::Portuguese,
            StemLanguage::Romanian => Algorithm::Romanian,
            StemLanguage::Russian => Algorithm::Russian,
            StemLanguage::Spanish => Algorithm::Spanish,
            StemLanguage::Swedish => Algorithm::Swedish,
            StemLanguage::Tamil => Algorithm::Tamil,
            StemLanguage::Turkish => Algorithm::Turkish,
        }
    }
}

impl FromStr for StemLanguage {
    type Err = QueryDslError;

    fn from_str(s: &str) -> Result<Self> {
        let language = match s.to_ascii_lowercase().as_str() {
            "arabic" | "ar" => StemLanguage::Arabic,
            "danish" | "da" => StemLanguage::Danish,
            "dutch" | "nl" => StemLanguage::Dutch,
            "english" | "en" | "porter" | "porter2" => StemLanguage::English,
            "finnish" | "fi" => StemLanguage::Finnish,
            "french" | "fr" => StemLanguage::French,
            "german" | "de" => StemLanguage::German,
            "greek" | "el" => StemLanguage::Greek,
            "hungarian" | "hu" => StemLanguage::Hungarian,
            "italian" | "it" => StemLanguage::Italian,
            "norwegian" | "no" => StemLanguage::Norwegian,
            "portuguese" | "pt" => StemLanguage::Portuguese,
            "romanian" | "ro" => StemLanguage::Romanian,
            "russian" | "ru" => StemLanguage::Russian,
            "spanish" | "es" => StemLanguage::Spanish,
            "swedish" | "sv" => StemLanguage::Swedish,
            "tamil" | "ta" => StemLanguage::Tamil,
            "turkish" | "tr" => StemLanguage::Turkish,
            other => {
                return Err(QueryDslError::x_content_parse(format!(
                    "[stemmer] unsupported language [{other}]"
                )));
            }
        };
        Ok(language)
    }
}

/// A filter that reduces tokens to their stem. Keyword tokens are left alone.
///
/// # Examples
///
/// ```
/// use querydsl::analysis::token_filter::Filter;
/// use querydsl::analysis::token_filter::stem::{StemFilter, StemLanguage};
/// use querydsl::analysis::token::Token;
///
/// let filter = StemFilter::new(StemLanguage::English);
/// let tokens = vec![Token::new("running", 0)];
/// let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
/// assert_eq!(result[0].text, "run");
/// ```
pub struct StemFilter {
    language: StemLanguage,
    stemmer: Stemmer,
}

impl StemFilter {
    pub fn new(language: StemLanguage) -> Self {
        StemFilter {
            language,
            stemmer: Stemmer::create(language.algorithm()),
        }
    }

    pub fn language(&self) -> StemLanguage {
        self.language
    }
}

impl fmt::Debug for StemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StemFilter")
            .field("language", &self.language)
            .finish()
    }
}

impl Filter for StemFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(map_text(tokens, true, |text| {
            self.stemmer.stem(text).into_owned()
        }))
    }

    fn name(&self) -> &'static str {
        "stemmer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_english_stemming() {
        let filter = StemFilter::new(StemLanguage::English);
        let tokens = vec![
            Token::new("running", 0),
            Token::new("cats", 1),
            Token::new("jumping", 2).as_keyword(),
        ];
        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["run", "cat", "jumping"]);
    }

    #[test]
    fn test_language_names() {
        assert_eq!("porter".parse::<StemLanguage>().unwrap(), StemLanguage::English);
        assert_eq!("German".parse::<StemLanguage>().unwrap(), StemLanguage::German);
        assert!("klingon".parse::<StemLanguage>().is_err());
    }
}
