//! Elision filter implementation.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::Result;

const DEFAULT_FRENCH_ARTICLES: &[&str] = &[
    "l", "m", "t", "qu", "n", "s", "j", "d", "c", "jusqu", "quoiqu", "lorsqu", "puisqu",
];

static DEFAULT_ARTICLES_SET: LazyLock<Arc<HashSet<String>>> = LazyLock::new(|| {
    Arc::new(
        DEFAULT_FRENCH_ARTICLES
            .iter()
            .map(|&s| s.to_string())
            .collect(),
    )
});

/// A filter that removes elided articles (`l'avion` becomes `avion`).
#[derive(Clone, Debug)]
pub struct ElisionFilter {
    articles: Arc<HashSet<String>>,
}

impl ElisionFilter {
    /// Create an elision filter with the French articles.
    pub fn new() -> Self {
        ElisionFilter {
            articles: Arc::clone(&DEFAULT_ARTICLES_SET),
        }
    }

    /// Create an elision filter with custom articles.
    pub fn with_articles<I, S>(articles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ElisionFilter {
            articles: Arc::new(
                articles
                    .into_iter()
                    .map(|a| a.as_ref().to_lowercase())
                    .collect(),
            ),
        }
    }

    fn strip(&self, text: &str) -> String {
        if let Some(i) = text.find(['\'', '\u{2019}']) {
            let apostrophe_len = text[i..].chars().next().map_or(1, char::len_utf8);
            if self.articles.contains(&text[..i].to_lowercase()) {
                return text[i + apostrophe_len..].to_string();
            }
        }
        text.to_string()
    }
}

impl Default for ElisionFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for ElisionFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(map_text(tokens, false, |text| self.strip(text)))
    }

    fn name(&self) -> &'static str {
        "elision"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_elision_filter() {
        let tokens = vec![
            Token::new("l'avion", 0),
            Token::new("Jusqu\u{2019}ici", 1),
            Token::new("aujourd'hui", 2),
        ];
        let result: Vec<String> = ElisionFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["avion", "ici", "aujourd'hui"]);
    }

    #[test]
    fn test_custom_articles() {
        let filter = ElisionFilter::with_articles(["dell"]);
        let tokens = vec![Token::new("dell'arte", 0), Token::new("l'arte", 1)];
        let result: Vec<String> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();

        assert_eq!(result, vec!["arte", "l'arte"]);
    }
}
