//! Unicode normalization filter implementation.

use crate::analysis::char_filter::unicode_normalize::NormalizationForm;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{Filter, map_text};
use crate::error::Result;

/// A filter normalizing every token into a Unicode normalization form.
#[derive(Clone, Debug)]
pub struct UnicodeNormFilter {
    form: NormalizationForm,
}

impl UnicodeNormFilter {
    pub fn new(form: NormalizationForm) -> Self {
        UnicodeNormFilter { form }
    }
}

impl Default for UnicodeNormFilter {
    fn default() -> Self {
        Self::new(NormalizationForm::NFKC)
    }
}

impl Filter for UnicodeNormFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let form = self.form;
        Ok(map_text(tokens, false, move |text| form.apply(text)))
    }

    fn name(&self) -> &'static str {
        "unicodenorm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_nfkc_filter() {
        let tokens = vec![Token::new("ｶﾀｶﾅ", 0)];
        let result: Vec<Token> = UnicodeNormFilter::default()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();
        assert_eq!(result[0].text, "カタカナ");
    }
}
