//! Unicode normalization char filter.

use std::str::FromStr;

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use super::{CharFilter, Transformation, rewrite};
use crate::error::{QueryDslError, Result};

/// Supported Unicode normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationForm {
    NFC,
    NFD,
    NFKC,
    NFKD,
}

impl NormalizationForm {
    /// Normalize `text` into this form.
    pub fn apply(&self, text: &str) -> String {
        match self {
            NormalizationForm::NFC => text.nfc().collect(),
            NormalizationForm::NFD => text.nfd().collect(),
            NormalizationForm::NFKC => text.nfkc().collect(),
            NormalizationForm::NFKD => text.nfkd().collect(),
        }
    }
}

impl FromStr for NormalizationForm {
    type Err = QueryDslError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "nfc" => Ok(NormalizationForm::NFC),
            "nfd" => Ok(NormalizationForm::NFD),
            "nfkc" => Ok(NormalizationForm::NFKC),
            "nfkd" => Ok(NormalizationForm::NFKD),
            other => Err(QueryDslError::x_content_parse(format!(
                "[unicodenorm] unknown form [{other}], expected one of [nfc, nfd, nfkc, nfkd]"
            ))),
        }
    }
}

/// A char filter that performs Unicode normalization.
///
/// Normalization is applied per grapheme cluster, which keeps offset
/// tracking exact at cluster granularity.
pub struct UnicodeNormalizationCharFilter {
    form: NormalizationForm,
}

impl UnicodeNormalizationCharFilter {
    pub fn new(form: NormalizationForm) -> Self {
        Self { form }
    }
}

impl CharFilter for UnicodeNormalizationCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        rewrite(
            input,
            input.grapheme_indices(true).filter_map(|(i, g)| {
                let normalized = self.form.apply(g);
                (normalized != g).then(|| (i, i + g.len(), normalized.into()))
            }),
        )
    }

    fn name(&self) -> &'static str {
        "unicode_normalization"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfc_normalization() {
        let filter = UnicodeNormalizationCharFilter::new(NormalizationForm::NFC);
        let (output, trans) = filter.filter("Am\u{0065}\u{0301}lie");
        assert_eq!(output, "Am\u{00e9}lie");
        assert_eq!(trans, vec![Transformation::new(2, 5, 2, 4)]);
    }

    #[test]
    fn test_nfkc_normalization() {
        let filter = UnicodeNormalizationCharFilter::new(NormalizationForm::NFKC);
        let (output, _) = filter.filter("\u{ff21}BC");
        assert_eq!(output, "ABC");
    }

    #[test]
    fn test_form_from_str() {
        assert_eq!("NFKD".parse::<NormalizationForm>().unwrap(), NormalizationForm::NFKD);
        assert!("nfx".parse::<NormalizationForm>().is_err());
    }
}
