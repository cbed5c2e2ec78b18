//! ASCII folding char filter.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::{CharFilter, Transformation, rewrite};

/// Fold a single character to its ASCII equivalent, when one exists.
fn fold_char(c: char) -> Option<Cow<'static, str>> {
    if c.is_ascii() {
        return None;
    }
    let special = match c {
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'đ' => "d",
        'Đ' => "D",
        'ł' => "l",
        'Ł' => "L",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        '‘' | '’' | '‚' | '′' => "'",
        '“' | '”' | '„' | '″' => "\"",
        '–' | '—' => "-",
        '\u{a0}' => " ",
        _ => "",
    };
    if !special.is_empty() {
        return Some(Cow::Borrowed(special));
    }

    let folded: String = std::iter::once(c)
        .nfd()
        .filter(|d| !is_combining_mark(*d))
        .collect();
    if folded.is_ascii() && !folded.is_empty() {
        Some(Cow::Owned(folded))
    } else {
        None
    }
}

/// Fold every foldable character of `text` to ASCII.
///
/// ```
/// use querydsl::analysis::char_filter::ascii_folding::fold;
///
/// assert_eq!(fold("Crème Brûlée"), "Creme Brulee");
/// assert_eq!(fold("straße"), "strasse");
/// ```
pub fn fold(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match fold_char(c) {
            Some(folded) => out.push_str(&folded),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// A char filter that folds accented and special Latin characters to ASCII.
#[derive(Clone, Debug, Default)]
pub struct AsciiFoldingCharFilter;

impl AsciiFoldingCharFilter {
    /// Create a new ASCII folding char filter.
    pub fn new() -> Self {
        AsciiFoldingCharFilter
    }
}

impl CharFilter for AsciiFoldingCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        rewrite(
            input,
            input
                .char_indices()
                .filter_map(|(i, c)| fold_char(c).map(|f| (i, i + c.len_utf8(), f))),
        )
    }

    fn name(&self) -> &'static str {
        "ascii_folding"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_folding() {
        let (output, trans) = AsciiFoldingCharFilter::new().filter("naïve café");
        assert_eq!(output, "naive cafe");
        assert_eq!(trans.len(), 2);
        assert_eq!(trans[0], Transformation::new(2, 4, 2, 3));
    }

    #[test]
    fn test_unfoldable_characters_are_kept() {
        assert_eq!(fold("東京"), "東京");
        assert_eq!(fold("Øresund"), "Oresund");
    }
}
