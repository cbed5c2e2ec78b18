//! HTML strip char filter.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{CharFilter, Transformation, rewrite};

static MARKUP: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<(?P<close>/)?(?P<tag>[a-z][a-z0-9]*)\b[^>]*>|&(?P<entity>#[0-9]+|#x[0-9a-f]+|[a-z]+);",
    )
    .ok()
});

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "nav", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

/// A char filter that removes HTML markup and decodes character entities.
///
/// Block-level tags are replaced with a newline so the words around them
/// do not run together.
#[derive(Clone, Debug, Default)]
pub struct HtmlStripCharFilter;

impl HtmlStripCharFilter {
    /// Create a new HTML strip char filter.
    pub fn new() -> Self {
        HtmlStripCharFilter
    }

    fn replacement(caps: &Captures<'_>) -> Cow<'static, str> {
        if let Some(entity) = caps.name("entity") {
            return decode_entity(entity.as_str())
                .map(|c| Cow::Owned(c.to_string()))
                .unwrap_or_else(|| Cow::Owned(caps[0].to_string()));
        }
        match caps.name("tag") {
            Some(tag) if BLOCK_TAGS.contains(&tag.as_str().to_ascii_lowercase().as_str()) => {
                Cow::Borrowed("\n")
            }
            _ => Cow::Borrowed(""),
        }
    }
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    let c = match entity.to_ascii_lowercase().as_str() {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        _ => return None,
    };
    Some(c)
}

impl CharFilter for HtmlStripCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let Some(markup) = MARKUP.as_ref() else {
            return (input.to_string(), Vec::new());
        };
        rewrite(
            input,
            markup.captures_iter(input).filter_map(|caps| {
                let m = caps.get(0)?;
                Some((m.start(), m.end(), Self::replacement(&caps)))
            }),
        )
    }

    fn name(&self) -> &'static str {
        "html_strip"
    }
}
