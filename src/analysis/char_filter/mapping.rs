//! Mapping char filter.

use std::borrow::Cow;

use aho_corasick::{AhoCorasick, MatchKind};

use super::{CharFilter, Transformation, rewrite};
use crate::error::{QueryDslError, Result};

/// A char filter replacing every occurrence of a key with its mapped value.
///
/// Overlapping keys resolve to the longest match.
pub struct MappingCharFilter {
    ac: AhoCorasick,
    replacements: Vec<String>,
}

impl MappingCharFilter {
    /// Create a filter from `(key, value)` pairs.
    pub fn new<I, K, V>(mapping: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (keys, replacements): (Vec<String>, Vec<String>) = mapping
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();

        let ac = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&keys)
            .map_err(|e| QueryDslError::runtime(format!("[char_filter] mapping: {e}")))?;

        Ok(Self { ac, replacements })
    }

    /// Create a filter from `old => new` rules.
    ///
    /// A rule without ` => ` is a `RuntimeException`.
    pub fn from_rules<S: AsRef<str>>(rules: &[S]) -> Result<Self> {
        let mut mapping = Vec::with_capacity(rules.len());
        for rule in rules {
            let rule = rule.as_ref();
            let Some((old, new)) = rule.split_once(" => ") else {
                return Err(QueryDslError::runtime(format!(
                    "[char_filter] mapping option [mappings] Invalid Mapping Rule: [{rule}], should be [old => new]"
                )));
            };
            mapping.push((old.trim().to_string(), new.trim().to_string()));
        }
        Self::new(mapping)
    }
}

impl CharFilter for MappingCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        rewrite(
            input,
            self.ac.find_iter(input).map(|m| {
                let replacement = &self.replacements[m.pattern().as_usize()];
                (m.start(), m.end(), Cow::Borrowed(replacement.as_str()))
            }),
        )
    }

    fn name(&self) -> &'static str {
        "mapping"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_char_filter() {
        let filter = MappingCharFilter::new([("ph", "f"), ("qu", "k")]).unwrap();
        let (output, trans) = filter.filter("phone queue");

        assert_eq!(output, "fone keue");
        assert_eq!(trans.len(), 2);

        assert_eq!(trans[0], Transformation::new(0, 2, 0, 1));
        assert_eq!(trans[1], Transformation::new(6, 8, 5, 6));
    }

    #[test]
    fn test_longest_match_wins() {
        let filter = MappingCharFilter::from_rules(&[":) => happy", ":)) => very happy"]).unwrap();
        let (output, _) = filter.filter("great :))");
        assert_eq!(output, "great very happy");
    }

    #[test]
    fn test_invalid_rule() {
        let err = MappingCharFilter::from_rules(&["a -> b"]).err().unwrap();
        assert_eq!(err.kind(), crate::error::ErrorKind::RuntimeException);
        assert!(err.reason().contains("Invalid Mapping Rule: [a -> b]"));
    }
}
