//! Phrase query: analyzed terms at consecutive positions.

use serde::Serialize;

use crate::query::{AnalyzerRef, Boost};

/// A query matching the analyzed terms of `phrase` in order.
///
/// `slop` is the number of position moves allowed between the terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPhraseQuery {
    field: String,
    phrase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    analyzer: Option<AnalyzerRef>,
    slop: u32,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl MatchPhraseQuery {
    pub fn new<F, P>(field: F, phrase: P) -> Self
    where
        F: Into<String>,
        P: Into<String>,
    {
        MatchPhraseQuery {
            field: field.into(),
            phrase: phrase.into(),
            analyzer: None,
            slop: 0,
            boost: Boost::UNSET,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Option<AnalyzerRef>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_slop(mut self, slop: u32) -> Self {
        self.slop = slop;
        self
    }

    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boost = boost;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn analyzer(&self) -> Option<&AnalyzerRef> {
        self.analyzer.as_ref()
    }

    pub fn slop(&self) -> u32 {
        self.slop
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    pub(crate) fn description(&self) -> String {
        let slop = if self.slop > 0 {
            format!("~{}", self.slop)
        } else {
            String::new()
        };
        format!("{}:\"{}\"{slop}{}", self.field, self.phrase, self.boost.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_query() {
        let query = MatchPhraseQuery::new("content", "hello world").with_slop(2);

        assert_eq!(query.field(), "content");
        assert_eq!(query.phrase(), "hello world");
        assert_eq!(query.slop(), 2);
        assert_eq!(query.description(), "content:\"hello world\"~2");
    }
}
