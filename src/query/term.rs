//! Exact term and field-existence queries.

use serde::Serialize;

use crate::query::Boost;

/// A query that matches documents containing a specific term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermQuery {
    /// The field to search in.
    field: String,
    /// The term to search for.
    term: String,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl TermQuery {
    /// Create a new term query.
    ///
    /// The term is not analyzed: it should already be in the form the
    /// field's terms are indexed with.
    pub fn new<F, T>(field: F, term: T) -> Self
    where
        F: Into<String>,
        T: Into<String>,
    {
        TermQuery {
            field: field.into(),
            term: term.into(),
            boost: Boost::UNSET,
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the term.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boost = boost;
        self
    }

    pub(crate) fn description(&self) -> String {
        format!("{}:{}{}", self.field, self.term, self.boost.suffix())
    }
}

/// Matches documents with any value in `field`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExistsQuery {
    field: String,
}

impl ExistsQuery {
    pub fn new<F: Into<String>>(field: F) -> Self {
        ExistsQuery {
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub(crate) fn description(&self) -> String {
        format!("{}:*", self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_query_creation() {
        let query = TermQuery::new("title", "hello");

        assert_eq!(query.field(), "title");
        assert_eq!(query.term(), "hello");
        assert!(query.boost().is_unset());
    }

    #[test]
    fn test_term_query_description() {
        let query = TermQuery::new("title", "hello");
        assert_eq!(query.description(), "title:hello");

        let query = query.with_boost(Boost::new(1.5));
        assert_eq!(query.description(), "title:hello^1.5");
    }

    #[test]
    fn test_exists_query() {
        let query = ExistsQuery::new("author");
        assert_eq!(query.field(), "author");
        assert_eq!(query.description(), "author:*");
    }
}
