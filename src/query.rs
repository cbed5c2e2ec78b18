//! Query objects produced by the DSL translator.
//!
//! A translated request is a tree of [`Query`] values. Leaf variants carry a
//! field and the text (or bounds) to look for; [`BooleanQuery`] and
//! [`BoostingQuery`] combine other queries. The tree is plain data: it is
//! handed over to the search engine for execution and can be serialized for
//! inspection.
//!
//! # Examples
//!
//! ```
//! use querydsl::query::{BooleanQuery, Query, TermQuery};
//!
//! let query: Query = BooleanQuery::builder()
//!     .must(TermQuery::new("status", "published").into())
//!     .should(TermQuery::new("tag", "rust").with_boost(2.0.into()).into())
//!     .build()
//!     .into();
//!
//! assert_eq!(query.description(), "(+status:published tag:rust^2)");
//! ```

pub mod boolean;
pub mod fuzzy;
pub mod match_query;
pub mod multi_term;
pub mod parser;
pub mod phrase;
pub mod range;
pub mod term;

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::Token;
use crate::error::Result;

pub use boolean::{BooleanQuery, BooleanQueryBuilder, BoostingQuery, Occur};
pub use fuzzy::FuzzyQuery;
pub use match_query::{MatchQuery, Operator};
pub use multi_term::{PrefixQuery, RegexpQuery, WildcardQuery};
pub use phrase::MatchPhraseQuery;
pub use range::{DateRangeQuery, NumericRangeQuery};
pub use term::{ExistsQuery, TermQuery};

/// Optional boost weight of a query.
///
/// An unset boost means "use the engine default". Negative weights coming
/// from a request are read as unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Boost(Option<f64>);

impl Boost {
    /// The engine default.
    pub const UNSET: Boost = Boost(None);

    /// A boost of `value`, unset when `value` is negative.
    pub fn new(value: f64) -> Self {
        if value >= 0.0 {
            Boost(Some(value))
        } else {
            Boost::UNSET
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_none()
    }

    /// The weight, or `default` when unset.
    pub fn or(self, default: f64) -> f64 {
        self.0.unwrap_or(default)
    }

    /// `^N` suffix for query descriptions.
    fn suffix(&self) -> String {
        match self.0 {
            Some(boost) if boost != 1.0 => format!("^{boost}"),
            _ => String::new(),
        }
    }
}

impl From<f64> for Boost {
    fn from(value: f64) -> Self {
        Boost::new(value)
    }
}

/// A shared analyzer attached to a query.
///
/// Two references are equal when they name the same analyzer; the reference
/// serializes as that name.
#[derive(Clone)]
pub struct AnalyzerRef(Arc<dyn Analyzer>);

impl AnalyzerRef {
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        AnalyzerRef(analyzer)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.0
    }

    /// Run `text` through the analyzer.
    pub fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.0.analyze(text)?.collect())
    }
}

impl From<Arc<dyn Analyzer>> for AnalyzerRef {
    fn from(analyzer: Arc<dyn Analyzer>) -> Self {
        AnalyzerRef::new(analyzer)
    }
}

impl fmt::Debug for AnalyzerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnalyzerRef").field(&self.name()).finish()
    }
}

impl PartialEq for AnalyzerRef {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Serialize for AnalyzerRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchAllQuery {
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl MatchAllQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boost = boost;
        self
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }
}

/// One node of a translated query tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    MatchAll(MatchAllQuery),
    MatchNone,
    Term(TermQuery),
    Match(MatchQuery),
    MatchPhrase(MatchPhraseQuery),
    NumericRange(NumericRangeQuery),
    DateRange(DateRangeQuery),
    Regexp(RegexpQuery),
    Prefix(PrefixQuery),
    Fuzzy(FuzzyQuery),
    Wildcard(WildcardQuery),
    Exists(ExistsQuery),
    Bool(BooleanQuery),
    Boosting(BoostingQuery),
}

impl Query {
    /// A match-all query with the default boost.
    pub fn match_all() -> Self {
        Query::MatchAll(MatchAllQuery::new())
    }

    /// The boost of this node. `MatchNone`, `Exists` and `Boosting` carry none.
    pub fn boost(&self) -> Boost {
        match self {
            Query::MatchAll(q) => q.boost(),
            Query::Term(q) => q.boost(),
            Query::Match(q) => q.boost(),
            Query::MatchPhrase(q) => q.boost(),
            Query::NumericRange(q) => q.boost(),
            Query::DateRange(q) => q.boost(),
            Query::Regexp(q) => q.boost(),
            Query::Prefix(q) => q.boost(),
            Query::Fuzzy(q) => q.boost(),
            Query::Wildcard(q) => q.boost(),
            Query::Bool(q) => q.boost(),
            Query::MatchNone | Query::Exists(_) | Query::Boosting(_) => Boost::UNSET,
        }
    }

    /// Replace the boost of this node, when it carries one.
    pub fn with_boost(self, boost: Boost) -> Self {
        match self {
            Query::MatchAll(q) => Query::MatchAll(q.with_boost(boost)),
            Query::Term(q) => Query::Term(q.with_boost(boost)),
            Query::Match(q) => Query::Match(q.with_boost(boost)),
            Query::MatchPhrase(q) => Query::MatchPhrase(q.with_boost(boost)),
            Query::NumericRange(q) => Query::NumericRange(q.with_boost(boost)),
            Query::DateRange(q) => Query::DateRange(q.with_boost(boost)),
            Query::Regexp(q) => Query::Regexp(q.with_boost(boost)),
            Query::Prefix(q) => Query::Prefix(q.with_boost(boost)),
            Query::Fuzzy(q) => Query::Fuzzy(q.with_boost(boost)),
            Query::Wildcard(q) => Query::Wildcard(q.with_boost(boost)),
            Query::Bool(q) => Query::Bool(q.with_boost(boost)),
            other => other,
        }
    }

    /// The field a leaf query targets.
    pub fn field(&self) -> Option<&str> {
        match self {
            Query::Term(q) => Some(q.field()),
            Query::Match(q) => Some(q.field()),
            Query::MatchPhrase(q) => Some(q.field()),
            Query::NumericRange(q) => Some(q.field()),
            Query::DateRange(q) => Some(q.field()),
            Query::Regexp(q) => Some(q.field()),
            Query::Prefix(q) => Some(q.field()),
            Query::Fuzzy(q) => Some(q.field()),
            Query::Wildcard(q) => Some(q.field()),
            Query::Exists(q) => Some(q.field()),
            Query::MatchAll(_) | Query::MatchNone | Query::Bool(_) | Query::Boosting(_) => None,
        }
    }

    /// The boolean query, if this node is one.
    pub fn as_bool(&self) -> Option<&BooleanQuery> {
        match self {
            Query::Bool(q) => Some(q),
            _ => None,
        }
    }

    /// A Lucene-like rendering of the tree.
    pub fn description(&self) -> String {
        match self {
            Query::MatchAll(q) => format!("*:*{}", q.boost().suffix()),
            Query::MatchNone => "-*:*".to_string(),
            Query::Term(q) => q.description(),
            Query::Match(q) => q.description(),
            Query::MatchPhrase(q) => q.description(),
            Query::NumericRange(q) => q.description(),
            Query::DateRange(q) => q.description(),
            Query::Regexp(q) => q.description(),
            Query::Prefix(q) => q.description(),
            Query::Fuzzy(q) => q.description(),
            Query::Wildcard(q) => q.description(),
            Query::Exists(q) => q.description(),
            Query::Bool(q) => q.description(),
            Query::Boosting(q) => q.description(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

macro_rules! impl_from_query {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Query {
                fn from(query: $ty) -> Self {
                    Query::$variant(query)
                }
            }
        )*
    };
}

impl_from_query!(
    MatchAll(MatchAllQuery),
    Term(TermQuery),
    Match(MatchQuery),
    MatchPhrase(MatchPhraseQuery),
    NumericRange(NumericRangeQuery),
    DateRange(DateRangeQuery),
    Regexp(RegexpQuery),
    Prefix(PrefixQuery),
    Fuzzy(FuzzyQuery),
    Wildcard(WildcardQuery),
    Exists(ExistsQuery),
    Bool(BooleanQuery),
    Boosting(BoostingQuery),
);
