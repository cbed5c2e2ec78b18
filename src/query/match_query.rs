//! Analyzed full-text match query.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::query::{AnalyzerRef, Boost};

/// How the terms of an analyzed query text are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Any term may match.
    #[default]
    Or,
    /// Every term must match.
    And,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Or => "or",
            Operator::And => "and",
        }
    }
}

impl FromStr for Operator {
    type Err = String;

    /// Case-insensitive `or` / `and`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "or" => Ok(Operator::Or),
            "and" => Ok(Operator::And),
            _ => Err(s.to_uppercase()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A query whose text is analyzed before matching.
///
/// The engine analyzes `query` with `analyzer` (its default analyzer when
/// none is attached) and combines the resulting terms with `operator`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchQuery {
    field: String,
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    analyzer: Option<AnalyzerRef>,
    operator: Operator,
    /// Maximum edit distance per term, 0 for exact matching.
    fuzziness: u32,
    prefix_length: u32,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl MatchQuery {
    pub fn new<F, Q>(field: F, query: Q) -> Self
    where
        F: Into<String>,
        Q: Into<String>,
    {
        MatchQuery {
            field: field.into(),
            query: query.into(),
            analyzer: None,
            operator: Operator::Or,
            fuzziness: 0,
            prefix_length: 0,
            boost: Boost::UNSET,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Option<AnalyzerRef>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_fuzziness(mut self, fuzziness: u32) -> Self {
        self.fuzziness = fuzziness;
        self
    }

    pub fn with_prefix_length(mut self, prefix_length: u32) -> Self {
        self.prefix_length = prefix_length;
        self
    }

    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boost = boost;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn analyzer(&self) -> Option<&AnalyzerRef> {
        self.analyzer.as_ref()
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn fuzziness(&self) -> u32 {
        self.fuzziness
    }

    pub fn prefix_length(&self) -> u32 {
        self.prefix_length
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    pub(crate) fn description(&self) -> String {
        let mut description = format!("{}:({})", self.field, self.query);
        if self.operator == Operator::And {
            description.push_str("[AND]");
        }
        if self.fuzziness > 0 {
            description.push_str(&format!("~{}", self.fuzziness));
        }
        description + &self.boost.suffix()
    }
}
