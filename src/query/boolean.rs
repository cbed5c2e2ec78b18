//! Boolean query implementation for combining multiple queries.

use serde::Serialize;

use crate::query::{Boost, Query};

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    /// The clause must match (equivalent to AND).
    Must,
    /// The clause should match (equivalent to OR).
    Should,
    /// The clause must not match (equivalent to NOT).
    MustNot,
}

/// A boolean query that combines multiple queries with boolean logic.
///
/// Clauses keep the order they were added in. `minimum_should_match` is the
/// number of `should` clauses that must match; when unset, the engine
/// requires one should clause only if there are no `must` clauses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BooleanQuery {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    must: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    should: Vec<Query>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    must_not: Vec<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_should_match: Option<usize>,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl BooleanQuery {
    /// Create a new empty boolean query.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> BooleanQueryBuilder {
        BooleanQueryBuilder::new()
    }

    /// Add a clause with the given occurrence.
    pub fn add_clause(&mut self, occur: Occur, query: Query) {
        match occur {
            Occur::Must => self.must.push(query),
            Occur::Should => self.should.push(query),
            Occur::MustNot => self.must_not.push(query),
        }
    }

    /// Add a MUST clause.
    pub fn add_must(&mut self, query: Query) {
        self.must.push(query);
    }

    /// Add a SHOULD clause.
    pub fn add_should(&mut self, query: Query) {
        self.should.push(query);
    }

    /// Add a MUST_NOT clause.
    pub fn add_must_not(&mut self, query: Query) {
        self.must_not.push(query);
    }

    pub fn set_minimum_should_match(&mut self, minimum: usize) {
        self.minimum_should_match = Some(minimum);
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boost = boost;
        self
    }

    /// Set the minimum number of should clauses that must match.
    pub fn with_minimum_should_match(mut self, minimum: usize) -> Self {
        self.minimum_should_match = Some(minimum);
        self
    }

    pub fn must(&self) -> &[Query] {
        &self.must
    }

    pub fn should(&self) -> &[Query] {
        &self.should
    }

    pub fn must_not(&self) -> &[Query] {
        &self.must_not
    }

    /// The clauses with the given occurrence.
    pub fn clauses(&self, occur: Occur) -> &[Query] {
        match occur {
            Occur::Must => &self.must,
            Occur::Should => &self.should,
            Occur::MustNot => &self.must_not,
        }
    }

    /// Get the minimum should match value.
    pub fn minimum_should_match(&self) -> Option<usize> {
        self.minimum_should_match
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    /// Number of clauses of any occurrence.
    pub fn len(&self) -> usize {
        self.must.len() + self.should.len() + self.must_not.len()
    }

    /// Check if this query is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn description(&self) -> String {
        if self.is_empty() {
            return "()".to_string();
        }

        let parts: Vec<String> = self
            .must
            .iter()
            .map(|q| format!("+{}", q.description()))
            .chain(self.should.iter().map(Query::description))
            .chain(self.must_not.iter().map(|q| format!("-{}", q.description())))
            .collect();

        let mut result = format!("({})", parts.join(" "));
        if let Some(minimum) = self.minimum_should_match {
            result.push_str(&format!("~{minimum}"));
        }
        result + &self.boost.suffix()
    }
}

/// Builder for creating boolean queries.
#[derive(Debug, Default)]
pub struct BooleanQueryBuilder {
    query: BooleanQuery,
}

impl BooleanQueryBuilder {
    /// Create a new boolean query builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a MUST clause.
    pub fn must(mut self, query: Query) -> Self {
        self.query.add_must(query);
        self
    }

    /// Add a SHOULD clause.
    pub fn should(mut self, query: Query) -> Self {
        self.query.add_should(query);
        self
    }

    /// Add a MUST_NOT clause.
    pub fn must_not(mut self, query: Query) -> Self {
        self.query.add_must_not(query);
        self
    }

    /// Add a clause with the given occurrence.
    pub fn clause(mut self, occur: Occur, query: Query) -> Self {
        self.query.add_clause(occur, query);
        self
    }

    /// Set the boost factor.
    pub fn boost(mut self, boost: Boost) -> Self {
        self.query.boost = boost;
        self
    }

    /// Set the minimum number of should clauses that must match.
    pub fn minimum_should_match(mut self, minimum: usize) -> Self {
        self.query.minimum_should_match = Some(minimum);
        self
    }

    /// Build the boolean query.
    pub fn build(self) -> BooleanQuery {
        self.query
    }
}

/// Demotes documents matching `negative` among those matching `positive`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoostingQuery {
    positive: Box<Query>,
    negative: Box<Query>,
    negative_boost: f64,
}

impl BoostingQuery {
    pub fn new(positive: Query, negative: Query, negative_boost: f64) -> Self {
        BoostingQuery {
            positive: Box::new(positive),
            negative: Box::new(negative),
            negative_boost,
        }
    }

    pub fn positive(&self) -> &Query {
        &self.positive
    }

    pub fn negative(&self) -> &Query {
        &self.negative
    }

    /// Score multiplier for documents matching `negative`.
    pub fn negative_boost(&self) -> f64 {
        self.negative_boost
    }

    pub(crate) fn description(&self) -> String {
        format!(
            "boosting({}, {}^{})",
            self.positive.description(),
            self.negative.description(),
            self.negative_boost
        )
    }
}
