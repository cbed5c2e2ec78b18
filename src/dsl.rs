//! Translation of the JSON query DSL into [`Query`] trees.
//!
//! Every level of a request is an object with exactly one key naming the
//! query kind:
//!
//! ```text
//! {"bool": {"must": [{"match": {"title": "foo"}}], "filter": {"term": {"status": "published"}}}}
//! ```
//!
//! The [`Translator`] looks the kind up in a case-insensitive table, hands
//! the body to the builder of that kind and chains any builder error under
//! a `"[<kind>] failed to parse field"` error, so a failure deep inside a
//! `bool` names every level it went through. Translation is a pure function
//! of the request, the index [`Mappings`] and its [`AnalyzerRegistry`].
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::registry::AnalyzerRegistry;
//! use querydsl::dsl::translate;
//! use querydsl::mapping::{FieldType, Mappings, Property};
//! use querydsl::query::Query;
//! use serde_json::json;
//!
//! let mappings = Mappings::new().with_property("age", Property::new(FieldType::Numeric));
//! let analyzers = AnalyzerRegistry::new();
//!
//! let request = json!({"range": {"age": {"gte": 18, "lt": 65}}});
//! let query = translate(Some(&request), &mappings, &analyzers).unwrap();
//! assert_eq!(query.description(), "age:[18 TO 65}");
//!
//! assert_eq!(translate(None, &mappings, &analyzers).unwrap(), Query::match_all());
//! ```

mod compound;
pub mod min_should;
mod multi_term;
mod query_string;
mod range;
pub mod search;
mod term;
mod text;
mod value;

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use ahash::AHashMap;
use log::{debug, trace};
use serde_json::{Map, Value};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::registry::{AnalyzerRegistry, standard_analyzer};
use crate::error::{QueryDslError, Result};
use crate::mapping::{Mappings, json_type};
use crate::query::{AnalyzerRef, Query};

pub use min_should::calculate_min;
pub use search::{SearchRequest, is_search_body};

/// Default bound on request nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Limits applied while translating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Deepest allowed nesting of query objects.
    pub max_depth: usize,
    /// Cap on the page size of a search request.
    pub max_results: usize,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        TranslateOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_results: search::DEFAULT_MAX_RESULTS,
        }
    }
}

// ============================================================================
// Query kinds
// ============================================================================

/// The query kinds the translator knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Bool,
    Boosting,
    Match,
    MatchBoolPrefix,
    MatchPhrase,
    MatchPhrasePrefix,
    MultiMatch,
    MatchAll,
    MatchNone,
    CombinedFields,
    QueryString,
    SimpleQueryString,
    Exists,
    Ids,
    Range,
    Regexp,
    Prefix,
    Fuzzy,
    Wildcard,
    Term,
    Terms,
    TermsSet,
    GeoBoundingBox,
    GeoDistance,
    GeoPolygon,
    GeoShape,
}

const QUERY_KINDS: &[(&str, QueryKind)] = &[
    ("bool", QueryKind::Bool),
    ("boosting", QueryKind::Boosting),
    ("match", QueryKind::Match),
    ("match_bool_prefix", QueryKind::MatchBoolPrefix),
    ("match_phrase", QueryKind::MatchPhrase),
    ("match_phrase_prefix", QueryKind::MatchPhrasePrefix),
    ("multi_match", QueryKind::MultiMatch),
    ("match_all", QueryKind::MatchAll),
    ("match_none", QueryKind::MatchNone),
    ("combined_fields", QueryKind::CombinedFields),
    ("query_string", QueryKind::QueryString),
    ("simple_query_string", QueryKind::SimpleQueryString),
    ("exists", QueryKind::Exists),
    ("ids", QueryKind::Ids),
    ("range", QueryKind::Range),
    ("regexp", QueryKind::Regexp),
    ("prefix", QueryKind::Prefix),
    ("fuzzy", QueryKind::Fuzzy),
    ("wildcard", QueryKind::Wildcard),
    ("term", QueryKind::Term),
    ("terms", QueryKind::Terms),
    ("terms_set", QueryKind::TermsSet),
    ("geo_bounding_box", QueryKind::GeoBoundingBox),
    ("geo_distance", QueryKind::GeoDistance),
    ("geo_polygon", QueryKind::GeoPolygon),
    ("geo_shape", QueryKind::GeoShape),
];

static KIND_TABLE: LazyLock<AHashMap<&'static str, QueryKind>> =
    LazyLock::new(|| QUERY_KINDS.iter().copied().collect());

impl QueryKind {
    /// Look a kind up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        KIND_TABLE.get(name.to_lowercase().as_str()).copied()
    }

    pub fn as_str(&self) -> &'static str {
        QUERY_KINDS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .unwrap_or("unknown")
    }

    /// Every known kind, in table order.
    pub fn all() -> impl Iterator<Item = QueryKind> {
        QUERY_KINDS.iter().map(|(_, kind)| *kind)
    }

    pub fn is_geo(&self) -> bool {
        matches!(
            self,
            QueryKind::GeoBoundingBox
                | QueryKind::GeoDistance
                | QueryKind::GeoPolygon
                | QueryKind::GeoShape
        )
    }
}

impl FromStr for QueryKind {
    type Err = QueryDslError;

    fn from_str(s: &str) -> Result<Self> {
        QueryKind::from_name(s).ok_or_else(|| {
            QueryDslError::x_content_parse(format!("[{}] query doesn't support", s.to_lowercase()))
        })
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Translator
// ============================================================================

/// Translate `request` with the default options.
///
/// `None`, `null` and `{}` translate to a match-all query.
pub fn translate(
    request: Option<&Value>,
    mappings: &Mappings,
    analyzers: &AnalyzerRegistry,
) -> Result<Query> {
    Translator::new(mappings, analyzers).translate(request)
}

/// Recursive translator over one index's mappings and analyzers.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    mappings: &'a Mappings,
    analyzers: &'a AnalyzerRegistry,
    options: TranslateOptions,
}

type Body = Map<String, Value>;

impl<'a> Translator<'a> {
    pub fn new(mappings: &'a Mappings, analyzers: &'a AnalyzerRegistry) -> Self {
        Translator {
            mappings,
            analyzers,
            options: TranslateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TranslateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> TranslateOptions {
        self.options
    }

    /// Translate a request node.
    pub fn translate(&self, request: Option<&Value>) -> Result<Query> {
        self.query(request, 0)
    }

    /// Translate one level of the request tree.
    fn query(&self, request: Option<&Value>, depth: usize) -> Result<Query> {
        let request = match request {
            None | Some(Value::Null) => return Ok(Query::match_all()),
            Some(Value::Object(map)) if map.is_empty() => return Ok(Query::match_all()),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(QueryDslError::parsing("query malformed, must be an object"));
            }
        };
        if depth > self.options.max_depth {
            return Err(QueryDslError::parsing("query nested too deeply"));
        }

        let mut entries = request.iter();
        let (key, value) = match entries.next() {
            Some(entry) => entry,
            None => return Ok(Query::match_all()),
        };
        let name = key.to_lowercase();
        let body = value.as_object().ok_or_else(|| {
            QueryDslError::parsing(format!(
                "[{name}] query doesn't support value type {}",
                json_type(value)
            ))
        })?;
        let kind: QueryKind = name.parse()?;
        trace!("translating [{kind}] at depth {depth}");

        let query = self.dispatch(kind, body, depth).map_err(|err| {
            QueryDslError::x_content_parse(format!("[{kind}] failed to parse field")).caused_by(err)
        })?;

        if let Some((extra, _)) = entries.next() {
            return Err(QueryDslError::parsing(format!(
                "[{name}] malformed query, excepted [END_OBJECT] but found [FIELD_NAME] {extra}"
            )));
        }
        Ok(query)
    }

    fn dispatch(&self, kind: QueryKind, body: &Body, depth: usize) -> Result<Query> {
        match kind {
            QueryKind::Bool => self.bool_query(body, depth),
            QueryKind::Boosting => self.boosting_query(body, depth),
            QueryKind::Match => self.match_query(body),
            QueryKind::MatchBoolPrefix => self.match_bool_prefix_query(body),
            QueryKind::MatchPhrase => self.match_phrase_query(body),
            QueryKind::MatchPhrasePrefix => self.match_phrase_prefix_query(body),
            QueryKind::MultiMatch => self.multi_match_query(body),
            QueryKind::MatchAll => self.match_all_query(body),
            QueryKind::MatchNone => self.match_none_query(body),
            QueryKind::CombinedFields => self.combined_fields_query(body),
            QueryKind::QueryString => self.query_string_query(body),
            QueryKind::SimpleQueryString => self.simple_query_string_query(body),
            QueryKind::Exists => self.exists_query(body),
            QueryKind::Ids => self.ids_query(body),
            QueryKind::Range => self.range_query(body),
            QueryKind::Regexp => self.regexp_query(body),
            QueryKind::Prefix => self.prefix_query(body),
            QueryKind::Fuzzy => self.fuzzy_query(body),
            QueryKind::Wildcard => self.wildcard_query(body),
            QueryKind::Term => self.term_query(body),
            QueryKind::Terms => self.terms_query(body),
            QueryKind::TermsSet => self.terms_set_query(body),
            QueryKind::GeoBoundingBox
            | QueryKind::GeoDistance
            | QueryKind::GeoPolygon
            | QueryKind::GeoShape => Err(QueryDslError::not_implemented(format!(
                "[{kind}] query doesn't support"
            ))),
        }
    }

    // ========================================================================
    // Analyzer resolution
    // ========================================================================

    /// The analyzer for query text on `field`: the explicit one, else the
    /// field's search analyzer, else its index analyzer.
    fn query_analyzer(&self, explicit: Option<&str>, field: &str) -> Result<Option<AnalyzerRef>> {
        if let Some(name) = explicit.filter(|name| !name.is_empty()) {
            let analyzer = self.analyzers.lookup(name).ok_or_else(|| {
                QueryDslError::x_content_parse(format!("analyzer [{name}] does not exist"))
            })?;
            debug!("field [{field}] uses requested analyzer [{name}]");
            return Ok(Some(AnalyzerRef::new(analyzer)));
        }
        let (index, search) = self.analyzers.for_field(self.mappings, field);
        Ok(search.or(index).map(AnalyzerRef::new))
    }

    /// Analyze `text`, with the standard analyzer when none is given.
    fn analyze_terms(&self, analyzer: Option<&AnalyzerRef>, text: &str) -> Result<Vec<String>> {
        let analyzer: Arc<dyn Analyzer> = match analyzer {
            Some(analyzer) => analyzer.analyzer().clone(),
            None => standard_analyzer(),
        };
        Ok(analyzer.analyze(text)?.map(|token| token.text).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::mapping::{FieldType, Property};
    use serde_json::json;

    fn translate_json(request: Value) -> Result<Query> {
        let mappings = Mappings::new().with_property("age", Property::new(FieldType::Numeric));
        translate(Some(&request), &mappings, &AnalyzerRegistry::new())
    }

    #[test]
    fn test_empty_request_matches_all() {
        let mappings = Mappings::new();
        let analyzers = AnalyzerRegistry::new();
        assert_eq!(translate(None, &mappings, &analyzers).unwrap(), Query::match_all());
        assert_eq!(translate_json(Value::Null).unwrap(), Query::match_all());
        assert_eq!(translate_json(json!({})).unwrap(), Query::match_all());
    }

    #[test]
    fn test_kind_table() {
        assert_eq!(QueryKind::from_name("MATCH_phrase"), Some(QueryKind::MatchPhrase));
        assert_eq!(QueryKind::from_name("frobnicate"), None);
        for kind in QueryKind::all() {
            assert_eq!(QueryKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(QueryKind::all().count(), QUERY_KINDS.len());
        assert!(QueryKind::GeoShape.is_geo());
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let query = translate_json(json!({"TERM": {"status": "on"}})).unwrap();
        assert_eq!(query.description(), "status:on");
    }

    #[test]
    fn test_unknown_kind() {
        let err = translate_json(json!({"frobnicate": {}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::XContentParseException);
        assert!(err.reason().contains("frobnicate"));
    }

    #[test]
    fn test_not_an_object() {
        let err = translate_json(json!([1, 2])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParsingException);

        let err = translate_json(json!({"term": "x"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParsingException);
        assert_eq!(err.reason(), "[term] query doesn't support value type string");
    }

    #[test]
    fn test_second_kind_key() {
        let err = translate_json(json!({"match_all": {}, "term": {"a": "b"}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParsingException);
        assert_eq!(
            err.reason(),
            "[match_all] malformed query, excepted [END_OBJECT] but found [FIELD_NAME] term"
        );
    }

    #[test]
    fn test_builder_errors_are_chained() {
        let err = translate_json(json!({"term": {"a": "b", "c": "d"}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::XContentParseException);
        assert_eq!(err.reason(), "[term] failed to parse field");
        let cause = err.cause().unwrap();
        assert_eq!(cause.kind(), ErrorKind::ParsingException);
        assert_eq!(cause.reason(), "[term] query doesn't support multiple fields");
    }

    #[test]
    fn test_geo_kinds_are_not_implemented() {
        for kind in ["geo_bounding_box", "geo_distance", "geo_polygon", "geo_shape"] {
            let err = translate_json(json!({kind: {}})).unwrap_err();
            let root = err.root_cause();
            assert_eq!(root.kind(), ErrorKind::NotImplemented);
            assert_eq!(root.reason(), format!("[{kind}] query doesn't support"));
        }
    }

    #[test]
    fn test_depth_limit() {
        let mut request = json!({"match_all": {}});
        for _ in 0..5 {
            request = json!({"bool": {"must": request}});
        }
        let mappings = Mappings::new();
        let analyzers = AnalyzerRegistry::new();
        let translator = Translator::new(&mappings, &analyzers);
        assert!(translator.translate(Some(&request)).is_ok());

        let shallow = translator.with_options(TranslateOptions {
            max_depth: 3,
            ..TranslateOptions::default()
        });
        let err = shallow.translate(Some(&request)).unwrap_err();
        assert_eq!(err.root_cause().reason(), "query nested too deeply");
    }
}
