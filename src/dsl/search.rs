//! Search request bodies: the translated `query` plus paging, sorting and
//! document shaping options.
//!
//! ```text
//! {"query": {...}, "size": 20, "from": 40, "sort": ["-published", {"title": "asc"}],
//!  "_source": ["title", "tags*"], "fields": ["published"], "explain": true}
//! ```
//!
//! `size` defaults to 10 and is capped at [`TranslateOptions::max_results`].
//! Aggregations, highlighting and the remaining engine options are accepted
//! and ignored.

use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use super::value::{self, mismatch};
use super::{TranslateOptions, Translator};
use crate::error::{QueryDslError, Result};
use crate::query::Query;

/// Hits returned when a request does not set `size`.
pub const DEFAULT_SIZE: usize = 10;

/// Default cap on `size`.
pub const DEFAULT_MAX_RESULTS: usize = 10_000;

const IGNORED_KEYS: &[&str] = &[
    "aggs",
    "aggregations",
    "highlight",
    "timeout",
    "track_total_hits",
    "search_after",
];

/// A translated search body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: Query,
    pub size: usize,
    pub from: usize,
    pub explain: bool,
    pub sort: Vec<SortField>,
    #[serde(rename = "_source")]
    pub source: SourceFilter,
    pub fields: Vec<FieldRequest>,
}

impl SearchRequest {
    fn new(query: Query) -> Self {
        SearchRequest {
            query,
            size: DEFAULT_SIZE,
            from: 0,
            explain: false,
            sort: Vec::new(),
            source: SourceFilter::default(),
            fields: Vec::new(),
        }
    }
}

/// One sort key. `_score` sorts by relevance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortField {
    pub field: String,
    pub descending: bool,
}

impl SortField {
    pub fn new<S: Into<String>>(field: S, descending: bool) -> Self {
        SortField {
            field: field.into(),
            descending,
        }
    }

    /// `-field` sorts descending, `+field` and `field` ascending.
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix('-') {
            Some(field) => SortField::new(field, true),
            None => SortField::new(spec.strip_prefix('+').unwrap_or(spec), false),
        }
    }

    pub fn is_score(&self) -> bool {
        self.field == "_score"
    }
}

/// Which stored source fields come back with each hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFilter {
    pub enabled: bool,
    /// Field names, `*` suffixed for prefixes. Empty means every field.
    pub fields: Vec<String>,
}

impl Default for SourceFilter {
    fn default() -> Self {
        SourceFilter {
            enabled: true,
            fields: Vec::new(),
        }
    }
}

impl SourceFilter {
    /// Whether `field` is returned.
    pub fn includes(&self, field: &str) -> bool {
        self.enabled
            && (self.fields.is_empty()
                || self.fields.iter().any(|pattern| match pattern.strip_suffix('*') {
                    Some(prefix) => field.starts_with(prefix),
                    None => pattern == field,
                }))
    }
}

/// A doc-value field requested with each hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRequest {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Whether `value` is a search body rather than a bare query: an object
/// with `query` or one of the search options at its top level.
pub fn is_search_body(value: &Value) -> bool {
    const SEARCH_KEYS: &[&str] = &["query", "size", "from", "explain", "sort", "_source", "fields"];
    value.as_object().is_some_and(|body| {
        body.keys().any(|key| {
            let key = key.to_lowercase();
            SEARCH_KEYS.contains(&key.as_str()) || IGNORED_KEYS.contains(&key.as_str())
        })
    })
}

impl Translator<'_> {
    /// Translate a whole search body.
    pub fn translate_search(&self, body: &Value) -> Result<SearchRequest> {
        let body = match body {
            Value::Null => return Ok(SearchRequest::new(Query::match_all())),
            Value::Object(body) => body,
            other => return Err(mismatch("search", "body", other)),
        };

        let query = body
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("query"))
            .map(|(_, query)| query);
        let mut request = SearchRequest::new(self.translate(query)?);

        for (key, option) in body {
            let key = key.to_lowercase();
            match key.as_str() {
                "query" => {}
                "size" => request.size = value::unsigned("search", &key, option)? as usize,
                "from" => request.from = value::unsigned("search", &key, option)? as usize,
                "explain" => request.explain = value::boolean("search", &key, option)?,
                "sort" => request.sort = sort(option)?,
                "_source" => request.source = source(option)?,
                "fields" => request.fields = fields(option)?,
                ignored if IGNORED_KEYS.contains(&ignored) => {
                    warn!("[search] ignoring [{ignored}]");
                }
                other => debug!("[search] skipping unknown option [{other}]"),
            }
        }

        request.size = page_size(request.size, self.options());
        Ok(request)
    }
}

fn page_size(size: usize, options: TranslateOptions) -> usize {
    match size {
        0 => DEFAULT_SIZE.min(options.max_results),
        n => n.min(options.max_results),
    }
}

fn sort(value: &Value) -> Result<Vec<SortField>> {
    let items = match value {
        Value::String(spec) => return Ok(vec![SortField::parse(spec)]),
        Value::Array(items) => items,
        _ => {
            return Err(QueryDslError::x_content_parse(
                "[sort] value should be string or array",
            ));
        }
    };

    let mut sorts = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(spec) => sorts.push(SortField::parse(spec)),
            Value::Object(fields) => sorts.push(sort_object(fields)?),
            other => warn!("[sort] ignoring value of type {}", crate::mapping::json_type(other)),
        }
    }
    Ok(sorts)
}

/// `{"field": "desc"}` or `{"field": {"order": "desc"}}`.
fn sort_object(fields: &Map<String, Value>) -> Result<SortField> {
    let mut entries = fields.iter();
    let (Some((field, order)), None) = (entries.next(), entries.next()) else {
        return Err(QueryDslError::parsing(
            "[sort] field doesn't support multiple values",
        ));
    };

    let descending = match order {
        Value::String(order) => order.eq_ignore_ascii_case("desc"),
        Value::Object(options) => {
            let mut descending = false;
            for (key, option) in options {
                match key.to_lowercase().as_str() {
                    "order" => {
                        descending = value::string("sort", key, option)?.eq_ignore_ascii_case("desc")
                    }
                    "format" => {}
                    other => debug!("[sort] skipping unknown option [{other}]"),
                }
            }
            descending
        }
        _ => false,
    };
    Ok(SortField::new(field.as_str(), descending))
}

fn source(value: &Value) -> Result<SourceFilter> {
    let invalid = || QueryDslError::x_content_parse("[_source] value should be boolean or []string");
    match value {
        Value::Null => Ok(SourceFilter::default()),
        Value::Bool(enabled) => Ok(SourceFilter {
            enabled: *enabled,
            fields: Vec::new(),
        }),
        Value::Array(items) => {
            let fields = items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect::<Result<_>>()?;
            Ok(SourceFilter {
                enabled: true,
                fields,
            })
        }
        _ => Err(invalid()),
    }
}

fn fields(value: &Value) -> Result<Vec<FieldRequest>> {
    let Value::Array(items) = value else {
        warn!("[fields] ignoring value of type {}", crate::mapping::json_type(value));
        return Ok(Vec::new());
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(field) => Ok(FieldRequest {
                field: field.clone(),
                format: None,
            }),
            Value::Object(options) => {
                let mut request = FieldRequest {
                    field: String::new(),
                    format: None,
                };
                for (key, option) in options {
                    match key.to_lowercase().as_str() {
                        "field" => request.field = value::string("fields", key, option)?,
                        "format" => request.format = Some(value::string("fields", key, option)?),
                        other => {
                            return Err(QueryDslError::parsing(format!(
                                "[fields] unknown field [{other}]"
                            )));
                        }
                    }
                }
                Ok(request)
            }
            _ => Err(QueryDslError::x_content_parse(
                "[fields] value should be string or object",
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::registry::AnalyzerRegistry;
    use crate::error::ErrorKind;
    use crate::mapping::{FieldType, Mappings, Property};
    use crate::query::TermQuery;
    use serde_json::json;

    fn mappings() -> Mappings {
        Mappings::new()
            .with_property("status", Property::new(FieldType::Keyword))
            .with_property("published", Property::new(FieldType::Date))
    }

    fn search(body: Value) -> Result<SearchRequest> {
        let mappings = mappings();
        let analyzers = AnalyzerRegistry::new();
        Translator::new(&mappings, &analyzers).translate_search(&body)
    }

    #[test]
    fn test_defaults() {
        let request = search(json!({"query": {"term": {"status": "draft"}}})).unwrap();
        assert_eq!(request.query, TermQuery::new("status", "draft").into());
        assert_eq!(request.size, DEFAULT_SIZE);
        assert_eq!(request.from, 0);
        assert!(!request.explain);
        assert!(request.sort.is_empty());
        assert_eq!(request.source, SourceFilter::default());
        assert!(request.fields.is_empty());

        let request = search(json!({"size": 3})).unwrap();
        assert_eq!(request.query, Query::match_all());
        assert_eq!(request.size, 3);
    }

    #[test]
    fn test_size_is_capped() {
        assert_eq!(search(json!({"size": 0})).unwrap().size, DEFAULT_SIZE);
        assert_eq!(search(json!({"size": 50_000})).unwrap().size, DEFAULT_MAX_RESULTS);

        let mappings = mappings();
        let analyzers = AnalyzerRegistry::new();
        let translator = Translator::new(&mappings, &analyzers).with_options(TranslateOptions {
            max_results: 5,
            ..TranslateOptions::default()
        });
        let request = translator.translate_search(&json!({"size": 20, "from": 7})).unwrap();
        assert_eq!((request.size, request.from), (5, 7));
        let request = translator.translate_search(&json!({})).unwrap();
        assert_eq!(request.size, 5);
    }

    #[test]
    fn test_sort() {
        let request = search(json!({"sort": [
            "-published",
            "+status",
            {"title": "DESC"},
            {"_score": {"order": "asc", "format": "x"}}
        ]}))
        .unwrap();
        assert_eq!(request.sort, vec![
            SortField::new("published", true),
            SortField::new("status", false),
            SortField::new("title", true),
            SortField::new("_score", false),
        ]);
        assert!(request.sort[3].is_score());

        let request = search(json!({"Sort": "-_score"})).unwrap();
        assert_eq!(request.sort, vec![SortField::new("_score", true)]);

        let err = search(json!({"sort": [{"a": "asc", "b": "desc"}]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParsingException);
        assert_eq!(err.reason(), "[sort] field doesn't support multiple values");

        let err = search(json!({"sort": 1})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::XContentParseException);
    }

    #[test]
    fn test_source_filter() {
        let request = search(json!({"_source": false})).unwrap();
        assert!(!request.source.enabled);
        assert!(!request.source.includes("title"));

        let request = search(json!({"_source": ["title", "tags*"]})).unwrap();
        assert!(request.source.includes("title"));
        assert!(request.source.includes("tags.name"));
        assert!(!request.source.includes("body"));

        let err = search(json!({"_source": "title"})).unwrap_err();
        assert_eq!(err.reason(), "[_source] value should be boolean or []string");
        assert!(search(json!({"_source": ["title", 1]})).is_err());
    }

    #[test]
    fn test_fields() {
        let request = search(json!({"fields": [
            "status",
            {"Field": "published", "format": "yyyy"}
        ]}))
        .unwrap();
        assert_eq!(request.fields, vec![
            FieldRequest { field: "status".to_string(), format: None },
            FieldRequest { field: "published".to_string(), format: Some("yyyy".to_string()) },
        ]);

        let err = search(json!({"fields": [{"name": "x"}]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParsingException);
        assert_eq!(err.reason(), "[fields] unknown field [name]");

        let err = search(json!({"fields": [1]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::XContentParseException);
    }

    #[test]
    fn test_explain_and_ignored_options() {
        let request = search(json!({
            "explain": true,
            "aggs": {"by_status": {"terms": {"field": "status"}}},
            "highlight": {"fields": {"title": {}}}
        }))
        .unwrap();
        assert!(request.explain);

        let err = search(json!({"explain": "maybe"})).unwrap_err();
        assert_eq!(err.reason(), "[search] explain doesn't support values of type: string");
    }

    #[test]
    fn test_query_errors_propagate() {
        let err = search(json!({"query": {"term": {"status": ["a"]}}, "size": 1})).unwrap_err();
        assert_eq!(err.reason(), "[term] failed to parse field");
    }

    #[test]
    fn test_is_search_body() {
        assert!(is_search_body(&json!({"query": {"match_all": {}}})));
        assert!(is_search_body(&json!({"size": 1})));
        assert!(!is_search_body(&json!({"term": {"status": "a"}})));
        assert!(!is_search_body(&json!("query")));
    }
}
