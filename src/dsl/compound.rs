//! Compound queries (`bool`, `boosting`) and the match-everything /
//! match-nothing leaves.

use log::warn;
use serde_json::Value;

use super::value::{self, unknown_field};
use super::{Body, Translator, calculate_min};
use crate::error::{QueryDslError, Result};
use crate::query::{BooleanQuery, Boost, BoostingQuery, MatchAllQuery, Occur, Query};

impl Translator<'_> {
    pub(super) fn bool_query(&self, body: &Body, depth: usize) -> Result<Query> {
        let mut query = BooleanQuery::new();
        let mut filter = BooleanQuery::new().with_boost(Boost::new(0.0));
        let mut minimum = None;

        for (key, value) in body {
            let key = key.to_lowercase();
            match key.as_str() {
                "must" => self.bool_clauses(&key, value, depth, &mut |q| query.add_must(q))?,
                "should" => self.bool_clauses(&key, value, depth, &mut |q| query.add_should(q))?,
                "must_not" => {
                    self.bool_clauses(&key, value, depth, &mut |q| query.add_must_not(q))?
                }
                "filter" => self.bool_clauses(&key, value, depth, &mut |q| filter.add_must(q))?,
                "minimum_should_match" => minimum = Some(value),
                "boost" => query = query.with_boost(value::boost("bool", &key, value)?),
                _ => {
                    return Err(QueryDslError::x_content_parse(format!(
                        "[bool] unknown field [{key}]"
                    )));
                }
            }
        }

        if !filter.is_empty() {
            query.add_clause(Occur::Must, filter.into());
        }
        if let Some(minimum) = minimum {
            let should = query.should().len();
            let resolved = calculate_min(should.max(1), minimum)?;
            if should > 0 {
                query.set_minimum_should_match(resolved);
            }
        }
        Ok(query.into())
    }

    /// Translate the clause list under `key`: one query object or an array
    /// of them.
    fn bool_clauses(
        &self,
        key: &str,
        value: &Value,
        depth: usize,
        add: &mut dyn FnMut(Query),
    ) -> Result<()> {
        let clauses = match value {
            Value::Object(_) => std::slice::from_ref(value),
            Value::Array(items) => items.as_slice(),
            other => {
                return Err(QueryDslError::x_content_parse(format!(
                    "[bool] {key} doesn't support values of type: {}",
                    crate::mapping::json_type(other)
                )));
            }
        };

        for clause in clauses {
            let query = self.query(Some(clause), depth + 1).map_err(|err| {
                let context = format!("[{key}] failed to parse field");
                if key == "filter" {
                    QueryDslError::parsing(context).caused_by(err)
                } else {
                    QueryDslError::x_content_parse(context).caused_by(err)
                }
            })?;
            add(query);
        }
        Ok(())
    }

    pub(super) fn boosting_query(&self, body: &Body, depth: usize) -> Result<Query> {
        let mut positive = None;
        let mut negative = None;
        let mut negative_boost = None;
        for (key, value) in body {
            let key = key.to_lowercase();
            match key.as_str() {
                "positive" => positive = Some(self.boosting_clause(&key, value, depth)?),
                "negative" => negative = Some(self.boosting_clause(&key, value, depth)?),
                "negative_boost" => negative_boost = Some(value::float("boosting", &key, value)?),
                "boost" => warn!("[boosting] ignoring [boost]"),
                _ => return Err(unknown_field("boosting", &key)),
            }
        }

        let (Some(positive), Some(negative)) = (positive, negative) else {
            return Err(QueryDslError::parsing(
                "[boosting] query requires [positive] and [negative]",
            ));
        };
        let negative_boost = negative_boost
            .ok_or_else(|| QueryDslError::parsing("[boosting] query requires [negative_boost]"))?;
        if negative_boost < 0.0 {
            return Err(QueryDslError::illegal_argument(format!(
                "[boosting] negative_boost must be non-negative, got [{negative_boost}]"
            )));
        }
        Ok(BoostingQuery::new(positive, negative, negative_boost).into())
    }

    fn boosting_clause(&self, key: &str, value: &Value, depth: usize) -> Result<Query> {
        if !value.is_object() {
            return Err(value::mismatch("boosting", key, value));
        }
        self.query(Some(value), depth + 1).map_err(|err| {
            QueryDslError::x_content_parse(format!("[{key}] failed to parse field")).caused_by(err)
        })
    }

    pub(super) fn match_all_query(&self, body: &Body) -> Result<Query> {
        let mut query = MatchAllQuery::new();
        for (key, value) in body {
            match key.to_lowercase().as_str() {
                "boost" => query = query.with_boost(value::boost("match_all", key, value)?),
                _ => return Err(unknown_field("match_all", key)),
            }
        }
        Ok(query.into())
    }

    pub(super) fn match_none_query(&self, body: &Body) -> Result<Query> {
        match body.keys().next() {
            Some(key) => Err(unknown_field("match_none", key)),
            None => Ok(Query::MatchNone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::registry::AnalyzerRegistry;
    use crate::dsl::translate;
    use crate::error::ErrorKind;
    use crate::mapping::{FieldType, Mappings, Property};
    use crate::query::TermQuery;
    use serde_json::json;

    fn run(request: Value) -> Result<Query> {
        let mappings = Mappings::new()
            .with_property("status", Property::new(FieldType::Keyword))
            .with_property("title", Property::new(FieldType::Text));
        translate(Some(&request), &mappings, &AnalyzerRegistry::new())
    }

    #[test]
    fn test_bool_clauses() {
        let query = run(json!({"bool": {
            "must": {"term": {"status": "published"}},
            "should": [{"term": {"status": "a"}}, {"term": {"status": "b"}}],
            "must_not": [{"term": {"status": "spam"}}]
        }}))
        .unwrap();
        assert_eq!(
            query.description(),
            "(+status:published status:a status:b -status:spam)"
        );
    }

    #[test]
    fn test_bool_filter_is_unscored_must() {
        let query = run(json!({"bool": {
            "filter": [{"term": {"status": "a"}}, {"term": {"status": "b"}}],
            "must": {"match": {"title": "fox"}}
        }}))
        .unwrap();
        let bool_query = query.as_bool().unwrap();
        assert_eq!(bool_query.must().len(), 2);
        let filter = bool_query.must()[1].as_bool().unwrap();
        assert_eq!(filter.boost(), Boost::new(0.0));
        assert_eq!(filter.must(), &[
            TermQuery::new("status", "a").into(),
            TermQuery::new("status", "b").into()
        ]);
        assert_eq!(query.description(), "(+title:(fox) +(+status:a +status:b)^0)");
    }

    #[test]
    fn test_bool_minimum_should_match() {
        let query = run(json!({"bool": {
            "minimum_should_match": "-1",
            "should": [
                {"term": {"status": "a"}},
                {"term": {"status": "b"}},
                {"term": {"status": "c"}}
            ],
            "boost": 2
        }}))
        .unwrap();
        assert_eq!(query.description(), "(status:a status:b status:c)~2^2");

        let query = run(json!({"bool": {"minimum_should_match": 1, "must": {"match_all": {}}}})).unwrap();
        assert_eq!(query.as_bool().unwrap().minimum_should_match(), None);

        let err = run(json!({"bool": {"minimum_should_match": "garbage", "must": {"match_all": {}}}}))
            .unwrap_err();
        assert_eq!(err.root_cause().kind(), ErrorKind::IllegalArgumentException);
        assert!(err.root_cause().reason().starts_with("[minimum_should_match]"));
    }

    #[test]
    fn test_bool_errors() {
        let err = run(json!({"bool": {"must": [{"term": {"status": ["x"]}}]}})).unwrap_err();
        let chain: Vec<String> = std::iter::once(&err)
            .chain(err.causes())
            .map(|e| e.reason())
            .collect();
        assert_eq!(chain, vec![
            "[bool] failed to parse field".to_string(),
            "[must] failed to parse field".to_string(),
            "[term] failed to parse field".to_string(),
            "[term] doesn't support values of type: array".to_string(),
        ]);

        let err = run(json!({"bool": {"filter": {"frobnicate": {}}}})).unwrap_err();
        let filter = err.cause().unwrap();
        assert_eq!(filter.kind(), ErrorKind::ParsingException);
        assert_eq!(filter.reason(), "[filter] failed to parse field");

        let err = run(json!({"bool": {"must": "fox"}})).unwrap_err();
        assert_eq!(err.root_cause().reason(), "[bool] must doesn't support values of type: string");

        let err = run(json!({"bool": {"should_not": []}})).unwrap_err();
        assert_eq!(err.root_cause().kind(), ErrorKind::XContentParseException);
        assert_eq!(err.root_cause().reason(), "[bool] unknown field [should_not]");
    }

    #[test]
    fn test_boosting() {
        let query = run(json!({"boosting": {
            "positive": {"term": {"status": "apple"}},
            "negative": {"term": {"status": "pie"}},
            "negative_boost": 0.5
        }}))
        .unwrap();
        assert_eq!(query.description(), "boosting(status:apple, status:pie^0.5)");

        let err = run(json!({"boosting": {"positive": {"match_all": {}}, "negative_boost": 0.5}})).unwrap_err();
        assert_eq!(err.root_cause().reason(), "[boosting] query requires [positive] and [negative]");

        let err = run(json!({"boosting": {
            "positive": {"match_all": {}},
            "negative": {"match_all": {}},
            "negative_boost": -1
        }}))
        .unwrap_err();
        assert_eq!(err.root_cause().kind(), ErrorKind::IllegalArgumentException);
    }

    #[test]
    fn test_match_all_and_none() {
        assert_eq!(run(json!({"match_all": {}})).unwrap(), Query::match_all());
        assert_eq!(run(json!({"match_all": {"boost": 1.2}})).unwrap().description(), "*:*^1.2");
        assert_eq!(run(json!({"match_none": {}})).unwrap(), Query::MatchNone);

        let err = run(json!({"match_all": {"fields": 1}})).unwrap_err();
        assert_eq!(err.root_cause().reason(), "[match_all] unknown field [fields]");
    }
}
