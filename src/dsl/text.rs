//! Full-text queries: the `match` family, `multi_match` and
//! `combined_fields`.
//!
//! Query text is analyzed with the explicit `analyzer` option, else the
//! field's search analyzer, else its index analyzer. Builders that need the
//! tokens up front fall back to the standard analyzer.

use log::warn;
use serde_json::Value;

use super::value::{self, field_options, field_with_boost, unknown_field};
use super::{Body, Translator, calculate_min};
use crate::error::{QueryDslError, Result};
use crate::mapping::FieldType;
use crate::query::{
    AnalyzerRef, BooleanQuery, Boost, FuzzyQuery, MatchPhraseQuery, MatchQuery, Occur, Operator,
    PrefixQuery, Query, TermQuery,
};

/// How `multi_match` combines its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MultiMatchType {
    BestFields,
    MostFields,
    CrossFields,
    Phrase,
    PhrasePrefix,
    BoolPrefix,
}

impl MultiMatchType {
    fn parse(kind: &str, name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "best_fields" => Ok(MultiMatchType::BestFields),
            "most_fields" => Ok(MultiMatchType::MostFields),
            "cross_fields" => Ok(MultiMatchType::CrossFields),
            "phrase" => Ok(MultiMatchType::Phrase),
            "phrase_prefix" => Ok(MultiMatchType::PhrasePrefix),
            "bool_prefix" => Ok(MultiMatchType::BoolPrefix),
            _ => Err(QueryDslError::illegal_argument(format!(
                "[{kind}] unknown type [{name}]"
            ))),
        }
    }
}

impl Translator<'_> {
    pub(super) fn match_query(&self, body: &Body) -> Result<Query> {
        let (field, options) = field_options("match", body, "query")?;

        let mut text = String::new();
        let mut analyzer = None;
        let mut operator = Operator::Or;
        let mut fuzziness = None;
        let mut prefix_length = 0;
        let mut boost = Boost::UNSET;
        let mut minimum = None;
        for (key, option) in options {
            match key.as_str() {
                "query" => text = value::string("match", &key, option)?,
                "analyzer" => analyzer = Some(value::string("match", &key, option)?),
                "operator" => operator = value::operator("match", &key, option)?,
                "fuzziness" => fuzziness = value::fuzziness("match", option)?,
                "prefix_length" => prefix_length = value::unsigned("match", &key, option)?,
                "boost" => boost = value::boost("match", &key, option)?,
                "minimum_should_match" => minimum = Some(option),
                _ => warn!("[match] ignoring unsupported option [{key}]"),
            }
        }

        let analyzer = self.query_analyzer(analyzer.as_deref(), field)?;
        let minimum = match minimum {
            Some(minimum) if operator == Operator::Or => minimum,
            _ => {
                return Ok(MatchQuery::new(field, text)
                    .with_analyzer(analyzer)
                    .with_operator(operator)
                    .with_fuzziness(fuzziness.unwrap_or(0))
                    .with_prefix_length(prefix_length)
                    .with_boost(boost)
                    .into());
            }
        };

        let terms = self.analyze_terms(analyzer.as_ref(), &text)?;
        if terms.is_empty() {
            return Ok(Query::MatchNone);
        }
        let clause_boost = Boost::new(boost.or(1.0));
        let mut query = BooleanQuery::new().with_boost(boost);
        query.set_minimum_should_match(calculate_min(terms.len(), minimum)?);
        for term in terms {
            let clause: Query = match fuzziness {
                Some(distance) if distance > 0 => FuzzyQuery::new(field, term)
                    .with_fuzziness(distance)
                    .with_prefix_length(prefix_length)
                    .with_boost(clause_boost)
                    .into(),
                _ => TermQuery::new(field, term).with_boost(clause_boost).into(),
            };
            query.add_should(clause);
        }
        Ok(query.into())
    }

    pub(super) fn match_phrase_query(&self, body: &Body) -> Result<Query> {
        let (field, options) = field_options("match_phrase", body, "query")?;

        let mut text = String::new();
        let mut analyzer = None;
        let mut slop = 0;
        let mut boost = Boost::UNSET;
        for (key, option) in options {
            match key.as_str() {
                "query" => text = value::string("match_phrase", &key, option)?,
                "analyzer" => analyzer = Some(value::string("match_phrase", &key, option)?),
                "slop" => slop = value::unsigned("match_phrase", &key, option)?,
                "boost" => boost = value::boost("match_phrase", &key, option)?,
                _ => return Err(unknown_field("match_phrase", &key)),
            }
        }

        let analyzer = self.query_analyzer(analyzer.as_deref(), field)?;
        Ok(MatchPhraseQuery::new(field, text)
            .with_analyzer(analyzer)
            .with_slop(slop)
            .with_boost(boost)
            .into())
    }

    pub(super) fn match_bool_prefix_query(&self, body: &Body) -> Result<Query> {
        let (field, options) = field_options("match_bool_prefix", body, "query")?;

        let mut text = String::new();
        let mut analyzer = None;
        let mut operator = Operator::Or;
        let mut minimum = None;
        let mut boost = Boost::UNSET;
        for (key, option) in options {
            match key.as_str() {
                "query" => text = value::string("match_bool_prefix", &key, option)?,
                "analyzer" => analyzer = Some(value::string("match_bool_prefix", &key, option)?),
                "operator" => operator = value::operator("match_bool_prefix", &key, option)?,
                "minimum_should_match" => minimum = Some(option),
                "boost" => boost = value::boost("match_bool_prefix", &key, option)?,
                _ => return Err(unknown_field("match_bool_prefix", &key)),
            }
        }

        let analyzer = self.query_analyzer(analyzer.as_deref(), field)?;
        self.bool_prefix_rule(field, &text, analyzer.as_ref(), operator, minimum, boost)
    }

    /// Every token but the last as a term, the last one as a prefix.
    fn bool_prefix_rule(
        &self,
        field: &str,
        text: &str,
        analyzer: Option<&AnalyzerRef>,
        operator: Operator,
        minimum: Option<&Value>,
        boost: Boost,
    ) -> Result<Query> {
        let terms = self.analyze_terms(analyzer, text)?;
        let Some((last, rest)) = terms.split_last() else {
            return Ok(Query::MatchNone);
        };

        let occur = match operator {
            Operator::And => Occur::Must,
            Operator::Or => Occur::Should,
        };
        let mut query = BooleanQuery::new().with_boost(boost);
        for term in rest {
            query.add_clause(occur, TermQuery::new(field, term.as_str()).into());
        }
        query.add_clause(occur, PrefixQuery::new(field, last.as_str()).into());

        if let (Some(minimum), Occur::Should) = (minimum, occur) {
            query.set_minimum_should_match(calculate_min(terms.len(), minimum)?);
        }
        Ok(query.into())
    }

    pub(super) fn match_phrase_prefix_query(&self, body: &Body) -> Result<Query> {
        let (field, options) = field_options("match_phrase_prefix", body, "query")?;

        let mut text = String::new();
        let mut analyzer = None;
        let mut slop = 0;
        let mut boost = Boost::UNSET;
        for (key, option) in options {
            match key.as_str() {
                "query" => text = value::string("match_phrase_prefix", &key, option)?,
                "analyzer" => {
                    analyzer = Some(value::string("match_phrase_prefix", &key, option)?)
                }
                "slop" => slop = value::unsigned("match_phrase_prefix", &key, option)?,
                "boost" => boost = value::boost("match_phrase_prefix", &key, option)?,
                _ => return Err(unknown_field("match_phrase_prefix", &key)),
            }
        }

        let analyzer = self.query_analyzer(analyzer.as_deref(), field)?;
        self.phrase_prefix_rule(field, &text, analyzer, slop, boost)
    }

    /// A prefix on the last token, and the phrase of the others before it.
    fn phrase_prefix_rule(
        &self,
        field: &str,
        text: &str,
        analyzer: Option<AnalyzerRef>,
        slop: u32,
        boost: Boost,
    ) -> Result<Query> {
        let terms = self.analyze_terms(analyzer.as_ref(), text)?;
        let Some((last, rest)) = terms.split_last() else {
            return Ok(Query::MatchNone);
        };

        let mut query = BooleanQuery::new().with_boost(boost);
        query.add_must(PrefixQuery::new(field, last.as_str()).into());
        if !rest.is_empty() {
            query.add_must(
                MatchPhraseQuery::new(field, rest.join(" "))
                    .with_analyzer(analyzer)
                    .with_slop(slop)
                    .into(),
            );
        }
        Ok(query.into())
    }

    pub(super) fn multi_match_query(&self, body: &Body) -> Result<Query> {
        self.multi_field_query("multi_match", body)
    }

    pub(super) fn combined_fields_query(&self, body: &Body) -> Result<Query> {
        self.multi_field_query("combined_fields", body)
    }

    /// One clause per field, combined in a should-bool.
    fn multi_field_query(&self, kind: &str, body: &Body) -> Result<Query> {
        let mut text = String::new();
        let mut analyzer = None;
        let mut fields = None;
        let mut match_type = MultiMatchType::BestFields;
        let mut operator = Operator::Or;
        let mut minimum = None;
        let mut boost = Boost::UNSET;
        for (key, option) in body {
            let key = key.to_lowercase();
            match key.as_str() {
                "query" => text = value::string(kind, &key, option)?,
                "analyzer" => analyzer = Some(value::string(kind, &key, option)?),
                "fields" => fields = Some(value::strings(kind, &key, option)?),
                "type" if kind == "multi_match" => {
                    match_type = MultiMatchType::parse(kind, &value::string(kind, &key, option)?)?
                }
                "operator" => operator = value::operator(kind, &key, option)?,
                "minimum_should_match" => minimum = Some(integer_minimum(kind, option)?),
                "boost" => boost = value::boost(kind, &key, option)?,
                _ => return Err(unknown_field(kind, &key)),
            }
        }

        let fields = match fields {
            Some(fields) => fields
                .iter()
                .map(|field| field_with_boost(kind, field))
                .collect::<Result<Vec<_>>>()?,
            None => self
                .mappings
                .fields_of_type(&[FieldType::Text, FieldType::Keyword])
                .map(|field| (field.to_string(), Boost::UNSET))
                .collect(),
        };
        if fields.is_empty() {
            return Ok(Query::MatchNone);
        }

        let mut query = BooleanQuery::new().with_boost(boost);
        for (field, field_boost) in &fields {
            let analyzer = self.query_analyzer(analyzer.as_deref(), field)?;
            let clause: Query = match match_type {
                MultiMatchType::BestFields
                | MultiMatchType::MostFields
                | MultiMatchType::CrossFields => MatchQuery::new(field.as_str(), text.as_str())
                    .with_analyzer(analyzer)
                    .with_operator(operator)
                    .with_boost(*field_boost)
                    .into(),
                MultiMatchType::Phrase => MatchPhraseQuery::new(field.as_str(), text.as_str())
                    .with_analyzer(analyzer)
                    .with_boost(*field_boost)
                    .into(),
                MultiMatchType::PhrasePrefix => {
                    self.phrase_prefix_rule(field, &text, analyzer, 0, *field_boost)?
                }
                MultiMatchType::BoolPrefix => self.bool_prefix_rule(
                    field,
                    &text,
                    analyzer.as_ref(),
                    operator,
                    None,
                    *field_boost,
                )?,
            };
            query.add_should(clause);
        }

        if let Some(minimum) = minimum {
            query.set_minimum_should_match(calculate_min(query.should().len(), &minimum)?);
        }
        Ok(query.into())
    }
}

/// `minimum_should_match` of the multi-field queries only takes a count.
fn integer_minimum(kind: &str, value: &Value) -> Result<Value> {
    match value {
        Value::String(s) if s.contains('%') || s.contains('<') => {
            Err(QueryDslError::x_content_parse(format!(
                "[{kind}] minimum_should_match value only support integer"
            )))
        }
        Value::Number(_) | Value::String(_) => Ok(value.clone()),
        other => Err(value::mismatch(kind, "minimum_should_match", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::registry::AnalyzerRegistry;
    use crate::dsl::translate;
    use crate::error::ErrorKind;
    use crate::mapping::{Mappings, Property};
    use serde_json::json;

    fn mappings() -> Mappings {
        Mappings::new()
            .with_property("title", Property::new(FieldType::Text))
            .with_property("body", Property::new(FieldType::Text).with_search_analyzer("simple"))
            .with_property("tag", Property::new(FieldType::Keyword))
            .with_property("age", Property::new(FieldType::Numeric))
    }

    fn run(request: Value) -> Result<Query> {
        translate(Some(&request), &mappings(), &AnalyzerRegistry::new())
    }

    fn root_reason(request: Value) -> (ErrorKind, String) {
        let err = run(request).unwrap_err();
        let root = err.root_cause();
        (root.kind(), root.reason())
    }

    #[test]
    fn test_match_shorthand_and_options() {
        let query = run(json!({"match": {"title": "Quick Fox"}})).unwrap();
        assert_eq!(query, MatchQuery::new("title", "Quick Fox").into());

        let query = run(json!({"match": {"title": {
            "query": "fox",
            "operator": "AND",
            "fuzziness": 1,
            "boost": 2
        }}}))
        .unwrap();
        assert_eq!(query.description(), "title:(fox)[AND]~1^2");
    }

    #[test]
    fn test_match_analyzer_resolution() {
        let query = run(json!({"match": {"body": "fox"}})).unwrap();
        let Query::Match(body) = query else { panic!("expected a match query") };
        assert_eq!(body.analyzer().map(AnalyzerRef::name), Some("simple"));

        let query = run(json!({"match": {"body": {"query": "fox", "analyzer": "keyword"}}})).unwrap();
        let Query::Match(body) = query else { panic!("expected a match query") };
        assert_eq!(body.analyzer().map(AnalyzerRef::name), Some("keyword"));

        let (kind, reason) = root_reason(json!({"match": {"body": {"query": "x", "analyzer": "nope"}}}));
        assert_eq!(kind, ErrorKind::XContentParseException);
        assert_eq!(reason, "analyzer [nope] does not exist");
    }

    #[test]
    fn test_match_minimum_should_match() {
        let query = run(json!({"match": {"title": {
            "query": "The quick brown fox",
            "minimum_should_match": "75%"
        }}}))
        .unwrap();
        assert_eq!(query.description(), "(title:the title:quick title:brown title:fox)~3");

        let query = run(json!({"match": {"title": {"query": "  ", "minimum_should_match": 1}}})).unwrap();
        assert_eq!(query, Query::MatchNone);

        let query = run(json!({"match": {"title": {
            "query": "fox dog",
            "fuzziness": 1,
            "minimum_should_match": 1,
            "boost": 2
        }}}))
        .unwrap();
        assert_eq!(query.description(), "(title:fox~1^2 title:dog~1^2)~1^2");
    }

    #[test]
    fn test_match_errors() {
        let (kind, reason) = root_reason(json!({"match": {"title": {"query": "x", "operator": "xor"}}}));
        assert_eq!(kind, ErrorKind::IllegalArgumentException);
        assert_eq!(reason, "[match] unknown operator XOR");

        let (kind, reason) = root_reason(json!({"match": {"title": ["x"]}}));
        assert_eq!(kind, ErrorKind::XContentParseException);
        assert_eq!(reason, "[match] title doesn't support values of type: array");

        assert!(run(json!({"match": {"title": {"query": "x", "zero_terms_query": "all"}}})).is_ok());
    }

    #[test]
    fn test_match_phrase() {
        let query = run(json!({"match_phrase": {"title": {"query": "quick fox", "slop": 2}}})).unwrap();
        assert_eq!(query.description(), "title:\"quick fox\"~2");

        let (kind, reason) = root_reason(json!({"match_phrase": {"title": {"query": "x", "nope": 1}}}));
        assert_eq!(kind, ErrorKind::ParsingException);
        assert_eq!(reason, "[match_phrase] unknown field [nope]");
    }

    #[test]
    fn test_match_bool_prefix() {
        let query = run(json!({"match_bool_prefix": {"title": "Quick Brown F"}})).unwrap();
        assert_eq!(query.description(), "(title:quick title:brown title:f*)");

        let query = run(json!({"match_bool_prefix": {"title": {
            "query": "quick brown f",
            "operator": "and",
            "boost": 3
        }}}))
        .unwrap();
        assert_eq!(query.description(), "(+title:quick +title:brown +title:f*)^3");

        let query = run(json!({"match_bool_prefix": {"title": {
            "query": "quick brown f",
            "minimum_should_match": 2
        }}}))
        .unwrap();
        assert_eq!(query.as_bool().unwrap().minimum_should_match(), Some(2));

        assert_eq!(run(json!({"match_bool_prefix": {"title": ""}})).unwrap(), Query::MatchNone);
    }

    #[test]
    fn test_match_phrase_prefix() {
        let query = run(json!({"match_phrase_prefix": {"title": "Quick Brown F"}})).unwrap();
        assert_eq!(query.description(), "(+title:f* +title:\"quick brown\")");

        let query = run(json!({"match_phrase_prefix": {"title": {"query": "qui", "boost": 2}}})).unwrap();
        assert_eq!(query.description(), "(+title:qui*)^2");

        assert_eq!(run(json!({"match_phrase_prefix": {"title": "..."}})).unwrap(), Query::MatchNone);
    }

    #[test]
    fn test_multi_match_fields() {
        let query = run(json!({"multi_match": {"query": "fox", "fields": ["title^3", "tag"]}})).unwrap();
        assert_eq!(query.description(), "(title:(fox)^3 tag:(fox))");

        let query = run(json!({"multi_match": {"query": "fox"}})).unwrap();
        assert_eq!(query.description(), "(body:(fox) tag:(fox) title:(fox))");

        let empty = translate(
            Some(&json!({"multi_match": {"query": "fox"}})),
            &Mappings::new(),
            &AnalyzerRegistry::new(),
        )
        .unwrap();
        assert_eq!(empty, Query::MatchNone);
    }

    #[test]
    fn test_multi_match_types() {
        let query = run(json!({"multi_match": {
            "query": "quick fox",
            "fields": ["title"],
            "type": "phrase"
        }}))
        .unwrap();
        assert_eq!(query.description(), "(title:\"quick fox\")");

        let query = run(json!({"multi_match": {
            "query": "quick fo",
            "fields": ["title"],
            "type": "phrase_prefix"
        }}))
        .unwrap();
        assert_eq!(query.description(), "((+title:fo* +title:\"quick\"))");

        let query = run(json!({"multi_match": {
            "query": "quick fo",
            "fields": ["title"],
            "type": "bool_prefix"
        }}))
        .unwrap();
        assert_eq!(query.description(), "((title:quick title:fo*))");

        let (kind, _) = root_reason(json!({"multi_match": {"query": "x", "type": "loose"}}));
        assert_eq!(kind, ErrorKind::IllegalArgumentException);
    }

    #[test]
    fn test_multi_match_minimum_should_match() {
        let query = run(json!({"multi_match": {
            "query": "fox",
            "fields": ["title", "tag", "body"],
            "minimum_should_match": 2
        }}))
        .unwrap();
        assert_eq!(query.as_bool().unwrap().minimum_should_match(), Some(2));

        let (kind, reason) = root_reason(json!({"multi_match": {"query": "x", "minimum_should_match": "50%"}}));
        assert_eq!(kind, ErrorKind::XContentParseException);
        assert_eq!(reason, "[multi_match] minimum_should_match value only support integer");

        let (kind, reason) = root_reason(json!({"multi_match": {"query": "x", "operator": "nand"}}));
        assert_eq!(kind, ErrorKind::IllegalArgumentException);
        assert_eq!(reason, "[multi_match] unknown operator NAND");
    }

    #[test]
    fn test_combined_fields() {
        let combined = run(json!({"combined_fields": {"query": "fox", "fields": ["title", "body"]}})).unwrap();
        let multi = run(json!({"multi_match": {"query": "fox", "fields": ["title", "body"]}})).unwrap();
        assert_eq!(combined, multi);

        let (kind, _) = root_reason(json!({"combined_fields": {"query": "x", "type": "phrase"}}));
        assert_eq!(kind, ErrorKind::ParsingException);
    }
}
