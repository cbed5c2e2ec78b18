//! Exact-value queries: `term`, `terms`, `ids`, `exists` and `terms_set`.

use serde_json::Value;

use super::value::{self, mismatch, scalar_f64, scalar_text, single_field, unknown_field};
use super::{Body, Translator, calculate_min};
use crate::error::{QueryDslError, Result};
use crate::mapping::{FieldType, ID_FIELD, json_type};
use crate::query::{BooleanQuery, Boost, ExistsQuery, NumericRangeQuery, Query, TermQuery};

impl Translator<'_> {
    pub(super) fn term_query(&self, body: &Body) -> Result<Query> {
        let (field, value) = single_field("term", body)?;

        let (term, case_insensitive, boost) = match value {
            Value::Object(options) => {
                let mut term = None;
                let mut case_insensitive = false;
                let mut boost = Boost::UNSET;
                for (key, option) in options {
                    match key.to_lowercase().as_str() {
                        "value" => term = Some(option),
                        "case_insensitive" => {
                            case_insensitive = value::boolean("term", key, option)?
                        }
                        "boost" => boost = value::boost("term", key, option)?,
                        _ => return Err(unknown_field("term", key)),
                    }
                }
                let term = term.ok_or_else(|| {
                    QueryDslError::parsing(format!("[term] query on [{field}] requires [value]"))
                })?;
                (term, case_insensitive, boost)
            }
            scalar => (scalar, false, Boost::UNSET),
        };

        Ok(self.term_rule("term", field, term, case_insensitive)?.with_boost(boost))
    }

    /// One exact value on `field`, shaped by the field's mapped type.
    pub(super) fn term_rule(
        &self,
        kind: &str,
        field: &str,
        value: &Value,
        case_insensitive: bool,
    ) -> Result<Query> {
        let text = scalar_text(value).ok_or_else(|| {
            QueryDslError::x_content_parse(format!(
                "[{kind}] doesn't support values of type: {}",
                json_type(value)
            ))
        })?;

        let query: Query = match (self.mappings.field_type(field), value) {
            (Some(FieldType::Numeric), _) | (None, Value::Number(_)) => {
                let number = scalar_f64(value).ok_or_else(|| {
                    QueryDslError::x_content_parse(format!(
                        "[{kind}] {field} value [{text}] is not a number"
                    ))
                })?;
                return Ok(NumericRangeQuery::exact(field, number).into());
            }
            (Some(FieldType::Bool), _) => {
                let literal = value::boolean(kind, field, value).map_err(|_| {
                    QueryDslError::x_content_parse(format!(
                        "[{kind}] {field} value [{text}] is not a boolean"
                    ))
                })?;
                return Ok(TermQuery::new(field, literal.to_string()).into());
            }
            (None, Value::Bool(b)) => TermQuery::new(field, b.to_string()).into(),
            _ => TermQuery::new(field, text.clone()).into(),
        };

        if case_insensitive {
            return Ok(TermQuery::new(field, text.to_lowercase()).into());
        }
        Ok(query)
    }

    pub(super) fn terms_query(&self, body: &Body) -> Result<Query> {
        let mut boost = Boost::UNSET;
        let mut target = None;
        for (key, option) in body {
            if key.eq_ignore_ascii_case("boost") {
                boost = value::boost("terms", key, option)?;
            } else if target.replace((key.as_str(), option)).is_some() {
                return Err(QueryDslError::parsing("[terms] query doesn't support multiple fields"));
            }
        }
        let (field, values) = target
            .ok_or_else(|| QueryDslError::parsing("[terms] query requires a field"))?;

        let values = values.as_array().ok_or_else(|| {
            QueryDslError::x_content_parse(format!(
                "[terms] doesn't support values of type: {}",
                json_type(values)
            ))
        })?;
        self.terms_rule("terms", field, values, boost)
    }

    /// A should-bool of one exact clause per value, in input order.
    fn terms_rule(&self, kind: &str, field: &str, values: &[Value], boost: Boost) -> Result<Query> {
        let mut query = BooleanQuery::new().with_boost(boost);
        for value in values {
            query.add_should(self.term_rule(kind, field, value, false)?);
        }
        Ok(query.into())
    }

    pub(super) fn ids_query(&self, body: &Body) -> Result<Query> {
        let mut boost = Boost::UNSET;
        let mut values = None;
        for (key, option) in body {
            match key.to_lowercase().as_str() {
                "values" => values = Some(option),
                "boost" => boost = value::boost("ids", key, option)?,
                _ => return Err(unknown_field("ids", key)),
            }
        }
        let values = values.ok_or_else(|| QueryDslError::parsing("[ids] query requires [values]"))?;
        let values = values.as_array().ok_or_else(|| mismatch("ids", "values", values))?;
        self.terms_rule("ids", ID_FIELD, values, boost)
    }

    pub(super) fn exists_query(&self, body: &Body) -> Result<Query> {
        let mut field = None;
        for (key, option) in body {
            match key.to_lowercase().as_str() {
                "field" => field = Some(value::string("exists", key, option)?),
                "boost" => {}
                _ => return Err(unknown_field("exists", key)),
            }
        }
        match field {
            Some(field) if !field.is_empty() => Ok(ExistsQuery::new(field).into()),
            _ => Err(QueryDslError::parsing("[exists] query requires field")),
        }
    }

    pub(super) fn terms_set_query(&self, body: &Body) -> Result<Query> {
        let (field, options) = single_field("terms_set", body)?;
        let options = value::object("terms_set", field, options)?;

        let mut terms = None;
        let mut minimum = None;
        let mut boost = Boost::UNSET;
        for (key, option) in options {
            match key.to_lowercase().as_str() {
                "terms" => terms = Some(option),
                "minimum_should_match" => minimum = Some(option),
                "minimum_should_match_field" | "minimum_should_match_script" => {
                    return Err(QueryDslError::not_implemented(format!(
                        "[terms_set] {key} is not supported"
                    )));
                }
                "boost" => boost = value::boost("terms_set", key, option)?,
                _ => return Err(unknown_field("terms_set", key)),
            }
        }

        let terms = terms.ok_or_else(|| QueryDslError::parsing("[terms_set] query requires [terms]"))?;
        let terms = terms.as_array().ok_or_else(|| mismatch("terms_set", "terms", terms))?;

        let mut query = BooleanQuery::new().with_boost(boost);
        for term in terms {
            query.add_should(self.term_rule("terms_set", field, term, false)?);
        }
        if let Some(minimum) = minimum {
            let minimum = calculate_min(query.should().len(), minimum)?;
            query.set_minimum_should_match(minimum);
        }
        Ok(query.into())
    }
}
