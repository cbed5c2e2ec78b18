//! Typed access to the options of a query body.
//!
//! Every helper takes the query kind and option key so that a value of the
//! wrong JSON type is reported as
//! `"[<kind>] <key> doesn't support values of type: <type>"`.

use log::warn;
use serde_json::{Map, Value};

use crate::error::{QueryDslError, Result};
use crate::mapping::json_type;
use crate::query::{Boost, Operator};

pub(crate) fn mismatch(kind: &str, key: &str, value: &Value) -> QueryDslError {
    QueryDslError::x_content_parse(format!(
        "[{kind}] {key} doesn't support values of type: {}",
        json_type(value)
    ))
}

pub(crate) fn unknown_field(kind: &str, key: &str) -> QueryDslError {
    QueryDslError::parsing(format!("[{kind}] unknown field [{key}]"))
}

/// Render a scalar as text: strings as they are, numbers in decimal and
/// booleans as `true` / `false`.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A number, or a string holding one.
pub(crate) fn scalar_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn string(kind: &str, key: &str, value: &Value) -> Result<String> {
    scalar_text(value).ok_or_else(|| mismatch(kind, key, value))
}

pub(crate) fn float(kind: &str, key: &str, value: &Value) -> Result<f64> {
    scalar_f64(value).ok_or_else(|| mismatch(kind, key, value))
}

/// A non-negative integer, floored. Negative values read as 0.
pub(crate) fn unsigned(kind: &str, key: &str, value: &Value) -> Result<u32> {
    Ok(float(kind, key, value)?.floor().max(0.0) as u32)
}

pub(crate) fn boolean(kind: &str, key: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(mismatch(kind, key, value)),
    }
}

pub(crate) fn boost(kind: &str, key: &str, value: &Value) -> Result<Boost> {
    Ok(Boost::new(float(kind, key, value)?))
}

/// An array of scalars as text. A lone scalar is read as one element.
pub(crate) fn strings(kind: &str, key: &str, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| scalar_text(item).ok_or_else(|| mismatch(kind, key, item)))
            .collect(),
        scalar => Ok(vec![string(kind, key, scalar)?]),
    }
}

pub(crate) fn object<'v>(kind: &str, key: &str, value: &'v Value) -> Result<&'v Map<String, Value>> {
    value.as_object().ok_or_else(|| mismatch(kind, key, value))
}

/// The only field of a single-field query body.
pub(crate) fn single_field<'b>(
    kind: &str,
    body: &'b Map<String, Value>,
) -> Result<(&'b str, &'b Value)> {
    if body.len() > 1 {
        return Err(QueryDslError::parsing(format!(
            "[{kind}] query doesn't support multiple fields"
        )));
    }
    body.iter()
        .next()
        .map(|(field, value)| (field.as_str(), value))
        .ok_or_else(|| QueryDslError::parsing(format!("[{kind}] query requires a field")))
}

/// An edit distance. `AUTO` variants are accepted and yield `None`.
pub(crate) fn fuzziness(kind: &str, value: &Value) -> Result<Option<u32>> {
    if let Value::String(s) = value {
        if s.trim().to_uppercase().starts_with("AUTO") {
            warn!("[{kind}] fuzziness [{s}] is not supported, no edit distance applied");
            return Ok(None);
        }
    }
    match scalar_f64(value) {
        Some(n) if n >= 0.0 => Ok(Some(n.floor() as u32)),
        _ => Err(QueryDslError::x_content_parse(format!(
            "[{kind}] fuzziness doesn't support value [{}]",
            scalar_text(value).unwrap_or_else(|| json_type(value).to_string())
        ))),
    }
}

/// The field of a single-field query and its options, with option keys
/// lowercased. A scalar body is shorthand for `{<shorthand>: scalar}`.
pub(crate) fn field_options<'b>(
    kind: &str,
    body: &'b Map<String, Value>,
    shorthand: &str,
) -> Result<(&'b str, Vec<(String, &'b Value)>)> {
    let (field, value) = single_field(kind, body)?;
    let options = match value {
        Value::Object(options) => options
            .iter()
            .map(|(key, option)| (key.to_lowercase(), option))
            .collect(),
        Value::String(_) | Value::Number(_) | Value::Bool(_) => {
            vec![(shorthand.to_string(), value)]
        }
        other => return Err(mismatch(kind, field, other)),
    };
    Ok((field, options))
}

pub(crate) fn operator(kind: &str, key: &str, value: &Value) -> Result<Operator> {
    string(kind, key, value)?.parse().map_err(|op: String| {
        QueryDslError::illegal_argument(format!("[{kind}] unknown operator {op}"))
    })
}

/// Split a `field^boost` name.
pub(crate) fn field_with_boost(kind: &str, spec: &str) -> Result<(String, Boost)> {
    match spec.rsplit_once('^') {
        Some((field, boost)) => {
            let boost: f64 = boost.trim().parse().map_err(|_| {
                QueryDslError::x_content_parse(format!("[{kind}] invalid field boost [{spec}]"))
            })?;
            Ok((field.to_string(), Boost::new(boost)))
        }
        None => Ok((spec.to_string(), Boost::UNSET)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(scalar_text(&json!("a")), Some("a".to_string()));
        assert_eq!(scalar_text(&json!(5)), Some("5".to_string()));
        assert_eq!(scalar_text(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(scalar_text(&json!(false)), Some("false".to_string()));
        assert_eq!(scalar_text(&json!([1])), None);

        assert_eq!(scalar_f64(&json!(" 7 ")), Some(7.0));
        assert_eq!(scalar_f64(&json!("x")), None);
    }

    #[test]
    fn test_mismatch_message() {
        let err = float("range", "gt", &json!([1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::XContentParseException);
        assert_eq!(err.reason(), "[range] gt doesn't support values of type: array");
    }

    #[test]
    fn test_boolean_and_unsigned() {
        assert!(boolean("term", "case_insensitive", &json!("TRUE")).unwrap());
        assert!(boolean("term", "case_insensitive", &json!(1)).is_err());
        assert_eq!(unsigned("fuzzy", "prefix_length", &json!(2.9)).unwrap(), 2);
        assert_eq!(unsigned("fuzzy", "prefix_length", &json!(-3)).unwrap(), 0);
    }

    #[test]
    fn test_strings() {
        assert_eq!(strings("x", "fields", &json!(["a", 1])).unwrap(), vec!["a", "1"]);
        assert_eq!(strings("x", "fields", &json!("a")).unwrap(), vec!["a"]);
        assert!(strings("x", "fields", &json!([{}])).is_err());
    }

    #[test]
    fn test_single_field() {
        let body = json!({"title": "x"});
        let (field, value) = single_field("match", body.as_object().unwrap()).unwrap();
        assert_eq!(field, "title");
        assert_eq!(value, &json!("x"));

        let body = json!({"a": 1, "b": 2});
        let err = single_field("match", body.as_object().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParsingException);

        let body = json!({});
        assert!(single_field("match", body.as_object().unwrap()).is_err());
    }

    #[test]
    fn test_fuzziness() {
        assert_eq!(fuzziness("fuzzy", &json!(1)).unwrap(), Some(1));
        assert_eq!(fuzziness("fuzzy", &json!("2")).unwrap(), Some(2));
        assert_eq!(fuzziness("fuzzy", &json!("AUTO")).unwrap(), None);
        assert_eq!(fuzziness("fuzzy", &json!("auto:3,6")).unwrap(), None);
        assert!(fuzziness("fuzzy", &json!("lots")).is_err());
    }

    #[test]
    fn test_field_options() {
        let body = json!({"title": "quick fox"});
        let (field, options) = field_options("match", body.as_object().unwrap(), "query").unwrap();
        assert_eq!(field, "title");
        assert_eq!(options, vec![("query".to_string(), &json!("quick fox"))]);

        let body = json!({"title": {"Query": "fox", "boost": 2}});
        let (_, options) = field_options("match", body.as_object().unwrap(), "query").unwrap();
        let keys: Vec<&str> = options.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["boost", "query"]);

        let body = json!({"title": [1]});
        let err = field_options("match", body.as_object().unwrap(), "query").unwrap_err();
        assert_eq!(err.reason(), "[match] title doesn't support values of type: array");
    }

    #[test]
    fn test_operator() {
        assert_eq!(operator("match", "operator", &json!("AND")).unwrap(), Operator::And);
        let err = operator("match", "operator", &json!("xor")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalArgumentException);
        assert_eq!(err.reason(), "[match] unknown operator XOR");
    }

    #[test]
    fn test_field_with_boost() {
        assert_eq!(
            field_with_boost("multi_match", "title^3").unwrap(),
            ("title".to_string(), Boost::new(3.0))
        );
        assert_eq!(
            field_with_boost("multi_match", "body").unwrap(),
            ("body".to_string(), Boost::UNSET)
        );
        assert!(field_with_boost("multi_match", "x^y").is_err());
    }
}
