//! Evaluation of `minimum_should_match`.
//!
//! The value is one of:
//! - an integer (floats are floored); a negative `n` means `count + n`
//! - a percentage such as `"75%"`; a negative `-p%` means
//!   `count - floor(count * p / 100)`
//! - a combination `"N<rule"`: `count` when there are at most `N` clauses,
//!   otherwise `rule` (an integer or a percentage)
//! - a space separated list of combinations, e.g. `"3<90% 10<-2"`
//!
//! The result is clamped to `[1, count]`; with no clauses it is 1.
//!
//! # Examples
//!
//! ```
//! use querydsl::dsl::calculate_min;
//! use serde_json::json;
//!
//! assert_eq!(calculate_min(4, &json!("5<90%")).unwrap(), 4);
//! assert_eq!(calculate_min(10, &json!("4<-40% 9<-3")).unwrap(), 7);
//! assert_eq!(calculate_min(8, &json!("75%")).unwrap(), 6);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{QueryDslError, Result};

static COMBINATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)<([-+]?\d+%?)").unwrap());

fn invalid(detail: String) -> QueryDslError {
    QueryDslError::illegal_argument(format!("[minimum_should_match] {detail}"))
}

/// Number of `should` clauses out of `count` that must match.
pub fn calculate_min(count: usize, value: &Value) -> Result<usize> {
    if count == 0 {
        return Ok(1);
    }
    let count = count as i64;

    let min = match value {
        Value::Number(n) => {
            let n = n
                .as_f64()
                .ok_or_else(|| invalid(format!("invalid value [{n}]")))?
                .floor() as i64;
            if n < 0 { count + n } else { n }
        }
        Value::String(s) => {
            let parts: Vec<&str> = s.split_whitespace().collect();
            match parts.as_slice() {
                [] => return Err(invalid(format!("invalid value [{s}]"))),
                [single] => single_rule(count, single)?,
                many => combinations(count, many)?,
            }
        }
        other => return Err(invalid(format!("invalid value [{other}]"))),
    };

    Ok(min.clamp(1, count) as usize)
}

/// An integer or percentage rule applied to `count`.
fn part_value(count: i64, part: &str) -> Result<i64> {
    if let Some(percent) = part.strip_suffix('%') {
        let proportion: i64 = percent
            .parse()
            .map_err(|_| invalid(format!("cannot parse a percent value [{part}]")))?;
        let share = (count as f64 * proportion.unsigned_abs() as f64 / 100.0) as i64;
        return Ok(if proportion < 0 { count - share } else { share });
    }
    let n: i64 = part
        .parse()
        .map_err(|_| invalid(format!("cannot parse an int value [{part}]")))?;
    Ok(if n < 0 { count + n } else { n })
}

/// Parse one `N<rule` combination into its threshold and resolved count.
fn combination(count: i64, text: &str) -> Result<(i64, i64)> {
    let captures = COMBINATION
        .captures(text)
        .ok_or_else(|| invalid(format!("invalid value [{text}]")))?;
    let threshold: i64 = captures[1]
        .parse()
        .map_err(|_| invalid(format!("cannot parse the condition value [{}]", &captures[1])))?;
    Ok((threshold, part_value(count, &captures[2])?))
}

fn single_rule(count: i64, text: &str) -> Result<i64> {
    if let Ok(n) = part_value(count, text) {
        return Ok(n);
    }
    let (threshold, rule) = combination(count, text)?;
    Ok(if count <= threshold { count } else { rule })
}

fn combinations(count: i64, parts: &[&str]) -> Result<i64> {
    let mut conditions = parts
        .iter()
        .map(|part| combination(count, part))
        .collect::<Result<Vec<_>>>()?;
    conditions.sort_by_key(|(threshold, _)| *threshold);

    for (i, (threshold, rule)) in conditions.iter().enumerate() {
        if count <= *threshold {
            return Ok(count);
        }
        match conditions.get(i + 1) {
            None => return Ok(*rule),
            Some((next, _)) if count <= *next => return Ok(*rule),
            Some(_) => {}
        }
    }
    Err(invalid(format!("invalid value [{}]", parts.join(" "))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn min(count: usize, value: Value) -> usize {
        calculate_min(count, &value).unwrap()
    }

    #[test]
    fn test_combinations() {
        assert_eq!(min(4, json!("5<90%")), 4);
        assert_eq!(min(5, json!("5<90%")), 5);
        assert_eq!(min(6, json!("5<90%")), 5);
        assert_eq!(min(10, json!("4<-40% 9<-3")), 7);
        assert_eq!(min(6, json!("4<-40% 9<-3")), 4);
        assert_eq!(min(3, json!("9<-3 4<-40%")), 3);
    }

    #[test]
    fn test_integers() {
        assert_eq!(min(5, json!(2)), 2);
        assert_eq!(min(5, json!(-2)), 3);
        assert_eq!(min(5, json!(2.7)), 2);
        assert_eq!(min(5, json!("3")), 3);
        assert_eq!(min(5, json!("-1")), 4);
        assert_eq!(min(5, json!(9)), 5);
        assert_eq!(min(5, json!(0)), 1);
        assert_eq!(min(5, json!(-9)), 1);
    }

    #[test]
    fn test_percentages() {
        assert_eq!(min(8, json!("75%")), 6);
        assert_eq!(min(8, json!("-25%")), 6);
        assert_eq!(min(3, json!("50%")), 1);
        assert_eq!(min(4, json!("100%")), 4);
    }

    #[test]
    fn test_pattern_compiles() {
        assert!(COMBINATION.is_match("3<90%"));
        assert!(!COMBINATION.is_match("90%"));
    }

    #[test]
    fn test_no_clauses() {
        assert_eq!(min(0, json!("75%")), 1);
        assert_eq!(min(0, json!({})), 1);
    }

    #[test]
    fn test_invalid() {
        for value in [json!("abc"), json!("3<x"), json!("1<2 nope"), json!(true), json!("")] {
            let err = calculate_min(4, &value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IllegalArgumentException, "{value}");
            assert!(err.reason().starts_with("[minimum_should_match]"));
        }
    }
}
