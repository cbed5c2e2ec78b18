//! Numeric and date range queries.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::query::Boost;

fn bounds(min: String, max: String, min_inclusive: bool, max_inclusive: bool) -> String {
    format!(
        "{}{min} TO {max}{}",
        if min_inclusive { '[' } else { '{' },
        if max_inclusive { ']' } else { '}' }
    )
}

/// Numeric values between `min` and `max`. A missing bound is open.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericRangeQuery {
    field: String,
    min: Option<f64>,
    max: Option<f64>,
    min_inclusive: bool,
    max_inclusive: bool,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl NumericRangeQuery {
    pub fn new<F: Into<String>>(
        field: F,
        min: Option<f64>,
        max: Option<f64>,
        min_inclusive: bool,
        max_inclusive: bool,
    ) -> Self {
        NumericRangeQuery {
            field: field.into(),
            min,
            max,
            min_inclusive,
            max_inclusive,
            boost: Boost::UNSET,
        }
    }

    /// Equality, as an inclusive range of one value.
    pub fn exact<F: Into<String>>(field: F, value: f64) -> Self {
        Self::new(field, Some(value), Some(value), true, true)
    }

    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boost = boost;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn min_inclusive(&self) -> bool {
        self.min_inclusive
    }

    pub fn max_inclusive(&self) -> bool {
        self.max_inclusive
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    /// Whether `value` falls inside the range.
    pub fn contains(&self, value: f64) -> bool {
        let above = match self.min {
            Some(min) if self.min_inclusive => value >= min,
            Some(min) => value > min,
            None => true,
        };
        let below = match self.max {
            Some(max) if self.max_inclusive => value <= max,
            Some(max) => value < max,
            None => true,
        };
        above && below
    }

    pub(crate) fn description(&self) -> String {
        let show = |bound: Option<f64>| bound.map_or("*".to_string(), |v| v.to_string());
        format!(
            "{}:{}{}",
            self.field,
            bounds(show(self.min), show(self.max), self.min_inclusive, self.max_inclusive),
            self.boost.suffix()
        )
    }
}

/// Instants between `min` and `max`, in UTC. A missing `min` is open.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeQuery {
    field: String,
    min: Option<DateTime<Utc>>,
    max: DateTime<Utc>,
    min_inclusive: bool,
    max_inclusive: bool,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl DateRangeQuery {
    pub fn new<F: Into<String>>(
        field: F,
        min: Option<DateTime<Utc>>,
        max: DateTime<Utc>,
        min_inclusive: bool,
        max_inclusive: bool,
    ) -> Self {
        DateRangeQuery {
            field: field.into(),
            min,
            max,
            min_inclusive,
            max_inclusive,
            boost: Boost::UNSET,
        }
    }

    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boost = boost;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn min(&self) -> Option<DateTime<Utc>> {
        self.min
    }

    pub fn max(&self) -> DateTime<Utc> {
        self.max
    }

    pub fn min_inclusive(&self) -> bool {
        self.min_inclusive
    }

    pub fn max_inclusive(&self) -> bool {
        self.max_inclusive
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    pub(crate) fn description(&self) -> String {
        let show = |date: &DateTime<Utc>| date.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        format!(
            "{}:{}{}",
            self.field,
            bounds(
                self.min.as_ref().map_or("*".to_string(), show),
                show(&self.max),
                self.min_inclusive,
                self.max_inclusive
            ),
            self.boost.suffix()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_numeric_range() {
        let query = NumericRangeQuery::new("age", Some(18.0), Some(65.0), true, false);

        assert!(query.contains(18.0));
        assert!(query.contains(64.9));
        assert!(!query.contains(65.0));
        assert!(!query.contains(17.0));
        assert_eq!(query.description(), "age:[18 TO 65}");
    }

    #[test]
    fn test_numeric_exact() {
        let query = NumericRangeQuery::exact("price", 9.5);
        assert_eq!(query.min(), Some(9.5));
        assert_eq!(query.max(), Some(9.5));
        assert!(query.min_inclusive() && query.max_inclusive());
        assert!(query.contains(9.5));
    }

    #[test]
    fn test_open_bounds() {
        let query = NumericRangeQuery::new("n", None, Some(3.0), false, true);
        assert!(query.contains(-1000.0));
        assert_eq!(query.description(), "n:{* TO 3]");
    }

    #[test]
    fn test_date_range_description() {
        let max = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let query = DateRangeQuery::new("@timestamp", None, max, false, true);
        assert_eq!(query.description(), "@timestamp:{* TO 2024-01-01T00:00:00Z]");
    }
}
