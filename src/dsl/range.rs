//! `range` over numeric and date fields.

use chrono::{DateTime, Utc};
use log::debug;
use serde_json::Value;

use super::value::{self, single_field, unknown_field};
use super::{Body, Translator};
use crate::error::{QueryDslError, Result};
use crate::mapping::{FieldType, json_type};
use crate::query::{Boost, DateRangeQuery, NumericRangeQuery, Query};
use crate::util::time::{DateFormat, Zone, parse_time_zone};

/// The raw options of one range body.
#[derive(Debug, Default)]
struct RangeOptions<'b> {
    gt: Option<&'b Value>,
    gte: Option<&'b Value>,
    lt: Option<&'b Value>,
    lte: Option<&'b Value>,
    format: Option<String>,
    time_zone: Option<String>,
    boost: Boost,
}

impl<'b> RangeOptions<'b> {
    fn parse(body: &'b Body) -> Result<Self> {
        let mut options = RangeOptions::default();
        for (key, option) in body {
            let key = key.to_lowercase();
            match key.as_str() {
                "gt" => options.gt = Some(option),
                "gte" => options.gte = Some(option),
                "lt" => options.lt = Some(option),
                "lte" => options.lte = Some(option),
                "format" => options.format = Some(value::string("range", &key, option)?),
                "time_zone" => options.time_zone = Some(value::string("range", &key, option)?),
                "boost" => options.boost = value::boost("range", &key, option)?,
                _ => return Err(unknown_field("range", &key)),
            }
        }
        Ok(options)
    }

    /// The bounds that are present, lower ones first, `gte` after `gt` and
    /// `lte` after `lt`.
    fn bounds(&self) -> impl Iterator<Item = (&'static str, &'b Value)> + '_ {
        [("gt", self.gt), ("gte", self.gte), ("lt", self.lt), ("lte", self.lte)]
            .into_iter()
            .filter_map(|(op, bound)| bound.map(|bound| (op, bound)))
    }
}

impl Translator<'_> {
    pub(super) fn range_query(&self, body: &Body) -> Result<Query> {
        let (field, value) = single_field("range", body)?;
        let body = value.as_object().ok_or_else(|| {
            QueryDslError::parsing(format!(
                "[range] query doesn't support values of type: {}",
                json_type(value)
            ))
        })?;
        let options = RangeOptions::parse(body)?;

        match self.mappings.field_type(field) {
            Some(FieldType::Numeric) => numeric_range(field, &options),
            Some(FieldType::Date) => self.date_range(field, &options),
            other => Err(QueryDslError::x_content_parse(format!(
                "[range] {field} only support values of [numeric, time], got [{}]",
                other.map_or("unmapped", |t| t.as_str())
            ))),
        }
    }

    /// The date format and time zone for bounds on `field`: the query's
    /// own, else the mapping's, else RFC 3339 in UTC.
    pub(super) fn date_context(
        &self,
        field: &str,
        format: Option<&str>,
        time_zone: Option<&str>,
    ) -> Result<(DateFormat, Zone)> {
        let property = self.mappings.lookup(field);
        let format = format
            .or_else(|| property.and_then(|p| p.format.as_deref()))
            .map_or(DateFormat::Rfc3339, DateFormat::parse);
        let time_zone = time_zone
            .or_else(|| property.and_then(|p| p.time_zone.as_deref()))
            .unwrap_or("UTC");
        let zone = parse_time_zone(time_zone).map_err(|detail| {
            QueryDslError::x_content_parse(format!("[range] {field} time_zone parse err {detail}"))
        })?;
        debug!("date bounds on [{field}] read as {format:?} in {zone}");
        Ok((format, zone))
    }

    fn date_range(&self, field: &str, options: &RangeOptions<'_>) -> Result<Query> {
        let (format, zone) =
            self.date_context(field, options.format.as_deref(), options.time_zone.as_deref())?;

        let mut min = None;
        let mut max = None;
        let mut min_inclusive = false;
        let mut max_inclusive = false;
        for (op, bound) in options.bounds() {
            let date = parse_date(field, op, &format, zone, bound)?;
            match op {
                "gt" => min = Some(date),
                "gte" => (min, min_inclusive) = (Some(date), true),
                "lt" => max = Some(date),
                _ => (max, max_inclusive) = (Some(date), true),
            }
        }

        Ok(DateRangeQuery::new(field, min, max.unwrap_or_else(Utc::now), min_inclusive, max_inclusive)
            .with_boost(options.boost)
            .into())
    }
}

pub(super) fn parse_date(
    field: &str,
    op: &str,
    format: &DateFormat,
    zone: Zone,
    bound: &Value,
) -> Result<DateTime<Utc>> {
    format.parse_value(bound, zone).map_err(|detail| {
        QueryDslError::x_content_parse(format!("[range] {field} range.{op} format err {detail}"))
    })
}

/// Zero and negative bounds read as unset; an unset upper bound is
/// `i64::MAX`.
fn numeric_range(field: &str, options: &RangeOptions<'_>) -> Result<Query> {
    let mut min = None;
    let mut max = None;
    let mut min_inclusive = false;
    let mut max_inclusive = false;
    for (op, bound) in options.bounds() {
        let number = value::float("range", op, bound)?;
        if number <= 0.0 {
            continue;
        }
        match op {
            "gt" => min = Some(number),
            "gte" => (min, min_inclusive) = (Some(number), true),
            "lt" => max = Some(number),
            _ => (max, max_inclusive) = (Some(number), true),
        }
    }

    let max = max.unwrap_or(i64::MAX as f64);
    Ok(NumericRangeQuery::new(field, min, Some(max), min_inclusive, max_inclusive)
        .with_boost(options.boost)
        .into())
}
