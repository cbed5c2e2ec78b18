//! Term-expanding queries: `regexp`, `prefix`, `wildcard` and `fuzzy`.

use super::value::{self, field_options, unknown_field};
use super::{Body, Translator};
use crate::error::{QueryDslError, Result};
use crate::query::{Boost, FuzzyQuery, PrefixQuery, Query, RegexpQuery, WildcardQuery};

fn require_value(kind: &str, field: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| QueryDslError::parsing(format!("[{kind}] query on [{field}] requires [value]")))
}

impl Translator<'_> {
    pub(super) fn regexp_query(&self, body: &Body) -> Result<Query> {
        let (field, options) = field_options("regexp", body, "value")?;

        let mut pattern = None;
        let mut flags = None;
        let mut boost = Boost::UNSET;
        for (key, option) in options {
            match key.as_str() {
                "value" => pattern = Some(value::string("regexp", &key, option)?),
                "flags" => flags = Some(value::string("regexp", &key, option)?),
                "boost" => boost = value::boost("regexp", &key, option)?,
                _ => return Err(unknown_field("regexp", &key)),
            }
        }

        let query = RegexpQuery::new(field, require_value("regexp", field, pattern)?)
            .with_flags(flags)
            .with_boost(boost);
        query.compile()?;
        Ok(query.into())
    }

    pub(super) fn prefix_query(&self, body: &Body) -> Result<Query> {
        let (field, options) = field_options("prefix", body, "value")?;

        let mut prefix = None;
        let mut case_insensitive = false;
        let mut boost = Boost::UNSET;
        for (key, option) in options {
            match key.as_str() {
                "value" => prefix = Some(value::string("prefix", &key, option)?),
                "case_insensitive" => case_insensitive = value::boolean("prefix", &key, option)?,
                "boost" => boost = value::boost("prefix", &key, option)?,
                _ => return Err(unknown_field("prefix", &key)),
            }
        }

        let mut prefix = require_value("prefix", field, prefix)?;
        if case_insensitive {
            prefix = prefix.to_lowercase();
        }
        Ok(PrefixQuery::new(field, prefix).with_boost(boost).into())
    }

    pub(super) fn wildcard_query(&self, body: &Body) -> Result<Query> {
        let (field, options) = field_options("wildcard", body, "value")?;

        let mut pattern = None;
        let mut case_insensitive = false;
        let mut boost = Boost::UNSET;
        for (key, option) in options {
            match key.as_str() {
                "value" | "wildcard" => pattern = Some(value::string("wildcard", &key, option)?),
                "case_insensitive" => {
                    case_insensitive = value::boolean("wildcard", &key, option)?
                }
                "boost" => boost = value::boost("wildcard", &key, option)?,
                _ => return Err(unknown_field("wildcard", &key)),
            }
        }

        let mut pattern = require_value("wildcard", field, pattern)?;
        if case_insensitive {
            pattern = pattern.to_lowercase();
        }
        let query = WildcardQuery::new(field, pattern).with_boost(boost);
        query.compile()?;
        Ok(query.into())
    }

    pub(super) fn fuzzy_query(&self, body: &Body) -> Result<Query> {
        let (field, options) = field_options("fuzzy", body, "value")?;

        let mut term = None;
        let mut fuzziness = None;
        let mut prefix_length = 0;
        let mut boost = Boost::UNSET;
        for (key, option) in options {
            match key.as_str() {
                "value" => term = Some(value::string("fuzzy", &key, option)?),
                "fuzziness" => fuzziness = value::fuzziness("fuzzy", option)?,
                "prefix_length" => prefix_length = value::unsigned("fuzzy", &key, option)?,
                "boost" => boost = value::boost("fuzzy", &key, option)?,
                _ => return Err(unknown_field("fuzzy", &key)),
            }
        }

        let mut query = FuzzyQuery::new(field, require_value("fuzzy", field, term)?)
            .with_prefix_length(prefix_length)
            .with_boost(boost);
        if let Some(distance) = fuzziness {
            query = query.with_fuzziness(distance);
        }
        Ok(query.into())
    }
}
