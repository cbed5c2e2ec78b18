//! Queries expanding to every indexed term matching a pattern.
//!
//! - [`PrefixQuery`]: terms starting with a prefix
//! - [`WildcardQuery`]: `*` matches any run of characters, `?` exactly one
//! - [`RegexpQuery`]: terms matching a whole-term regular expression
//!
//! The engine does the term enumeration. Each query can also test a single
//! term, which is what the pattern semantics below are checked against.

use regex::Regex;
use serde::Serialize;

use crate::error::{QueryDslError, Result};
use crate::query::Boost;

/// Terms starting with `prefix`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrefixQuery {
    field: String,
    prefix: String,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl PrefixQuery {
    pub fn new<F: Into<String>, P: Into<String>>(field: F, prefix: P) -> Self {
        PrefixQuery {
            field: field.into(),
            prefix: prefix.into(),
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

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    pub fn matches(&self, term: &str) -> bool {
        term.starts_with(&self.prefix)
    }

    pub(crate) fn description(&self) -> String {
        format!("{}:{}*{}", self.field, self.prefix, self.boost.suffix())
    }
}

/// Terms matching a wildcard pattern.
///
/// Supports the following wildcards:
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
/// - `\*` and `\?` match literal `*` and `?` characters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WildcardQuery {
    field: String,
    pattern: String,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl WildcardQuery {
    pub fn new<F: Into<String>, P: Into<String>>(field: F, pattern: P) -> Self {
        WildcardQuery {
            field: field.into(),
            pattern: pattern.into(),
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

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    /// Compile the pattern into an anchored regex.
    pub fn compile(&self) -> Result<Regex> {
        let mut regex_pattern = String::with_capacity(self.pattern.len() + 8);
        regex_pattern.push('^');

        let mut chars = self.pattern.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => regex_pattern.push_str(&regex::escape(&escaped.to_string())),
                    None => regex_pattern.push_str("\\\\"),
                },
                '*' => regex_pattern.push_str(".*"),
                '?' => regex_pattern.push('.'),
                c => regex_pattern.push_str(&regex::escape(&c.to_string())),
            }
        }
        regex_pattern.push('$');

        Regex::new(&regex_pattern).map_err(|e| {
            QueryDslError::x_content_parse(format!("[wildcard] invalid pattern [{}]: {e}", self.pattern))
        })
    }

    pub fn matches(&self, term: &str) -> Result<bool> {
        Ok(self.compile()?.is_match(term))
    }

    pub(crate) fn description(&self) -> String {
        format!("{}:{}{}", self.field, self.pattern, self.boost.suffix())
    }
}

/// Terms matching a regular expression over the whole term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegexpQuery {
    field: String,
    pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    flags: Option<String>,
    #[serde(skip_serializing_if = "Boost::is_unset")]
    boost: Boost,
}

impl RegexpQuery {
    pub fn new<F: Into<String>, P: Into<String>>(field: F, pattern: P) -> Self {
        RegexpQuery {
            field: field.into(),
            pattern: pattern.into(),
            flags: None,
            boost: Boost::UNSET,
        }
    }

    /// Syntax flags (`ALL`, `NONE`, `INTERSECTION|COMPLEMENT`, ...), passed
    /// through to the engine.
    pub fn with_flags(mut self, flags: Option<String>) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_boost(mut self, boost: Boost) -> Self {
        self.boost = boost;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> Option<&str> {
        self.flags.as_deref()
    }

    pub fn boost(&self) -> Boost {
        self.boost
    }

    /// Compile the pattern, anchored at both ends of the term.
    pub fn compile(&self) -> Result<Regex> {
        Regex::new(&format!("^(?:{})$", self.pattern)).map_err(|e| {
            QueryDslError::x_content_parse(format!("[regexp] invalid pattern [{}]: {e}", self.pattern))
        })
    }

    pub fn matches(&self, term: &str) -> Result<bool> {
        Ok(self.compile()?.is_match(term))
    }

    pub(crate) fn description(&self) -> String {
        format!("{}:/{}/{}", self.field, self.pattern, self.boost.suffix())
    }
}
