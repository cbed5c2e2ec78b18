//! Index settings: the declarative analysis configuration.
//!
//! Settings decode from the usual JSON shape:
//!
//! ```json
//! {
//!   "analysis": {
//!     "analyzer": {
//!       "folded": { "tokenizer": "standard", "filter": ["lowercase", "ascii_folding"] }
//!     },
//!     "tokenizer": { "dash": { "type": "char_group", "tokenize_on_chars": ["-"] } },
//!     "char_filter": {},
//!     "token_filter": {}
//!   }
//! }
//! ```
//!
//! The analyzers themselves are assembled by
//! [`AnalyzerRegistry::from_settings`](crate::analysis::registry::AnalyzerRegistry::from_settings).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QueryDslError, Result};

// ============================================================================
// Index settings
// ============================================================================

/// Settings of one index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Number of primary shards (informational).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_shards: Option<u64>,

    /// Number of replicas (informational).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_replicas: Option<u64>,

    /// Analysis components.
    pub analysis: AnalysisSettings,
}

impl IndexSettings {
    /// Decode settings from JSON, accepting both the bare settings object
    /// and one wrapped in a `settings` key.
    pub fn from_value(value: Value) -> Result<Self> {
        let value = match value {
            Value::Object(mut map) if map.contains_key("settings") => {
                map.remove("settings").unwrap_or(Value::Null)
            }
            other => other,
        };
        if value.is_null() {
            return Ok(IndexSettings::default());
        }
        serde_json::from_value(value).map_err(|e| {
            QueryDslError::x_content_parse("[settings] failed to parse index settings")
                .caused_by(e.into())
        })
    }

    /// Load settings from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_value(serde_json::from_str(&content)?)
    }
}

// ============================================================================
// Analysis settings
// ============================================================================

/// The `analysis` section: named analyzers and the custom components they use.
///
/// Component definitions stay raw JSON objects; each must carry a `type`
/// naming a built-in component, the other keys are its options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub analyzer: BTreeMap<String, AnalyzerSettings>,
    pub tokenizer: BTreeMap<String, Value>,
    pub char_filter: BTreeMap<String, Value>,
    #[serde(alias = "filter")]
    pub token_filter: BTreeMap<String, Value>,
}

impl AnalysisSettings {
    /// `true` when nothing is declared.
    pub fn is_empty(&self) -> bool {
        self.analyzer.is_empty()
            && self.tokenizer.is_empty()
            && self.char_filter.is_empty()
            && self.token_filter.is_empty()
    }
}

/// Definition of one named analyzer.
///
/// Either `type` names a built-in analyzer (configured by `pattern`,
/// `lowercase` and `stopwords`), or `tokenizer` starts a custom chain.
/// Char filters and token filters are appended in both cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerSettings {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<String>,

    pub char_filter: Vec<String>,

    #[serde(alias = "filter")]
    pub token_filter: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<StopWords>,
}

/// Stop words of an analyzer: a predefined list name (`_english_`,
/// `_none_`) or explicit words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopWords {
    Named(String),
    Words(Vec<String>),
}
