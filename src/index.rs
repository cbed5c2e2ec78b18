//! Index snapshots: the settings, mappings and analyzers queries are
//! translated against.
//!
//! An [`IndexSnapshot`] is immutable once built. [`Index`] holds the current
//! snapshot and swaps in a fresh one on [`Index::update`]; translations that
//! already took a snapshot keep using it.
//!
//! # Examples
//!
//! ```
//! use querydsl::index::Index;
//! use querydsl::mapping::{FieldType, Mappings, Property};
//! use querydsl::settings::IndexSettings;
//! use serde_json::json;
//!
//! let mappings = Mappings::new().with_property("title", Property::new(FieldType::Text));
//! let index = Index::new("books", IndexSettings::default(), mappings).unwrap();
//!
//! let query = index
//!     .snapshot()
//!     .translate(Some(&json!({"match": {"title": "Rust"}})))
//!     .unwrap();
//! assert_eq!(query.description(), "title:(Rust)");
//! ```

use std::sync::Arc;

use log::{debug, info};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::factory::build_analyzer;
use crate::analysis::registry::{AnalyzerRegistry, standard_analyzer};
use crate::analysis::token::TokenType;
use crate::dsl::{SearchRequest, TranslateOptions, Translator};
use crate::error::{QueryDslError, Result};
use crate::mapping::{FieldType, Mappings};
use crate::query::Query;
use crate::settings::{AnalyzerSettings, IndexSettings};

/// Name given to the analyzer assembled for an ad-hoc analyze chain.
const AD_HOC_ANALYZER: &str = "_anonymous";

/// An immutable view of one index.
#[derive(Debug)]
pub struct IndexSnapshot {
    name: String,
    settings: IndexSettings,
    mappings: Mappings,
    analyzers: AnalyzerRegistry,
}

impl IndexSnapshot {
    /// Build the analyzers declared by `settings` and check that every
    /// analyzer `mappings` names exists.
    pub fn new<S: Into<String>>(name: S, settings: IndexSettings, mappings: Mappings) -> Result<Self> {
        let name = name.into();
        let analyzers = AnalyzerRegistry::from_settings(&settings.analysis)?;
        analyzers.validate(&mappings)?;
        debug!(
            "index [{name}]: {} mapped fields, custom analyzers {:?}",
            mappings.len(),
            analyzers.names()
        );
        Ok(IndexSnapshot {
            name,
            settings,
            mappings,
            analyzers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &IndexSettings {
        &self.settings
    }

    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    pub fn analyzers(&self) -> &AnalyzerRegistry {
        &self.analyzers
    }

    /// Translate a query DSL request with the default options.
    pub fn translate(&self, request: Option<&Value>) -> Result<Query> {
        self.translate_with(request, TranslateOptions::default())
    }

    pub fn translate_with(&self, request: Option<&Value>, options: TranslateOptions) -> Result<Query> {
        Translator::new(&self.mappings, &self.analyzers)
            .with_options(options)
            .translate(request)
    }

    /// Translate a search body: the query plus its paging, sort, `_source`
    /// and `fields` options.
    pub fn translate_search(&self, body: &Value, options: TranslateOptions) -> Result<SearchRequest> {
        Translator::new(&self.mappings, &self.analyzers)
            .with_options(options)
            .translate_search(body)
    }

    /// Run `request.text` through an analyzer.
    ///
    /// The analyzer is, in order: the one named by `request.analyzer`, the
    /// analyzer of `request.field`, a chain built from `request.tokenizer`
    /// and the filters, or the standard analyzer.
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<Vec<AnalyzedToken>> {
        let analyzer = self.request_analyzer(request)?;
        debug!("analyzing with [{}]", analyzer.name());
        Ok(analyzer
            .analyze(&request.text)?
            .map(|token| AnalyzedToken {
                token: token.text,
                start_offset: token.start_offset,
                end_offset: token.end_offset,
                position: token.position,
                token_type: token.token_type,
            })
            .collect())
    }

    fn request_analyzer(&self, request: &AnalyzeRequest) -> Result<Arc<dyn Analyzer>> {
        if let Some(name) = request.analyzer.as_deref() {
            return self.analyzers.resolve(name);
        }

        if let Some(field) = request.field.as_deref() {
            let (index, search) = self.analyzers.for_field(&self.mappings, field);
            if let Some(analyzer) = index.or(search) {
                return Ok(analyzer);
            }
            if let Some(FieldType::Keyword) = self.mappings.field_type(field) {
                return self.analyzers.resolve("keyword");
            }
        }

        if request.tokenizer.is_some()
            || !request.char_filter.is_empty()
            || !request.filter.is_empty()
        {
            let chain = AnalyzerSettings {
                tokenizer: Some(request.tokenizer.clone().unwrap_or_else(|| "standard".to_string())),
                char_filter: request.char_filter.clone(),
                token_filter: request.filter.clone(),
                ..AnalyzerSettings::default()
            };
            return build_analyzer(AD_HOC_ANALYZER, &chain, self.analyzers.components());
        }

        Ok(standard_analyzer())
    }
}

/// Body of an analyze call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<String>,
    pub char_filter: Vec<String>,
    #[serde(alias = "token_filter")]
    pub filter: Vec<String>,
}

impl AnalyzeRequest {
    pub fn new<S: Into<String>>(text: S) -> Self {
        AnalyzeRequest {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_analyzer<S: Into<String>>(mut self, analyzer: S) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn with_field<S: Into<String>>(mut self, field: S) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_tokenizer<S: Into<String>>(mut self, tokenizer: S) -> Self {
        self.tokenizer = Some(tokenizer.into());
        self
    }

    pub fn with_char_filter<S: Into<String>>(mut self, char_filter: S) -> Self {
        self.char_filter.push(char_filter.into());
        self
    }

    pub fn with_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.filter.push(filter.into());
        self
    }
}

/// One token of an analyze response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedToken {
    pub token: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub position: usize,
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

/// A named index whose snapshot can be replaced while readers hold the
/// previous one.
#[derive(Debug)]
pub struct Index {
    name: String,
    current: RwLock<Arc<IndexSnapshot>>,
}

impl Index {
    pub fn new<S: Into<String>>(name: S, settings: IndexSettings, mappings: Mappings) -> Result<Self> {
        let name = name.into();
        let snapshot = IndexSnapshot::new(name.clone(), settings, mappings)?;
        Ok(Index {
            name,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Replace settings and mappings. On error the current snapshot stays.
    pub fn update(&self, settings: IndexSettings, mappings: Mappings) -> Result<()> {
        let snapshot = IndexSnapshot::new(self.name.clone(), settings, mappings).map_err(|err| {
            QueryDslError::illegal_argument(format!("[{}] failed to update index", self.name))
                .caused_by(err)
        })?;
        *self.current.write() = Arc::new(snapshot);
        info!("index [{}] updated", self.name);
        Ok(())
    }
}
