//! The analyzer registry the query translator resolves analyzers through.
//!
//! A registry holds the analyzers declared by the index settings, plus the
//! custom tokenizers and filters they were built from. Lookups fall back to
//! the built-in analyzers, which are shared by all registries.
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::registry::AnalyzerRegistry;
//! use querydsl::settings::AnalysisSettings;
//! use serde_json::json;
//!
//! let settings: AnalysisSettings = serde_json::from_value(json!({
//!     "analyzer": {"shout": {"tokenizer": "whitespace", "filter": ["uppercase"]}}
//! })).unwrap();
//! let registry = AnalyzerRegistry::from_settings(&settings).unwrap();
//!
//! let shout = registry.lookup("shout").unwrap();
//! let tokens: Vec<_> = shout.analyze("hi there").unwrap().map(|t| t.text).collect();
//! assert_eq!(tokens, vec!["HI", "THERE"]);
//!
//! assert!(registry.lookup("english").is_some());
//! assert!(registry.lookup("klingon").is_none());
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use ahash::AHashMap;
use log::debug;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::language::LANGUAGE_ANALYZERS;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::factory::{Components, build_analyzer, builtin_analyzer};
use crate::error::{QueryDslError, Result};
use crate::mapping::Mappings;
use crate::settings::AnalysisSettings;

/// Name of the analyzer used when a field names none.
pub const DEFAULT_ANALYZER: &str = "default";

const BUILTIN_ANALYZERS: &[&str] = &[
    "standard", "simple", "keyword", "whitespace", "stop", "pattern", "regexp", "web",
];

static BUILTINS: LazyLock<AHashMap<String, Arc<dyn Analyzer>>> = LazyLock::new(|| {
    BUILTIN_ANALYZERS
        .iter()
        .copied()
        .chain(LANGUAGE_ANALYZERS.iter().map(|(name, _)| *name))
        .filter_map(|name| builtin_analyzer(name).map(|analyzer| (name.to_string(), analyzer)))
        .collect()
});

/// The standard analyzer, used when nothing else is resolved.
pub fn standard_analyzer() -> Arc<dyn Analyzer> {
    builtin("standard").unwrap_or_else(|| Arc::new(StandardAnalyzer::new()))
}

fn builtin(name: &str) -> Option<Arc<dyn Analyzer>> {
    BUILTINS
        .get(name)
        .cloned()
        .or_else(|| builtin_analyzer(name))
}

/// Named analyzers of one index.
#[derive(Clone, Default)]
pub struct AnalyzerRegistry {
    analyzers: AHashMap<String, Arc<dyn Analyzer>>,
    components: Components,
}

impl AnalyzerRegistry {
    /// A registry with only the built-in analyzers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every analyzer declared in `settings`.
    pub fn from_settings(settings: &AnalysisSettings) -> Result<Self> {
        let components = Components::from_settings(settings)?;
        let mut analyzers = AHashMap::with_capacity(settings.analyzer.len());
        for (name, definition) in &settings.analyzer {
            analyzers.insert(name.clone(), build_analyzer(name, definition, &components)?);
        }
        debug!(
            "analyzer registry built with {} custom analyzers: {components:?}",
            analyzers.len()
        );
        Ok(AnalyzerRegistry {
            analyzers,
            components,
        })
    }

    /// Add or replace a custom analyzer.
    pub fn register<S: Into<String>>(&mut self, name: S, analyzer: Arc<dyn Analyzer>) {
        self.analyzers.insert(name.into(), analyzer);
    }

    /// Find an analyzer: custom analyzers first, then built-ins.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Analyzer>> {
        self.analyzers.get(name).cloned().or_else(|| builtin(name))
    }

    /// Like [`lookup`](Self::lookup), failing for unknown names.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Analyzer>> {
        self.lookup(name).ok_or_else(|| {
            QueryDslError::parsing(format!("[analyzer] unknown analyzer [{name}]"))
        })
    }

    /// The index and search analyzers of `field`.
    ///
    /// Only text fields carry analyzers. A text (or unmapped) field that
    /// names no analyzer gets the custom `default` analyzer when one is
    /// declared, and `None` otherwise.
    pub fn for_field(
        &self,
        mappings: &Mappings,
        field: &str,
    ) -> (Option<Arc<dyn Analyzer>>, Option<Arc<dyn Analyzer>>) {
        if field.is_empty() {
            return (None, None);
        }
        let (index, search) = match mappings.lookup(field) {
            Some(property) if !property.is_text() => return (None, None),
            Some(property) => (property.analyzer.as_deref(), property.search_analyzer.as_deref()),
            None => (None, None),
        };

        let resolve = |name: Option<&str>| match name {
            Some(name) => self.lookup(name),
            None => self.analyzers.get(DEFAULT_ANALYZER).cloned(),
        };
        let resolved = (resolve(index), resolve(search));
        debug!(
            "field [{field}] analyzers: index={:?} search={:?}",
            resolved.0.as_ref().map(|a| a.name().to_string()),
            resolved.1.as_ref().map(|a| a.name().to_string())
        );
        resolved
    }

    /// Check that every analyzer named by `mappings` exists.
    pub fn validate(&self, mappings: &Mappings) -> Result<()> {
        for property in mappings.properties.values().filter(|p| p.is_text()) {
            for name in property.analyzer_names() {
                self.resolve(name)?;
            }
        }
        Ok(())
    }

    /// The custom tokenizers and filters, for ad-hoc analysis chains.
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Names of the custom analyzers, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.analyzers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

impl fmt::Debug for AnalyzerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerRegistry")
            .field("analyzers", &self.names())
            .field("components", &self.components)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::keyword::KeywordAnalyzer;
    use crate::error::ErrorKind;
    use crate::mapping::{FieldType, Property};
    use serde_json::json;

    fn settings() -> AnalysisSettings {
        serde_json::from_value(json!({
            "analyzer": {
                "default": {"type": "simple"},
                "folding": {"tokenizer": "standard", "filter": ["lowercase", "asciifolding"]}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_builtin_lookup() {
        let registry = AnalyzerRegistry::new();
        for name in ["standard", "keyword", "regexp", "french", "fr"] {
            assert!(registry.lookup(name).is_some(), "{name}");
        }
        let err = registry.resolve("nope").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ParsingException);
        assert_eq!(err.reason(), "[analyzer] unknown analyzer [nope]");
        assert_eq!(standard_analyzer().name(), "standard");
    }

    #[test]
    fn test_custom_shadows_builtin() {
        let mut registry = AnalyzerRegistry::new();
        registry.register("standard", Arc::new(KeywordAnalyzer::new()));
        assert_eq!(registry.lookup("standard").unwrap().name(), "keyword");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_for_field() {
        let registry = AnalyzerRegistry::from_settings(&settings()).unwrap();
        let mappings = Mappings::new()
            .with_property(
                "title",
                Property::new(FieldType::Text)
                    .with_analyzer("folding")
                    .with_search_analyzer("whitespace"),
            )
            .with_property("body", Property::new(FieldType::Text))
            .with_property("tag", Property::new(FieldType::Keyword).with_analyzer("folding"));

        let (index, search) = registry.for_field(&mappings, "title");
        assert_eq!(index.unwrap().name(), "folding");
        assert_eq!(search.unwrap().name(), "whitespace");

        let (index, search) = registry.for_field(&mappings, "body");
        assert_eq!(index.unwrap().name(), "default");
        assert_eq!(search.unwrap().name(), "default");

        let (index, search) = registry.for_field(&mappings, "tag");
        assert!(index.is_none() && search.is_none());
    }

    #[test]
    fn test_for_field_without_default() {
        let registry = AnalyzerRegistry::new();
        let (index, search) = registry.for_field(&Mappings::new(), "anything");
        assert!(index.is_none() && search.is_none());
    }

    #[test]
    fn test_validate_mappings() {
        let registry = AnalyzerRegistry::from_settings(&settings()).unwrap();
        let good = Mappings::new().with_property("a", Property::new(FieldType::Text).with_analyzer("folding"));
        assert!(registry.validate(&good).is_ok());

        let bad = Mappings::new().with_property("a", Property::new(FieldType::Text).with_analyzer("missing"));
        assert!(registry.validate(&bad).is_err());
    }

    #[test]
    fn test_debug_lists_names() {
        let registry = AnalyzerRegistry::from_settings(&settings()).unwrap();
        assert_eq!(registry.names(), vec!["default", "folding"]);
        let debug = format!("{registry:?}");
        assert!(debug.contains("folding"));
    }
}
