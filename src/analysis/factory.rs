//! Building analysis components from declarative settings.
//!
//! Every component is addressed by a type name (`"ngram"`, `"stop"`,
//! `"html_strip"`, ...) plus an optional JSON object of options. Names are
//! case-insensitive and most have an alias. Index settings declare named
//! components with a mandatory `type` key; analyzers then reference them by
//! name, falling back to the built-in component of that type name.
//!
//! # Examples
//!
//! ```
//! use querydsl::analysis::factory::build_token_filter;
//! use querydsl::analysis::token::Token;
//! use serde_json::json;
//!
//! let options = json!({"type": "truncate", "length": 3});
//! let filter = build_token_filter("truncate", Some(&options)).unwrap();
//! let tokens: Vec<_> = filter
//!     .filter(Box::new(vec![Token::new("quickly", 0)].into_iter()))
//!     .unwrap()
//!     .collect();
//! assert_eq!(tokens[0].text, "qui");
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::debug;
use serde_json::{Map, Value};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::keyword::KeywordAnalyzer;
use crate::analysis::analyzer::language::LanguageAnalyzer;
use crate::analysis::analyzer::pattern::{DEFAULT_PATTERN, PatternAnalyzer};
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::analyzer::simple::SimpleAnalyzer;
use crate::analysis::analyzer::standard::StandardAnalyzer;
use crate::analysis::analyzer::stop::StopAnalyzer;
use crate::analysis::analyzer::web::WebAnalyzer;
use crate::analysis::analyzer::whitespace::WhitespaceAnalyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::ascii_folding::AsciiFoldingCharFilter;
use crate::analysis::char_filter::html_strip::HtmlStripCharFilter;
use crate::analysis::char_filter::mapping::MappingCharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::char_filter::unicode_normalize::{
    NormalizationForm, UnicodeNormalizationCharFilter,
};
use crate::analysis::char_filter::zero_width::ZeroWidthNonJoinerCharFilter;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::apostrophe::ApostropheFilter;
use crate::analysis::token_filter::ascii_folding::AsciiFoldingFilter;
use crate::analysis::token_filter::camel_case::CamelCaseFilter;
use crate::analysis::token_filter::dict::DictionaryCompoundFilter;
use crate::analysis::token_filter::elision::ElisionFilter;
use crate::analysis::token_filter::keyword_marker::KeywordMarkerFilter;
use crate::analysis::token_filter::length::LengthFilter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::ngram::NgramFilter;
use crate::analysis::token_filter::pattern_replace::PatternReplaceFilter;
use crate::analysis::token_filter::reverse::ReverseFilter;
use crate::analysis::token_filter::shingle::ShingleFilter;
use crate::analysis::token_filter::stem::{StemFilter, StemLanguage};
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::token_filter::trim::TrimFilter;
use crate::analysis::token_filter::truncate::TruncateFilter;
use crate::analysis::token_filter::unicode_norm::UnicodeNormFilter;
use crate::analysis::token_filter::unique::UniqueFilter;
use crate::analysis::token_filter::uppercase::UppercaseFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::char_group::{CharClass, CharGroupTokenizer};
use crate::analysis::tokenizer::keyword::KeywordTokenizer;
use crate::analysis::tokenizer::letter::LetterTokenizer;
use crate::analysis::tokenizer::ngram::NgramTokenizer;
use crate::analysis::tokenizer::path_hierarchy::PathHierarchyTokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::analysis::tokenizer::web::WebTokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::{QueryDslError, Result};
use crate::settings::{AnalysisSettings, AnalyzerSettings, StopWords};

/// Typed access to the options object of one component.
struct Options<'a> {
    component: &'static str,
    kind: &'a str,
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Options<'a> {
    fn new(component: &'static str, kind: &'a str, options: Option<&'a Value>) -> Self {
        Options {
            component,
            kind,
            map: options.and_then(Value::as_object),
        }
    }

    fn invalid(&self, key: &str, expected: &str) -> QueryDslError {
        QueryDslError::parsing(format!(
            "[{}] {} option [{key}] should be {expected}",
            self.component, self.kind
        ))
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map?.get(key).filter(|v| !v.is_null())
    }

    fn string(&self, key: &str) -> Result<Option<&'a str>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(self.invalid(key, "a string")),
        }
    }

    fn required_string(&self, key: &str) -> Result<&'a str> {
        match self.string(key)? {
            Some(s) if !s.is_empty() => Ok(s),
            _ => Err(self.invalid(key, "exists")),
        }
    }

    fn bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => s
                .parse()
                .map(Some)
                .map_err(|_| self.invalid(key, "a boolean")),
            Some(_) => Err(self.invalid(key, "a boolean")),
        }
    }

    /// A non-negative number; zero counts as unset and yields `default`.
    fn size(&self, key: &str, default: usize) -> Result<usize> {
        let value = match self.get(key) {
            None => return Ok(default),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            Some(_) => None,
        };
        match value {
            Some(v) if v == 0.0 => Ok(default),
            Some(v) if v > 0.0 && v.is_finite() => Ok(v as usize),
            _ => Err(self.invalid(key, "a positive number")),
        }
    }

    fn strings(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(vec![s.clone()])),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| self.invalid(key, "an array of string"))
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(_) => Err(self.invalid(key, "an array of string")),
        }
    }

    fn required_strings(&self, key: &str) -> Result<Vec<String>> {
        match self.strings(key)? {
            Some(items) if !items.is_empty() => Ok(items),
            _ => Err(self.invalid(key, "an array of string")),
        }
    }

    fn char_classes(&self, key: &str) -> Result<Vec<CharClass>> {
        self.strings(key)?
            .unwrap_or_default()
            .iter()
            .map(|spec| CharClass::parse(spec))
            .collect()
    }

    fn stop_filter(&self, key: &str) -> Result<Option<StopFilter>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(name)) => StopFilter::from_list_name(name).map(Some),
            Some(_) => Ok(self.strings(key)?.map(StopFilter::from_words)),
        }
    }
}

fn single_char(options: &Options<'_>, key: &str) -> Result<Option<char>> {
    match options.string(key)? {
        None | Some("") => Ok(None),
        Some(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Some(c)),
                _ => Err(options.invalid(key, "a single character")),
            }
        }
    }
}

// ============================================================================
// Tokenizers
// ============================================================================

/// Build a tokenizer of the given type.
pub fn build_tokenizer(kind: &str, options: Option<&Value>) -> Result<Arc<dyn Tokenizer>> {
    let kind = kind.to_lowercase();
    let opts = Options::new("tokenizer", &kind, options);

    let tokenizer: Arc<dyn Tokenizer> = match kind.as_str() {
        "character" => {
            let class = opts.string("char")?.unwrap_or("whitespace");
            Arc::new(CharGroupTokenizer::from_specs(&[class])?)
        }
        "char_group" => Arc::new(CharGroupTokenizer::from_specs(
            &opts.required_strings("tokenize_on_chars")?,
        )?),
        "edge_ngram" | "ngram" => {
            let min = opts.size("min_gram", 1)?;
            let max = opts.size("max_gram", 2)?;
            let tokenizer = if kind == "edge_ngram" {
                NgramTokenizer::edge(min, max)?
            } else {
                NgramTokenizer::new(min, max)?
            };
            Arc::new(tokenizer.with_token_chars(opts.char_classes("token_chars")?))
        }
        "letter" | "simple" => Arc::new(LetterTokenizer::new()),
        "lowercase" | "lower_case" => Arc::new(LetterTokenizer::lowercasing()),
        "path_hierarchy" => {
            let mut tokenizer = PathHierarchyTokenizer::new();
            if let Some(delimiter) = single_char(&opts, "delimiter")? {
                tokenizer = tokenizer.with_delimiter(delimiter);
            }
            if let Some(replacement) = single_char(&opts, "replacement")? {
                tokenizer = tokenizer.with_replacement(replacement);
            }
            Arc::new(tokenizer.with_skip(opts.size("skip", 0)?))
        }
        "pattern" | "regexp" => {
            let pattern = opts.string("pattern")?.unwrap_or(DEFAULT_PATTERN);
            if opts.bool("gaps")?.unwrap_or(false) {
                Arc::new(RegexTokenizer::with_gaps(pattern)?)
            } else {
                Arc::new(RegexTokenizer::with_pattern(pattern)?)
            }
        }
        "keyword" | "single" => Arc::new(KeywordTokenizer::new()),
        "standard" | "unicode" => Arc::new(UnicodeWordTokenizer::new()),
        "web" => Arc::new(WebTokenizer::new()),
        "whitespace" => Arc::new(WhitespaceTokenizer::new()),
        other => {
            return Err(QueryDslError::x_content_parse(format!(
                "[tokenizer] unknown tokenizer [{other}]"
            )));
        }
    };
    Ok(tokenizer)
}

// ============================================================================
// Char filters
// ============================================================================

/// Build a char filter of the given type.
pub fn build_char_filter(kind: &str, options: Option<&Value>) -> Result<Arc<dyn CharFilter>> {
    let kind = kind.to_lowercase();
    let opts = Options::new("char_filter", &kind, options);

    let filter: Arc<dyn CharFilter> = match kind.as_str() {
        "ascii_folding" | "asciifolding" => Arc::new(AsciiFoldingCharFilter::new()),
        "html" | "html_strip" => Arc::new(HtmlStripCharFilter::new()),
        "zero_width_non_joiner" => Arc::new(ZeroWidthNonJoinerCharFilter::new()),
        "regexp" | "pattern" | "pattern_replace" => {
            let pattern = opts.required_string("pattern")?;
            let replacement = opts.string("replacement")?.unwrap_or("");
            Arc::new(PatternReplaceCharFilter::new(pattern, replacement)?)
        }
        "mapping" => {
            let rules = opts
                .strings("mappings")?
                .filter(|rules| !rules.is_empty())
                .ok_or_else(|| opts.invalid("mappings", "exists"))?;
            Arc::new(MappingCharFilter::from_rules(&rules)?)
        }
        "unicodenorm" | "unicode_normalize" => {
            let form: NormalizationForm = opts.string("form")?.unwrap_or("nfkc").parse()?;
            Arc::new(UnicodeNormalizationCharFilter::new(form))
        }
        other => {
            return Err(QueryDslError::x_content_parse(format!(
                "[char_filter] unknown character filter [{other}]"
            )));
        }
    };
    Ok(filter)
}

// ============================================================================
// Token filters
// ============================================================================

/// Build a token filter of the given type.
pub fn build_token_filter(kind: &str, options: Option<&Value>) -> Result<Arc<dyn Filter>> {
    let kind = kind.to_lowercase();
    let opts = Options::new("token_filter", &kind, options);

    let filter: Arc<dyn Filter> = match kind.as_str() {
        "apostrophe" => Arc::new(ApostropheFilter::new()),
        "ascii_folding" | "asciifolding" => Arc::new(AsciiFoldingFilter::new()),
        "camel_case" | "camelcase" => Arc::new(CamelCaseFilter::new()),
        "dict" | "dictionary_decompounder" => {
            let words = opts.required_strings("words")?;
            let min = opts.size("min_sub_word_size", 2)?;
            let max = opts.size("max_sub_word_size", 15)?;
            Arc::new(DictionaryCompoundFilter::new(words)?.with_subword_size(min, max))
        }
        "edge_ngram" => {
            let filter = NgramFilter::edge(opts.size("min_gram", 1)?, opts.size("max_gram", 2)?)?;
            match opts.string("side")?.map(str::to_lowercase).as_deref() {
                Some("back") => Arc::new(filter.from_back()),
                _ => Arc::new(filter),
            }
        }
        "elision" => match opts.strings("articles")? {
            Some(articles) => Arc::new(ElisionFilter::with_articles(articles)),
            None => Arc::new(ElisionFilter::new()),
        },
        "keyword" | "keyword_marker" => {
            Arc::new(KeywordMarkerFilter::new(opts.required_strings("keywords")?))
        }
        "length" => Arc::new(LengthFilter::new(
            opts.size("min", 0)?,
            opts.size("max", usize::MAX)?,
        )?),
        "lowercase" | "lower_case" => Arc::new(LowercaseFilter::new()),
        "ngram" => Arc::new(NgramFilter::new(
            opts.size("min_gram", 1)?,
            opts.size("max_gram", 2)?,
        )?),
        "porter" => Arc::new(StemFilter::new(StemLanguage::English)),
        "stemmer" | "snowball" => {
            let language: StemLanguage = opts
                .string("language")?
                .or(opts.string("name")?)
                .unwrap_or("english")
                .parse()?;
            Arc::new(StemFilter::new(language))
        }
        "reverse" => Arc::new(ReverseFilter::new()),
        "regexp" | "pattern_replace" => {
            let pattern = opts.required_string("pattern")?;
            let replacement = opts.string("replacement")?.unwrap_or("");
            Arc::new(PatternReplaceFilter::new(pattern, replacement)?)
        }
        "shingle" => {
            let mut filter = ShingleFilter::new().with_sizes(
                opts.size("min_shingle_size", 2)?,
                opts.size("max_shingle_size", 2)?,
            )?;
            let unigrams = match opts.bool("output_unigrams")? {
                Some(b) => Some(b),
                None => opts.bool("output_original")?,
            };
            if let Some(unigrams) = unigrams {
                filter = filter.with_output_unigrams(unigrams);
            }
            if let Some(separator) = opts.string("token_separator")? {
                filter = filter.with_token_separator(separator);
            }
            if let Some(filler) = opts.string("filler_token")? {
                filter = filter.with_filler_token(filler);
            }
            Arc::new(filter)
        }
        "stop" => Arc::new(opts.stop_filter("stopwords")?.unwrap_or_default()),
        "trim" => Arc::new(TrimFilter::new()),
        "truncate" => Arc::new(TruncateFilter::new(opts.size("length", 10)?)?),
        "unicodenorm" | "unicode_norm" => {
            let form: NormalizationForm = opts.string("form")?.unwrap_or("nfkc").parse()?;
            Arc::new(UnicodeNormFilter::new(form))
        }
        "unique" => Arc::new(UniqueFilter::new()),
        "uppercase" | "upper_case" => Arc::new(UppercaseFilter::new()),
        other => match other.strip_suffix("_stemmer").map(str::parse::<StemLanguage>) {
            Some(Ok(language)) => Arc::new(StemFilter::new(language)),
            _ => {
                return Err(QueryDslError::x_content_parse(format!(
                    "[token_filter] unknown token filter [{other}]"
                )));
            }
        },
    };
    Ok(filter)
}

// ============================================================================
// Analyzers
// ============================================================================

/// A built-in analyzer by name, without options.
pub fn builtin_analyzer(name: &str) -> Option<Arc<dyn Analyzer>> {
    let analyzer: Arc<dyn Analyzer> = match name.to_lowercase().as_str() {
        "standard" | "default" => Arc::new(StandardAnalyzer::new()),
        "simple" => Arc::new(SimpleAnalyzer::default()),
        "keyword" => Arc::new(KeywordAnalyzer::new()),
        "whitespace" => Arc::new(WhitespaceAnalyzer::new()),
        "stop" => Arc::new(StopAnalyzer::new()),
        "pattern" | "regexp" => Arc::new(PatternAnalyzer::new(DEFAULT_PATTERN, true, None).ok()?),
        "web" => Arc::new(WebAnalyzer::new()),
        other => Arc::new(language_analyzer(other)?),
    };
    Some(analyzer)
}

/// A language analyzer by name (`german`) or language code (`de`).
fn language_analyzer(name: &str) -> Option<LanguageAnalyzer> {
    LanguageAnalyzer::by_name(name).or_else(|| name.parse().ok().map(LanguageAnalyzer::new))
}

/// The custom components declared in the `analysis` settings, by name.
#[derive(Clone, Default)]
pub struct Components {
    tokenizers: HashMap<String, Arc<dyn Tokenizer>>,
    char_filters: HashMap<String, Arc<dyn CharFilter>>,
    token_filters: HashMap<String, Arc<dyn Filter>>,
}

fn declared<T: ?Sized>(
    component: &'static str,
    definitions: &BTreeMap<String, Value>,
    build: fn(&str, Option<&Value>) -> Result<Arc<T>>,
) -> Result<HashMap<String, Arc<T>>> {
    let mut built = HashMap::with_capacity(definitions.len());
    for (name, definition) in definitions {
        let kind = definition
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                QueryDslError::parsing(format!(
                    "[{component}] {name} option [type] should be exists"
                ))
            })?;
        debug!("building {component} [{name}] of type [{kind}]");
        built.insert(name.clone(), build(kind, Some(definition))?);
    }
    Ok(built)
}

impl Components {
    /// Build every tokenizer, char filter and token filter declared in `settings`.
    pub fn from_settings(settings: &AnalysisSettings) -> Result<Self> {
        Ok(Components {
            tokenizers: declared("tokenizer", &settings.tokenizer, build_tokenizer)?,
            char_filters: declared("char_filter", &settings.char_filter, build_char_filter)?,
            token_filters: declared("token_filter", &settings.token_filter, build_token_filter)?,
        })
    }

    /// A declared tokenizer, else the built-in of that type.
    pub fn tokenizer(&self, name: &str) -> Option<Arc<dyn Tokenizer>> {
        self.tokenizers
            .get(name)
            .cloned()
            .or_else(|| build_tokenizer(name, None).ok())
    }

    /// A declared char filter, else the built-in of that type.
    pub fn char_filter(&self, name: &str) -> Option<Arc<dyn CharFilter>> {
        self.char_filters
            .get(name)
            .cloned()
            .or_else(|| build_char_filter(name, None).ok())
    }

    /// A declared token filter, else the built-in of that type.
    pub fn token_filter(&self, name: &str) -> Option<Arc<dyn Filter>> {
        self.token_filters
            .get(name)
            .cloned()
            .or_else(|| build_token_filter(name, None).ok())
    }
}

impl std::fmt::Debug for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokenizers: Vec<_> = self.tokenizers.keys().collect();
        let mut char_filters: Vec<_> = self.char_filters.keys().collect();
        let mut token_filters: Vec<_> = self.token_filters.keys().collect();
        tokenizers.sort();
        char_filters.sort();
        token_filters.sort();
        f.debug_struct("Components")
            .field("tokenizers", &tokenizers)
            .field("char_filters", &char_filters)
            .field("token_filters", &token_filters)
            .finish()
    }
}

fn stop_words(stopwords: &Option<StopWords>) -> Result<Option<StopFilter>> {
    match stopwords {
        None => Ok(None),
        Some(StopWords::Named(name)) => StopFilter::from_list_name(name).map(Some),
        Some(StopWords::Words(words)) => Ok(Some(StopFilter::from_words(words.iter().cloned()))),
    }
}

/// The pipeline of a typed (built-in) analyzer definition.
fn typed_pipeline(name: &str, kind: &str, settings: &AnalyzerSettings) -> Result<PipelineAnalyzer> {
    let stop = stop_words(&settings.stopwords)?;
    let pipeline = match kind {
        "pattern" | "regexp" => PatternAnalyzer::new(
            settings.pattern.as_deref().unwrap_or(DEFAULT_PATTERN),
            settings.lowercase.unwrap_or(true),
            stop,
        )?
        .into_pipeline(),
        "standard" => match stop {
            Some(stop) => StandardAnalyzer::with_stop_words(stop),
            None => StandardAnalyzer::new(),
        }
        .into_pipeline(),
        "stop" => StopAnalyzer::with_stop_words(stop.unwrap_or_default()).into_pipeline(),
        "simple" => SimpleAnalyzer::default().into_pipeline(),
        "keyword" => KeywordAnalyzer::new().into_pipeline(),
        "whitespace" => WhitespaceAnalyzer::new().into_pipeline(),
        "web" => WebAnalyzer::new().into_pipeline(),
        other => language_analyzer(other)
            .ok_or_else(|| {
                QueryDslError::parsing(format!(
                    "[analyzer] [{name}] unsupported build-in analyzer [{other}]"
                ))
            })?
            .into_pipeline(),
    };
    Ok(pipeline)
}

/// Build the analyzer `name` declared by `settings`, resolving component
/// references through `components`.
pub fn build_analyzer(
    name: &str,
    settings: &AnalyzerSettings,
    components: &Components,
) -> Result<Arc<dyn Analyzer>> {
    let kind = settings
        .kind
        .as_deref()
        .map(str::to_lowercase)
        .filter(|kind| kind != "custom");

    let mut pipeline = match (kind, settings.tokenizer.as_deref()) {
        (Some(kind), _) => typed_pipeline(name, &kind, settings)?,
        (None, Some(tokenizer)) => {
            PipelineAnalyzer::new(components.tokenizer(tokenizer).ok_or_else(|| {
                QueryDslError::parsing(format!(
                    "[analyzer] [{name}] used undefined tokenizer [{tokenizer}]"
                ))
            })?)
        }
        (None, None) => {
            return Err(QueryDslError::parsing(format!(
                "[analyzer] [{name}] is missing tokenizer"
            )));
        }
    };

    for filter in &settings.char_filter {
        let char_filter = components.char_filter(filter).ok_or_else(|| {
            QueryDslError::parsing(format!(
                "[analyzer] [{name}] used undefined char_filter [{filter}]"
            ))
        })?;
        pipeline = pipeline.add_char_filter(char_filter);
    }
    for filter in &settings.token_filter {
        let token_filter = components.token_filter(filter).ok_or_else(|| {
            QueryDslError::parsing(format!(
                "[analyzer] [{name}] used undefined token_filter [{filter}]"
            ))
        })?;
        pipeline = pipeline.add_filter(token_filter);
    }

    debug!("built analyzer [{name}]: {pipeline:?}");
    Ok(Arc::new(pipeline.with_name(name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn texts(analyzer: &dyn Analyzer, text: &str) -> Vec<String> {
        analyzer.analyze(text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_builtin_tokenizers() {
        for kind in [
            "character", "letter", "lowercase", "ngram", "edge_ngram", "path_hierarchy",
            "pattern", "keyword", "standard", "web", "whitespace", "UNICODE",
        ] {
            assert!(build_tokenizer(kind, None).is_ok(), "{kind}");
        }
        let err = build_tokenizer("sentencepiece", None).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::XContentParseException);
        assert_eq!(err.reason(), "[tokenizer] unknown tokenizer [sentencepiece]");
    }

    #[test]
    fn test_char_group_requires_chars() {
        let err = build_tokenizer("char_group", Some(&json!({"type": "char_group"})))
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ParsingException);
        assert_eq!(
            err.reason(),
            "[tokenizer] char_group option [tokenize_on_chars] should be an array of string"
        );
    }

    #[test]
    fn test_ngram_sizes() {
        let options = json!({"min_gram": 3, "max_gram": 2});
        let err = build_tokenizer("ngram", Some(&options)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::IllegalArgumentException);

        let options = json!({"min_gram": 2, "max_gram": 3, "token_chars": ["letter"]});
        let tokenizer = build_tokenizer("edge_ngram", Some(&options)).unwrap();
        let grams: Vec<String> = tokenizer.tokenize("ab-cd").unwrap().map(|t| t.text).collect();
        assert_eq!(grams, vec!["ab", "cd"]);
    }

    #[test]
    fn test_mapping_char_filter_options() {
        let err = build_char_filter("mapping", Some(&json!({}))).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ParsingException);
        assert_eq!(err.reason(), "[char_filter] mapping option [mappings] should be exists");

        let err = build_char_filter("mapping", Some(&json!({"mappings": ["a -> b"]})))
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::RuntimeException);

        let filter = build_char_filter("mapping", Some(&json!({"mappings": ["ph => f"]}))).unwrap();
        assert_eq!(filter.filter("phone").0, "fone");
    }

    #[test]
    fn test_unknown_components() {
        let err = build_char_filter("icu", None).err().unwrap();
        assert_eq!(err.reason(), "[char_filter] unknown character filter [icu]");
        let err = build_token_filter("synonym", None).err().unwrap();
        assert_eq!(err.reason(), "[token_filter] unknown token filter [synonym]");
    }

    #[test]
    fn test_token_filter_options() {
        let shingle = build_token_filter(
            "shingle",
            Some(&json!({"output_unigrams": false, "token_separator": "+"})),
        )
        .unwrap();
        let tokens = vec![Token::new("a", 0), Token::new("b", 1)];
        let out: Vec<String> = shingle
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(out, vec!["a+b"]);

        let stemmer = build_token_filter("german_stemmer", None).unwrap();
        assert_eq!(stemmer.name(), "stemmer");

        let err = build_token_filter("truncate", Some(&json!({"length": "many"})))
            .err()
            .unwrap();
        assert_eq!(
            err.reason(),
            "[token_filter] truncate option [length] should be a positive number"
        );
    }

    #[test]
    fn test_stop_filter_lists() {
        let stop = build_token_filter("stop", Some(&json!({"stopwords": ["foo"]}))).unwrap();
        let tokens = vec![Token::new("foo", 0), Token::new("the", 1)];
        let out: Vec<String> = stop
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect();
        assert_eq!(out, vec!["the"]);

        assert!(build_token_filter("stop", Some(&json!({"stopwords": "_none_"}))).is_ok());
    }

    #[test]
    fn test_declared_components_need_type() {
        let settings: AnalysisSettings = serde_json::from_value(json!({
            "tokenizer": {"broken": {"pattern": "x"}}
        }))
        .unwrap();
        let err = Components::from_settings(&settings).err().unwrap();
        assert_eq!(err.reason(), "[tokenizer] broken option [type] should be exists");
    }

    #[test]
    fn test_build_custom_analyzer() {
        let settings: AnalysisSettings = serde_json::from_value(json!({
            "analyzer": {
                "folded": {
                    "tokenizer": "dash",
                    "char_filter": ["html_strip"],
                    "filter": ["lowercase", "ascii_folding", "short"]
                }
            },
            "tokenizer": {"dash": {"type": "char_group", "tokenize_on_chars": ["-", "whitespace"]}},
            "filter": {"short": {"type": "truncate", "length": 4}}
        }))
        .unwrap();
        let components = Components::from_settings(&settings).unwrap();
        let analyzer =
            build_analyzer("folded", &settings.analyzer["folded"], &components).unwrap();

        assert_eq!(analyzer.name(), "folded");
        assert_eq!(texts(analyzer.as_ref(), "<p>Crème-BRÛLÉE</p>"), vec!["crem", "brul"]);
    }

    #[test]
    fn test_build_typed_analyzer() {
        let settings = AnalyzerSettings {
            kind: Some("pattern".to_string()),
            pattern: Some("[^,]+".to_string()),
            lowercase: Some(false),
            stopwords: Some(StopWords::Words(vec!["b".to_string()])),
            token_filter: vec!["reverse".to_string()],
            ..Default::default()
        };
        let analyzer = build_analyzer("csv", &settings, &Components::default()).unwrap();
        assert_eq!(texts(analyzer.as_ref(), "Ab,b,cD"), vec!["bA", "Dc"]);
    }

    #[test]
    fn test_analyzer_reference_errors() {
        let components = Components::default();

        let err = build_analyzer("a", &AnalyzerSettings::default(), &components)
            .err()
            .unwrap();
        assert_eq!(err.reason(), "[analyzer] [a] is missing tokenizer");

        let settings = AnalyzerSettings {
            tokenizer: Some("standard".to_string()),
            token_filter: vec!["nope".to_string()],
            ..Default::default()
        };
        let err = build_analyzer("a", &settings, &components).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ParsingException);
        assert_eq!(err.reason(), "[analyzer] [a] used undefined token_filter [nope]");

        let settings = AnalyzerSettings {
            kind: Some("klingon".to_string()),
            ..Default::default()
        };
        let err = build_analyzer("a", &settings, &components).err().unwrap();
        assert_eq!(
            err.reason(),
            "[analyzer] [a] unsupported build-in analyzer [klingon]"
        );
    }

    #[test]
    fn test_builtin_analyzers() {
        for name in ["standard", "simple", "keyword", "whitespace", "stop", "pattern", "web", "english"] {
            let analyzer = builtin_analyzer(name).unwrap();
            assert_eq!(analyzer.name(), name);
        }
        assert_eq!(builtin_analyzer("de").unwrap().name(), "german");
        assert!(builtin_analyzer("klingon").is_none());
    }
}
