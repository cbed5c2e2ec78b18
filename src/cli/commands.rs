//! Command implementations for the querydsl CLI.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::Value;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::dsl::{TranslateOptions, is_search_body};
use crate::index::{AnalyzeRequest, IndexSnapshot};
use crate::mapping::Mappings;
use crate::query::Query;
use crate::settings::IndexSettings;

/// Execute a CLI command.
pub fn execute_command(args: QueryDslArgs) -> Result<()> {
    match &args.command {
        Command::Translate(translate_args) => translate(translate_args, &args),
        Command::Analyze(analyze_args) => analyze(analyze_args, &args),
    }
}

/// Translate a request file into a query tree, or a search body into a
/// search request.
fn translate(args: &TranslateArgs, cli_args: &QueryDslArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.index)?;
    let request = read_request(&args.query)?;
    let options = TranslateOptions {
        max_depth: args.max_depth,
        max_results: args.max_results,
    };

    let result = match request.as_ref() {
        Some(body) if is_search_body(body) => {
            snapshot.translate_search(body, options).map(|search| {
                info!(
                    "translated search body into {} query, size {} from {}",
                    query_kind(&search.query),
                    search.size,
                    search.from
                );
                let search = SearchTranslationResult::from(search);
                output_result("Translated search request", &search, cli_args)
            })
        }
        request => snapshot.translate_with(request, options).map(|query| {
            info!("translated request into {} query", query_kind(&query));
            output_result("Translated query", &TranslationResult::from(query), cli_args)
        }),
    };

    match result {
        Ok(written) => Ok(written?),
        Err(err) => {
            output_error(&err, cli_args)?;
            Err(err).context("failed to translate request")
        }
    }
}

/// Run text through an analyzer of the index.
fn analyze(args: &AnalyzeArgs, cli_args: &QueryDslArgs) -> Result<()> {
    let snapshot = load_snapshot(&args.index)?;
    let request = AnalyzeRequest {
        text: args.text.clone(),
        analyzer: args.analyzer.clone(),
        field: args.field.clone(),
        tokenizer: args.tokenizer.clone(),
        char_filter: args.char_filter.clone(),
        filter: args.filter.clone(),
    };

    let tokens = snapshot.analyze(&request).context("failed to analyze text")?;
    output_result("Analyzed tokens", &AnalysisResult { tokens }, cli_args)?;
    Ok(())
}

/// Build the index snapshot from the settings and mappings files.
pub fn load_snapshot(args: &IndexArgs) -> Result<IndexSnapshot> {
    let settings = match &args.settings {
        Some(path) => IndexSettings::from_path(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => IndexSettings::default(),
    };
    let mappings = match &args.mappings {
        Some(path) => Mappings::from_path(path)
            .with_context(|| format!("failed to load mappings from {}", path.display()))?,
        None => Mappings::new(),
    };
    debug!(
        "index [{}]: {} custom analyzers, {} mapped fields",
        args.index,
        settings.analysis.analyzer.len(),
        mappings.len()
    );

    IndexSnapshot::new(args.index.as_str(), settings, mappings)
        .with_context(|| format!("failed to build index [{}]", args.index))
}

/// Read a request from `path` (`-` is stdin). An empty input is no request
/// at all.
pub fn read_request(path: &Path) -> Result<Option<Value>> {
    let content = if path.as_os_str() == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read request from stdin")?;
        content
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read request from {}", path.display()))?
    };

    if content.trim().is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(&content).context("request is not valid JSON")?;
    Ok(Some(value))
}

fn query_kind(query: &Query) -> &'static str {
    match query {
        Query::MatchAll(_) => "match_all",
        Query::MatchNone => "match_none",
        Query::Term(_) => "term",
        Query::Match(_) => "match",
        Query::MatchPhrase(_) => "match_phrase",
        Query::NumericRange(_) => "numeric_range",
        Query::DateRange(_) => "date_range",
        Query::Regexp(_) => "regexp",
        Query::Prefix(_) => "prefix",
        Query::Fuzzy(_) => "fuzzy",
        Query::Wildcard(_) => "wildcard",
        Query::Exists(_) => "exists",
        Query::Bool(_) => "bool",
        Query::Boosting(_) => "boosting",
    }
}
