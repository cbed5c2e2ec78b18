//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::Serialize;

use crate::cli::args::{OutputFormat, QueryDslArgs};
use crate::dsl::SearchRequest;
use crate::error::{QueryDslError, Result};
use crate::index::AnalyzedToken;
use crate::query::Query;

/// Result of the `translate` command.
#[derive(Debug, Serialize)]
pub struct TranslationResult {
    pub description: String,
    pub query: Query,
}

impl From<Query> for TranslationResult {
    fn from(query: Query) -> Self {
        TranslationResult {
            description: query.description(),
            query,
        }
    }
}

/// Result of the `translate` command for a search body.
#[derive(Debug, Serialize)]
pub struct SearchTranslationResult {
    pub description: String,
    pub request: SearchRequest,
}

impl From<SearchRequest> for SearchTranslationResult {
    fn from(request: SearchRequest) -> Self {
        SearchTranslationResult {
            description: request.query.description(),
            request,
        }
    }
}

/// Result of the `analyze` command.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub tokens: Vec<AnalyzedToken>,
}

/// Rendering for `--format human`.
pub trait HumanReadable {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanReadable for TranslationResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.description)
    }
}

impl HumanReadable for SearchTranslationResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        let request = &self.request;
        writeln!(out, "{}", self.description)?;
        writeln!(out, "size: {}  from: {}  explain: {}", request.size, request.from, request.explain)?;
        if !request.sort.is_empty() {
            let sort: Vec<String> = request
                .sort
                .iter()
                .map(|s| format!("{}{}", if s.descending { "-" } else { "" }, s.field))
                .collect();
            writeln!(out, "sort: {}", sort.join(", "))?;
        }
        if !request.source.enabled {
            writeln!(out, "_source: false")?;
        } else if !request.source.fields.is_empty() {
            writeln!(out, "_source: {}", request.source.fields.join(", "))?;
        }
        if !request.fields.is_empty() {
            let fields: Vec<&str> = request.fields.iter().map(|f| f.field.as_str()).collect();
            writeln!(out, "fields: {}", fields.join(", "))?;
        }
        Ok(())
    }
}

impl HumanReadable for AnalysisResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for token in &self.tokens {
            writeln!(
                out,
                "{:>4}  {:<24} [{}..{}] {}",
                token.position,
                token.token,
                token.start_offset,
                token.end_offset,
                serde_json::to_value(token.token_type)
                    .ok()
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

/// Print a command result to stdout in the requested format.
pub fn output_result<T>(message: &str, result: &T, args: &QueryDslArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a command result to `out` in the requested format.
pub fn write_result<T>(out: &mut dyn Write, message: &str, result: &T, args: &QueryDslArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => write_json(out, result, args.pretty)?,
    }
    Ok(())
}

/// Print the error response body of a failed translation.
pub fn output_error(error: &QueryDslError, args: &QueryDslArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, &error.to_response(), args.pretty)
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{json}")?;
    Ok(())
}
