//! Command line argument parsing for the querydsl CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::dsl::DEFAULT_MAX_DEPTH;
use crate::dsl::search::DEFAULT_MAX_RESULTS;

/// querydsl - translate JSON query DSL requests into query trees
#[derive(Parser, Debug, Clone)]
#[command(name = "querydsl")]
#[command(about = "Translate Elasticsearch-style JSON query DSL into typed query trees")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct QueryDslArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "json", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl QueryDslArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Translate a query DSL request into a query tree
    Translate(TranslateArgs),

    /// Run text through an analyzer
    Analyze(AnalyzeArgs),
}

/// Index definition shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct IndexArgs {
    /// Index settings file (JSON)
    #[arg(long, value_name = "SETTINGS_FILE", env = "QUERYDSL_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Field mappings file (JSON)
    #[arg(long, value_name = "MAPPINGS_FILE", env = "QUERYDSL_MAPPINGS")]
    pub mappings: Option<PathBuf>,

    /// Index name used in log messages
    #[arg(long, default_value = "default")]
    pub index: String,
}

/// Arguments for translating a request
#[derive(Parser, Debug, Clone)]
pub struct TranslateArgs {
    /// Request file, or `-` for stdin. The request may be the query itself
    /// or a search body (`query`, `size`, `from`, `sort`, `_source`, ...).
    #[arg(long, value_name = "QUERY_FILE", default_value = "-")]
    pub query: PathBuf,

    /// Maximum nesting depth of compound queries
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Cap on the `size` of a search body
    #[arg(long, env = "QUERYDSL_MAX_RESULTS", default_value_t = DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    #[command(flatten)]
    pub index: IndexArgs,
}

/// Arguments for analyzing text
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text to analyze
    #[arg(long)]
    pub text: String,

    /// Analyzer name
    #[arg(long)]
    pub analyzer: Option<String>,

    /// Use the analyzer of this mapped field
    #[arg(long)]
    pub field: Option<String>,

    /// Tokenizer of an ad-hoc analysis chain
    #[arg(long)]
    pub tokenizer: Option<String>,

    /// Char filters of an ad-hoc analysis chain
    #[arg(long = "char-filter", value_delimiter = ',')]
    pub char_filter: Vec<String>,

    /// Token filters of an ad-hoc analysis chain
    #[arg(long = "filter", value_delimiter = ',')]
    pub filter: Vec<String>,

    #[command(flatten)]
    pub index: IndexArgs,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
