//! querydsl CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

use querydsl::cli::args::*;
use querydsl::cli::commands::*;

fn main() {
    let args = QueryDslArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    // RUST_LOG, when set, refines the level picked from the flags.
    Builder::new()
        .filter_level(log_level)
        .parse_env(Env::default())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
