//! Text analysis for query construction.
//!
//! This module provides the pieces that turn query text into terms:
//! tokenizers, char filters, token filters, the analyzers assembling them,
//! a factory that builds analyzers from index settings, and the registry the
//! query translator resolves analyzers through.

pub mod analyzer;
pub mod char_filter;
pub mod factory;
pub mod registry;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
