//! # querydsl
//!
//! Translate an Elasticsearch-style JSON query DSL into a typed query tree.
//!
//! ## Features
//!
//! - Leaf queries: `term`, `terms`, `ids`, `exists`, `range`, `match` and
//!   its phrase / prefix / multi-field variants, `regexp`, `prefix`,
//!   `wildcard`, `fuzzy`, `query_string`, `simple_query_string`
//! - Compound queries: `bool`, `boosting`
//! - Field-aware translation driven by index mappings
//! - Text analysis pipelines built from index settings
//! - Structured `{"error": {...}}` responses for malformed requests
//!
//! ## Example
//!
//! ```
//! use querydsl::analysis::registry::AnalyzerRegistry;
//! use querydsl::dsl::translate;
//! use querydsl::mapping::{FieldType, Mappings, Property};
//! use serde_json::json;
//!
//! let mappings = Mappings::new()
//!     .with_property("age", Property::new(FieldType::Numeric))
//!     .with_property("status", Property::new(FieldType::Keyword));
//! let request = json!({"bool": {
//!     "must": {"term": {"status": "active"}},
//!     "filter": {"range": {"age": {"gte": 18, "lt": 65}}}
//! }});
//!
//! let query = translate(Some(&request), &mappings, &AnalyzerRegistry::new()).unwrap();
//! assert_eq!(query.description(), "(+status:active +(+age:[18 TO 65})^0)");
//! ```

pub mod analysis;
pub mod cli;
pub mod dsl;
pub mod error;
pub mod index;
pub mod mapping;
pub mod query;
pub mod settings;
pub mod util;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
