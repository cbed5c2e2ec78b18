//! Shared helpers used by the mapping and query decoding layers.

pub mod time;
