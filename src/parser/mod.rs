//! Parsing and serialization of shareable links.
//!
//! This module reads and writes the compact column configuration codec
//! and maps URL query strings onto typed furniture configurations.

pub mod column_codec;
pub mod query;

// Re-export commonly used functions
pub use column_codec::{decode_column_configurations, encode_column_configurations, DecodeReport};
pub use query::{
    config_to_query, normalize_config, parse_query, parse_query_string, parse_query_to_config,
    to_query_string, ParsedQuery, QueryParams,
};
