//! RDF terms, namespace prefixes and text serialization
//!
//! This module provides:
//! - Prefix registries with compaction and expansion of IRIs
//! - Loosely typed result values and triple rows as returned by executors
//! - Turtle and N-Quads serialization with blank-node handling
//!
//! # Example
//!
//! ```rust
//! use graphly::rdf::{Prefix, PrefixRegistry, RdfFormat, RdfSerializer, TripleRow};
//!
//! let prefixes = PrefixRegistry::from_prefixes([
//!     Prefix::new("ex", "http://example.org/"),
//! ]).unwrap();
//!
//! let triples = vec![
//!     TripleRow::new("n1", "ex:knows", "n2").with_blank_flags("true", "true"),
//! ];
//!
//! let turtle = RdfSerializer::serialize(&triples, &prefixes, RdfFormat::Turtle).unwrap();
//! assert!(turtle.contains("_:n1 ex:knows _:n2 ."));
//! ```

mod prefix;
mod term;
pub mod serialization;

pub use prefix::{Prefix, PrefixError, PrefixRegistry, PrefixResult, Shorts};

pub use term::{
    blank_node_label, classify, row, Row, RowValue, TermKind, Triple, TripleRow,
    BLANK_NODE_SENTINEL,
};

pub use serialization::{
    split_nquads_chunks, split_turtle_chunks, RdfFormat, RdfSerializer, SerializeError,
    SerializeResult,
};
