//! Graphly
//!
//! Describe and exchange RDF data with heterogeneous triple stores.
//!
//! # Overview
//!
//! - [`rdf`]: prefix registries, term model, Turtle and N-Quads serialization
//! - [`schema`]: class/property models built from SHACL shapes, with range resolution
//! - [`sparql`]: executor contract, generic and AllegroGraph backends, named graphs
//! - [`config`]: YAML configuration
//!
//! Transport is left to the caller: anything implementing [`sparql::Executor`] (a
//! closure will do) can back a [`SparqlClient`] or an [`AllegroGraph`].
//!
//! # Prefix ownership
//!
//! A [`PrefixRegistry`] is never mutated by a component that did not create it.
//! Backends and loaders that need extra bindings copy the caller's registry and extend
//! the copy, so one registry can be shared across calls.

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod rdf;
pub mod schema;
pub mod sparql;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, GraphlyConfig};

pub use rdf::{
    Prefix, PrefixError, PrefixRegistry, PrefixResult, RdfFormat, RdfSerializer, Row, RowValue,
    SerializeError, SerializeResult, Triple, TripleRow,
};

pub use schema::{
    Class, InstanceModel, Model, ModelError, ModelResult, Property, Resource, ShaclModel,
};

pub use sparql::{
    AllegroGraph, Executor, ExecutorError, ExecutorResult, Graph, QueryKind, SparqlBackend,
    SparqlClient, SparqlError, SparqlResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
