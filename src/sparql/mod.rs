//! SPARQL execution against external triple stores
//!
//! Transport is not handled here: an [`Executor`] sends query text (plus an optional
//! prefix registry) to a store and returns result rows. On top of it this module
//! provides:
//!
//! - [`SparqlClient`], a generic backend with chunked `INSERT DATA` and `DELETE WHERE`
//! - [`AllegroGraph`], a backend that guarantees its mandatory prefixes without
//!   touching the caller's registry
//! - [`Graph`], a view scoped to a named graph with paginated dumps to Turtle and N-Quads
//! - query helpers ([`QueryKind`], [`render_query`], [`prepare_value`]) and
//!   SPARQL JSON results parsing ([`parse_results`])
//!
//! # Example
//!
//! ```rust
//! use graphly::rdf::{PrefixRegistry, Row};
//! use graphly::sparql::{ExecutorResult, SparqlBackend, SparqlClient};
//!
//! let executor = |_query: &str, _prefixes: Option<&PrefixRegistry>| -> ExecutorResult<Vec<Row>> {
//!     Ok(Vec::new())
//! };
//!
//! let client = SparqlClient::new(executor);
//! let rows = client.run("SELECT * WHERE { ?s ?p ?o }", None).unwrap();
//! assert!(rows.is_empty());
//! ```

mod allegrograph;
mod backend;
mod graph;
mod query;
mod results;

pub use allegrograph::{AllegroGraph, REQUIRED_PREFIXES};
pub use backend::{delete_where, insert_data, SparqlBackend, SparqlClient};
pub use graph::Graph;
pub use query::{graph_clause, prepare_triple, prepare_value, render_query, QueryKind};
pub use results::{parse_results, parse_results_value};

use crate::rdf::{PrefixRegistry, Row, SerializeError};
use thiserror::Error;

/// Failure reported by an executor; passed through unchanged
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// Store unreachable
    #[error("Connection error: {0}")]
    Connection(String),

    /// Store rejected the query
    #[error("Query error: {0}")]
    Query(String),

    /// Any other transport failure
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// SPARQL errors
#[derive(Error, Debug)]
pub enum SparqlError {
    /// Executor failure
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    /// Result document could not be read
    #[error("Results error: {0}")]
    Results(String),

    /// Dump serialization failed
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

pub type SparqlResult<T> = Result<T, SparqlError>;

/// Query/update executor contract.
///
/// Implementations own the transport: they send `query` (with the PREFIX header built
/// from `prefixes`, see [`render_query`]) and return one row per solution. Updates
/// return no rows. Executors must only read `prefixes`.
///
/// Any `Fn(&str, Option<&PrefixRegistry>) -> ExecutorResult<Vec<Row>>` closure is an executor.
pub trait Executor: Send + Sync {
    fn execute(&self, query: &str, prefixes: Option<&PrefixRegistry>) -> ExecutorResult<Vec<Row>>;
}

impl<F> Executor for F
where
    F: Fn(&str, Option<&PrefixRegistry>) -> ExecutorResult<Vec<Row>> + Send + Sync,
{
    fn execute(&self, query: &str, prefixes: Option<&PrefixRegistry>) -> ExecutorResult<Vec<Row>> {
        self(query, prefixes)
    }
}
