//! RDF serialization formats
//!
//! Supports:
//! - Turtle (TTL), one statement per line, prefixed names where a binding matches
//! - N-Quads (NQ), full IRIs, optional graph term
//!
//! Both formats share the blank-node and term-classification subroutines below but
//! have separate entry points: [`turtle`] and [`nquads`]. [`chunks`] splits their
//! output for uploads.

pub mod chunks;
pub mod nquads;
pub mod turtle;

pub use chunks::{split_nquads_chunks, split_turtle_chunks};

use super::prefix::PrefixRegistry;
use super::term::{RowValue, TripleRow, BLANK_NODE_SENTINEL};
use oxrdf::BlankNode;
use thiserror::Error;
use tracing::debug;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Quads format (.nq)
    NQuads,
}

impl RdfFormat {
    /// Media type of the format
    pub fn media_type(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::NQuads => "application/n-quads",
        }
    }
}

/// Serialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    /// A triple cannot be written; the whole batch is abandoned
    #[error("Malformed triple #{index}: {reason}")]
    MalformedTriple { index: usize, reason: String },

    /// Graph name is not an IRI
    #[error("Invalid graph name: {0}")]
    InvalidGraph(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize triple rows in the given format.
    ///
    /// The first malformed triple aborts the batch.
    pub fn serialize(
        triples: &[TripleRow],
        prefixes: &PrefixRegistry,
        format: RdfFormat,
    ) -> SerializeResult<String> {
        let output = match format {
            RdfFormat::Turtle => turtle::serialize(triples, prefixes)?,
            RdfFormat::NQuads => nquads::serialize(triples, prefixes, None)?,
        };
        debug!("Serialized {} triples as {:?}", triples.len(), format);
        Ok(output)
    }
}

pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> SerializeError {
    SerializeError::MalformedTriple {
        index,
        reason: reason.into(),
    }
}

/// Value in a required position, or `MalformedTriple`
pub(crate) fn required<'t>(
    term: &'t Option<RowValue>,
    position: &str,
    index: usize,
) -> SerializeResult<&'t RowValue> {
    term.as_ref()
        .ok_or_else(|| malformed(index, format!("missing {}", position)))
}

/// Validate a sentinel-prefixed label and turn it into a blank node
pub(crate) fn blank_node(label: &str, index: usize) -> SerializeResult<BlankNode> {
    let id = label.strip_prefix(BLANK_NODE_SENTINEL).unwrap_or(label);
    BlankNode::new(id).map_err(|e| malformed(index, format!("invalid blank node '{}': {}", label, e)))
}

/// Lexical form of an `xsd:double`
pub(crate) fn double_lexical(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        format!("{:?}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::prefix::Prefix;

    fn registry() -> PrefixRegistry {
        PrefixRegistry::from_prefixes([Prefix::new("ex", "http://example.org/")]).unwrap()
    }

    #[test]
    fn test_dispatch_by_format() {
        let triples = vec![TripleRow::new("ex:a", "ex:b", "ex:c")];

        let ttl = RdfSerializer::serialize(&triples, &registry(), RdfFormat::Turtle).unwrap();
        assert!(ttl.contains("ex:a ex:b ex:c ."));

        let nq = RdfSerializer::serialize(&triples, &registry(), RdfFormat::NQuads).unwrap();
        assert_eq!(
            nq,
            "<http://example.org/a> <http://example.org/b> <http://example.org/c> .\n"
        );
    }

    #[test]
    fn test_missing_term_aborts_batch() {
        let mut broken = TripleRow::new("ex:a", "ex:b", "ex:c");
        broken.p = None;
        let triples = vec![TripleRow::new("ex:a", "ex:b", "ex:c"), broken];

        let err = RdfSerializer::serialize(&triples, &registry(), RdfFormat::Turtle).unwrap_err();
        assert_eq!(
            err,
            SerializeError::MalformedTriple {
                index: 1,
                reason: "missing predicate".to_string()
            }
        );
    }

    #[test]
    fn test_blank_node_validation() {
        assert_eq!(blank_node("_:n1", 0).unwrap().as_str(), "n1");
        assert!(blank_node("_:has space", 0).is_err());
    }

    #[test]
    fn test_double_lexical() {
        assert_eq!(double_lexical(1.5), "1.5");
        assert_eq!(double_lexical(2.0), "2.0");
        assert_eq!(double_lexical(f64::INFINITY), "INF");
    }
}
