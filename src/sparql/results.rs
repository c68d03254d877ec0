//! SPARQL 1.1 JSON results (`application/sparql-results+json`) to rows

use super::{SparqlError, SparqlResult};
use crate::rdf::{PrefixRegistry, Row, RowValue};
use indexmap::IndexMap;
use oxrdf::vocab::xsd;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ResultsDocument {
    #[serde(default)]
    results: Option<ResultsBody>,
}

#[derive(Debug, Deserialize)]
struct ResultsBody {
    #[serde(default)]
    bindings: Vec<IndexMap<String, Binding>>,
}

#[derive(Debug, Deserialize)]
struct Binding {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default)]
    datatype: Option<String>,
}

/// Parse a results document.
///
/// `uri` values are compacted against `prefixes`, `xsd:integer` literals become
/// [`RowValue::Integer`], everything else (blank-node labels included) stays text.
/// A document without a `results` member (ASK, updates) yields no rows.
pub fn parse_results(json: &str, prefixes: Option<&PrefixRegistry>) -> SparqlResult<Vec<Row>> {
    let document: ResultsDocument =
        serde_json::from_str(json).map_err(|e| SparqlError::Results(e.to_string()))?;
    Ok(rows(document, prefixes))
}

/// Same as [`parse_results`], from an already decoded JSON value
pub fn parse_results_value(
    json: &serde_json::Value,
    prefixes: Option<&PrefixRegistry>,
) -> SparqlResult<Vec<Row>> {
    let document = ResultsDocument::deserialize(json)
        .map_err(|e| SparqlError::Results(e.to_string()))?;
    Ok(rows(document, prefixes))
}

fn rows(document: ResultsDocument, prefixes: Option<&PrefixRegistry>) -> Vec<Row> {
    let Some(body) = document.results else {
        return Vec::new();
    };
    body.bindings
        .into_iter()
        .map(|solution| {
            solution
                .into_iter()
                .map(|(name, binding)| (name, value(binding, prefixes)))
                .collect()
        })
        .collect()
}

fn value(binding: Binding, prefixes: Option<&PrefixRegistry>) -> RowValue {
    match binding.kind.as_str() {
        "uri" => match prefixes {
            Some(prefixes) => RowValue::Text(prefixes.shorten(&binding.value)),
            None => RowValue::Text(binding.value),
        },
        "literal" | "typed-literal" if binding.datatype.as_deref() == Some(xsd::INTEGER.as_str()) => {
            binding
                .value
                .trim()
                .parse::<i64>()
                .map(RowValue::Integer)
                .unwrap_or(RowValue::Text(binding.value))
        }
        _ => RowValue::Text(binding.value),
    }
}
