//! Query text helpers: query kind detection, rendering and value preparation

use crate::rdf::{classify, PrefixRegistry, RowValue, Shorts, TermKind, Triple, BLANK_NODE_SENTINEL};
use oxrdf::{Literal, NamedNode};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Leading comments, whitespace and PREFIX/BASE declarations, then the first keyword
const FIRST_KEYWORD: &str =
    r"(?i)^(?:\s+|#[^\n]*(?:\n|$)|PREFIX\s+[\w.-]*:\s*<[^>]*>|BASE\s*<[^>]*>)*(\w+)";

/// Main operation of a SPARQL request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Select,
    Construct,
    Ask,
    Describe,
    Insert,
    Delete,
    Clear,
    Other,
}

impl QueryKind {
    /// Detect the operation, skipping leading comments and prefix declarations
    pub fn detect(query: &str) -> Self {
        static RE: OnceLock<Option<Regex>> = OnceLock::new();
        let Some(re) = RE.get_or_init(|| Regex::new(FIRST_KEYWORD).ok()).as_ref() else {
            return QueryKind::Other;
        };

        let keyword = re
            .captures(query)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_ascii_uppercase());

        match keyword.as_deref() {
            Some("SELECT") => QueryKind::Select,
            Some("CONSTRUCT") => QueryKind::Construct,
            Some("ASK") => QueryKind::Ask,
            Some("DESCRIBE") => QueryKind::Describe,
            Some("INSERT") => QueryKind::Insert,
            Some("DELETE") => QueryKind::Delete,
            Some("CLEAR") => QueryKind::Clear,
            _ => QueryKind::Other,
        }
    }

    /// Sent as an update rather than a query
    pub fn is_update(&self) -> bool {
        !matches!(
            self,
            QueryKind::Select | QueryKind::Construct | QueryKind::Ask | QueryKind::Describe
        )
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKind::Select => "SELECT",
            QueryKind::Construct => "CONSTRUCT",
            QueryKind::Ask => "ASK",
            QueryKind::Describe => "DESCRIBE",
            QueryKind::Insert => "INSERT",
            QueryKind::Delete => "DELETE",
            QueryKind::Clear => "CLEAR",
            QueryKind::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// Full request text: the PREFIX header, a blank line, then the query with every line
/// trimmed and blank lines removed.
pub fn render_query(text: &str, prefixes: Option<&PrefixRegistry>) -> String {
    let body = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    match prefixes.filter(|p| !p.is_empty()) {
        Some(prefixes) => format!("{}\n\n{}", prefixes.sparql_header(), body),
        None => body,
    }
}

/// Write a value as a SPARQL term.
///
/// Numbers and booleans are written as-is, `?var`, `a`, blank nodes and prefixed names
/// with a known short are kept, absolute IRIs are wrapped in `<>`, anything else is
/// quoted as a string literal. A prefixed name whose local part cannot be written
/// compactly is expanded, or quoted if the expansion is not an IRI.
pub fn prepare_value(value: &RowValue, shorts: Shorts<'_>) -> String {
    let text = match value {
        RowValue::Text(text) => text,
        other => return other.to_text(),
    };
    if text.starts_with(BLANK_NODE_SENTINEL) {
        return text.clone();
    }
    match classify(text, shorts) {
        TermKind::TypeKeyword => "a".to_string(),
        TermKind::Variable(var) | TermKind::PrefixedName(var) => var.to_string(),
        TermKind::Iri(iri) => format!("<{}>", iri),
        TermKind::ExpandableName(name) => shorts
            .expand(name)
            .and_then(|iri| NamedNode::new(iri).ok())
            .map(|node| node.to_string())
            .unwrap_or_else(|| Literal::new_simple_literal(name).to_string()),
        TermKind::Literal(literal) => Literal::new_simple_literal(literal).to_string(),
    }
}

/// `s p o .` for an update body
pub fn prepare_triple(triple: &Triple, shorts: Shorts<'_>) -> String {
    format!(
        "{} {} {} .",
        prepare_value(&triple.subject, shorts),
        prepare_value(&triple.predicate, shorts),
        prepare_value(&triple.object, shorts)
    )
}

/// Opening and closing of a `GRAPH` block, empty for the default graph
pub fn graph_clause(graph_uri: Option<&str>, shorts: Shorts<'_>) -> (String, String) {
    match graph_uri {
        Some(uri) => (
            format!("GRAPH {} {{", prepare_value(&RowValue::from(uri), shorts)),
            "}".to_string(),
        ),
        None => (String::new(), String::new()),
    }
}
