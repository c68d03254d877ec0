//! Named graph scope over a backend

use super::backend::SparqlBackend;
use super::query::graph_clause;
use super::SparqlResult;
use crate::rdf::serialization::{nquads, split_turtle_chunks, turtle};
use crate::rdf::{PrefixRegistry, Row, Shorts, Triple, TripleRow};
use tracing::{debug, info};

/// A graph of a store: the default graph when `uri` is `None`
pub struct Graph<'a, B: SparqlBackend + ?Sized> {
    backend: &'a B,
    uri: Option<String>,
    uri_long: Option<String>,
    sparql_begin: String,
    sparql_end: String,
}

impl<'a, B: SparqlBackend + ?Sized> Graph<'a, B> {
    /// `uri` may be a prefixed name; it is expanded with `prefixes` for N-Quads output
    pub fn new(backend: &'a B, uri: Option<&str>, prefixes: Option<&PrefixRegistry>) -> Self {
        let (sparql_begin, sparql_end) = graph_clause(uri, Shorts::from(prefixes));
        let uri_long = uri.map(|u| match prefixes {
            Some(prefixes) => prefixes.lengthen(u),
            None => u.to_string(),
        });
        Self {
            backend,
            uri: uri.map(str::to_string),
            uri_long,
            sparql_begin,
            sparql_end,
        }
    }

    /// The default graph
    pub fn default_graph(backend: &'a B) -> Self {
        Self::new(backend, None, None)
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Graph IRI with its prefix expanded
    pub fn uri_long(&self) -> Option<&str> {
        self.uri_long.as_deref()
    }

    /// `GRAPH <uri> {`, empty for the default graph
    pub fn sparql_begin(&self) -> &str {
        &self.sparql_begin
    }

    /// `}`, empty for the default graph
    pub fn sparql_end(&self) -> &str {
        &self.sparql_end
    }

    pub fn backend(&self) -> &'a B {
        self.backend
    }

    pub fn run(&self, query: &str, prefixes: Option<&PrefixRegistry>) -> SparqlResult<Vec<Row>> {
        self.backend.run(query, prefixes)
    }

    pub fn insert(&self, triples: &[Triple], prefixes: Option<&PrefixRegistry>) -> SparqlResult<()> {
        if triples.is_empty() {
            return Ok(());
        }
        self.backend.insert(triples, self.uri(), prefixes)
    }

    pub fn delete(&self, triples: &[Triple], prefixes: Option<&PrefixRegistry>) -> SparqlResult<()> {
        if triples.is_empty() {
            return Ok(());
        }
        self.backend.delete(triples, self.uri(), prefixes)
    }

    /// Every triple of the graph with its blank-node flags.
    ///
    /// Pages of `config().dump_page_size` rows are fetched with LIMIT/OFFSET until a
    /// page comes back short.
    pub fn dump_rows(&self, prefixes: Option<&PrefixRegistry>) -> SparqlResult<Vec<TripleRow>> {
        let page_size = self.backend.config().dump_page_size.max(1);
        let mut triples = Vec::new();
        let mut offset = 0;

        loop {
            let query = format!(
                "# graphly.graph.dump\n\
                 SELECT ?s ?p ?o ?s_is_blank ?o_is_blank\n\
                 WHERE {{\n\
                 {}\n\
                 ?s ?p ?o .\n\
                 BIND(isBlank(?s) as ?s_is_blank)\n\
                 BIND(isBlank(?o) as ?o_is_blank)\n\
                 {}\n\
                 }}\n\
                 LIMIT {}\n\
                 OFFSET {}",
                self.sparql_begin, self.sparql_end, page_size, offset
            );
            let page = self.run(&query, prefixes)?;
            debug!("Dump page at offset {}: {} rows", offset, page.len());

            let done = page.len() < page_size;
            triples.extend(page.iter().map(TripleRow::from_row));
            if done {
                break;
            }
            offset += page_size;
        }

        info!(
            "Dumped {} triples from {}",
            triples.len(),
            self.uri().unwrap_or("the default graph")
        );
        Ok(triples)
    }

    /// The graph as Turtle: prefix header, then one statement per line
    pub fn dump_turtle(&self, prefixes: &PrefixRegistry) -> SparqlResult<String> {
        let triples = self.dump_rows(Some(prefixes))?;
        Ok(turtle::serialize(&triples, prefixes)?)
    }

    /// The graph as Turtle documents of at most `config().upload_chunk_lines`
    /// statements, each with the full prefix header
    pub fn dump_turtle_chunks(&self, prefixes: &PrefixRegistry) -> SparqlResult<Vec<String>> {
        let turtle = self.dump_turtle(prefixes)?;
        Ok(split_turtle_chunks(&turtle, self.backend.config().upload_chunk_lines))
    }

    /// The graph as N-Quads, with the graph IRI as fourth term
    pub fn dump_nquads(&self, prefixes: &PrefixRegistry) -> SparqlResult<String> {
        let triples = self.dump_rows(Some(prefixes))?;
        Ok(nquads::serialize(&triples, prefixes, self.uri_long())?)
    }
}
