//! Backends: the operations every store supports, and the generic client

use super::graph::Graph;
use super::query::{graph_clause, prepare_triple, render_query, QueryKind};
use super::{Executor, SparqlResult};
use crate::config::GraphlyConfig;
use crate::rdf::{PrefixRegistry, Row, Shorts, Triple};
use tracing::debug;

/// Store-facing operations.
///
/// `insert` and `delete` default to [`insert_data`] and [`delete_where`], which go
/// through [`SparqlBackend::run`]; a backend customising `run` therefore applies its
/// policy to updates too.
pub trait SparqlBackend: Send + Sync {
    /// Name of the store technology, for logs
    fn technology_name(&self) -> &str;

    fn config(&self) -> &GraphlyConfig;

    /// Execute a query or update; updates return no rows
    fn run(&self, query: &str, prefixes: Option<&PrefixRegistry>) -> SparqlResult<Vec<Row>>;

    /// Add triples, optionally inside a named graph
    fn insert(
        &self,
        triples: &[Triple],
        graph_uri: Option<&str>,
        prefixes: Option<&PrefixRegistry>,
    ) -> SparqlResult<()> {
        insert_data(self, triples, graph_uri, prefixes)
    }

    /// Remove triples, optionally inside a named graph
    fn delete(
        &self,
        triples: &[Triple],
        graph_uri: Option<&str>,
        prefixes: Option<&PrefixRegistry>,
    ) -> SparqlResult<()> {
        delete_where(self, triples, graph_uri, prefixes)
    }

    /// The whole store as N-Quads: the default graph first, then every named graph,
    /// each triple carrying its graph as fourth term
    fn dump_nquads(&self, prefixes: &PrefixRegistry) -> SparqlResult<String> {
        let graphs = self.run(
            "# graphly.sparql.graphs\nSELECT DISTINCT ?g WHERE { GRAPH ?g { ?s ?p ?o . } }",
            Some(prefixes),
        )?;
        let names: Vec<String> = graphs
            .iter()
            .filter_map(|row| row.get("g"))
            .map(|g| g.to_text())
            .filter(|g| !g.is_empty())
            .collect();
        debug!("{} named graphs to dump", names.len());

        let mut content = Graph::default_graph(self).dump_nquads(prefixes)?;
        for name in &names {
            let graph = Graph::new(self, Some(name.as_str()), Some(prefixes));
            content.push_str(&graph.dump_nquads(prefixes)?);
        }
        Ok(content)
    }
}

/// `INSERT DATA` in chunks of `config().insert_chunk_size` triples, each chunk sent
/// through `backend.run` with the same `prefixes`. Nothing is sent for an empty slice.
pub fn insert_data<B: SparqlBackend + ?Sized>(
    backend: &B,
    triples: &[Triple],
    graph_uri: Option<&str>,
    prefixes: Option<&PrefixRegistry>,
) -> SparqlResult<()> {
    let shorts = Shorts::from(prefixes);
    let (open, close) = graph_clause(graph_uri, shorts);
    let chunk_size = backend.config().insert_chunk_size.max(1);

    for chunk in triples.chunks(chunk_size) {
        let query = format!(
            "# graphly.sparql.insert\nINSERT DATA {{\n{}\n{}\n{}\n}}",
            open,
            statements(chunk, shorts),
            close
        );
        backend.run(&query, prefixes)?;
    }
    Ok(())
}

/// One `DELETE WHERE` for the whole slice. Nothing is sent for an empty slice.
pub fn delete_where<B: SparqlBackend + ?Sized>(
    backend: &B,
    triples: &[Triple],
    graph_uri: Option<&str>,
    prefixes: Option<&PrefixRegistry>,
) -> SparqlResult<()> {
    if triples.is_empty() {
        return Ok(());
    }
    let shorts = Shorts::from(prefixes);
    let (open, close) = graph_clause(graph_uri, shorts);

    let query = format!(
        "# graphly.sparql.delete\nDELETE WHERE {{\n{}\n{}\n{}\n}}",
        open,
        statements(triples, shorts),
        close
    );
    backend.run(&query, prefixes)?;
    Ok(())
}

fn statements(triples: &[Triple], shorts: Shorts<'_>) -> String {
    triples
        .iter()
        .map(|t| prepare_triple(t, shorts))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generic SPARQL 1.1 backend over an [`Executor`]
pub struct SparqlClient<E> {
    executor: E,
    config: GraphlyConfig,
    technology_name: String,
}

impl<E: Executor> SparqlClient<E> {
    /// Client with the default configuration
    pub fn new(executor: E) -> Self {
        Self::with_config(executor, GraphlyConfig::default())
    }

    pub fn with_config(executor: E, config: GraphlyConfig) -> Self {
        Self {
            executor,
            config,
            technology_name: "SPARQL".to_string(),
        }
    }

    /// Rename the technology reported in logs
    pub fn named(mut self, technology_name: impl Into<String>) -> Self {
        self.technology_name = technology_name.into();
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}

impl<E: Executor> SparqlBackend for SparqlClient<E> {
    fn technology_name(&self) -> &str {
        &self.technology_name
    }

    fn config(&self) -> &GraphlyConfig {
        &self.config
    }

    fn run(&self, query: &str, prefixes: Option<&PrefixRegistry>) -> SparqlResult<Vec<Row>> {
        let kind = QueryKind::detect(query);
        debug!(
            "{} {} ({}):\n{}",
            self.technology_name,
            kind,
            if kind.is_update() { "update" } else { "query" },
            render_query(query, prefixes)
        );

        let rows = self.executor.execute(query, prefixes)?;
        if kind.is_update() {
            return Ok(Vec::new());
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Prefix, RowValue};
    use crate::sparql::{ExecutorError, ExecutorResult};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        queries: Mutex<Vec<String>>,
    }

    impl Executor for Recorder {
        fn execute(&self, query: &str, _: Option<&PrefixRegistry>) -> ExecutorResult<Vec<Row>> {
            self.queries
                .lock()
                .map_err(|e| ExecutorError::Connection(e.to_string()))?
                .push(query.to_string());
            Ok(vec![crate::rdf::row([("s", "ex:a")])])
        }
    }

    fn client(chunk_size: usize) -> SparqlClient<Recorder> {
        let config = GraphlyConfig {
            insert_chunk_size: chunk_size,
            ..GraphlyConfig::default()
        };
        SparqlClient::with_config(Recorder::default(), config)
    }

    fn queries(client: &SparqlClient<Recorder>) -> Vec<String> {
        client.executor().queries.lock().unwrap().clone()
    }

    fn prefixes() -> PrefixRegistry {
        PrefixRegistry::from_prefixes([Prefix::new("ex", "http://example.org/")]).unwrap()
    }

    #[test]
    fn test_insert_is_chunked() {
        let client = client(2);
        let triples: Vec<Triple> = (0..5)
            .map(|i| Triple::new(format!("ex:s{}", i), "ex:p", i as i64))
            .collect();

        client.insert(&triples, Some("ex:g"), Some(&prefixes())).unwrap();

        let sent = queries(&client);
        assert_eq!(sent.len(), 3);
        assert!(sent[0].contains("INSERT DATA {"));
        assert!(sent[0].contains("GRAPH ex:g {"));
        assert!(sent[0].contains("ex:s0 ex:p 0 ."));
        assert!(sent[2].contains("ex:s4 ex:p 4 ."));
    }

    #[test]
    fn test_empty_insert_and_delete_send_nothing() {
        let client = client(10);
        client.insert(&[], None, None).unwrap();
        client.delete(&[], None, None).unwrap();
        assert!(queries(&client).is_empty());
    }

    #[test]
    fn test_delete_where() {
        let client = client(10);
        let triples = vec![Triple::new("ex:a", "ex:name", "Alice")];
        client.delete(&triples, None, Some(&prefixes())).unwrap();

        let sent = queries(&client);
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("DELETE WHERE {"));
        assert!(sent[0].contains("ex:a ex:name \"Alice\" ."));
        assert!(!sent[0].contains("GRAPH"));
    }

    #[test]
    fn test_updates_return_no_rows() {
        let client = client(10);
        assert!(client.run("CLEAR ALL", None).unwrap().is_empty());

        let rows = client.run("SELECT ?s WHERE { ?s ?p ?o }", None).unwrap();
        assert_eq!(rows[0]["s"], RowValue::from("ex:a"));
    }

    #[test]
    fn test_ask_and_describe_return_rows() {
        let client = client(10);
        assert_eq!(client.run("ASK { ?s ?p ?o }", None).unwrap().len(), 1);
        assert_eq!(
            client.run("DESCRIBE <http://example.org/alice>", None).unwrap().len(),
            1
        );
    }
}
