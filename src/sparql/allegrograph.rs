//! AllegroGraph backend
//!
//! AllegroGraph needs a query option declared as a prefix on every request, and has no
//! set semantics on insert.

use super::backend::{insert_data, SparqlBackend, SparqlClient};
use super::{Executor, SparqlResult};
use crate::config::GraphlyConfig;
use crate::rdf::{Prefix, PrefixRegistry, Row, Triple};
use tracing::debug;

/// Bindings every AllegroGraph request carries, as `(short, namespace)`
pub const REQUIRED_PREFIXES: &[(&str, &str)] = &[("franzOption_defaultDatasetBehavior", "franz:rdf")];

/// AllegroGraph backend over an [`Executor`]
pub struct AllegroGraph<E> {
    client: SparqlClient<E>,
}

impl<E: Executor> AllegroGraph<E> {
    pub fn new(executor: E) -> Self {
        Self::with_config(executor, GraphlyConfig::default())
    }

    pub fn with_config(executor: E, config: GraphlyConfig) -> Self {
        Self {
            client: SparqlClient::with_config(executor, config).named("AllegroGraph"),
        }
    }

    pub fn executor(&self) -> &E {
        self.client.executor()
    }

    /// Registry forwarded to the executor: a copy of `prefixes` (or an empty registry)
    /// with every required binding whose short name is not already there.
    ///
    /// A caller binding that reuses a required short name is kept as-is.
    pub fn derive_prefixes(prefixes: Option<&PrefixRegistry>) -> PrefixRegistry {
        let mut derived = prefixes.map(PrefixRegistry::copy).unwrap_or_default();
        let added = derived.extend_missing(
            REQUIRED_PREFIXES
                .iter()
                .map(|(short, namespace)| Prefix::new(*short, *namespace)),
        );
        if added < REQUIRED_PREFIXES.len() {
            debug!(
                "Keeping {} caller binding(s) over the required AllegroGraph prefixes",
                REQUIRED_PREFIXES.len() - added
            );
        }
        derived
    }
}

impl<E: Executor> SparqlBackend for AllegroGraph<E> {
    fn technology_name(&self) -> &str {
        self.client.technology_name()
    }

    fn config(&self) -> &GraphlyConfig {
        self.client.config()
    }

    fn run(&self, query: &str, prefixes: Option<&PrefixRegistry>) -> SparqlResult<Vec<Row>> {
        let derived = Self::derive_prefixes(prefixes);
        self.client.run(query, Some(&derived))
    }

    /// Delete the exact triples first, then insert them, both with the same `prefixes`
    fn insert(
        &self,
        triples: &[Triple],
        graph_uri: Option<&str>,
        prefixes: Option<&PrefixRegistry>,
    ) -> SparqlResult<()> {
        self.delete(triples, graph_uri, prefixes)?;
        insert_data(self, triples, graph_uri, prefixes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparql::ExecutorResult;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, Option<PrefixRegistry>)>>,
    }

    impl Executor for Recorder {
        fn execute(&self, query: &str, prefixes: Option<&PrefixRegistry>) -> ExecutorResult<Vec<Row>> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), prefixes.cloned()));
            Ok(Vec::new())
        }
    }

    fn required() -> PrefixRegistry {
        REQUIRED_PREFIXES
            .iter()
            .map(|(s, ns)| Prefix::new(*s, *ns))
            .collect()
    }

    #[test]
    fn test_no_prefixes_forwards_exactly_required() {
        let backend = AllegroGraph::new(Recorder::default());
        backend.run("SELECT * WHERE { ?s ?p ?o }", None).unwrap();

        let calls = backend.executor().calls.lock().unwrap();
        assert_eq!(calls[0].1.as_ref(), Some(&required()));
    }

    #[test]
    fn test_caller_registry_is_not_mutated() {
        let backend = AllegroGraph::new(Recorder::default());
        let caller = PrefixRegistry::from_prefixes([Prefix::new("ex", "http://example.org/")]).unwrap();
        let before = caller.clone();

        backend.run("SELECT * WHERE { ?s ?p ?o }", Some(&caller)).unwrap();

        assert_eq!(caller, before);
        let calls = backend.executor().calls.lock().unwrap();
        let forwarded = calls[0].1.as_ref().unwrap();
        assert!(forwarded.has("ex"));
        assert!(forwarded.has("franzOption_defaultDatasetBehavior"));
    }

    #[test]
    fn test_insert_deletes_first() {
        let backend = AllegroGraph::new(Recorder::default());
        let triples = vec![Triple::new("ex:a", "ex:p", "x")];
        backend.insert(&triples, None, None).unwrap();

        let calls = backend.executor().calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].0.contains("DELETE WHERE"));
        assert!(calls[1].0.contains("INSERT DATA"));
    }
}
