//! Loading a model from SHACL shapes stored in a graph

use super::{Model, ModelResult};
use crate::rdf::PrefixRegistry;
use crate::sparql::{Graph, SparqlBackend};
use tracing::info;

/// Node shapes with a name and a target class: one row per class (`uri`, `label`)
pub fn classes_query<B: SparqlBackend + ?Sized>(graph: &Graph<'_, B>) -> String {
    format!(
        r#"# graphly.schema.shacl.classes
SELECT DISTINCT
    ?uri
    (COALESCE(?label_, '') as ?label)
WHERE {{
    {}
        ?node a sh:NodeShape .
        ?node sh:name ?label_ .
        ?node sh:targetClass ?uri .
    {}
}}"#,
        graph.sparql_begin(),
        graph.sparql_end()
    )
}

/// Property shapes: one row per property and shape.
///
/// The class range (`sh:class`) and the datatype range (`sh:datatype`) come back in
/// separate columns. For an inverse path the property is the inverse one, it has no
/// domain and its range is the target class of the shape.
pub fn properties_query<B: SparqlBackend + ?Sized>(graph: &Graph<'_, B>) -> String {
    format!(
        r#"# graphly.schema.shacl.properties
SELECT DISTINCT
    ?uri
    (COALESCE(?label_, ?uri) as ?label)
    (COALESCE(?target_class_, '') as ?card_of_class_uri)
    (COALESCE(?domain_uri_, '') as ?domain_uri)
    (COALESCE(?range_class_uri_, '') as ?range_class_uri)
    (COALESCE(?datatype_, '') as ?range_datatype)
    (COALESCE(?order_, '') as ?order)
    (COALESCE(?min_count_, '') as ?min_count)
    (COALESCE(?max_count_, '') as ?max_count)
WHERE {{
    {}
        ?shape sh:property ?node .
        ?node sh:path ?path .
        OPTIONAL {{ ?shape sh:targetClass ?target_class_ . }}
        OPTIONAL {{ ?path sh:inversePath ?inverse_uri . }}
        OPTIONAL {{ ?node sh:name ?label_ . }}
        OPTIONAL {{ ?node sh:order ?order_ . }}
        OPTIONAL {{ ?node sh:minCount ?min_count_ . }}
        OPTIONAL {{ ?node sh:maxCount ?max_count_ . }}
        OPTIONAL {{ ?node sh:datatype ?datatype_ . }}
        OPTIONAL {{ ?node sh:class ?class_ . }}
        BIND(IF(isBlank(?path), '', ?target_class_) as ?domain_uri_)
        BIND(IF(isBlank(?path), ?target_class_, ?class_) as ?range_class_uri_)
        BIND(IF(isBlank(?path), ?inverse_uri, ?path) as ?uri)
    {}
}}"#,
        graph.sparql_begin(),
        graph.sparql_end()
    )
}

/// Model loader for SHACL shapes
pub struct ShaclModel;

impl ShaclModel {
    /// Query the shapes of `graph` and build the model.
    ///
    /// The queries need the `sh` prefix: it is added, with the other common
    /// vocabularies, to a copy of `prefixes` when missing. `prefixes` itself is only read.
    pub fn load<B: SparqlBackend + ?Sized>(
        graph: &Graph<'_, B>,
        prefixes: Option<&PrefixRegistry>,
    ) -> ModelResult<Model> {
        let mut derived = prefixes.map(PrefixRegistry::copy).unwrap_or_default();
        derived.extend_missing(PrefixRegistry::with_common().iter());

        let class_rows = graph.run(&classes_query(graph), Some(&derived))?;
        let property_rows = graph.run(&properties_query(graph), Some(&derived))?;
        let model = Model::build(&class_rows, &property_rows)?;

        info!(
            "Loaded SHACL model from {}: {} classes, {} properties",
            graph.uri().unwrap_or("the default graph"),
            model.classes().len(),
            model.properties().len()
        );
        Ok(model)
    }
}
