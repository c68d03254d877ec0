//! Inferring a model from instance data
//!
//! Classes are the objects of the type property. Properties are every other predicate
//! in use: the domain is the type of the subject, the range is the type of an IRI
//! object or the datatype of a literal one.

use super::{Model, ModelResult};
use crate::rdf::{PrefixRegistry, RowValue, Shorts};
use crate::sparql::{prepare_value, Graph, SparqlBackend};
use oxrdf::vocab::rdf;
use tracing::info;

/// Model loader reading how instance data is typed and labelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceModel {
    /// Property giving the type of a resource
    pub type_property: String,
    /// Property giving the label of a class or property
    pub label_property: String,
    /// Property giving a description; excluded from the inferred properties
    pub comment_property: String,
}

impl Default for InstanceModel {
    fn default() -> Self {
        Self {
            type_property: "rdf:type".to_string(),
            label_property: "rdfs:label".to_string(),
            comment_property: "rdfs:comment".to_string(),
        }
    }
}

impl InstanceModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_property(mut self, property: impl Into<String>) -> Self {
        self.type_property = property.into();
        self
    }

    pub fn with_label_property(mut self, property: impl Into<String>) -> Self {
        self.label_property = property.into();
        self
    }

    pub fn with_comment_property(mut self, property: impl Into<String>) -> Self {
        self.comment_property = property.into();
        self
    }

    /// One row per class in use (`uri`, `label`)
    pub fn classes_query<B: SparqlBackend + ?Sized>(
        &self,
        graph: &Graph<'_, B>,
        shorts: Shorts<'_>,
    ) -> String {
        format!(
            r#"# graphly.schema.instance.classes
SELECT DISTINCT
    ?uri
    (COALESCE(?label_, '') as ?label)
WHERE {{
    {}
        ?subject {} ?uri .
        OPTIONAL {{ ?uri {} ?label_ }}
    {}
}}"#,
            graph.sparql_begin(),
            term(&self.type_property, shorts),
            term(&self.label_property, shorts),
            graph.sparql_end()
        )
    }

    /// One row per property, subject type and object type or datatype in use.
    ///
    /// The object type lands in `range_class_uri` for IRI objects and the literal
    /// datatype in `range_datatype`, so the two never share a column.
    pub fn properties_query<B: SparqlBackend + ?Sized>(
        &self,
        graph: &Graph<'_, B>,
        shorts: Shorts<'_>,
    ) -> String {
        let type_property = term(&self.type_property, shorts);
        let label_property = term(&self.label_property, shorts);
        format!(
            r#"# graphly.schema.instance.properties
SELECT DISTINCT
    ?uri
    (COALESCE(?label_, '') as ?label)
    (COALESCE(?domain_uri_, '') as ?domain_uri)
    ?range_class_uri
    ?range_datatype
WHERE {{
    {}
        ?s ?uri ?o .
        OPTIONAL {{ ?uri {} ?label_ }}
        OPTIONAL {{ ?s {} ?domain_uri_ . }}
        OPTIONAL {{ ?o {} ?range_class_uri_ . }}
    {}
    FILTER (?uri != {} && ?uri != {} && ?uri != {})
    BIND(IF(isIRI(?o), COALESCE(?range_class_uri_, ''), '') as ?range_class_uri)
    BIND(IF(isLiteral(?o), DATATYPE(?o), '') as ?range_datatype)
}}"#,
            graph.sparql_begin(),
            label_property,
            type_property,
            type_property,
            graph.sparql_end(),
            type_property,
            label_property,
            term(&self.comment_property, shorts)
        )
    }

    /// Query the instance data of `graph` and build the model.
    ///
    /// `rdf`, `rdfs` and `xsd` are added to a copy of `prefixes` when missing.
    pub fn load<B: SparqlBackend + ?Sized>(
        &self,
        graph: &Graph<'_, B>,
        prefixes: Option<&PrefixRegistry>,
    ) -> ModelResult<Model> {
        let mut derived = prefixes.map(PrefixRegistry::copy).unwrap_or_default();
        derived.extend_missing(PrefixRegistry::with_common().iter());

        let class_rows = graph.run(&self.classes_query(graph, derived.shorts()), Some(&derived))?;
        let property_rows =
            graph.run(&self.properties_query(graph, derived.shorts()), Some(&derived))?;
        let model = Model::build(&class_rows, &property_rows)?;

        info!(
            "Inferred model from {}: {} classes, {} properties",
            graph.uri().unwrap_or("the default graph"),
            model.classes().len(),
            model.properties().len()
        );
        Ok(model)
    }
}

/// A configured property as a query term; `a` is only valid in predicate position
fn term(property: &str, shorts: Shorts<'_>) -> String {
    if property == "a" {
        return rdf::TYPE.to_string();
    }
    prepare_value(&RowValue::from(property), shorts)
}
