//! Schema models built from SHACL shapes or inferred from instance data
//!
//! A [`Model`] holds the classes and properties of a data model. It is built once from
//! query result rows and never patched afterwards: to refresh it, build a new one.
//!
//! # Example
//!
//! ```rust
//! use graphly::rdf::row;
//! use graphly::schema::Model;
//!
//! let classes = vec![row([("uri", "ex:Person"), ("label", "Person")])];
//! let properties = vec![row([
//!     ("uri", "ex:spouse"),
//!     ("domain_uri", "ex:Person"),
//!     ("range_class_uri", "ex:Person"),
//!     ("range_datatype", ""),
//! ])];
//!
//! let model = Model::build(&classes, &properties).unwrap();
//! let spouse = model.find_property("ex:spouse", None, None).unwrap();
//! assert!(spouse.is_range_class);
//! ```

mod builder;
mod datatypes;
mod instance;
mod shacl;

pub use builder::{build_classes, build_properties, resolve_range};
pub use datatypes::{datatype_label, datatypes, DATATYPES};
pub use instance::InstanceModel;
pub use shacl::{classes_query, properties_query, ShaclModel};

use crate::rdf::Row;
use crate::sparql::SparqlError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model errors
#[derive(Error, Debug)]
pub enum ModelError {
    /// Required field missing or unparseable; aborts the build
    #[error("Malformed row: field '{field}' {reason}")]
    MalformedRow { field: String, reason: String },

    /// Several properties match a lookup that expects one
    #[error("Ambiguous property: {0}")]
    AmbiguousProperty(String),

    /// Query failure while loading shapes
    #[error(transparent)]
    Sparql(#[from] SparqlError),
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Class of the model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Class {
    pub uri: String,
    pub label: String,
}

impl Class {
    pub fn new(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
        }
    }
}

/// Property of the model with its resolved domain, range and cardinality
///
/// `range_target` holds either a class URI (`is_range_class == true`) or a datatype
/// identifier, never both. `None` means the shapes leave the range open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub uri: String,
    pub label: String,
    pub domain: Option<Class>,
    pub range_target: Option<String>,
    pub is_range_class: bool,
    /// `None` means unconstrained, not zero
    pub min_count: Option<u64>,
    pub max_count: Option<u64>,
    /// Target class of the shape declaring the property
    pub card_of: Option<Class>,
    /// `sh:order`
    pub order: Option<f64>,
}

impl Property {
    /// Property with only a URI and label
    pub fn new(uri: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            label: label.into(),
            domain: None,
            range_target: None,
            is_range_class: false,
            min_count: None,
            max_count: None,
            card_of: None,
            order: None,
        }
    }

    /// At least one value is required
    pub fn is_mandatory(&self) -> bool {
        self.min_count.map_or(false, |n| n > 0)
    }

    /// Whether the range is a literal datatype
    pub fn is_range_datatype(&self) -> bool {
        self.range_target.is_some() && !self.is_range_class
    }

    /// `domain-uri-range`, with `unknown` for missing ends
    pub fn key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.domain.as_ref().map_or("unknown", |d| d.uri.as_str()),
            self.uri,
            self.range_target.as_deref().unwrap_or("unknown"),
        )
    }
}

/// Application-level RDF subject
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resource {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_uri: Option<String>,
}

impl Resource {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = non_empty(label.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = non_empty(comment.into());
        self
    }

    pub fn with_class(mut self, class_uri: impl Into<String>) -> Self {
        self.class_uri = non_empty(class_uri.into());
        self
    }

    /// Label (or URI when unlabelled), followed by `: comment` if asked and present
    pub fn text(&self, with_comment: bool) -> String {
        let text = self.label.as_deref().unwrap_or(&self.uri);
        match (&self.comment, with_comment) {
            (Some(comment), true) => format!("{}: {}", text, comment),
            _ => text.to_string(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Classes and properties of a data model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    classes: Vec<Class>,
    properties: Vec<Property>,
}

impl Model {
    pub fn new(classes: Vec<Class>, properties: Vec<Property>) -> Self {
        Self {
            classes,
            properties,
        }
    }

    /// Build classes from `class_rows`, then properties from `property_rows` against them
    pub fn build(class_rows: &[Row], property_rows: &[Row]) -> ModelResult<Self> {
        let classes = build_classes(class_rows)?;
        let properties = build_properties(property_rows, &classes)?;
        Ok(Self::new(classes, properties))
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn find_class(&self, uri: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.uri == uri)
    }

    /// First property with `uri`, narrowed by domain and/or range class when given
    pub fn find_property(
        &self,
        uri: &str,
        domain_uri: Option<&str>,
        range_uri: Option<&str>,
    ) -> Option<&Property> {
        self.properties.iter().find(|p| {
            p.uri == uri
                && domain_uri.map_or(true, |d| p.domain.as_ref().map_or(false, |c| c.uri == d))
                && range_uri.map_or(true, |r| p.range_target.as_deref() == Some(r))
        })
    }

    /// Whether the property (declared for `card_of_uri`, when given) is mandatory
    pub fn is_prop_mandatory(&self, uri: &str, card_of_uri: Option<&str>) -> ModelResult<bool> {
        let selection: Vec<&Property> = self
            .properties
            .iter()
            .filter(|p| {
                p.uri == uri
                    && card_of_uri.map_or(true, |c| p.card_of.as_ref().map_or(false, |k| k.uri == c))
            })
            .collect();

        match selection.as_slice() {
            [] => Ok(false),
            [property] => Ok(property.is_mandatory()),
            _ => Err(ModelError::AmbiguousProperty(format!(
                "{} matches {} properties (card_of = {:?})",
                uri,
                selection.len(),
                card_of_uri
            ))),
        }
    }
}
