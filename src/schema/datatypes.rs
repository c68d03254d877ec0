//! Built-in literal datatypes
//!
//! Kept apart from the class set: a datatype range never resolves to a class.

use super::Resource;

/// `(identifier, label)` of the common XSD and RDF datatypes
pub const DATATYPES: &[(&str, &str)] = &[
    ("xsd:string", "String"),
    ("xsd:integer", "Integer"),
    ("xsd:decimal", "Decimal"),
    ("xsd:float", "Float"),
    ("xsd:double", "Double"),
    ("xsd:boolean", "Boolean"),
    ("xsd:dateTime", "Date Time"),
    ("xsd:date", "Date"),
    ("xsd:time", "Time"),
    ("xsd:gYear", "G Year"),
    ("xsd:gMonth", "G Month"),
    ("xsd:gDay", "G Day"),
    ("xsd:gYearMonth", "G Year Month"),
    ("xsd:gMonthDay", "G Month Day"),
    ("xsd:duration", "Duration"),
    ("xsd:dayTimeDuration", "Day Time Duration"),
    ("xsd:yearMonthDuration", "Year Month Duration"),
    ("xsd:hexBinary", "Hexadecimal Binary"),
    ("xsd:base64Binary", "Base64 Binary"),
    ("xsd:anyURI", "Any URI"),
    ("xsd:language", "Language"),
    ("rdf:langString", "Language String"),
    ("rdf:HTML", "HTML"),
];

/// The datatypes as resources typed `rdfs:Datatype`
pub fn datatypes() -> Vec<Resource> {
    DATATYPES
        .iter()
        .map(|(uri, label)| Resource::new(*uri).with_label(*label).with_class("rdfs:Datatype"))
        .collect()
}

/// Label of a built-in datatype
pub fn datatype_label(uri: &str) -> Option<&'static str> {
    DATATYPES
        .iter()
        .find(|(candidate, _)| *candidate == uri)
        .map(|(_, label)| *label)
}
