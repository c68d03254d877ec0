//! Turtle format implementation

use super::{blank_node, double_lexical, malformed, required, SerializeResult};
use crate::rdf::prefix::{is_prefixed_name_shape, PrefixRegistry};
use crate::rdf::term::{blank_node_label, classify, RowValue, TermKind, TripleRow};
use oxrdf::vocab::xsd;
use oxrdf::{Literal, NamedNode};

/// Serialize triple rows to Turtle: the `@prefix` header, a blank line, then one
/// statement per line.
pub fn serialize(triples: &[TripleRow], prefixes: &PrefixRegistry) -> SerializeResult<String> {
    let mut content = String::new();
    if !prefixes.is_empty() {
        content.push_str(&prefixes.turtle_header());
        content.push_str("\n\n");
    }
    for (index, triple) in triples.iter().enumerate() {
        content.push_str(&statement(triple, prefixes, index)?);
        content.push('\n');
    }
    Ok(content)
}

/// A single Turtle statement, terminated by ` .`
///
/// Subjects and predicates also accept a well-formed `short:local` whose short is not
/// in `prefixes`; declaring it is left to the caller.
pub fn statement(
    triple: &TripleRow,
    prefixes: &PrefixRegistry,
    index: usize,
) -> SerializeResult<String> {
    let s_text = required(&triple.s, "subject", index)?.to_text();
    let subject = match blank_node_label(&s_text, triple.subject_is_blank()) {
        Some(label) => blank_node(&label, index)?.to_string(),
        None => resource(&s_text, prefixes, index)?
            .or_else(|| unbound_name(&s_text))
            .ok_or_else(|| malformed(index, format!("subject '{}' is not an IRI", s_text)))?,
    };

    let p_text = required(&triple.p, "predicate", index)?.to_text();
    let predicate = match classify(&p_text, prefixes.shorts()) {
        TermKind::TypeKeyword => "a".to_string(),
        _ => resource(&p_text, prefixes, index)?
            .or_else(|| unbound_name(&p_text))
            .ok_or_else(|| malformed(index, format!("predicate '{}' is not an IRI", p_text)))?,
    };

    // The text copy only decides blankness; the original value keeps its typing.
    let o_value = required(&triple.o, "object", index)?;
    let o_text = o_value.to_text();
    let object = match blank_node_label(&o_text, triple.object_is_blank()) {
        Some(label) => blank_node(&label, index)?.to_string(),
        None => object(o_value, prefixes, index)?,
    };

    Ok(format!("{} {} {} .", subject, predicate, object))
}

/// IRI term: compacted when a binding matches, `<iri>` otherwise.
///
/// A bound prefixed name whose local part is not a Turtle local name is written
/// expanded; if the expansion is not an IRI either, the triple is malformed.
fn resource(text: &str, prefixes: &PrefixRegistry, index: usize) -> SerializeResult<Option<String>> {
    match classify(text, prefixes.shorts()) {
        TermKind::Iri(iri) => Ok(NamedNode::new(iri)
            .ok()
            .map(|node| prefixes.compact(iri).unwrap_or_else(|| node.to_string()))),
        TermKind::PrefixedName(name) => Ok(Some(name.to_string())),
        TermKind::ExpandableName(name) => prefixes
            .expand(name)
            .and_then(|iri| NamedNode::new(iri).ok())
            .map(|node| Some(node.to_string()))
            .ok_or_else(|| malformed(index, format!("'{}' does not expand to an IRI", name))),
        _ => Ok(None),
    }
}

fn unbound_name(text: &str) -> Option<String> {
    is_prefixed_name_shape(text).then(|| text.to_string())
}

fn object(value: &RowValue, prefixes: &PrefixRegistry, index: usize) -> SerializeResult<String> {
    Ok(match value {
        RowValue::Integer(i) => i.to_string(),
        RowValue::Boolean(b) => b.to_string(),
        RowValue::Float(x) => {
            let datatype = prefixes
                .compact(xsd::DOUBLE.as_str())
                .unwrap_or_else(|| xsd::DOUBLE.to_string());
            format!("\"{}\"^^{}", double_lexical(*x), datatype)
        }
        RowValue::Text(text) => resource(text, prefixes, index)?
            .unwrap_or_else(|| Literal::new_simple_literal(text.as_str()).to_string()),
    })
}
