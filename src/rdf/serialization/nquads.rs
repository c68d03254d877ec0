//! N-Quads format implementation
//!
//! Terms are built as oxrdf values and written with their N-Triples display, so IRIs
//! are always absolute and literals always quoted and typed.

use super::{blank_node, double_lexical, malformed, required, SerializeError, SerializeResult};
use crate::rdf::prefix::{PrefixRegistry, Shorts};
use crate::rdf::term::{blank_node_label, classify, RowValue, TermKind, TripleRow};
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{Literal, NamedNode};

/// Serialize triple rows to N-Quads, one quad per line.
///
/// `graph` is written as the fourth term of every line; prefixed names are expanded
/// against `prefixes`.
pub fn serialize(
    triples: &[TripleRow],
    prefixes: &PrefixRegistry,
    graph: Option<&str>,
) -> SerializeResult<String> {
    let graph = graph
        .map(|g| named_node(g, prefixes).ok_or_else(|| SerializeError::InvalidGraph(g.to_string())))
        .transpose()?;

    let mut content = String::new();
    for (index, triple) in triples.iter().enumerate() {
        content.push_str(&statement(triple, prefixes, graph.as_ref(), index)?);
        content.push('\n');
    }
    Ok(content)
}

/// A single N-Quads statement, terminated by ` .`
pub fn statement(
    triple: &TripleRow,
    prefixes: &PrefixRegistry,
    graph: Option<&NamedNode>,
    index: usize,
) -> SerializeResult<String> {
    let s_text = required(&triple.s, "subject", index)?.to_text();
    let subject = match blank_node_label(&s_text, triple.subject_is_blank()) {
        Some(label) => blank_node(&label, index)?.to_string(),
        None => named_node(&s_text, prefixes)
            .ok_or_else(|| malformed(index, format!("subject '{}' is not an IRI", s_text)))?
            .to_string(),
    };

    let p_text = required(&triple.p, "predicate", index)?.to_text();
    let predicate = if p_text == "a" {
        rdf::TYPE.into_owned()
    } else {
        named_node(&p_text, prefixes)
            .ok_or_else(|| malformed(index, format!("predicate '{}' is not an IRI", p_text)))?
    };

    let o_value = required(&triple.o, "object", index)?;
    let o_text = o_value.to_text();
    let object = match blank_node_label(&o_text, triple.object_is_blank()) {
        Some(label) => blank_node(&label, index)?.to_string(),
        None => object(o_value, prefixes, index)?,
    };

    Ok(match graph {
        Some(graph) => format!("{} {} {} {} .", subject, predicate, object, graph),
        None => format!("{} {} {} .", subject, predicate, object),
    })
}

/// Expand a prefixed name and parse the result as an absolute IRI
fn named_node(text: &str, prefixes: &PrefixRegistry) -> Option<NamedNode> {
    let expanded = prefixes.lengthen(text);
    match classify(&expanded, Shorts::none()) {
        TermKind::Iri(iri) => NamedNode::new(iri).ok(),
        _ => None,
    }
}

/// Bound prefixed names must expand to an IRI; other text that is not one is a literal
fn object(value: &RowValue, prefixes: &PrefixRegistry, index: usize) -> SerializeResult<String> {
    Ok(match value {
        RowValue::Integer(i) => Literal::new_typed_literal(i.to_string(), xsd::INTEGER).to_string(),
        RowValue::Boolean(b) => Literal::new_typed_literal(b.to_string(), xsd::BOOLEAN).to_string(),
        RowValue::Float(x) => Literal::new_typed_literal(double_lexical(*x), xsd::DOUBLE).to_string(),
        RowValue::Text(text) => match (named_node(text, prefixes), classify(text, prefixes.shorts())) {
            (Some(node), _) => node.to_string(),
            (None, TermKind::PrefixedName(name) | TermKind::ExpandableName(name)) => {
                return Err(malformed(index, format!("'{}' does not expand to an IRI", name)));
            }
            (None, _) => Literal::new_simple_literal(text.as_str()).to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::prefix::Prefix;

    fn registry() -> PrefixRegistry {
        PrefixRegistry::from_prefixes([Prefix::new("ex", "http://example.org/")]).unwrap()
    }

    #[test]
    fn test_prefixed_names_expanded() {
        let triple = TripleRow::new("ex:alice", "ex:knows", "ex:bob");
        assert_eq!(
            statement(&triple, &registry(), None, 0).unwrap(),
            "<http://example.org/alice> <http://example.org/knows> <http://example.org/bob> ."
        );
    }

    #[test]
    fn test_graph_term() {
        let output = serialize(
            &[TripleRow::new("ex:alice", "a", "ex:Person")],
            &registry(),
            Some("ex:people"),
        )
        .unwrap();
        assert_eq!(
            output,
            "<http://example.org/alice> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> \
             <http://example.org/Person> <http://example.org/people> .\n"
        );
    }

    #[test]
    fn test_invalid_graph() {
        let err = serialize(&[], &registry(), Some("not a graph")).unwrap_err();
        assert_eq!(err, SerializeError::InvalidGraph("not a graph".to_string()));
    }

    #[test]
    fn test_blank_nodes() {
        let triple = TripleRow::new("n1", "ex:knows", "n2").with_blank_flags("true", "true");
        assert_eq!(
            statement(&triple, &registry(), None, 0).unwrap(),
            "_:n1 <http://example.org/knows> _:n2 ."
        );
    }

    #[test]
    fn test_typed_literals() {
        let triple = TripleRow::new("ex:alice", "ex:age", 42i64);
        assert_eq!(
            statement(&triple, &registry(), None, 0).unwrap(),
            "<http://example.org/alice> <http://example.org/age> \
             \"42\"^^<http://www.w3.org/2001/XMLSchema#integer> ."
        );

        let text = TripleRow::new("ex:alice", "ex:name", "Alice");
        assert!(statement(&text, &registry(), None, 0)
            .unwrap()
            .ends_with(" \"Alice\" ."));
    }

    #[test]
    fn test_unknown_prefix_subject_rejected() {
        let triple = TripleRow::new("foo:alice", "ex:knows", "ex:bob");
        assert!(statement(&triple, &registry(), None, 0).is_err());
    }
}
