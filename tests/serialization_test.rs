use graphly::rdf::{
    Prefix, PrefixRegistry, RdfFormat, RdfSerializer, RowValue, SerializeError, TripleRow,
    BLANK_NODE_SENTINEL,
};

fn registry() -> PrefixRegistry {
    PrefixRegistry::from_prefixes([
        Prefix::new("ex", "http://example.org/"),
        Prefix::new("foaf", "http://xmlns.com/foaf/0.1/"),
        Prefix::new("schema", "https://schema.org/"),
    ])
    .unwrap()
}

/// Statement lines of a Turtle document, without the prefix header
fn statements(turtle: &str) -> Vec<&str> {
    turtle
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with("@prefix"))
        .collect()
}

#[test]
fn test_blank_node_scenario() {
    let triples = vec![TripleRow::new("n1", "ex:knows", "n2").with_blank_flags("true", "true")];
    let output = RdfSerializer::serialize(&triples, &registry(), RdfFormat::Turtle).unwrap();

    let lines = statements(&output);
    assert_eq!(lines, vec!["_:n1 ex:knows _:n2 ."]);

    let terms: Vec<&str> = lines[0].split(' ').collect();
    assert!(terms[0].starts_with(BLANK_NODE_SENTINEL));
    assert!(terms[2].starts_with(BLANK_NODE_SENTINEL));
}

#[test]
fn test_empty_registry_still_valid() {
    let triples = vec![TripleRow::new("n1", "http://example.org/knows", "n2")
        .with_blank_flags("true", "true")];
    let output =
        RdfSerializer::serialize(&triples, &PrefixRegistry::new(), RdfFormat::Turtle).unwrap();

    assert_eq!(output, "_:n1 <http://example.org/knows> _:n2 .\n");
}

#[test]
fn test_blank_node_scenario_without_prefixes() {
    let triples = vec![TripleRow::new("n1", "ex:knows", "n2").with_blank_flags("true", "true")];
    let output =
        RdfSerializer::serialize(&triples, &PrefixRegistry::new(), RdfFormat::Turtle).unwrap();

    assert_eq!(output, "_:n1 ex:knows _:n2 .\n");
}

#[test]
fn test_local_parts_outside_turtle_names() {
    let registry = registry();
    for name in ["ex:a/b", "ex:x,y", "ex:a;b"] {
        let triples = vec![TripleRow::new(name, "ex:p", name)];
        let iri = registry.expand(name).unwrap();

        let turtle = RdfSerializer::serialize(&triples, &registry, RdfFormat::Turtle).unwrap();
        assert_eq!(statements(&turtle), vec![format!("<{}> ex:p <{}> .", iri, iri)]);

        let nquads = RdfSerializer::serialize(&triples, &registry, RdfFormat::NQuads).unwrap();
        assert_eq!(nquads, format!("<{}> <http://example.org/p> <{}> .\n", iri, iri));
    }

    for triple in [
        TripleRow::new("ex:a b", "ex:p", "ex:o"),
        TripleRow::new("ex:s", "ex:p", "ex:a b"),
    ] {
        for format in [RdfFormat::Turtle, RdfFormat::NQuads] {
            let err = RdfSerializer::serialize(&[triple.clone()], &registry, format).unwrap_err();
            assert!(matches!(err, SerializeError::MalformedTriple { index: 0, .. }));
        }
    }
}

#[test]
fn test_flagged_subject_keeps_value_as_suffix() {
    for label in ["b0", "node42", "genid-abc"] {
        let triples =
            vec![TripleRow::new(label, "ex:p", "ex:o").with_blank_flags("true", "false")];
        let output = RdfSerializer::serialize(&triples, &registry(), RdfFormat::Turtle).unwrap();
        let subject = statements(&output)[0].split(' ').next().unwrap().to_string();

        assert_eq!(subject, format!("{}{}", BLANK_NODE_SENTINEL, label));
    }
}

#[test]
fn test_blank_flags_are_coerced_to_text() {
    let mut triple = TripleRow::new("n1", "ex:p", "ex:b");
    // A native boolean reads as "true" once coerced; "True" is not the marker
    triple.s_is_blank = Some(RowValue::Boolean(true));
    triple.o_is_blank = Some(RowValue::from("True"));

    let output = RdfSerializer::serialize(&[triple], &registry(), RdfFormat::Turtle).unwrap();
    assert_eq!(statements(&output), vec!["_:n1 ex:p ex:b ."]);
}

#[test]
fn test_compaction_round_trip() {
    let registry = registry();
    let iris = [
        "http://example.org/alice",
        "http://xmlns.com/foaf/0.1/name",
        "https://schema.org/Person",
    ];

    for iri in iris {
        let triples = vec![TripleRow::new(iri, iri, iri)];
        let output = RdfSerializer::serialize(&triples, &registry, RdfFormat::Turtle).unwrap();

        for term in statements(&output)[0].trim_end_matches(" .").split(' ') {
            let (short, local) = term.split_once(':').unwrap();
            let namespace = registry.namespace(short).unwrap();
            assert_eq!(format!("{}{}", namespace, local), iri);
            assert_eq!(registry.expand(term).as_deref(), Some(iri));
        }
    }
}

#[test]
fn test_uncompactable_iri_is_emitted_in_full() {
    let triples = vec![TripleRow::new(
        "http://other.org/x",
        "ex:links",
        "http://example.org/path/with/slashes",
    )];
    let output = RdfSerializer::serialize(&triples, &registry(), RdfFormat::Turtle).unwrap();

    assert_eq!(
        statements(&output),
        vec!["<http://other.org/x> ex:links <http://example.org/path/with/slashes> ."]
    );
}

#[test]
fn test_object_keeps_original_typing() {
    let triples = vec![
        TripleRow::new("ex:alice", "ex:age", 30i64),
        TripleRow::new("ex:alice", "ex:active", true),
        TripleRow::new("ex:alice", "ex:name", "Alice \"Al\" Smith"),
    ];
    let output = RdfSerializer::serialize(&triples, &registry(), RdfFormat::Turtle).unwrap();

    assert_eq!(
        statements(&output),
        vec![
            "ex:alice ex:age 30 .",
            "ex:alice ex:active true .",
            r#"ex:alice ex:name "Alice \"Al\" Smith" ."#,
        ]
    );
}

#[test]
fn test_turtle_header() {
    let triples = vec![TripleRow::new("ex:a", "a", "ex:B")];
    let output = RdfSerializer::serialize(&triples, &registry(), RdfFormat::Turtle).unwrap();

    assert!(output.starts_with("@prefix ex: <http://example.org/> .\n"));
    assert!(output.ends_with("\n\nex:a a ex:B .\n"));
}

#[test]
fn test_nquads_terms_are_absolute() {
    let triples = vec![
        TripleRow::new("ex:alice", "foaf:knows", "b1").with_blank_flags("false", "true"),
        TripleRow::new("ex:alice", "ex:age", 30i64),
    ];
    let output = RdfSerializer::serialize(&triples, &registry(), RdfFormat::NQuads).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines[0],
        "<http://example.org/alice> <http://xmlns.com/foaf/0.1/knows> _:b1 ."
    );
    assert_eq!(
        lines[1],
        "<http://example.org/alice> <http://example.org/age> \
         \"30\"^^<http://www.w3.org/2001/XMLSchema#integer> ."
    );
}

#[test]
fn test_missing_term_aborts_batch() {
    let mut broken = TripleRow::new("ex:b", "ex:p", "ex:o");
    broken.o = None;
    let triples = vec![TripleRow::new("ex:a", "ex:p", "ex:o"), broken];

    for format in [RdfFormat::Turtle, RdfFormat::NQuads] {
        let err = RdfSerializer::serialize(&triples, &registry(), format).unwrap_err();
        assert!(matches!(err, SerializeError::MalformedTriple { index: 1, .. }));
    }
}

#[test]
fn test_literal_subject_is_malformed() {
    let triples = vec![TripleRow::new("just text", "ex:p", "ex:o")];
    let err = RdfSerializer::serialize(&triples, &registry(), RdfFormat::Turtle).unwrap_err();
    assert!(matches!(err, SerializeError::MalformedTriple { index: 0, .. }));
}
