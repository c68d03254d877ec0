use graphly::rdf::row;
use graphly::{
    AllegroGraph, ExecutorResult, Graph, GraphlyConfig, PrefixRegistry, Row, RowValue,
    ShaclModel, SparqlBackend, SparqlClient, Triple,
};

const CONFIG: &str = r#"
insert_chunk_size: 2
dump_page_size: 100
prefixes:
  - short: ex
    long: http://example.org/
"#;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Graphly v{}", graphly::version());
    println!("==========================================");
    println!();

    let config = GraphlyConfig::from_yaml_str(CONFIG)?;
    let prefixes = config.registry()?;

    demo_shacl_model(&config, &prefixes)?;
    demo_dump(&config, &prefixes)?;
    demo_allegrograph(&config, &prefixes)?;

    Ok(())
}

/// Canned store answering the queries issued by the demos
fn canned_store(query: &str, _prefixes: Option<&PrefixRegistry>) -> ExecutorResult<Vec<Row>> {
    if query.contains("graphly.schema.shacl.classes") {
        return Ok(vec![
            row([("uri", "ex:Person"), ("label", "Person")]),
            row([("uri", "ex:Company"), ("label", "Company")]),
        ]);
    }
    if query.contains("graphly.schema.shacl.properties") {
        let mut age = row([
            ("uri", "ex:age"),
            ("label", "age"),
            ("card_of_class_uri", "ex:Person"),
            ("domain_uri", "ex:Person"),
            ("range_class_uri", ""),
            ("range_datatype", "xsd:integer"),
        ]);
        age.insert("max_count".to_string(), RowValue::Integer(1));
        let mut employer = row([
            ("uri", "ex:employer"),
            ("label", "employer"),
            ("card_of_class_uri", "ex:Person"),
            ("domain_uri", "ex:Person"),
            ("range_class_uri", "ex:Company"),
            ("range_datatype", ""),
        ]);
        employer.insert("min_count".to_string(), RowValue::Integer(1));
        return Ok(vec![age, employer]);
    }
    if query.contains("graphly.graph.dump") {
        let mut age = row([("s", "ex:alice"), ("p", "ex:age")]);
        age.insert("o".to_string(), RowValue::Integer(30));
        return Ok(vec![
            row([("s", "ex:alice"), ("p", "a"), ("o", "ex:Person")]),
            age,
            row([
                ("s", "ex:alice"),
                ("p", "ex:address"),
                ("o", "b0"),
                ("s_is_blank", "false"),
                ("o_is_blank", "true"),
            ]),
            row([
                ("s", "b0"),
                ("p", "ex:city"),
                ("o", "New York"),
                ("s_is_blank", "true"),
                ("o_is_blank", "false"),
            ]),
        ]);
    }
    Ok(Vec::new())
}

fn demo_shacl_model(config: &GraphlyConfig, prefixes: &PrefixRegistry) -> anyhow::Result<()> {
    println!("=== Demo 1: Schema model from SHACL shapes ===");
    let client = SparqlClient::with_config(canned_store, config.clone());
    let graph = Graph::new(&client, Some("ex:shapes"), Some(prefixes));

    let model = ShaclModel::load(&graph, Some(prefixes))?;
    for class in model.classes() {
        println!("✓ Class {} ({})", class.label, class.uri);
    }
    for property in model.properties() {
        let kind = if property.is_range_class { "class" } else { "datatype" };
        println!(
            "✓ Property {} → {} [{}], mandatory: {}",
            property.key(),
            property.range_target.as_deref().unwrap_or("unknown"),
            kind,
            property.is_mandatory()
        );
    }
    println!();
    Ok(())
}

fn demo_dump(config: &GraphlyConfig, prefixes: &PrefixRegistry) -> anyhow::Result<()> {
    println!("=== Demo 2: Turtle and N-Quads dumps ===");
    let client = SparqlClient::with_config(canned_store, config.clone());
    let graph = Graph::new(&client, Some("ex:people"), Some(prefixes));

    println!("--- Turtle ---");
    print!("{}", graph.dump_turtle(prefixes)?);
    println!("--- N-Quads ---");
    print!("{}", graph.dump_nquads(prefixes)?);
    println!();
    Ok(())
}

fn demo_allegrograph(config: &GraphlyConfig, prefixes: &PrefixRegistry) -> anyhow::Result<()> {
    println!("=== Demo 3: AllegroGraph prefix injection ===");
    let printing_store = |query: &str, forwarded: Option<&PrefixRegistry>| -> ExecutorResult<Vec<Row>> {
        let shorts: Vec<String> = forwarded
            .map(|p| p.iter().map(|prefix| prefix.short).collect())
            .unwrap_or_default();
        let first_line = query.lines().nth(1).unwrap_or_default();
        println!("→ {} (prefixes: {})", first_line, shorts.join(", "));
        Ok(Vec::new())
    };
    let backend = AllegroGraph::with_config(printing_store, config.clone());

    let triples = vec![
        Triple::new("ex:bob", "a", "ex:Person"),
        Triple::new("ex:bob", "ex:name", "Bob"),
        Triple::new("ex:bob", "ex:age", 25i64),
    ];
    backend.insert(&triples, Some("ex:people"), Some(prefixes))?;

    println!(
        "✓ Caller registry untouched: {} binding(s)",
        prefixes.len()
    );
    Ok(())
}
