use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;

use affinidi_jsonld_graph::jsonld::to_rdf;
use affinidi_jsonld_graph::{Graph, ParserConfigBuilder};

fn people_document() -> serde_json::Value {
    let people: Vec<serde_json::Value> = (0..50)
        .map(|i| {
            json!({
                "@id": format!("http://example.org/people/{i}"),
                "@type": "foaf:Person",
                "foaf:name": format!("Person {i}"),
                "foaf:age": i,
                "knows": [format!("http://example.org/people/{}", (i + 1) % 50)],
                "address": {"ex:city": "Singapore", "ex:zip": "018956"}
            })
        })
        .collect();

    json!({
        "@context": {
            "foaf": "http://xmlns.com/foaf/0.1/",
            "ex": "http://example.org/vocab#",
            "knows": {"@id": "foaf:knows", "@type": "@id", "@container": "@list"},
            "address": "ex:address",
            "@language": "en"
        },
        "@id": people
    })
}

fn bench_materialize(c: &mut Criterion) {
    let document = people_document();
    let config = ParserConfigBuilder::default()
        .with_blank_node_prefix("bench")
        .build();

    c.bench_function("materialize_50_people", |b| {
        b.iter(|| {
            let mut graph = Graph::new();
            to_rdf(&document, &mut graph, &config).unwrap();
            graph
        })
    });
}

criterion_group!(benches, bench_materialize);
criterion_main!(benches);
