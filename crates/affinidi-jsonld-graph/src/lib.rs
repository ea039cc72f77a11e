//! Materialize JSON-LD documents into RDF graphs.
//!
//! A document's `@context` (optionally combined with supplied context data) is
//! resolved into a [jsonld::Context], which then drives a single recursive walk
//! of the JSON tree that emits triples into a [TripleSink]:
//! - terms and compact IRIs are expanded, relative references resolved against a base
//! - terms may coerce scalars to resources or typed literals
//! - `@list` values and list-container terms become `rdf:first`/`rdf:rest` chains
//! - nested objects become linked subjects, anonymous ones blank nodes

pub mod blank;
pub mod config;
pub mod error;
pub mod graph;
pub mod jsonld;
pub mod model;
pub mod parser;

pub use config::{ExpansionPolicy, ParserConfig, ParserConfigBuilder};
pub use error::{JsonLdError, Result};
pub use graph::{Graph, TripleSink};
pub use model::{BlankNode, Literal, NamedNode, Object, Subject, Triple, rdf, xsd};
pub use parser::JsonLdParser;

/// Convenience: decode JSON-LD text and materialize it into a fresh [Graph].
pub fn parse_to_graph(document: &str, config: &ParserConfig) -> Result<Graph> {
    let mut graph = Graph::new();
    JsonLdParser::new(config.clone()).parse_str(document, &mut graph)?;
    Ok(graph)
}
