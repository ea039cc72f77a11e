use std::collections::HashSet;
use std::fmt;

use crate::model::{Object, Subject, Triple};

/// The target of materialization.
///
/// Implementations must treat `add` as set insertion: adding a triple that is
/// already present is a no-op. `bind` is a readability hint for serializers
/// and never changes triple content.
pub trait TripleSink {
    fn add(&mut self, triple: Triple);

    fn bind(&mut self, prefix: &str, iri: &str);
}

/// An in-memory triple set that remembers insertion order.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    triples: Vec<Triple>,
    index: HashSet<Triple>,
    namespaces: Vec<(String, String)>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Triples in the order they were first added.
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.index.contains(triple)
    }

    /// Namespace bindings, one entry per prefix, in first-bound order.
    pub fn namespaces(&self) -> &[(String, String)] {
        &self.namespaces
    }

    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.namespaces
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, iri)| iri.as_str())
    }

    /// Objects of all triples with the given subject and predicate IRI, in insertion order.
    pub fn objects<'a>(
        &'a self,
        subject: &'a Subject,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Object> + 'a {
        self.triples
            .iter()
            .filter(move |t| &t.subject == subject && t.predicate.iri == predicate)
            .map(|t| &t.object)
    }

    /// Returns the set of all blank node IDs in this graph.
    pub fn blank_nodes(&self) -> HashSet<String> {
        let mut ids = HashSet::new();
        for t in &self.triples {
            if let Subject::Blank(b) = &t.subject {
                ids.insert(b.id.clone());
            }
            if let Object::Blank(b) = &t.object {
                ids.insert(b.id.clone());
            }
        }
        ids
    }

    /// Returns all triples that reference the given blank node ID.
    pub fn triples_for_blank_node(&self, id: &str) -> Vec<&Triple> {
        self.triples
            .iter()
            .filter(|t| t.references_blank_node(id))
            .collect()
    }
}

impl TripleSink for Graph {
    fn add(&mut self, triple: Triple) {
        if self.index.insert(triple.clone()) {
            self.triples.push(triple);
        }
    }

    fn bind(&mut self, prefix: &str, iri: &str) {
        match self.namespaces.iter_mut().find(|(p, _)| p == prefix) {
            Some(entry) => entry.1 = iri.to_string(),
            None => self
                .namespaces
                .push((prefix.to_string(), iri.to_string())),
        }
    }
}

/// N-Triples, one line per triple in insertion order.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in &self.triples {
            writeln!(f, "{triple}")?;
        }
        Ok(())
    }
}
