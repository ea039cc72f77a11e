use serde_json::{Map, Value};

use super::context::{Coercion, Context, keyword};
use crate::blank::BlankNodeIssuer;
use crate::config::{ParserConfig, ParserConfigBuilder};
use crate::error::{JsonLdError, Result};
use crate::graph::{Graph, TripleSink};
use crate::model::*;

/// Materialize `tree` into `graph`, resolving against `base` and using
/// `context_data` on top of the document's own `@context`.
pub fn materialize(
    tree: &Value,
    mut graph: Graph,
    base: Option<&str>,
    context_data: Option<&Value>,
) -> Result<Graph> {
    let mut builder = ParserConfigBuilder::default();
    if let Some(base) = base {
        builder = builder.with_base(base);
    }
    if let Some(context) = context_data {
        builder = builder.with_context(context.clone());
    }
    to_rdf(tree, &mut graph, &builder.build())?;
    Ok(graph)
}

/// Build the context for `tree`: the embedded `@context` first, then the
/// configured context data, so supplied definitions win on conflict.
pub fn resolve_context(tree: &Value, config: &ParserConfig) -> Result<Context> {
    let mut context = Context::new(config.base(), config.policy())?
        .with_default_language(config.default_language.as_deref());

    if let Some(embedded) = tree.as_object().and_then(|root| root.get(keyword::CONTEXT)) {
        context.merge(embedded, config.loader.as_ref())?;
    }
    if let Some(supplied) = &config.context {
        context.merge(supplied, config.loader.as_ref())?;
    }
    Ok(context)
}

/// Convert a JSON-LD tree to triples, emitting them into `sink`.
pub fn to_rdf<S: TripleSink + ?Sized>(
    tree: &Value,
    sink: &mut S,
    config: &ParserConfig,
) -> Result<()> {
    let context = resolve_context(tree, config)?;

    for term in context.namespace_terms() {
        if let Some(iri) = &term.iri {
            sink.bind(&term.key, iri);
        }
    }

    let issuer = config
        .blank_node_prefix
        .as_deref()
        .map(BlankNodeIssuer::new)
        .unwrap_or_else(BlankNodeIssuer::unique);
    let mut materializer = Materializer::new(&context, sink, issuer, config.max_depth());

    for node in top_level_nodes(tree, &context) {
        materializer.add_node(node, 0)?;
    }

    tracing::debug!(
        triples = materializer.emitted(),
        blank_nodes = materializer.issuer.issued(),
        "materialized JSON-LD document"
    );
    Ok(())
}

/// The resource nodes of a document: the elements of a root-level identity
/// array, the object elements of a root array, or the root object itself.
fn top_level_nodes<'v>(tree: &'v Value, context: &Context) -> Vec<&'v Map<String, Value>> {
    let items = match tree {
        Value::Object(root) => match root.get(context.id_key()) {
            Some(Value::Array(items)) => items,
            _ => return vec![root],
        },
        Value::Array(items) => items,
        other => {
            tracing::debug!(value = %other, "document root is a scalar, nothing to materialize");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| {
            let node = item.as_object();
            if node.is_none() {
                tracing::debug!(value = %item, "skipping non-object top-level resource");
            }
            node
        })
        .collect()
}

/// Walks JSON nodes under a resolved [Context] and emits their triples.
pub struct Materializer<'a, S: TripleSink + ?Sized> {
    context: &'a Context,
    sink: &'a mut S,
    issuer: BlankNodeIssuer,
    max_depth: usize,
    emitted: usize,
}

impl<'a, S: TripleSink + ?Sized> Materializer<'a, S> {
    pub fn new(
        context: &'a Context,
        sink: &'a mut S,
        issuer: BlankNodeIssuer,
        max_depth: usize,
    ) -> Self {
        Self {
            context,
            sink,
            issuer,
            max_depth,
            emitted: 0,
        }
    }

    /// Number of `add` calls made on the sink so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn emit(&mut self, subject: impl Into<Subject>, predicate: &str, object: impl Into<Object>) {
        self.sink
            .add(Triple::new(subject, NamedNode::new(predicate), object));
        self.emitted += 1;
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(JsonLdError::DepthExceeded(self.max_depth));
        }
        Ok(())
    }

    /// Emit the triples of `node` and return its subject.
    pub fn add_node(&mut self, node: &Map<String, Value>, depth: usize) -> Result<Subject> {
        self.check_depth(depth)?;
        let ctx = self.context;

        let subject = match node.get(ctx.id_key()) {
            Some(Value::String(id)) if !id.is_empty() => {
                Subject::Named(NamedNode::new(ctx.resolve(&ctx.expand(id))))
            }
            Some(Value::String(_)) | Some(Value::Null) | None => self.issuer.fresh().into(),
            Some(other) => {
                tracing::debug!(id = %other, "non-string identity, using a blank node");
                self.issuer.fresh().into()
            }
        };

        for (key, value) in node {
            if key == keyword::CONTEXT || key == ctx.id_key() {
                continue;
            }
            if key == ctx.lang_key() || key == ctx.literal_key() || key == ctx.list_key() {
                tracing::debug!(key = %key, "ignoring value keyword on a node");
                continue;
            }
            if value.is_null() {
                continue;
            }

            let (predicate, coercion, list) = if key == ctx.type_key() {
                (rdf::TYPE.to_string(), &Coercion::Resource, false)
            } else {
                let iri = ctx.try_expand(key)?;
                if iri.starts_with('@') {
                    tracing::debug!(key = %key, "key expands to a keyword, skipping");
                    continue;
                }
                match ctx.term(key).or_else(|| ctx.get_term(&iri)) {
                    Some(term) => (iri, &term.coercion, term.is_list()),
                    None => (iri, &Coercion::None, false),
                }
            };

            let values: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                single => vec![single],
            };

            let already_list = value
                .as_object()
                .is_some_and(|obj| obj.contains_key(ctx.list_key()));
            if list && !already_list {
                let object = self.list(values, coercion, depth + 1)?;
                self.emit(subject.clone(), &predicate, object);
                continue;
            }

            for item in values {
                if item.is_null() {
                    continue;
                }
                let object = self.to_object(coercion, item, depth + 1)?;
                self.emit(subject.clone(), &predicate, object);
            }
        }

        Ok(subject)
    }

    /// Resolve a value to an RDF object, emitting any triples it implies.
    pub fn to_object(&mut self, coercion: &Coercion, value: &Value, depth: usize) -> Result<Object> {
        self.check_depth(depth)?;
        let ctx = self.context;

        match value {
            Value::Object(map) => {
                if let Some(marker) = map.get(ctx.list_key()) {
                    let items: Vec<&Value> = match marker {
                        Value::Array(items) => items.iter().collect(),
                        Value::Null => Vec::new(),
                        single => {
                            tracing::debug!(value = %single, "list marker is not an array, treating as one item");
                            vec![single]
                        }
                    };
                    return self.list(items, coercion, depth);
                }

                if let Some(literal) = map.get(ctx.literal_key()) {
                    let lexical = lexical_form(literal);
                    if let Some(lang) = map.get(ctx.lang_key()).and_then(Value::as_str) {
                        return Ok(Literal::lang(lexical, lang).into());
                    }
                    if let Some(datatype) = map.get(ctx.type_key()).and_then(Value::as_str) {
                        return Ok(Literal::typed(lexical, NamedNode::new(ctx.expand(datatype))).into());
                    }
                    return Ok(Literal::plain(lexical, ctx.default_lang()).into());
                }

                Ok(self.add_node(map, depth)?.into())
            }
            Value::Array(items) => self.list(items.iter().collect(), coercion, depth),
            scalar => Ok(self.scalar(coercion, scalar)),
        }
    }

    fn scalar(&mut self, coercion: &Coercion, value: &Value) -> Object {
        let ctx = self.context;
        match coercion {
            Coercion::None => match value {
                Value::Number(n) if n.is_f64() => {
                    Literal::typed(n.to_string(), NamedNode::new(xsd::DOUBLE)).into()
                }
                Value::Number(n) => Literal::typed(n.to_string(), NamedNode::new(xsd::INTEGER)).into(),
                Value::Bool(b) => Literal::typed(b.to_string(), NamedNode::new(xsd::BOOLEAN)).into(),
                other => Literal::plain(lexical_form(other), ctx.default_lang()).into(),
            },
            Coercion::Resource => {
                let reference = lexical_form(value);
                if reference.is_empty() {
                    self.issuer.fresh().into()
                } else {
                    NamedNode::new(ctx.resolve(&ctx.expand(&reference))).into()
                }
            }
            Coercion::Datatype(datatype) => {
                Literal::typed(lexical_form(value), NamedNode::new(datatype.as_str())).into()
            }
        }
    }

    /// Encode `items` as an `rdf:first`/`rdf:rest` chain and return its head.
    fn list(&mut self, items: Vec<&Value>, coercion: &Coercion, depth: usize) -> Result<Object> {
        self.check_depth(depth)?;
        let items: Vec<&Value> = items.into_iter().filter(|v| !v.is_null()).collect();
        if items.is_empty() {
            return Ok(NamedNode::new(rdf::NIL).into());
        }

        let cells: Vec<BlankNode> = items.iter().map(|_| self.issuer.fresh()).collect();
        tracing::debug!(cells = cells.len(), "encoding RDF list");

        for (i, item) in items.into_iter().enumerate() {
            let object = self.to_object(coercion, item, depth + 1)?;
            self.emit(cells[i].clone(), rdf::FIRST, object);
            let rest: Object = match cells.get(i + 1) {
                Some(next) => next.clone().into(),
                None => NamedNode::new(rdf::NIL).into(),
            };
            self.emit(cells[i].clone(), rdf::REST, rest);
        }

        Ok(cells[0].clone().into())
    }
}

fn lexical_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
