use std::collections::HashMap;

use serde_json::{Map, Value};
use url::Url;

use super::loader::{ContextLoader, NoRemoteContexts};
use crate::config::ExpansionPolicy;
use crate::error::{JsonLdError, Result};

/// JSON-LD keywords understood by the resolver.
pub mod keyword {
    pub const CONTEXT: &str = "@context";
    pub const ID: &str = "@id";
    pub const TYPE: &str = "@type";
    pub const LANGUAGE: &str = "@language";
    pub const LITERAL: &str = "@literal";
    pub const LIST: &str = "@list";
    pub const CONTAINER: &str = "@container";
}

/// Schemes accepted as absolute even though they have no `//` authority part.
const OPAQUE_SCHEMES: [&str; 9] = [
    "urn", "did", "tel", "mailto", "data", "blob", "cid", "mid", "tag",
];

/// Container semantics declared by a term.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Container {
    #[default]
    None,
    /// Values are encoded as one RDF list instead of separate triples.
    List,
}

/// How scalar values of a term are interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Coercion {
    #[default]
    None,
    /// Scalars are IRIs of resources.
    Resource,
    /// Scalars are literals of this datatype IRI.
    Datatype(String),
}

/// A single term definition within a context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Term {
    pub key: String,
    /// Full expansion, or `None` when the definition carried no usable IRI.
    pub iri: Option<String>,
    pub container: Container,
    pub coercion: Coercion,
}

impl Term {
    pub fn new(key: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            iri: Some(iri.into()),
            container: Container::None,
            coercion: Coercion::None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.container == Container::List
    }

    /// Terms ending in a separator are usable as namespace prefixes.
    pub fn is_namespace(&self) -> bool {
        self.iri
            .as_deref()
            .is_some_and(|iri| iri.ends_with(['/', '#', ':']))
    }
}

/// Keyword aliases in effect. Each field holds the key used in documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keywords {
    pub id: String,
    pub type_: String,
    pub language: String,
    pub literal: String,
    pub list: String,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            id: keyword::ID.to_string(),
            type_: keyword::TYPE.to_string(),
            language: keyword::LANGUAGE.to_string(),
            literal: keyword::LITERAL.to_string(),
            list: keyword::LIST.to_string(),
        }
    }
}

impl Keywords {
    /// Point `keyword` at `alias`. Returns false if `keyword` cannot be aliased.
    fn alias(&mut self, keyword: &str, alias: &str) -> bool {
        let slot = match keyword {
            keyword::ID => &mut self.id,
            keyword::TYPE => &mut self.type_,
            keyword::LANGUAGE => &mut self.language,
            keyword::LITERAL => &mut self.literal,
            keyword::LIST => &mut self.list,
            _ => return false,
        };
        *slot = alias.to_string();
        true
    }

    /// Drop any alias held by `key`, restoring the keyword it stood for.
    fn release(&mut self, key: &str) {
        let defaults = Keywords::default();
        for (slot, default) in [
            (&mut self.id, defaults.id),
            (&mut self.type_, defaults.type_),
            (&mut self.language, defaults.language),
            (&mut self.literal, defaults.literal),
            (&mut self.list, defaults.list),
        ] {
            if slot.as_str() == key {
                *slot = default;
            }
        }
    }
}

/// A resolved context: term mappings, keyword aliases, base IRI and default language.
#[derive(Clone, Debug, Default)]
pub struct Context {
    keywords: Keywords,
    base: Option<Url>,
    default_lang: Option<String>,
    terms: Vec<Term>,
    by_key: HashMap<String, usize>,
    by_iri: HashMap<String, usize>,
    policy: ExpansionPolicy,
}

impl Context {
    /// An empty context resolving relative references against `base`.
    ///
    /// An unparseable base is an error under strict expansion; otherwise it is
    /// ignored and relative references stay relative.
    pub fn new(base: Option<&str>, policy: ExpansionPolicy) -> Result<Self> {
        let base = match base.filter(|b| !b.is_empty()) {
            Some(b) => match Url::parse(b) {
                Ok(url) => Some(url),
                Err(e) if policy == ExpansionPolicy::Strict => {
                    return Err(JsonLdError::invalid_iri(format!("base '{b}': {e}")));
                }
                Err(e) => {
                    tracing::warn!(base = b, error = %e, "ignoring unparseable base IRI");
                    None
                }
            },
            None => None,
        };
        Ok(Self {
            base,
            policy,
            ..Default::default()
        })
    }

    /// Build a context from raw context data with lenient expansion.
    pub fn load(raw_context: &Value, base: Option<&str>) -> Result<Self> {
        let mut ctx = Self::new(base, ExpansionPolicy::Lenient)?;
        ctx.merge(raw_context, &NoRemoteContexts)?;
        Ok(ctx)
    }

    /// Seed the default language. A `@language` entry merged later overrides it.
    pub fn with_default_language(mut self, language: Option<&str>) -> Self {
        self.default_lang = language.map(str::to_string);
        self
    }

    /// Merge raw context data (object, array, wrapping document, string reference
    /// or `null`) into this context. Later definitions replace earlier ones.
    pub fn merge(&mut self, raw_context: &Value, loader: &dyn ContextLoader) -> Result<()> {
        let mut visited = Vec::new();
        self.merge_value(raw_context, loader, &mut visited)
    }

    fn merge_value(
        &mut self,
        raw: &Value,
        loader: &dyn ContextLoader,
        visited: &mut Vec<String>,
    ) -> Result<()> {
        match raw {
            Value::Object(obj) => match obj.get(keyword::CONTEXT) {
                Some(inner) => self.merge_value(inner, loader, visited),
                None => self.merge_object(obj),
            },
            Value::Array(arr) => {
                for item in arr {
                    self.merge_value(item, loader, visited)?;
                }
                Ok(())
            }
            Value::String(reference) => self.merge_reference(reference, loader, visited),
            Value::Null => {
                self.reset();
                Ok(())
            }
            _ => self.degrade(format!("invalid context value: {raw}")),
        }
    }

    fn merge_reference(
        &mut self,
        reference: &str,
        loader: &dyn ContextLoader,
        visited: &mut Vec<String>,
    ) -> Result<()> {
        let url = self.resolve(reference);
        if visited.contains(&url) {
            tracing::debug!(url = %url, "context already loaded, skipping");
            return Ok(());
        }
        match loader.load(&url) {
            Some(document) => {
                visited.push(url);
                self.merge_value(&document, loader, visited)
            }
            None if self.is_strict() => Err(JsonLdError::context(format!(
                "no context available for reference: {url}"
            ))),
            None => {
                tracing::warn!(url = %url, "no context available for reference, skipping");
                Ok(())
            }
        }
    }

    fn merge_object(&mut self, obj: &Map<String, Value>) -> Result<()> {
        let mut definitions = Vec::new();

        for (key, value) in obj {
            if key == keyword::LANGUAGE {
                match value {
                    Value::String(lang) => self.default_lang = Some(lang.clone()),
                    Value::Null => self.default_lang = None,
                    _ => self.degrade(format!("invalid @language value: {value}"))?,
                }
                continue;
            }
            if key.starts_with('@') {
                tracing::debug!(key = %key, "ignoring unsupported context keyword");
                continue;
            }
            self.keywords.release(key);
            if let Value::String(target) = value
                && self.keywords.alias(target, key)
            {
                self.remove_term(key);
                continue;
            }
            if value.is_null() {
                self.remove_term(key);
                continue;
            }
            if let Some(target) = term_target(value)
                && refers_to_itself(key, target)
            {
                self.degrade(format!("term '{key}' is defined through itself: {target}"))?;
                continue;
            }
            definitions.push((key, value));
        }

        // Definitions may refer to prefixes defined later in the same object,
        // so re-run them until every expansion is stable.
        for _ in 0..=definitions.len() {
            let mut changed = false;
            for &(key, value) in &definitions {
                let Some(term) = self.create_term(key, value)? else {
                    continue;
                };
                if self.term(key) != Some(&term) {
                    self.insert_term(term);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        Ok(())
    }

    fn create_term(&self, key: &str, value: &Value) -> Result<Option<Term>> {
        match value {
            Value::String(target) => Ok(Some(Term::new(key, self.expand_target(target)))),
            Value::Object(obj) => {
                let iri = match obj.get(keyword::ID) {
                    Some(Value::String(id)) => Some(self.expand_target(id)),
                    _ => {
                        self.degrade(format!("term '{key}' has no @id"))?;
                        None
                    }
                };

                let coercion = match obj.get(keyword::TYPE) {
                    None | Some(Value::Null) => Coercion::None,
                    Some(Value::String(t)) if t == keyword::ID => Coercion::Resource,
                    Some(Value::String(t)) => Coercion::Datatype(self.expand(t)),
                    Some(other) => {
                        self.degrade(format!("term '{key}' has invalid @type: {other}"))?;
                        Coercion::None
                    }
                };

                let list = obj.get(keyword::CONTAINER).and_then(Value::as_str)
                    == Some(keyword::LIST)
                    || obj.get(keyword::LIST) == Some(&Value::Bool(true));
                let container = if list {
                    Container::List
                } else {
                    Container::None
                };

                Ok(Some(Term {
                    key: key.to_string(),
                    iri,
                    container,
                    coercion,
                }))
            }
            _ => {
                self.degrade(format!("invalid term definition for '{key}': {value}"))?;
                Ok(None)
            }
        }
    }

    fn insert_term(&mut self, term: Term) {
        match self.by_key.get(&term.key).copied() {
            Some(i) => {
                // Other terms may share the old IRI, so rebuild the reverse index.
                self.terms[i] = term;
                self.reindex();
            }
            None => {
                let i = self.terms.len();
                self.by_key.insert(term.key.clone(), i);
                if let Some(iri) = &term.iri {
                    self.by_iri.insert(iri.clone(), i);
                }
                self.terms.push(term);
            }
        }
    }

    fn remove_term(&mut self, key: &str) {
        if self.by_key.contains_key(key) {
            self.terms.retain(|t| t.key != key);
            self.reindex();
        }
    }

    fn reindex(&mut self) {
        self.by_key.clear();
        self.by_iri.clear();
        for (i, term) in self.terms.iter().enumerate() {
            self.by_key.insert(term.key.clone(), i);
            if let Some(iri) = &term.iri {
                self.by_iri.insert(iri.clone(), i);
            }
        }
    }

    fn reset(&mut self) {
        self.terms.clear();
        self.by_key.clear();
        self.by_iri.clear();
        self.keywords = Keywords::default();
        self.default_lang = None;
    }

    /// Lenient: log and continue. Strict: fail with a context error.
    fn degrade(&self, msg: String) -> Result<()> {
        if self.is_strict() {
            return Err(JsonLdError::context(msg));
        }
        tracing::debug!(reason = %msg, "degrading malformed context entry");
        Ok(())
    }

    fn is_strict(&self) -> bool {
        self.policy == ExpansionPolicy::Strict
    }

    /// Expand a term target, resolving what is still relative against the base.
    fn expand_target(&self, target: &str) -> String {
        self.resolve(&self.expand(target))
    }

    fn lookup(&self, value: &str) -> Option<String> {
        if value.starts_with('@') {
            return Some(value.to_string());
        }

        if let Some(term) = self.term(value) {
            return term.iri.clone();
        }

        let (prefix, suffix) = value.split_once(':')?;
        if suffix.starts_with("//") {
            return Some(value.to_string());
        }
        if let Some(iri) = self.term(prefix).and_then(|t| t.iri.as_deref()) {
            return Some(format!("{iri}{suffix}"));
        }
        if is_scheme(prefix) && OPAQUE_SCHEMES.contains(&prefix.to_ascii_lowercase().as_str()) {
            return Some(value.to_string());
        }
        None
    }

    /// Expand a term, compact IRI or absolute IRI. Anything unresolvable passes
    /// through unchanged.
    pub fn expand(&self, value: &str) -> String {
        self.lookup(value).unwrap_or_else(|| value.to_string())
    }

    /// Like [Context::expand], but unresolvable input is an error under strict expansion.
    pub fn try_expand(&self, value: &str) -> Result<String> {
        match self.lookup(value) {
            Some(iri) => Ok(iri),
            None if self.is_strict() => Err(JsonLdError::unresolved(value)),
            None => {
                tracing::debug!(term = value, "unresolved term passed through");
                Ok(value.to_string())
            }
        }
    }

    /// Resolve a reference against the base IRI. Absolute IRIs, keywords and
    /// anything carrying a scheme are returned unchanged.
    pub fn resolve(&self, reference: &str) -> String {
        if reference.starts_with('@') || has_scheme(reference) {
            return reference.to_string();
        }
        match &self.base {
            Some(base) => match base.join(reference) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    tracing::debug!(reference, error = %e, "could not resolve against base");
                    reference.to_string()
                }
            },
            None => reference.to_string(),
        }
    }

    /// Look up a term by its short key.
    pub fn term(&self, key: &str) -> Option<&Term> {
        self.by_key.get(key).map(|&i| &self.terms[i])
    }

    /// Reverse lookup of a term by its expanded IRI.
    pub fn get_term(&self, iri: &str) -> Option<&Term> {
        self.by_iri.get(iri).map(|&i| &self.terms[i])
    }

    /// All terms in definition order.
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Terms whose IRI ends in a separator, in definition order.
    pub fn namespace_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter(|t| t.is_namespace())
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    pub fn id_key(&self) -> &str {
        &self.keywords.id
    }

    pub fn type_key(&self) -> &str {
        &self.keywords.type_
    }

    pub fn lang_key(&self) -> &str {
        &self.keywords.language
    }

    pub fn literal_key(&self) -> &str {
        &self.keywords.literal
    }

    pub fn list_key(&self) -> &str {
        &self.keywords.list
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_ref().map(Url::as_str)
    }

    pub fn default_lang(&self) -> Option<&str> {
        self.default_lang.as_deref()
    }

    pub fn policy(&self) -> ExpansionPolicy {
        self.policy
    }
}

/// The IRI text a term definition points at, if it has one.
fn term_target(value: &Value) -> Option<&str> {
    match value {
        Value::String(target) => Some(target.as_str()),
        Value::Object(obj) => obj.get(keyword::ID).and_then(Value::as_str),
        _ => None,
    }
}

/// A target prefixed by its own key, such as `"ex": "ex:foo"`.
fn refers_to_itself(key: &str, target: &str) -> bool {
    target
        .split_once(':')
        .is_some_and(|(prefix, suffix)| {
            prefix == key && !suffix.is_empty() && !suffix.starts_with("//")
        })
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

/// Check if a string starts with a URI scheme followed by `:`.
fn has_scheme(value: &str) -> bool {
    value
        .split_once(':')
        .is_some_and(|(scheme, _)| is_scheme(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonld::loader::StaticContextLoader;
    use serde_json::json;

    fn strict(base: Option<&str>) -> Context {
        Context::new(base, ExpansionPolicy::Strict).unwrap()
    }

    #[test]
    fn expand_compact_iri() {
        let ctx = Context::load(&json!({"dc": "http://purl.org/dc/terms/"}), None).unwrap();
        assert_eq!(ctx.expand("dc:title"), "http://purl.org/dc/terms/title");
    }

    #[test]
    fn expand_bare_term() {
        let ctx = Context::load(
            &json!({"name": "http://xmlns.com/foaf/0.1/name"}),
            None,
        )
        .unwrap();
        assert_eq!(ctx.expand("name"), "http://xmlns.com/foaf/0.1/name");
    }

    #[test]
    fn expand_absolute_iri() {
        let ctx = Context::load(&json!({"http": "http://wrong.example/"}), None).unwrap();
        assert_eq!(
            ctx.expand("http://example.org/foo"),
            "http://example.org/foo"
        );
        assert_eq!(ctx.expand("urn:isbn:123"), "urn:isbn:123");
    }

    #[test]
    fn unresolved_passes_through() {
        let ctx = Context::default();
        assert_eq!(ctx.expand("unknown"), "unknown");
        assert_eq!(ctx.expand("ex:thing"), "ex:thing");
        assert_eq!(ctx.try_expand("unknown").unwrap(), "unknown");
    }

    #[test]
    fn strict_rejects_unresolved() {
        let ctx = strict(None);
        assert!(matches!(
            ctx.try_expand("unknown"),
            Err(JsonLdError::UnresolvedTerm(t)) if t == "unknown"
        ));
        assert!(ctx.try_expand("ex:thing").is_err());
        assert!(ctx.try_expand("http://example.org/p").is_ok());
        assert!(ctx.try_expand("did:example:123").is_ok());
    }

    #[test]
    fn relative_target_resolved_against_base() {
        let ctx = Context::load(
            &json!({"knows": "vocab/knows", "abs": "http://example.org/abs"}),
            Some("http://example.org/docs/doc.json"),
        )
        .unwrap();
        assert_eq!(ctx.expand("knows"), "http://example.org/docs/vocab/knows");
        assert_eq!(ctx.expand("abs"), "http://example.org/abs");
    }

    #[test]
    fn keyword_aliases() {
        let ctx = Context::load(
            &json!({"id": "@id", "type": "@type", "lang": "@language", "value": "@literal", "items": "@list"}),
            None,
        )
        .unwrap();
        assert_eq!(ctx.id_key(), "id");
        assert_eq!(ctx.type_key(), "type");
        assert_eq!(ctx.lang_key(), "lang");
        assert_eq!(ctx.literal_key(), "value");
        assert_eq!(ctx.list_key(), "items");
        assert!(ctx.terms().is_empty());
    }

    #[test]
    fn default_keywords() {
        let ctx = Context::default();
        assert_eq!(ctx.id_key(), "@id");
        assert_eq!(ctx.type_key(), "@type");
        assert_eq!(ctx.lang_key(), "@language");
        assert_eq!(ctx.literal_key(), "@literal");
        assert_eq!(ctx.list_key(), "@list");
    }

    #[test]
    fn coercion_and_container() {
        let ctx = Context::load(
            &json!({
                "xsd": "http://www.w3.org/2001/XMLSchema#",
                "friends": {"@id": "http://example.org/friends", "@type": "@id", "@container": "@list"},
                "age": {"@id": "http://example.org/age", "@type": "xsd:integer"},
                "steps": {"@id": "http://example.org/steps", "@list": true}
            }),
            None,
        )
        .unwrap();

        let friends = ctx.term("friends").unwrap();
        assert_eq!(friends.coercion, Coercion::Resource);
        assert!(friends.is_list());

        let age = ctx.term("age").unwrap();
        assert_eq!(
            age.coercion,
            Coercion::Datatype("http://www.w3.org/2001/XMLSchema#integer".to_string())
        );
        assert_eq!(age.container, Container::None);

        assert!(ctx.term("steps").unwrap().is_list());
    }

    #[test]
    fn forward_prefix_reference() {
        let ctx = Context::load(
            &json!({
                "name": "foaf:name",
                "foaf": "http://xmlns.com/foaf/0.1/"
            }),
            None,
        )
        .unwrap();
        assert_eq!(ctx.expand("name"), "http://xmlns.com/foaf/0.1/name");
    }

    #[test]
    fn redefinition_replaces_term() {
        let mut ctx = Context::load(
            &json!({"p": {"@id": "http://example.org/p", "@type": "@id"}}),
            None,
        )
        .unwrap();
        ctx.merge(&json!({"p": "http://example.org/q"}), &NoRemoteContexts)
            .unwrap();

        let p = ctx.term("p").unwrap();
        assert_eq!(p.iri.as_deref(), Some("http://example.org/q"));
        assert_eq!(p.coercion, Coercion::None);
        assert_eq!(ctx.terms().len(), 1);
        assert!(ctx.get_term("http://example.org/p").is_none());
        assert_eq!(ctx.get_term("http://example.org/q").unwrap().key, "p");
    }

    #[test]
    fn redefined_alias_becomes_term() {
        let mut ctx = Context::load(&json!({"id": "@id", "kind": "@type"}), None).unwrap();
        assert_eq!(ctx.id_key(), "id");

        ctx.merge(
            &json!({"id": "http://example.org/identifier", "kind": null}),
            &NoRemoteContexts,
        )
        .unwrap();
        assert_eq!(ctx.id_key(), "@id");
        assert_eq!(ctx.type_key(), "@type");
        assert_eq!(ctx.expand("id"), "http://example.org/identifier");
    }

    #[test]
    fn shared_iri_survives_replacement() {
        let mut ctx = Context::load(
            &json!({
                "a": {"@id": "http://example.org/p", "@type": "@id"},
                "b": "http://example.org/p"
            }),
            None,
        )
        .unwrap();
        ctx.merge(&json!({"b": "http://example.org/q"}), &NoRemoteContexts)
            .unwrap();

        let term = ctx.get_term("http://example.org/p").unwrap();
        assert_eq!(term.key, "a");
        assert_eq!(term.coercion, Coercion::Resource);
        assert_eq!(ctx.get_term("http://example.org/q").unwrap().key, "b");
    }

    #[test]
    fn self_referencing_prefix_degrades() {
        let ctx = Context::load(
            &json!({"ex": "ex:foo", "did": "did:", "other": "http://example.org/"}),
            None,
        )
        .unwrap();
        assert!(ctx.term("ex").is_none());
        assert_eq!(ctx.expand("ex:bar"), "ex:bar");
        assert_eq!(ctx.expand("did:example:1"), "did:example:1");
        assert_eq!(ctx.expand("other:x"), "http://example.org/x");

        let mut strict = strict(None);
        assert!(matches!(
            strict.merge(&json!({"ex": {"@id": "ex:foo"}}), &NoRemoteContexts),
            Err(JsonLdError::Context(_))
        ));
    }

    #[test]
    fn reverse_lookup() {
        let ctx = Context::load(
            &json!({"homepage": {"@id": "http://xmlns.com/foaf/0.1/homepage", "@type": "@id"}}),
            None,
        )
        .unwrap();
        let term = ctx.get_term("http://xmlns.com/foaf/0.1/homepage").unwrap();
        assert_eq!(term.key, "homepage");
        assert_eq!(term.coercion, Coercion::Resource);
    }

    #[test]
    fn language_and_reset() {
        let mut ctx = Context::load(
            &json!([{"@language": "en", "ex": "http://example.org/"}]),
            None,
        )
        .unwrap();
        assert_eq!(ctx.default_lang(), Some("en"));

        ctx.merge(&Value::Null, &NoRemoteContexts).unwrap();
        assert_eq!(ctx.default_lang(), None);
        assert!(ctx.terms().is_empty());
    }

    #[test]
    fn seeded_language_overridden_by_context() {
        let mut ctx = Context::default().with_default_language(Some("de"));
        assert_eq!(ctx.default_lang(), Some("de"));
        ctx.merge(&json!({"@language": "fr"}), &NoRemoteContexts)
            .unwrap();
        assert_eq!(ctx.default_lang(), Some("fr"));
    }

    #[test]
    fn null_term_removed() {
        let mut ctx = Context::load(
            &json!({"a": "http://example.org/a", "b": "http://example.org/b"}),
            None,
        )
        .unwrap();
        ctx.merge(&json!({"a": null}), &NoRemoteContexts).unwrap();
        assert!(ctx.term("a").is_none());
        assert_eq!(ctx.term("b").unwrap().key, "b");
        assert_eq!(ctx.get_term("http://example.org/b").unwrap().key, "b");
    }

    #[test]
    fn wrapped_context_document() {
        let ctx = Context::load(
            &json!({"@context": {"ex": "http://example.org/"}}),
            None,
        )
        .unwrap();
        assert_eq!(ctx.expand("ex:a"), "http://example.org/a");
    }

    #[test]
    fn string_reference_through_loader() {
        let loader = StaticContextLoader::new().with_context(
            "http://example.org/ctx.jsonld",
            json!({"@context": ["ctx.jsonld", {"ex": "http://example.org/ns#"}]}),
        );
        let mut ctx = Context::new(Some("http://example.org/doc"), ExpansionPolicy::Strict).unwrap();
        ctx.merge(&json!("ctx.jsonld"), &loader).unwrap();
        assert_eq!(ctx.expand("ex:a"), "http://example.org/ns#a");
    }

    #[test]
    fn unknown_reference_lenient_and_strict() {
        let mut lenient = Context::default();
        assert!(lenient
            .merge(&json!("http://example.org/missing"), &NoRemoteContexts)
            .is_ok());

        let mut ctx = strict(None);
        assert!(matches!(
            ctx.merge(&json!("http://example.org/missing"), &NoRemoteContexts),
            Err(JsonLdError::Context(_))
        ));
    }

    #[test]
    fn malformed_entry_degrades() {
        let ctx = Context::load(
            &json!({"broken": {"@type": "@id"}, "odd": 42, "ok": "http://example.org/ok"}),
            None,
        )
        .unwrap();
        let broken = ctx.term("broken").unwrap();
        assert!(broken.iri.is_none());
        assert_eq!(broken.coercion, Coercion::Resource);
        assert!(ctx.term("odd").is_none());
        assert!(ctx.term("ok").is_some());
        assert_eq!(ctx.expand("broken"), "broken");
    }

    #[test]
    fn malformed_entry_strict_fails() {
        let mut ctx = strict(None);
        assert!(ctx
            .merge(&json!({"broken": {"@type": "@id"}}), &NoRemoteContexts)
            .is_err());
        assert!(ctx.merge(&json!({"odd": 42}), &NoRemoteContexts).is_err());
        assert!(ctx.merge(&json!(42), &NoRemoteContexts).is_err());
    }

    #[test]
    fn invalid_base() {
        assert!(Context::new(Some("not a base"), ExpansionPolicy::Strict).is_err());
        let ctx = Context::new(Some("not a base"), ExpansionPolicy::Lenient).unwrap();
        assert!(ctx.base().is_none());
        assert_eq!(ctx.resolve("rel"), "rel");
    }

    #[test]
    fn namespace_terms_in_order() {
        let ctx = Context::load(
            &json!({
                "dc": "http://purl.org/dc/terms/",
                "title": "http://purl.org/dc/terms/title",
                "rdf": "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
                "ex": "urn:example:"
            }),
            None,
        )
        .unwrap();
        let keys: Vec<&str> = ctx.namespace_terms().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec!["dc", "rdf", "ex"]);
    }
}
