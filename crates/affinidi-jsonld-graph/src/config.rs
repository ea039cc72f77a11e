//! Handles the configuration of a JSON-LD parse.
//!
//! Call the [ParserConfigBuilder] to create a new configuration.
//!
//! Example: defaults (lenient expansion, no base, no default language):
//! ```rust
//! use affinidi_jsonld_graph::config::ParserConfigBuilder;
//! let config = ParserConfigBuilder::default().build();
//! ```
//!
//! Example: resolving against a base with a supplied context:
//! ```rust
//! use affinidi_jsonld_graph::config::{ExpansionPolicy, ParserConfigBuilder};
//! let config = ParserConfigBuilder::default()
//!     .with_base("http://example.org/doc")
//!     .with_context(serde_json::json!({"dc": "http://purl.org/dc/terms/"}))
//!     .with_default_language("en")
//!     .with_policy(ExpansionPolicy::Strict)
//!     .build();
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::jsonld::loader::{ContextLoader, NoRemoteContexts};

/// Encodings accepted without a warning.
pub const ACCEPTED_ENCODINGS: [&str; 2] = ["utf-8", "utf-16"];

/// How unresolvable terms and malformed context entries are handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpansionPolicy {
    /// Degrade to the most literal interpretation and keep going.
    #[default]
    Lenient,
    /// Fail the parse on the first unresolvable term or malformed entry.
    Strict,
}

/// Configuration for a single parse.
///
/// Use the [ParserConfigBuilder] to create a new configuration.
#[derive(Clone, Debug)]
pub struct ParserConfig {
    pub(crate) base: Option<String>,
    pub(crate) context: Option<Value>,
    pub(crate) encoding: String,
    pub(crate) default_language: Option<String>,
    pub(crate) policy: ExpansionPolicy,
    pub(crate) max_depth: usize,
    pub(crate) blank_node_prefix: Option<String>,
    pub(crate) loader: Arc<dyn ContextLoader>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfigBuilder::default().build()
    }
}

impl ParserConfig {
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn policy(&self) -> ExpansionPolicy {
        self.policy
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Parser Config Builder to construct the options for a parse.
///
/// - base: IRI that relative references resolve against (default: none).
/// - context: context data that overrides the document's own `@context` (default: none).
/// - encoding: declared source encoding, warned about unless utf-8/utf-16 (default: utf-8).
/// - default_language: language for untagged string literals (default: none).
/// - policy: lenient or strict expansion (default: lenient).
/// - max_depth: maximum JSON nesting depth materialized (default: 256).
/// - blank_node_prefix: fixed blank node label prefix (default: unique per run).
/// - context_loader: resolves string `@context` references (default: none known).
pub struct ParserConfigBuilder {
    base: Option<String>,
    context: Option<Value>,
    encoding: String,
    default_language: Option<String>,
    policy: ExpansionPolicy,
    max_depth: usize,
    blank_node_prefix: Option<String>,
    loader: Arc<dyn ContextLoader>,
}

impl Default for ParserConfigBuilder {
    fn default() -> Self {
        Self {
            base: None,
            context: None,
            encoding: "utf-8".to_string(),
            default_language: None,
            policy: ExpansionPolicy::Lenient,
            max_depth: 256,
            blank_node_prefix: None,
            loader: Arc::new(NoRemoteContexts),
        }
    }
}

impl ParserConfigBuilder {
    /// Set the base IRI used to resolve relative references.
    pub fn with_base(mut self, base: &str) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Supply context data. Where it defines the same key as the document's
    /// embedded `@context`, the supplied definition wins.
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Declare the source encoding.
    /// Default: utf-8
    pub fn with_encoding(mut self, encoding: &str) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Set the language applied to plain string literals when the context sets none.
    pub fn with_default_language(mut self, language: &str) -> Self {
        self.default_language = Some(language.into());
        self
    }

    /// Set the expansion policy.
    /// Default: Lenient
    pub fn with_policy(mut self, policy: ExpansionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the maximum nesting depth.
    /// Default: 256
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Use a fixed blank node label prefix, making labels deterministic.
    pub fn with_blank_node_prefix(mut self, prefix: &str) -> Self {
        self.blank_node_prefix = Some(prefix.into());
        self
    }

    /// Set the loader for string `@context` references.
    pub fn with_context_loader(mut self, loader: impl ContextLoader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Build the [ParserConfig].
    pub fn build(self) -> ParserConfig {
        ParserConfig {
            base: self.base,
            context: self.context,
            encoding: self.encoding,
            default_language: self.default_language,
            policy: self.policy,
            max_depth: self.max_depth,
            blank_node_prefix: self.blank_node_prefix,
            loader: self.loader,
        }
    }
}
