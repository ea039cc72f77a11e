use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

/// Resolves string `@context` references (URLs) to context documents.
///
/// Materialization never performs network I/O itself. Callers that want remote
/// contexts fetch them up front and hand them over through a loader.
pub trait ContextLoader: fmt::Debug + Send + Sync {
    /// Return the context document for `url`, or `None` if it is unknown.
    ///
    /// The returned value may be the bare context definition or a document
    /// wrapping it under `@context`.
    fn load(&self, url: &str) -> Option<Value>;
}

/// Loader that knows no contexts. String references are skipped (or rejected
/// under strict expansion).
#[derive(Clone, Debug, Default)]
pub struct NoRemoteContexts;

impl ContextLoader for NoRemoteContexts {
    fn load(&self, _url: &str) -> Option<Value> {
        None
    }
}

/// Loader backed by a fixed URL → document table.
#[derive(Clone, Debug, Default)]
pub struct StaticContextLoader {
    contexts: HashMap<String, Value>,
}

impl StaticContextLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the document served for `url`.
    pub fn with_context(mut self, url: &str, document: Value) -> Self {
        self.contexts.insert(url.to_string(), document);
        self
    }
}

impl ContextLoader for StaticContextLoader {
    fn load(&self, url: &str) -> Option<Value> {
        self.contexts.get(url).cloned()
    }
}
