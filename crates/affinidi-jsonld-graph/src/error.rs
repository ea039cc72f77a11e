use std::fmt;

/// Errors that can occur while turning a JSON-LD document into triples.
#[derive(Debug, thiserror::Error)]
pub enum JsonLdError {
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Context error: {0}")]
    Context(String),

    #[error("Unresolved term: {0}")]
    UnresolvedTerm(String),

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Maximum nesting depth ({0}) exceeded")]
    DepthExceeded(usize),
}

/// Result type alias for JSON-LD processing.
pub type Result<T> = std::result::Result<T, JsonLdError>;

impl JsonLdError {
    pub fn context(msg: impl fmt::Display) -> Self {
        Self::Context(msg.to_string())
    }

    pub fn unresolved(term: impl fmt::Display) -> Self {
        Self::UnresolvedTerm(term.to_string())
    }

    pub fn invalid_iri(msg: impl fmt::Display) -> Self {
        Self::InvalidIri(msg.to_string())
    }
}
