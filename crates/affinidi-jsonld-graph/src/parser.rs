use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;
use url::Url;

use crate::config::{ACCEPTED_ENCODINGS, ParserConfig};
use crate::error::Result;
use crate::graph::TripleSink;
use crate::jsonld::to_rdf;

/// Document-level entry point: decodes JSON-LD sources and materializes them
/// into a [TripleSink].
#[derive(Clone, Debug, Default)]
pub struct JsonLdParser {
    config: ParserConfig,
}

impl JsonLdParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Materialize an already decoded JSON tree.
    pub fn parse_value<S: TripleSink + ?Sized>(&self, tree: &Value, sink: &mut S) -> Result<()> {
        self.check_encoding();
        to_rdf(tree, sink, &self.config)
    }

    /// Decode and materialize JSON-LD text.
    pub fn parse_str<S: TripleSink + ?Sized>(&self, data: &str, sink: &mut S) -> Result<()> {
        let tree: Value = serde_json::from_str(data)?;
        self.parse_value(&tree, sink)
    }

    /// Decode and materialize UTF-8 encoded JSON-LD bytes.
    pub fn parse_slice<S: TripleSink + ?Sized>(&self, data: &[u8], sink: &mut S) -> Result<()> {
        let tree: Value = serde_json::from_slice(data)?;
        self.parse_value(&tree, sink)
    }

    /// Decode and materialize JSON-LD from a reader.
    pub fn parse_reader<R: Read, S: TripleSink + ?Sized>(&self, reader: R, sink: &mut S) -> Result<()> {
        let tree: Value = serde_json::from_reader(reader)?;
        self.parse_value(&tree, sink)
    }

    /// Decode and materialize a JSON-LD file.
    ///
    /// Without a configured base, relative references resolve against the
    /// file's own `file://` URL.
    pub fn parse_path<S: TripleSink + ?Sized>(&self, path: impl AsRef<Path>, sink: &mut S) -> Result<()> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let tree: Value = serde_json::from_reader(reader)?;

        if self.config.base.is_some() {
            return self.parse_value(&tree, sink);
        }

        let mut config = self.config.clone();
        config.base = std::fs::canonicalize(path)
            .ok()
            .and_then(|p| Url::from_file_path(p).ok())
            .map(String::from);
        tracing::debug!(path = %path.display(), base = ?config.base, "parsing JSON-LD file");

        Self::new(config).parse_value(&tree, sink)
    }

    fn check_encoding(&self) {
        let encoding = self.config.encoding.to_ascii_lowercase();
        if !ACCEPTED_ENCODINGS.contains(&encoding.as_str()) {
            tracing::warn!(
                encoding = %self.config.encoding,
                "JSON should be encoded as unicode"
            );
        }
    }
}
