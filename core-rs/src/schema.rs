/**
 * schema.rs
 * Best-effort ontology bootstrap
 *
 * The schema document is fetched once (no retry) from an http(s) URL, or read from a local
 * path / file:// reference, then parsed and merged into the store before mapping. Any failure
 * is logged and leaves the store untouched.
 */

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::errors::{GraphError, Result};
use crate::model::Triple;
use crate::rdf::{parse_document, RdfSyntax};
use crate::store::TripleStore;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where a schema document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    Url(String),
    File(PathBuf),
}

impl SchemaSource {
    /// `http://` / `https://` → URL, `file://` or anything else → local path
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            SchemaSource::Url(reference.to_string())
        } else if let Some(path) = reference.strip_prefix("file://") {
            SchemaSource::File(PathBuf::from(path))
        } else {
            SchemaSource::File(PathBuf::from(reference))
        }
    }

    /// Base IRI for resolving relative references in the document
    fn base_iri(&self) -> Option<&str> {
        match self {
            SchemaSource::Url(url) => Some(url),
            SchemaSource::File(_) => None,
        }
    }
}

impl std::fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaSource::Url(url) => write!(f, "{}", url),
            SchemaSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct SchemaLoader {
    syntax: RdfSyntax,
    timeout: Duration,
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new(RdfSyntax::RdfXml)
    }
}

impl SchemaLoader {
    pub fn new(syntax: RdfSyntax) -> Self {
        Self {
            syntax,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch and parse the schema document. Errors are `SchemaLoad`.
    pub fn fetch(&self, source: &SchemaSource) -> Result<Vec<Triple>> {
        let triples = match source {
            SchemaSource::Url(url) => {
                let body = self.download(url)?;
                parse_document(body.as_slice(), self.syntax, source.base_iri())
            }
            SchemaSource::File(path) => {
                if !path.exists() {
                    return Err(GraphError::SchemaLoad(format!("schema file not found: {}", path.display())));
                }
                if path.is_dir() {
                    return Err(GraphError::SchemaLoad(format!("schema path is a directory: {}", path.display())));
                }
                let file = File::open(path).map_err(|e| GraphError::SchemaLoad(e.to_string()))?;
                let syntax = RdfSyntax::from_path(path).unwrap_or(self.syntax);
                parse_document(BufReader::new(file), syntax, None)
            }
        };

        triples.map_err(|e| GraphError::SchemaLoad(format!("{}: {}", source, e)))
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GraphError::SchemaLoad(e.to_string()))?;

        let response = client
            .get(url)
            .header("Accept", self.syntax.media_type())
            .send()
            .map_err(|e| GraphError::SchemaLoad(format!("{}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(GraphError::SchemaLoad(format!(
                "HTTP error {}: failed to fetch schema from {}",
                response.status(),
                url
            )));
        }

        let body = response
            .bytes()
            .map_err(|e| GraphError::SchemaLoad(format!("{}: {}", url, e)))?;
        Ok(body.to_vec())
    }

    /// Merge the schema into `store`. Never fails; returns the number of statements added.
    pub fn bootstrap(&self, store: &mut TripleStore, source: &SchemaSource) -> usize {
        match self.fetch(source) {
            Ok(triples) => {
                let added = store.extend(triples);
                info!(source = %source, statements = added, "Loaded schema");
                added
            }
            Err(e) => {
                warn!(source = %source, error = %e, "Schema load failed, continuing without it");
                0
            }
        }
    }
}
