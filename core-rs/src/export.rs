/**
 * export.rs
 * Serialize a TripleStore to Turtle, N-Triples or RDF/XML, and read it back
 */

use oxigraph::io::RdfSerializer;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{GraphError, Result};
use crate::rdf::{self, RdfSyntax};
use crate::store::TripleStore;
use crate::vocab::Vocabulary;

/// Write every statement of `store` to `writer`, returning the writer.
///
/// The vocabulary's prefixes are declared for syntaxes that support them.
pub fn write_graph<W: Write>(
    store: &TripleStore,
    vocab: Option<&Vocabulary>,
    syntax: RdfSyntax,
    writer: W,
) -> Result<W> {
    let mut serializer = RdfSerializer::from_format(syntax.format());
    if let Some(vocab) = vocab {
        for (prefix, namespace) in &vocab.prefixes {
            serializer = serializer
                .with_prefix(*prefix, *namespace)
                .map_err(|e| GraphError::InvalidIri(format!("{}: {}", namespace, e)))?;
        }
    }

    let mut writer = serializer.for_writer(writer);
    for triple in store.iter() {
        let triple = rdf::to_oxigraph(triple)?;
        writer
            .serialize_triple(&triple)
            .map_err(|e| GraphError::Export(e.to_string()))?;
    }

    debug!(statements = store.len(), syntax = %syntax, "Serialized graph");
    writer.finish().map_err(|e| GraphError::Export(e.to_string()))
}

/// Serialize to a string
pub fn to_string(store: &TripleStore, vocab: Option<&Vocabulary>, syntax: RdfSyntax) -> Result<String> {
    let bytes = write_graph(store, vocab, syntax, Vec::new())?;
    String::from_utf8(bytes).map_err(|e| GraphError::Export(e.to_string()))
}

/// Serialize to `path`, creating parent directories as needed
pub fn export_to_file<P: AsRef<Path>>(
    store: &TripleStore,
    vocab: Option<&Vocabulary>,
    syntax: RdfSyntax,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = write_graph(store, vocab, syntax, BufWriter::new(file))?;
    writer.flush()?;

    info!(path = %path.display(), statements = store.len(), syntax = %syntax, "Exported graph");
    Ok(())
}

/// Parse a serialized graph into a fresh store
pub fn import_graph<R: Read>(reader: R, syntax: RdfSyntax) -> Result<TripleStore> {
    let mut store = TripleStore::new();
    store.extend(rdf::parse_document(reader, syntax, None)?);
    Ok(store)
}

pub fn import_file<P: AsRef<Path>>(path: P, syntax: RdfSyntax) -> Result<TripleStore> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(GraphError::FileNotFound(path.display().to_string()));
    }
    import_graph(BufReader::new(File::open(path)?), syntax)
}
