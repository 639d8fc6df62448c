//! # Catalog Graph
//!
//! Materializes tabular music-catalog records (track, artist, album metadata plus audio
//! features) as an RDF graph and answers basic graph pattern queries over it.
//!
//! ## Data Flow
//!
//! ```text
//!   schema (optional, best effort)
//!            │
//!            ▼
//!   CSV ──▶ RecordMapper ──▶ TripleStore ──▶ QueryEngine ──▶ bindings
//!         (normalize ids)        │
//!                                └──────────▶ export (Turtle / N-Triples / RDF/XML)
//! ```
//!
//! ## Key Features
//!
//! - Set-semantics triple store indexed by subject and predicate, deterministic iteration
//! - Left-deep join evaluation with numeric or lexical ordering and limits
//! - Catalog and Music Ontology vocabularies
//! - Minimal SELECT text form plus canned catalog queries

pub mod config;
pub mod errors;
pub mod export;
pub mod mapper;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod rdf;
pub mod record;
pub mod schema;
pub mod store;
pub mod vocab;

pub use config::{ExportConfig, RunConfig, RunSpec, SchemaConfig};
pub use errors::{GraphError, Result};
pub use export::{export_to_file, import_file, import_graph, write_graph};
pub use mapper::{MappedRecord, MappingSummary, RecordMapper};
pub use model::{Datatype, Iri, Literal, Term, Triple, TripleRef};
pub use normalize::{normalize, resource_iri, UNKNOWN_LOCAL_NAME};
pub use pipeline::{BuildReport, GraphBuilder};
pub use query::{
    parse_query, Binding, CatalogQuery, Direction, OrderBy, PreparedQuery, QueryEngine, QueryParser,
    TermPattern, TriplePattern,
};
pub use rdf::RdfSyntax;
pub use record::{CsvRecordSource, TrackRecord};
pub use schema::{SchemaLoader, SchemaSource};
pub use store::TripleStore;
pub use vocab::{AudioFeature, Vocabulary, VocabularyKind, CATALOG, MUSIC_ONTOLOGY};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
