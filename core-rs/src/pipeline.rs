//! Graph build pipeline
//!
//! Schema bootstrap (optional, non-fatal), then a sequential fold of the record source into
//! a fresh store, then an optional export.

use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, span, Level};

use crate::config::{ExportConfig, RunConfig, SchemaConfig};
use crate::errors::Result;
use crate::export::export_to_file;
use crate::mapper::{MappingSummary, RecordMapper};
use crate::record::{CsvRecordSource, TrackRecord};
use crate::store::TripleStore;
use crate::vocab::{Vocabulary, VocabularyKind};

/// Counts reported after a build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub schema_statements: usize,
    pub mapping: MappingSummary,
    pub total_statements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_to: Option<PathBuf>,
}

/// Builds one store per run
pub struct GraphBuilder {
    vocabulary: VocabularyKind,
    audio_features: bool,
    schema: Option<SchemaConfig>,
    export: Option<ExportConfig>,
}

impl GraphBuilder {
    pub fn new(vocabulary: VocabularyKind) -> Self {
        Self {
            vocabulary,
            audio_features: false,
            schema: None,
            export: None,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            vocabulary: config.spec.vocabulary,
            audio_features: config.spec.audio_features,
            schema: config.spec.schema.clone(),
            export: config.spec.export.clone(),
        }
    }

    pub fn with_audio_features(mut self, enabled: bool) -> Self {
        self.audio_features = enabled;
        self
    }

    pub fn with_schema(mut self, schema: Option<SchemaConfig>) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_export(mut self, export: Option<ExportConfig>) -> Self {
        self.export = export;
        self
    }

    pub fn vocabulary(&self) -> &'static Vocabulary {
        self.vocabulary.vocabulary()
    }

    /// Bootstrap the schema, map every record, export if configured.
    ///
    /// A mapping failure aborts the build; the error carries the record index.
    pub fn build<I>(&self, records: I) -> Result<(TripleStore, BuildReport)>
    where
        I: IntoIterator<Item = Result<TrackRecord>>,
    {
        let span = span!(Level::INFO, "build", vocabulary = ?self.vocabulary);
        let _enter = span.enter();

        let vocab = self.vocabulary();
        let mut store = TripleStore::new();
        let mut report = BuildReport::default();

        if let Some(schema) = &self.schema {
            report.schema_statements = schema.loader().bootstrap(&mut store, &schema.source());
        }

        report.mapping = RecordMapper::new(&mut store, vocab)
            .with_audio_features(self.audio_features)
            .map_all(records)?;
        report.total_statements = store.len();

        if let Some(export) = &self.export {
            export_to_file(&store, Some(vocab), export.format, &export.path)?;
            report.exported_to = Some(export.path.clone());
        }

        info!(
            schema = report.schema_statements,
            records = report.mapping.records,
            total = report.total_statements,
            "Graph built"
        );
        Ok((store, report))
    }

    /// Build from a CSV file
    pub fn build_from_csv<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(TripleStore, BuildReport)> {
        self.build(CsvRecordSource::open(path)?)
    }
}
