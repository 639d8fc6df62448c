//! Error types for the catalog graph

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Record {index}: column '{column}' has non-numeric value '{value}'")]
    MalformedNumericField {
        index: usize,
        column: &'static str,
        value: String,
    },

    #[error("Record {index}: required numeric column '{column}' is missing")]
    MissingNumericField { index: usize, column: &'static str },

    #[error("Schema load error: {0}")]
    SchemaLoad(String),

    #[error("RDF parse error: {0}")]
    RdfParse(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Query parse error: {0}")]
    QueryParse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl GraphError {
    /// Index of the input record that caused a mapping failure, if any
    pub fn record_index(&self) -> Option<usize> {
        match self {
            GraphError::MalformedNumericField { index, .. }
            | GraphError::MissingNumericField { index, .. } => Some(*index),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
