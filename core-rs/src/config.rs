/**
 * config.rs
 * Run configuration (YAML)
 *
 * Format:
 * ```yaml
 * apiVersion: catalog-graph/v1
 * kind: Run
 * spec:
 *   input: top_10000_1960-now.csv
 *   vocabulary: catalog
 *   audioFeatures: false
 *   schema:
 *     url: http://purl.org/ontology/mo/
 *     format: rdfxml
 *     timeoutSecs: 30
 *   export:
 *     path: catalog.ttl
 *     format: turtle
 * ```
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{GraphError, Result};
use crate::rdf::RdfSyntax;
use crate::schema::{SchemaLoader, SchemaSource, DEFAULT_TIMEOUT_SECS};
use crate::vocab::VocabularyKind;

pub const API_VERSION: &str = "catalog-graph/v1";
pub const KIND: &str = "Run";
/// File looked up by `load_from_dir`
pub const CONFIG_FILE_NAME: &str = "catalog-graph.yaml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub api_version: String,
    pub kind: String,
    pub spec: RunSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RunSpec {
    /// CSV input, relative paths resolve against the working directory
    pub input: PathBuf,
    #[serde(default)]
    pub vocabulary: VocabularyKind,
    #[serde(default)]
    pub audio_features: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportConfig>,
}

/// Optional ontology bootstrap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaConfig {
    /// http(s) URL, file:// reference or plain path
    pub url: String,
    #[serde(default = "default_schema_format")]
    pub format: RdfSyntax,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub format: RdfSyntax,
}

fn default_schema_format() -> RdfSyntax {
    RdfSyntax::RdfXml
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl SchemaConfig {
    pub fn source(&self) -> SchemaSource {
        SchemaSource::parse(&self.url)
    }

    pub fn loader(&self) -> SchemaLoader {
        SchemaLoader::new(self.format).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        RunConfig {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            spec: RunSpec {
                input: input.into(),
                vocabulary: VocabularyKind::default(),
                audio_features: false,
                schema: None,
                export: None,
            },
        }
    }

    /// Load and validate a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(GraphError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let config: RunConfig = serde_yaml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Load `catalog-graph.yaml` from a directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::load(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_version != API_VERSION {
            return Err(GraphError::ValidationError(format!(
                "Invalid apiVersion: expected '{}', got '{}'",
                API_VERSION, self.api_version
            )));
        }

        if self.kind != KIND {
            return Err(GraphError::ValidationError(format!(
                "Invalid kind: expected '{}', got '{}'",
                KIND, self.kind
            )));
        }

        if self.spec.input.as_os_str().is_empty() {
            return Err(GraphError::ValidationError("spec.input cannot be empty".to_string()));
        }

        if let Some(schema) = &self.spec.schema {
            if schema.url.is_empty() {
                return Err(GraphError::ValidationError("spec.schema.url cannot be empty".to_string()));
            }
            if schema.timeout_secs == 0 {
                return Err(GraphError::ValidationError("spec.schema.timeoutSecs must be positive".to_string()));
            }
        }

        if let Some(export) = &self.spec.export {
            if export.path.as_os_str().is_empty() {
                return Err(GraphError::ValidationError("spec.export.path cannot be empty".to_string()));
            }
        }

        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), yaml)?;
        Ok(())
    }
}
