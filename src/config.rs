use crate::schema::{DocumentRef, Schema};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Unknown document '{name}'. Known documents: {known}")]
    UnknownDocument { name: String, known: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub options: CompilerOptions,
    #[serde(flatten)]
    pub schema: Schema,
}

impl CompilerConfig {
    /// Look up a document of the configured schema for resolution
    pub fn document(&self, name: &str) -> Result<DocumentRef<'_>, ConfigError> {
        self.schema
            .document(name)
            .ok_or_else(|| ConfigError::UnknownDocument {
                name: name.to_string(),
                known: if self.schema.documents.is_empty() {
                    "(none)".to_string()
                } else {
                    self.schema.document_names().join(", ")
                },
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Validate filters before compiling them
    pub validate: bool,
    /// Pretty-print compiled queries
    pub pretty: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            validate: true,
            pretty: true,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<CompilerConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<CompilerConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    parse_config(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn parse_config(raw: &str) -> Result<CompilerConfig, toml::de::Error> {
    toml::from_str::<CompilerConfig>(raw)
}

pub fn default_config() -> &'static CompilerConfig {
    static DEFAULT_CONFIG: LazyLock<CompilerConfig> = LazyLock::new(CompilerConfig::default);
    &DEFAULT_CONFIG
}
