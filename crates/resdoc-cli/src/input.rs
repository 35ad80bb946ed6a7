//! Reading JSON inputs from files or stdin.

use resdoc_core::{ConfigError, NormalizerConfig};
use resdoc_schema::{InMemorySchema, SchemaError};
use serde_json::Value;
use std::io::{self, Read};
use thiserror::Error;

/// Errors raised while loading command inputs.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] io::Error),
    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("schema {path}: {source}")]
    Schema {
        path: String,
        #[source]
        source: SchemaError,
    },
    #[error("config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },
}

/// Reads a JSON document from `path`, or from stdin when `None`.
pub fn read_json(path: Option<&str>) -> Result<Value, InputError> {
    let (origin, text) = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| InputError::Read {
                path: path.to_string(),
                source,
            })?;
            (path.to_string(), text)
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            ("stdin".to_string(), buffer)
        }
    };
    serde_json::from_str(&text).map_err(|source| InputError::Json { origin, source })
}

pub fn load_schema(path: &str) -> Result<InMemorySchema, InputError> {
    InMemorySchema::from_path(path).map_err(|source| InputError::Schema {
        path: path.to_string(),
        source,
    })
}

/// Loads configuration, or defaults when no file is given.
pub fn load_config(path: Option<&str>) -> Result<NormalizerConfig, InputError> {
    match path {
        Some(path) => NormalizerConfig::from_path(path).map_err(|source| InputError::Config {
            path: path.to_string(),
            source,
        }),
        None => Ok(NormalizerConfig::default()),
    }
}
