use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),

    #[error("circular reference detected: {0}")]
    CircularRef(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no document URL configured; set `doc_url` in the config file")]
    MissingDocUrl,

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
}
