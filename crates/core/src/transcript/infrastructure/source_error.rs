use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("file not found: {0}")]
    MissingFile(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported content in {path}: {reason}")]
    UnsupportedShape { path: PathBuf, reason: String },
    #[error("word record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}
