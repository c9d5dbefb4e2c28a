use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no acting user configured; set PIM_USER_EMAIL so rows can carry createdBy")]
    MissingCreatedBy,

    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("invalid workflow id \"{0}\": use 1-64 characters from [A-Za-z0-9_-]")]
    InvalidWorkflowId(String),

    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt cache entry at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure reported by a [`crate::Categorizer`]. Never fatal to a row.
#[derive(Debug, Error)]
pub enum CategorizeError {
    #[error("categorizer request failed: {0}")]
    Request(String),

    #[error("categorizer returned an unusable reply: {0}")]
    Reply(String),
}
