//! Error type shared by the loader, pipeline and renderer.

use std::path::PathBuf;

/// Errors that terminate a pstree-graph run.
#[derive(Debug, thiserror::Error)]
pub enum PstreeError {
    #[error("Failed to read process tree {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed process tree JSON in {path}: {source}")]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PstreeError>;
