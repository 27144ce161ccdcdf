//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// I/O errors while reading or writing the text store.
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The embedding provider failed.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Mismatch in vector dimensionality between chunks or against the query.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl RagError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        RagError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
