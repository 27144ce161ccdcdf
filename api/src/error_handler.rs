use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contextor::ContextorError;
use rag_store::RagError;
use thiserror::Error;
use tracing::error;

use crate::core::{app_state::ConfigError, http::response_envelope::DetailBody};

/// Public application error type.
///
/// Every variant maps to a fixed status code; the response body is always
/// `{"detail": <display text>}`.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- Request-scoped ---
    /// Reading or writing the text store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The embedding or completion provider failed.
    #[error("upstream provider error: {0}")]
    Upstream(String),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[source] std::io::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Config(_)
            | AppError::Storage(_)
            | AppError::Upstream(_)
            | AppError::Bind { .. }
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();
        error!(code = self.error_code(), %status, %detail, "request failed");
        (status, Json(DetailBody::new(detail))).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<RagError> for AppError {
    fn from(err: RagError) -> Self {
        match err {
            RagError::Io { .. } => AppError::Storage(err.to_string()),
            RagError::Config(msg) => AppError::Config(ConfigError::Store(msg)),
            RagError::Embedding(_) | RagError::VectorSizeMismatch { .. } => {
                AppError::Upstream(err.to_string())
            }
        }
    }
}

impl From<ContextorError> for AppError {
    fn from(err: ContextorError) -> Self {
        match err {
            ContextorError::Rag(e) => e.into(),
            ContextorError::Llm(e) => AppError::Upstream(e.to_string()),
        }
    }
}
