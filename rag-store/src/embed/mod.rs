//! Embedding abstraction.

use std::{future::Future, pin::Pin};

use crate::errors::RagError;

pub use ai_llm_service::EmbedPurpose;

pub mod service_embedder;

/// Boxed future returned by [`EmbeddingsProvider::embed`].
pub type EmbedFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>>;

/// Asynchronous embedding provider.
///
/// Implement this trait to plug in an embedding backend (hosted API, local
/// model, or a stub in tests).
pub trait EmbeddingsProvider: Send + Sync {
    /// Produces an embedding vector for `text`.
    fn embed<'a>(&'a self, text: &'a str, purpose: EmbedPurpose) -> EmbedFuture<'a>;
}
