//! Embedding provider backed by the shared [`LlmServiceProfiles`].

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;

use crate::{
    EmbeddingsProvider, RagError,
    embed::{EmbedFuture, EmbedPurpose},
};

/// Routes embedding calls through the `embedding` profile of the LLM service.
#[derive(Clone)]
pub struct ServiceEmbedder {
    svc: Arc<LlmServiceProfiles>,
}

impl ServiceEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl EmbeddingsProvider for ServiceEmbedder {
    fn embed<'a>(&'a self, text: &'a str, purpose: EmbedPurpose) -> EmbedFuture<'a> {
        Box::pin(async move {
            self.svc
                .embed(text, purpose)
                .await
                .map_err(|e| RagError::Embedding(e.to_string()))
        })
    }
}
