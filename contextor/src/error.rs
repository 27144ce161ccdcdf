//! Typed error for the contextor crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// Retrieval failed (embedding the question, index mismatch).
    #[error("RAG error: {0}")]
    Rag(#[from] rag_store::RagError),

    /// The chat-completion call failed.
    #[error("LLM error: {0}")]
    Llm(#[from] AiLlmError),
}
