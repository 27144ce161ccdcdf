//! Core data models used by the library.

/// Query parameters for RAG retrieval.
#[derive(Clone, Copy, Debug)]
pub struct RagQuery<'a> {
    pub text: &'a str,
    pub top_k: usize,
}

/// A single retrieval hit: similarity score and the chunk text.
#[derive(Clone, Debug, PartialEq)]
pub struct RagHit {
    pub score: f32,
    pub text: String,
    /// Position of the chunk in the stored document.
    pub chunk_index: usize,
}
