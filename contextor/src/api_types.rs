//! Public API types re-used by external crates (e.g., the HTTP API layer).

/// Options that control retrieval for a single question.
///
/// Setting `top_k` to `0` means: "use the store's configured `RAG_TOP_K`".
#[derive(Clone, Debug, Default)]
pub struct AskOptions {
    pub top_k: usize,
}

/// A context chunk that was fed to the LLM.
#[derive(Clone, Debug, PartialEq)]
pub struct UsedChunk {
    pub score: f32,
    pub text: String,
}

/// Final answer together with the exact context passed to the model.
#[derive(Clone, Debug)]
pub struct QaAnswer {
    pub answer: String,
    pub context: Vec<UsedChunk>,
}
