//! Single-document RAG store: a text file plus an in-memory similarity index.
//!
//! This crate provides a small API to:
//! - Persist the corpus as one UTF-8 file, replaced wholesale on update
//! - Embed the corpus into an in-memory index (rebuilt in full on every change)
//! - Retrieve top‑K chunks for a textual query

mod chunker;
mod config;
pub mod embed;
mod errors;
mod index;
mod record;
mod retrieve;
mod text_store;

pub use chunker::ChunkingPolicy;
pub use config::{DEFAULT_BASE_FILE_PATH, DEFAULT_TOP_K, RagConfig};
pub use embed::{EmbedFuture, EmbedPurpose, EmbeddingsProvider, service_embedder::ServiceEmbedder};
pub use errors::RagError;
pub use index::{IndexHandle, IndexedChunk, SimilarityIndex, cosine_similarity};
pub use record::{RagHit, RagQuery};
pub use text_store::TextStore;

use std::{path::Path, sync::Arc};

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, trace};

/// High-level facade that wires the text store, the embedder and the index.
///
/// This is the single entry point recommended for application code.
pub struct RagStore {
    cfg: RagConfig,
    text: TextStore,
    index: IndexHandle,
    embedder: Arc<dyn EmbeddingsProvider>,
    /// Serialises write + rebuild so the file and the index agree on the last write.
    writer: Mutex<()>,
}

impl RagStore {
    /// Opens the store: creates the file if absent, reads it and builds the index.
    ///
    /// # Errors
    /// Invalid config, I/O failures, or embedding failures while indexing.
    pub async fn open(
        cfg: RagConfig,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Result<Self, RagError> {
        cfg.validate()?;
        let text = TextStore::new(cfg.base_file_path.clone());
        let content = text.read().await?;
        let index = SimilarityIndex::build(&content, &cfg.chunking, embedder.as_ref()).await?;

        info!(
            path = %text.path().display(),
            bytes = content.len(),
            chunks = index.len(),
            "RagStore opened"
        );

        Ok(Self {
            cfg,
            text,
            index: IndexHandle::new(index),
            embedder,
            writer: Mutex::new(()),
        })
    }

    /// Overwrites the corpus with `content` and rebuilds the index from it.
    ///
    /// Returns the number of indexed chunks. If the rebuild fails the file
    /// already holds `content` while the previous index keeps serving.
    #[instrument(skip_all, fields(bytes = content.len()))]
    pub async fn store_text(&self, content: &str) -> Result<usize, RagError> {
        let _guard = self.writer.lock().await;
        self.text.write(content).await?;
        self.rebuild_locked().await
    }

    /// Re-reads the file and rebuilds the index.
    pub async fn reload(&self) -> Result<usize, RagError> {
        let _guard = self.writer.lock().await;
        self.rebuild_locked().await
    }

    /// Builds RAG context for a textual query against the current index.
    ///
    /// # Errors
    /// Returns embedding errors or dimension mismatches.
    pub async fn rag_context(&self, query: RagQuery<'_>) -> Result<Vec<RagHit>, RagError> {
        trace!("RagStore::rag_context top_k={}", query.top_k);
        let index = self.index.snapshot().await;
        retrieve::rag_context(&index, query, self.embedder.as_ref()).await
    }

    /// Current stored text, read from disk.
    pub async fn read_text(&self) -> Result<String, RagError> {
        self.text.read().await
    }

    /// The index queries currently run against.
    pub async fn index_snapshot(&self) -> Arc<SimilarityIndex> {
        self.index.snapshot().await
    }

    pub fn file_path(&self) -> &Path {
        self.text.path()
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    async fn rebuild_locked(&self) -> Result<usize, RagError> {
        let content = self.text.read().await?;
        let index =
            SimilarityIndex::build(&content, &self.cfg.chunking, self.embedder.as_ref()).await?;
        let chunks = index.len();
        self.index.replace(index).await;
        debug!(chunks, "index swapped");
        Ok(chunks)
    }
}
