//! In-memory similarity index and its atomically swappable handle.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    chunker::ChunkingPolicy,
    embed::{EmbedPurpose, EmbeddingsProvider},
    errors::RagError,
    record::RagHit,
};

/// A chunk of the stored text together with its embedding.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedChunk {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// Immutable set of embedded chunks searchable by cosine similarity.
///
/// Never mutated after construction; a changed corpus gets a fresh index.
#[derive(Clone, Debug, Default)]
pub struct SimilarityIndex {
    chunks: Vec<IndexedChunk>,
}

impl SimilarityIndex {
    /// Splits `text` per `policy` and embeds every chunk as a document.
    ///
    /// # Errors
    /// Provider failures, or chunks embedded with differing dimensions.
    pub async fn build(
        text: &str,
        policy: &ChunkingPolicy,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<Self, RagError> {
        let pieces = policy.split(text);
        let mut chunks = Vec::with_capacity(pieces.len());
        for piece in pieces {
            let embedding = provider.embed(piece, EmbedPurpose::Document).await?;
            chunks.push(IndexedChunk {
                text: piece.to_string(),
                embedding,
            });
        }
        debug!(chunks = chunks.len(), bytes = text.len(), "similarity index built");
        Self::from_chunks(chunks)
    }

    /// Wraps pre-embedded chunks, checking that all vectors share one dimension.
    pub fn from_chunks(chunks: Vec<IndexedChunk>) -> Result<Self, RagError> {
        if let Some(first) = chunks.first() {
            let want = first.embedding.len();
            if let Some(bad) = chunks.iter().find(|c| c.embedding.len() != want) {
                return Err(RagError::VectorSizeMismatch {
                    got: bad.embedding.len(),
                    want,
                });
            }
        }
        Ok(Self { chunks })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[IndexedChunk] {
        &self.chunks
    }

    /// Embedding dimension, `None` for an empty index.
    pub fn dim(&self) -> Option<usize> {
        self.chunks.first().map(|c| c.embedding.len())
    }

    /// Returns up to `top_k` chunks ranked by cosine similarity to `query`,
    /// highest first. Ties keep document order.
    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<RagHit>, RagError> {
        if let Some(want) = self.dim() {
            if query.len() != want {
                return Err(RagError::VectorSizeMismatch {
                    got: query.len(),
                    want,
                });
            }
        }

        let mut scored: Vec<RagHit> = self
            .chunks
            .iter()
            .enumerate()
            .map(|(i, c)| RagHit {
                score: cosine_similarity(&c.embedding, query),
                text: c.text.clone(),
                chunk_index: i,
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }
}

/// Cosine similarity; 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Shared pointer to the current index.
///
/// Readers take a snapshot (`Arc` clone) and drop the lock immediately;
/// a rebuilt index is published with a single pointer swap, so nobody ever
/// observes a half-built index.
#[derive(Debug, Default)]
pub struct IndexHandle {
    current: RwLock<Arc<SimilarityIndex>>,
}

impl IndexHandle {
    pub fn new(index: SimilarityIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// The index as of now; unaffected by later swaps.
    pub async fn snapshot(&self) -> Arc<SimilarityIndex> {
        self.current.read().await.clone()
    }

    /// Publishes `index` and returns the one it replaced.
    pub async fn replace(&self, index: SimilarityIndex) -> Arc<SimilarityIndex> {
        let mut guard = self.current.write().await;
        std::mem::replace(&mut *guard, Arc::new(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, embedding: Vec<f32>) -> IndexedChunk {
        IndexedChunk {
            text: text.into(),
            embedding,
        }
    }

    #[test]
    fn cosine_handles_zero_vectors() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 1.0], &[2.0, 2.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn search_ranks_highest_first_and_truncates() {
        let index = SimilarityIndex::from_chunks(vec![
            chunk("east", vec![1.0, 0.0]),
            chunk("north", vec![0.0, 1.0]),
            chunk("north-east", vec![1.0, 1.0]),
        ])
        .unwrap();

        let hits = index.search(&[0.1, 1.0], 2).unwrap();
        let texts: Vec<_> = hits.iter().map(|h| h.text.as_str()).collect();
        assert_eq!(texts, vec!["north", "north-east"]);
        assert_eq!(hits[0].chunk_index, 1);
        assert!(hits[0].score >= hits[1].score);
    }

    #[test]
    fn single_chunk_index_returns_at_most_one_hit() {
        let index = SimilarityIndex::from_chunks(vec![chunk("all", vec![0.3, 0.4])]).unwrap();
        assert_eq!(index.search(&[1.0, 0.0], 2).unwrap().len(), 1);
        assert!(index.search(&[1.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn dimension_mismatches_are_errors() {
        let err = SimilarityIndex::from_chunks(vec![
            chunk("a", vec![1.0, 0.0]),
            chunk("b", vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, RagError::VectorSizeMismatch { got: 1, want: 2 }));

        let index = SimilarityIndex::from_chunks(vec![chunk("a", vec![1.0, 0.0])]).unwrap();
        assert!(index.search(&[1.0, 0.0, 0.0], 1).is_err());
    }

    #[tokio::test]
    async fn snapshots_survive_replacement() {
        let handle = IndexHandle::new(
            SimilarityIndex::from_chunks(vec![chunk("old", vec![1.0])]).unwrap(),
        );
        let before = handle.snapshot().await;

        let replaced = handle
            .replace(SimilarityIndex::from_chunks(vec![chunk("new", vec![1.0])]).unwrap())
            .await;

        assert_eq!(before.chunks()[0].text, "old");
        assert!(Arc::ptr_eq(&before, &replaced));
        assert_eq!(handle.snapshot().await.chunks()[0].text, "new");
    }
}
