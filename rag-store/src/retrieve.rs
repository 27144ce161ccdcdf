//! Retrieval: embed the question, rank the index.

use tracing::trace;

use crate::embed::{EmbedPurpose, EmbeddingsProvider};
use crate::errors::RagError;
use crate::index::SimilarityIndex;
use crate::record::{RagHit, RagQuery};

/// Embeds the query text and returns the top-k hits from `index`.
///
/// An empty index (or `top_k == 0`) yields no hits without calling the provider.
///
/// # Errors
/// Returns embedding/provider errors or dimension mismatches.
pub async fn rag_context(
    index: &SimilarityIndex,
    query: RagQuery<'_>,
    provider: &dyn EmbeddingsProvider,
) -> Result<Vec<RagHit>, RagError> {
    trace!(
        "retrieve::rag_context top_k={} chunks={}",
        query.top_k,
        index.len()
    );

    if index.is_empty() || query.top_k == 0 {
        return Ok(Vec::new());
    }

    let qv = provider.embed(query.text, EmbedPurpose::Query).await?;
    let hits = index.search(&qv, query.top_k)?;

    trace!("retrieve::rag_context hits={}", hits.len());
    Ok(hits)
}
