//! Per-request in-memory retrieval index.
//!
//! `EmbeddingIndex` is an ephemeral value: built once from a document's
//! chunks, queried during transcript composition, and dropped at the end of
//! the request. Nothing is persisted or shared across requests.

use crate::chunking::Chunk;
use crate::embedding::Embedder;
use crate::error::Result;
use tracing::{debug, instrument};

/// An in-memory collection of (chunk, vector) pairs for one request.
pub struct EmbeddingIndex {
    entries: Vec<(Chunk, Vec<f32>)>,
}

/// A retrieved chunk with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredChunk {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// Cosine similarity to the query (higher is better).
    pub score: f32,
}

impl EmbeddingIndex {
    /// Embed every chunk and build the index.
    ///
    /// Embedding failures propagate; there is no retry.
    #[instrument(skip(chunks, embedder), fields(chunks = chunks.len()))]
    pub async fn build(chunks: Vec<Chunk>, embedder: &dyn Embedder) -> Result<Self> {
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        debug!("Indexed {} chunks", chunks.len());
        Ok(Self {
            entries: chunks.into_iter().zip(embeddings).collect(),
        })
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the top-k chunks most similar to the query, score descending.
    ///
    /// Ties keep the original chunk order (stable sort). A k larger than the
    /// index returns everything.
    #[instrument(skip(self, embedder), fields(query = %query, k = k))]
    pub async fn query(
        &self,
        embedder: &dyn Embedder,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>> {
        let query_embedding = embedder.embed(query).await?;

        let mut results: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, embedding)| ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(&query_embedding, embedding),
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(k);

        debug!("Retrieved {} chunks", results.len());
        Ok(results)
    }
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
