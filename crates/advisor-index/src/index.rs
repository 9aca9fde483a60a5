//! In-memory nearest-neighbor index over document chunks.
//!
//! Built once from all chunks of the document and read-only afterwards.
//! Search is a brute-force cosine scan, which is plenty for a single
//! curriculum document worth of chunks.

use tracing::debug;

use advisor_core::error::{Error, Result};
use advisor_core::types::Chunk;

#[derive(Debug)]
struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// Write-once vector index. Similarity metric: cosine (higher is better).
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
}

impl VectorIndex {
    /// Build the index from `(chunk, vector)` pairs. Fails with `EmptyIndex`
    /// when given zero entries; the returned value is immutable.
    pub fn build(entries: Vec<(Chunk, Vec<f32>)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::EmptyIndex);
        }
        let entries = entries
            .into_iter()
            .map(|(chunk, vector)| IndexEntry { chunk, vector })
            .collect::<Vec<_>>();
        debug!(entries = entries.len(), "vector index built");
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return up to `k` chunks by decreasing cosine similarity to `query`,
    /// ties broken by ascending chunk index. `k` larger than the index is
    /// clamped; an empty index yields an empty result rather than an error.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<Chunk> {
        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .map(|e| (cosine_similarity(query, &e.vector), e))
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.1.chunk.index.cmp(&b.1.chunk.index))
        });
        scored
            .into_iter()
            .take(k)
            .map(|(_, e)| e.chunk.clone())
            .collect()
    }
}

/// Cosine similarity between two vectors; 0.0 for mismatched or empty input.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = (norm_a * norm_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}
