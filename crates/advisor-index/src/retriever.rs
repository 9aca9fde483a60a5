//! Query-side composition of embedder and index.

use anyhow::Result;
use tracing::debug;

use advisor_core::traits::Embedder;
use advisor_core::types::Chunk;

use crate::index::VectorIndex;

/// Fetches the top-k most relevant chunks for a query string.
///
/// Query embeddings are not cached; every call embeds the query again.
pub struct Retriever {
    embedder: Box<dyn Embedder>,
    index: VectorIndex,
}

impl Retriever {
    pub fn new(embedder: Box<dyn Embedder>, index: VectorIndex) -> Self {
        Self { embedder, index }
    }

    pub fn retrieve(&self, query: &str, k: usize) -> Result<Vec<Chunk>> {
        let query_vec = self.embedder.embed(query)?;
        let chunks = self.index.search(&query_vec, k);
        debug!(k, returned = chunks.len(), "retrieval complete");
        Ok(chunks)
    }
}
