//! Vector store trait for persisting chunk embeddings and running
//! nearest-neighbor queries.

use async_trait::async_trait;

use crate::document::{Chunk, RetrievalResult, StoredChunkRecord};
use crate::error::Result;

/// A storage backend for `(chunk text, embedding)` pairs with
/// nearest-neighbor search.
///
/// Stores are append-only: re-ingesting a document appends new records
/// rather than replacing existing ones. Dimension consistency is the
/// store's responsibility — a vector whose dimension does not match the
/// store's is rejected at write time, never silently persisted.
///
/// # Example
///
/// ```rust,ignore
/// use ragline::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new(768);
/// let record = store.store(&chunk, &embedding).await?;
/// let hits = store.nearest(&query_embedding, 5).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Append one record pairing the chunk's text with its embedding.
    ///
    /// Never overwrites. Fails with [`StoreUnavailable`] on connection
    /// failure and [`StoreWriteError`] on a constraint violation such as a
    /// dimension mismatch.
    ///
    /// [`StoreUnavailable`]: crate::RagError::StoreUnavailable
    /// [`StoreWriteError`]: crate::RagError::StoreWriteError
    async fn store(&self, chunk: &Chunk, embedding: &[f32]) -> Result<StoredChunkRecord>;

    /// Return at most `k` stored chunk texts, nearest first by the store's
    /// distance metric (Euclidean or provider-equivalent).
    ///
    /// An empty store yields an empty result, not an error; so does
    /// `k == 0`. Distance ties keep a stable, store-defined order.
    async fn nearest(&self, query: &[f32], k: usize) -> Result<RetrievalResult>;
}
