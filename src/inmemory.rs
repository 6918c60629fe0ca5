//! In-memory vector store using Euclidean distance.
//!
//! This module provides [`InMemoryVectorStore`], an append-only store
//! backed by a `Vec` behind a `tokio::sync::RwLock`. It mirrors the
//! distance semantics of the pgvector backend and is suitable for tests
//! and small deployments.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, RetrievalResult, SearchHit, StoredChunkRecord};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

struct Record {
    text: String,
    embedding: Vec<f32>,
}

/// An append-only in-memory vector store using Euclidean distance.
///
/// Record identifiers are insertion indices rendered as strings. The
/// nearest-neighbor sort is stable, so distance ties keep insertion order.
pub struct InMemoryVectorStore {
    dimensions: usize,
    records: RwLock<Vec<Record>>,
}

impl InMemoryVectorStore {
    /// Create a new empty store accepting vectors of the given dimension.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, records: RwLock::new(Vec::new()) }
    }
}

/// Euclidean (L2) distance between two equal-length vectors.
fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn store(&self, chunk: &Chunk, embedding: &[f32]) -> Result<StoredChunkRecord> {
        if embedding.len() != self.dimensions {
            return Err(RagError::StoreWriteError(format!(
                "embedding dimension {} does not match store dimension {}",
                embedding.len(),
                self.dimensions
            )));
        }

        let mut records = self.records.write().await;
        let id = records.len().to_string();
        records.push(Record { text: chunk.text.clone(), embedding: embedding.to_vec() });

        Ok(StoredChunkRecord { id, text: chunk.text.clone() })
    }

    async fn nearest(&self, query: &[f32], k: usize) -> Result<RetrievalResult> {
        if k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dimensions {
            return Err(RagError::StoreWriteError(format!(
                "query dimension {} does not match store dimension {}",
                query.len(),
                self.dimensions
            )));
        }

        let records = self.records.read().await;
        let mut hits: Vec<SearchHit> = records
            .iter()
            .map(|record| SearchHit {
                text: record.text.clone(),
                distance: euclidean_distance(&record.embedding, query),
            })
            .collect();

        // sort_by is stable: equal distances keep insertion order
        hits.sort_by(|a, b| {
            a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);
        Ok(hits)
    }
}
