//! Ingestion and query pipelines.
//!
//! The [`RagPipeline`] composes a [`Chunker`], an [`EmbeddingProvider`],
//! a [`VectorStore`], and an [`AnswerGenerator`] into the two end-to-end
//! flows: populating the store from a document and answering a question
//! grounded in retrieved chunks.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ragline::{RagPipeline, RagConfig, InMemoryVectorStore, WordChunker};
//!
//! let config = RagConfig::default();
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedding_provider(Arc::new(embedder))
//!     .vector_store(Arc::new(InMemoryVectorStore::new(768)))
//!     .chunker(Arc::new(WordChunker::new(config.chunk_size)?))
//!     .generation_provider(Arc::new(generator))
//!     .build()?;
//!
//! let stored = pipeline.ingest(&document).await?;
//! let answer = pipeline.answer_question("What is X?", 5).await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::config::RagConfig;
use crate::document::{Document, RetrievalResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::{AnswerGenerator, GenerationProvider};
use crate::vectorstore::VectorStore;

/// The RAG pipeline.
///
/// Each invocation is independent and stateless across calls; the only
/// shared state lives in the externally-owned vector store. Construct one
/// via [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
    generator: AnswerGenerator,
}

impl std::fmt::Debug for RagPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Ingest a document: chunk, batch-embed, store.
    ///
    /// The document's pages are concatenated (newlines normalized to
    /// spaces), chunked, embedded in a single batch call, and written to
    /// the store one record per chunk. Returns the number of records
    /// written.
    ///
    /// Batch embedding is all-or-nothing: if it fails, zero records are
    /// written. The per-record store loop is not transactional — a failure
    /// mid-loop leaves earlier records stored and surfaces
    /// [`RagError::IngestInterrupted`] carrying the count written so far.
    /// A retried ingestion therefore appends duplicate records; clearing
    /// the store first is the operator's responsibility.
    ///
    /// # Errors
    ///
    /// - [`RagError::MalformedDocument`] if no page has usable text
    /// - the embedding provider's errors, unchanged
    /// - [`RagError::IngestInterrupted`] on a mid-loop store failure
    pub async fn ingest(&self, document: &Document) -> Result<usize> {
        if !document.has_text() {
            return Err(RagError::MalformedDocument(
                "document pages contain no usable text".to_string(),
            ));
        }

        let text = document.full_text();
        let chunks = self.chunker.chunk(&text);
        if chunks.is_empty() {
            info!(records = 0, "ingestion produced no chunks");
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedding_provider.embed_batch(&texts).await.map_err(|e| {
            error!(chunk_count = chunks.len(), error = %e, "batch embedding failed, nothing stored");
            e
        })?;

        if embeddings.len() != chunks.len() {
            return Err(RagError::ProviderError {
                provider: "embedding".into(),
                message: format!(
                    "batch returned {} vectors for {} chunks",
                    embeddings.len(),
                    chunks.len()
                ),
            });
        }

        let mut stored = 0usize;
        for (chunk, embedding) in chunks.iter().zip(&embeddings) {
            self.vector_store.store(chunk, embedding).await.map_err(|e| {
                error!(stored, error = %e, "store failed mid-ingestion");
                RagError::IngestInterrupted { stored, source: Box::new(e) }
            })?;
            stored += 1;
        }

        info!(records = stored, "document ingested");
        Ok(stored)
    }

    /// Retrieve the `k` stored chunks nearest to the question.
    ///
    /// Embeds the question and delegates to the store's nearest-neighbor
    /// query, trusting its distance order; no re-ranking is applied. If
    /// `k` exceeds the number of stored records, fewer hits are returned
    /// without error.
    pub async fn retrieve(&self, question: &str, k: usize) -> Result<RetrievalResult> {
        let query_embedding = self.embedding_provider.embed(question).await.map_err(|e| {
            error!(error = %e, "query embedding failed");
            e
        })?;

        let hits = self.vector_store.nearest(&query_embedding, k).await.map_err(|e| {
            error!(error = %e, "nearest-neighbor query failed");
            e
        })?;

        info!(hit_count = hits.len(), k, "retrieval completed");
        Ok(hits)
    }

    /// Answer a question end-to-end: retrieve the `k` nearest chunks and
    /// generate a grounded answer from them.
    ///
    /// Fails if either stage fails; no fallback answer is synthesized.
    pub async fn answer_question(&self, question: &str, k: usize) -> Result<String> {
        let hits = self.retrieve(question, k).await?;
        let contexts: Vec<String> = hits.into_iter().map(|hit| hit.text).collect();
        self.generator.answer(question, &contexts).await
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields are required. Call [`build()`](RagPipelineBuilder::build) to
/// validate and produce the pipeline.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedding_provider: Option<Arc<dyn EmbeddingProvider>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
    generation_provider: Option<Arc<dyn GenerationProvider>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding provider.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(provider);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the generation provider.
    pub fn generation_provider(mut self, provider: Arc<dyn GenerationProvider>) -> Self {
        self.generation_provider = Some(provider);
        self
    }

    /// Build the [`RagPipeline`], validating that all fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if any field is missing.
    pub fn build(self) -> Result<RagPipeline> {
        let config = self
            .config
            .ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        let embedding_provider = self
            .embedding_provider
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::ConfigError("vector_store is required".to_string()))?;
        let chunker = self
            .chunker
            .ok_or_else(|| RagError::ConfigError("chunker is required".to_string()))?;
        let generation_provider = self
            .generation_provider
            .ok_or_else(|| RagError::ConfigError("generation_provider is required".to_string()))?;

        let generator = AnswerGenerator::new(generation_provider, config.max_output_tokens);

        Ok(RagPipeline { config, embedding_provider, vector_store, chunker, generator })
    }
}
