//! # ragline
//!
//! A minimal retrieval-augmented generation (RAG) pipeline: ingest a
//! document, split it into bounded-size chunks, embed the chunks, store
//! them for similarity search, and answer questions grounded in the
//! nearest stored chunks.
//!
//! ## Overview
//!
//! The crate is organized around four seams, each a trait so that remote
//! services, local models, and mocks are interchangeable:
//!
//! - [`Chunker`] — splits document text ([`WordChunker`] accumulates
//!   whitespace-delimited words up to a target size)
//! - [`EmbeddingProvider`] — text → fixed-dimension vector, single or batch
//! - [`VectorStore`] — append-only `(text, embedding)` records with
//!   nearest-neighbor search ([`InMemoryVectorStore`], pgvector behind the
//!   `pgvector` feature)
//! - [`GenerationProvider`] — grounded prompt → answer text
//!
//! [`RagPipeline`] composes them into the two end-to-end flows:
//! [`ingest`](RagPipeline::ingest) and
//! [`answer_question`](RagPipeline::answer_question).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ragline::{
//!     Document, HttpEmbeddingProvider, HttpGenerationProvider,
//!     InMemoryVectorStore, RagConfig, RagPipeline, WordChunker,
//! };
//!
//! let config = RagConfig::default();
//! let pipeline = RagPipeline::builder()
//!     .config(config.clone())
//!     .embedding_provider(Arc::new(HttpEmbeddingProvider::new("http://localhost:8000", 768)?))
//!     .vector_store(Arc::new(InMemoryVectorStore::new(768)))
//!     .chunker(Arc::new(WordChunker::new(config.chunk_size)?))
//!     .generation_provider(Arc::new(HttpGenerationProvider::new("http://localhost:8001")?))
//!     .build()?;
//!
//! let stored = pipeline.ingest(&Document::from_pages(pages)).await?;
//! let answer = pipeline.answer_question("What is X?", 5).await?;
//! ```
//!
//! ## Features
//!
//! - `http` (default) — HTTP provider backends via `reqwest`
//! - `pgvector` — PostgreSQL/pgvector store backend via `sqlx`

pub mod chunking;
pub mod config;
pub mod document;
#[cfg(feature = "http")]
pub mod embed_service;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod inmemory;
#[cfg(feature = "http")]
pub mod llm_service;
pub mod mock;
#[cfg(feature = "pgvector")]
pub mod pgvector;
pub mod pipeline;
pub mod vectorstore;

pub use chunking::{Chunker, WordChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, RetrievalResult, SearchHit, StoredChunkRecord};
#[cfg(feature = "http")]
pub use embed_service::HttpEmbeddingProvider;
pub use embedding::EmbeddingProvider;
pub use error::{RagError, Result};
pub use generation::{grounded_prompt, AnswerGenerator, GenerationProvider};
pub use inmemory::InMemoryVectorStore;
#[cfg(feature = "http")]
pub use llm_service::HttpGenerationProvider;
pub use mock::{MockEmbeddingProvider, MockGenerationProvider};
#[cfg(feature = "pgvector")]
pub use pgvector::PgVectorStore;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use vectorstore::VectorStore;
