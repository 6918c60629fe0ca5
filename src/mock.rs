//! Mock providers for testing.
//!
//! Deterministic, in-process stand-ins for the embedding and generation
//! backends so pipeline behavior can be tested without network services.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use crate::generation::GenerationProvider;

/// A deterministic [`EmbeddingProvider`] for tests.
///
/// Vectors are derived from the byte content of the input, so equal texts
/// always embed identically and a text is the unique nearest neighbor of
/// its own embedding. Tracks how many backend calls were made.
pub struct MockEmbeddingProvider {
    dimensions: usize,
    calls: AtomicUsize,
}

impl MockEmbeddingProvider {
    /// Create a mock producing vectors of the given dimension.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, calls: AtomicUsize::new(0) }
    }

    /// Number of embed calls made so far (batch counts as one per text).
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut vector = vec![0.0f32; self.dimensions];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % self.dimensions] += byte as f32 / 255.0;
        }
        // Fold in the length so prefixes of a text do not collide with it
        vector[text.len() % self.dimensions] += text.len() as f32;
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// A [`GenerationProvider`] for tests.
///
/// By default echoes the prompt back verbatim, so tests can assert on
/// exactly what reached the provider. A canned reply can be set instead.
pub struct MockGenerationProvider {
    reply: Option<String>,
}

impl MockGenerationProvider {
    /// Create a mock that echoes the prompt back as the answer.
    pub fn echo() -> Self {
        Self { reply: None }
    }

    /// Create a mock that always answers with the given text.
    pub fn canned(reply: impl Into<String>) -> Self {
        Self { reply: Some(reply.into()) }
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(&self, prompt: &str, _max_output_tokens: u32) -> Result<String> {
        Ok(match &self.reply {
            Some(reply) => reply.clone(),
            None => prompt.to_string(),
        })
    }
}
