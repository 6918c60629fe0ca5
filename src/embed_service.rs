//! HTTP embedding backend.
//!
//! This module is only available when the `http` feature is enabled.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An [`EmbeddingProvider`] backed by an HTTP embedding service.
///
/// The service exposes two endpoints:
///
/// - `POST {base}/embed` with `{"text": ...}`, returning `{"embedding": [...]}`
/// - `POST {base}/embed-batch` with `{"texts": [...]}`, returning
///   `{"embeddings": [[...], ...]}` in input order
///
/// Transport failures (connect errors, timeouts) surface as
/// [`RagError::ProviderUnavailable`]; non-2xx statuses, unparseable bodies,
/// and batch responses of the wrong cardinality surface as
/// [`RagError::ProviderError`].
///
/// # Example
///
/// ```rust,ignore
/// use ragline::HttpEmbeddingProvider;
///
/// let provider = HttpEmbeddingProvider::new("http://localhost:8000", 768)?;
/// let vector = provider.embed("hello world").await?;
/// ```
pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    dimensions: usize,
}

impl HttpEmbeddingProvider {
    /// Create a new provider for the embedding service at `base_url`,
    /// producing vectors of the given dimension.
    ///
    /// Uses the default 30-second request timeout.
    pub fn new(base_url: impl Into<String>, dimensions: usize) -> Result<Self> {
        Self::with_timeout(base_url, dimensions, DEFAULT_TIMEOUT)
    }

    /// Create a new provider with an explicit per-request timeout.
    ///
    /// A request that exceeds the timeout fails with
    /// [`RagError::ProviderUnavailable`].
    pub fn with_timeout(
        base_url: impl Into<String>,
        dimensions: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            RagError::ProviderError {
                provider: "embedding".into(),
                message: format!("failed to build HTTP client: {e}"),
            }
        })?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url, dimensions })
    }

    fn transport_err(e: reqwest::Error) -> RagError {
        error!(provider = "embedding", error = %e, "request failed");
        RagError::ProviderUnavailable {
            provider: "embedding".into(),
            message: e.to_string(),
        }
    }

    fn response_err(message: String) -> RagError {
        error!(provider = "embedding", detail = %message, "bad response");
        RagError::ProviderError { provider: "embedding".into(), message }
    }
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct EmbedBatchRequest<'a> {
    texts: &'a [&'a str],
}

#[derive(Deserialize)]
struct EmbedBatchResponse {
    embeddings: Vec<Vec<f32>>,
}

// ── EmbeddingProvider implementation ───────────────────────────────

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "embedding", text_len = text.len(), "embedding single text");

        let response = self
            .client
            .post(format!("{}/embed", self.base_url))
            .json(&EmbedRequest { text })
            .send()
            .await
            .map_err(Self::transport_err)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::response_err(format!("service returned {status}")));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Self::response_err(format!("failed to parse response: {e}")))?;

        Ok(body.embedding)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = "embedding", batch_size = texts.len(), "embedding batch");

        let response = self
            .client
            .post(format!("{}/embed-batch", self.base_url))
            .json(&EmbedBatchRequest { texts })
            .send()
            .await
            .map_err(Self::transport_err)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::response_err(format!("service returned {status}")));
        }

        let body: EmbedBatchResponse = response
            .json()
            .await
            .map_err(|e| Self::response_err(format!("failed to parse response: {e}")))?;

        if body.embeddings.len() != texts.len() {
            return Err(Self::response_err(format!(
                "service returned {} embeddings for {} texts",
                body.embeddings.len(),
                texts.len()
            )));
        }

        Ok(body.embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
