//! HTTP generation backend.
//!
//! This module is only available when the `http` feature is enabled.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{RagError, Result};
use crate::generation::GenerationProvider;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A [`GenerationProvider`] backed by an HTTP generation service.
///
/// POSTs `{"prompt": ..., "max_new_tokens": ...}` to `{base}/answer` and
/// expects `{"answer": ...}` in return. Error mapping matches
/// [`HttpEmbeddingProvider`](crate::embed_service::HttpEmbeddingProvider):
/// transport failures are [`RagError::ProviderUnavailable`], bad responses
/// are [`RagError::ProviderError`].
pub struct HttpGenerationProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGenerationProvider {
    /// Create a new provider for the generation service at `base_url`,
    /// using the default 30-second request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new provider with an explicit per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            RagError::ProviderError {
                provider: "generation".into(),
                message: format!("failed to build HTTP client: {e}"),
            }
        })?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }
}

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct AnswerRequest<'a> {
    prompt: &'a str,
    max_new_tokens: u32,
}

#[derive(Deserialize)]
struct AnswerResponse {
    answer: String,
}

#[async_trait]
impl GenerationProvider for HttpGenerationProvider {
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String> {
        debug!(provider = "generation", prompt_len = prompt.len(), "requesting answer");

        let response = self
            .client
            .post(format!("{}/answer", self.base_url))
            .json(&AnswerRequest { prompt, max_new_tokens: max_output_tokens })
            .send()
            .await
            .map_err(|e| {
                error!(provider = "generation", error = %e, "request failed");
                RagError::ProviderUnavailable {
                    provider: "generation".into(),
                    message: e.to_string(),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(provider = "generation", %status, "service error");
            return Err(RagError::ProviderError {
                provider: "generation".into(),
                message: format!("service returned {status}"),
            });
        }

        let body: AnswerResponse = response.json().await.map_err(|e| {
            error!(provider = "generation", error = %e, "failed to parse response");
            RagError::ProviderError {
                provider: "generation".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        Ok(body.answer)
    }
}
