//! Grounded answer generation.
//!
//! This module provides the [`GenerationProvider`] trait, the pure
//! [`grounded_prompt`] assembly, and the [`AnswerGenerator`] component that
//! ties them together.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;

/// A black-box text generation capability.
///
/// Implementations wrap a specific generation backend (a remote LLM
/// service, a local model, a mock) behind a unified async interface.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for the given prompt, bounded by `max_output_tokens`.
    ///
    /// Returns the decoded text verbatim, with no post-processing.
    async fn generate(&self, prompt: &str, max_output_tokens: u32) -> Result<String>;
}

/// Assemble a grounded prompt from a question and retrieved contexts.
///
/// Pure function of its inputs: a fixed instruction template, the contexts
/// joined by blank lines in input order, the question, and a closing
/// instruction. Empty contexts still yield the template and question; how a
/// provider answers an uncontexted prompt is entirely its own behavior.
pub fn grounded_prompt(question: &str, contexts: &[String]) -> String {
    let context_text = contexts.join("\n\n");
    format!(
        "The following passages are excerpts from a source document. \
         Answer the question based on them.\n\n\
         [Context]\n{context_text}\n\n\
         [Question]\n{question}\n\n\
         Answer concisely, grounded in the passages above."
    )
}

/// The grounded answer generator.
///
/// Assembles retrieved chunk texts and a question into a single prompt via
/// [`grounded_prompt`] and invokes a [`GenerationProvider`] with a maximum
/// output length bound.
///
/// # Example
///
/// ```rust,ignore
/// use ragline::AnswerGenerator;
///
/// let generator = AnswerGenerator::new(provider, 256);
/// let answer = generator.answer("What is X?", &contexts).await?;
/// ```
#[derive(Clone)]
pub struct AnswerGenerator {
    provider: Arc<dyn GenerationProvider>,
    max_output_tokens: u32,
}

impl AnswerGenerator {
    /// Create a new generator over the given provider.
    pub fn new(provider: Arc<dyn GenerationProvider>, max_output_tokens: u32) -> Self {
        Self { provider, max_output_tokens }
    }

    /// Answer a question grounded in the given contexts.
    ///
    /// Contexts are included in the prompt in input order. The provider's
    /// answer is returned verbatim.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`RagError::ProviderUnavailable`] /
    /// [`RagError::ProviderError`] unchanged.
    ///
    /// [`RagError::ProviderUnavailable`]: crate::RagError::ProviderUnavailable
    /// [`RagError::ProviderError`]: crate::RagError::ProviderError
    pub async fn answer(&self, question: &str, contexts: &[String]) -> Result<String> {
        let prompt = grounded_prompt(question, contexts);
        debug!(
            context_count = contexts.len(),
            prompt_len = prompt.len(),
            "invoking generation provider"
        );
        self.provider.generate(&prompt, self.max_output_tokens).await
    }
}
