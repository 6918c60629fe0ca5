//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`WordChunker`], a greedy
//! word-buffer splitter that never breaks a word across chunks.

use crate::document::Chunk;
use crate::error::{RagError, Result};

/// A strategy for splitting document text into chunks.
///
/// Implementations must be deterministic: identical input yields an
/// identical chunk sequence.
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Returns an empty `Vec` for empty or whitespace-only input.
    fn chunk(&self, text: &str) -> Vec<Chunk>;
}

/// Greedy, non-overlapping, single-pass word accumulation.
///
/// Words (whitespace-delimited tokens) are accumulated into a buffer,
/// joined by single spaces. As soon as the joined buffer reaches or exceeds
/// `target_size` characters the chunk is closed and a new buffer starts; a
/// non-empty remainder is flushed as a final, possibly short, chunk. Every
/// chunk except possibly the last is therefore at least `target_size`
/// characters long.
///
/// A single word longer than `target_size` is emitted alone; words are
/// never split. Text without any whitespace (e.g. scripts that do not
/// delimit words with spaces) consequently becomes one chunk.
///
/// # Example
///
/// ```rust,ignore
/// use ragline::WordChunker;
///
/// let chunker = WordChunker::new(500)?;
/// let chunks = chunker.chunk(&document.full_text());
/// ```
#[derive(Debug, Clone)]
pub struct WordChunker {
    target_size: usize,
}

impl WordChunker {
    /// Create a new `WordChunker` with the given target chunk size in
    /// characters.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `target_size` is zero.
    pub fn new(target_size: usize) -> Result<Self> {
        if target_size == 0 {
            return Err(RagError::ConfigError(
                "chunk target_size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { target_size })
    }
}

impl Chunker for WordChunker {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0usize;

        for word in text.split_whitespace() {
            if !buffer.is_empty() {
                buffer.push(' ');
                buffer_chars += 1;
            }
            buffer.push_str(word);
            buffer_chars += word.chars().count();

            if buffer_chars >= self.target_size {
                chunks.push(Chunk {
                    text: std::mem::take(&mut buffer),
                    source_index: Some(chunks.len()),
                });
                buffer_chars = 0;
            }
        }

        if !buffer.is_empty() {
            chunks.push(Chunk {
                text: buffer,
                source_index: Some(chunks.len()),
            });
        }

        chunks
    }
}
