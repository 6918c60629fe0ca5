//! Data types for documents, chunks, and retrieval results.

use serde::{Deserialize, Serialize};

/// A source document: an ordered sequence of page texts.
///
/// Documents are read once at ingestion time and never persisted. A page
/// whose extraction failed upstream is represented as an empty string, not
/// an error; a document whose pages contain no usable text at all is
/// rejected at ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// The extracted plain text of each page, in page order.
    pub pages: Vec<String>,
}

impl Document {
    /// Create a document from already-extracted page texts.
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Create a single-page document from a flat text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { pages: vec![text.into()] }
    }

    /// Concatenate all pages into one text, joining pages with single
    /// spaces and normalizing embedded newlines to spaces.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.replace(['\n', '\r'], " "))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether any page contains non-whitespace text.
    pub fn has_text(&self) -> bool {
        self.pages.iter().any(|page| !page.trim().is_empty())
    }
}

/// A contiguous span of whitespace-delimited words from a document.
///
/// Produced once by a chunker during ingestion and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chunk {
    /// The chunk text: source words joined by single spaces.
    pub text: String,
    /// Position of this chunk in the originating sequence, for traceability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_index: Option<usize>,
}

/// The persisted pairing of a chunk's text with its embedding vector,
/// keyed by an opaque identifier assigned by the vector store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredChunkRecord {
    /// Store-assigned opaque identifier.
    pub id: String,
    /// The stored chunk text.
    pub text: String,
}

/// A retrieved chunk text paired with its distance to the query vector.
///
/// Lower distance means more similar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The retrieved chunk text.
    pub text: String,
    /// Distance between the stored embedding and the query vector.
    pub distance: f32,
}

/// Chunk texts ranked ascending by distance to the query vector.
///
/// Length is at most the requested `k`; distance order is non-decreasing,
/// with ties in store-defined (stable) order.
pub type RetrievalResult = Vec<SearchHit>;
