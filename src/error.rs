//! Error types for the `ragline` crate.

use thiserror::Error;

/// Errors that can occur in the ingestion and query pipelines.
#[derive(Debug, Error)]
pub enum RagError {
    /// The embedding or generation provider could not be reached.
    ///
    /// Covers connection failures and request timeouts. Retrying is the
    /// caller's responsibility; the pipeline never retries internally.
    #[error("provider unavailable ({provider}): {message}")]
    ProviderUnavailable {
        /// The provider that could not be reached.
        provider: String,
        /// A description of the transport failure.
        message: String,
    },

    /// The provider was reached but returned a malformed or error response.
    #[error("provider error ({provider}): {message}")]
    ProviderError {
        /// The provider that produced the response.
        provider: String,
        /// A description of what was wrong with the response.
        message: String,
    },

    /// The vector store could not be reached.
    #[error("vector store unavailable: {0}")]
    StoreUnavailable(String),

    /// The vector store rejected a write, e.g. on a dimension mismatch
    /// against existing records.
    #[error("vector store write rejected: {0}")]
    StoreWriteError(String),

    /// The source document yielded no usable text at all.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A configuration or builder validation error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Ingestion failed partway through the per-record store loop.
    ///
    /// Records written before the failure remain stored; `stored` reports
    /// how many.
    #[error("ingestion interrupted after {stored} stored records: {source}")]
    IngestInterrupted {
        /// Number of records successfully written before the failure.
        stored: usize,
        /// The store failure that interrupted the loop.
        #[source]
        source: Box<RagError>,
    },
}

/// A convenience result type for pipeline operations.
pub type Result<T> = std::result::Result<T, RagError>;
