//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for rag-store operations.
///
/// Each retrieval stage fails with its own variant so callers can tell a
/// configuration problem (`IndexNotFound`) from a transient fault (`Retrieval`).
#[derive(Debug, Error)]
pub enum RagError {
    /// The embedding call failed or returned an unusable vector.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The configured index does not exist on the vector service.
    #[error("index not found: {0}")]
    IndexNotFound(String),

    /// The similarity query (or the connection behind it) failed.
    #[error("retrieval error: {0}")]
    Retrieval(String),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),
}
