//! Query embedding seam.

use futures::future::BoxFuture;

use crate::errors::RagError;

/// Turns a query string into a dense vector.
///
/// Implement this trait to plug in your own embedding backend. The vector
/// length must match the dimension the index was built with.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds one text. Failures are reported as [`RagError::Embedding`].
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>>;
}

pub mod llm;
