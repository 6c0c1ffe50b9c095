//! Embedding provider backed by the shared LLM service profiles.

use std::sync::Arc;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use futures::future::BoxFuture;
use tracing::debug;

use crate::{EmbeddingsProvider, RagError};

/// Embeds through the **embedding** profile of [`LlmServiceProfiles`].
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
    /// Expected embedding dimension size.
    dim: usize,
}

impl LlmEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: usize) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async move {
            let vector = self
                .svc
                .embed(text)
                .await
                .map_err(|e| RagError::Embedding(e.to_string()))?;

            if vector.len() != self.dim {
                return Err(RagError::Embedding(format!(
                    "vector size mismatch: got {}, want {}",
                    vector.len(),
                    self.dim
                )));
            }

            debug!(dim = vector.len(), "query embedded");
            Ok(vector)
        })
    }
}
