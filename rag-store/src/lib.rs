//! Retrieval over a remote vector index (Qdrant or Pinecone).
//!
//! This crate provides:
//! - [`EmbeddingsProvider`]: query text to vector
//! - [`SharedIndex`]: a lazily connected, process-wide index handle
//! - [`Retriever`]: embed, look up, return the top-K [`RetrievedDocument`]s
//!
//! The index is read-only here; ingestion happens elsewhere.

pub mod config;
pub mod embed;
pub mod errors;
pub mod handle;
pub mod index;
pub mod record;
pub mod retrieve;

pub use config::{IndexProvider, RagConfig};
pub use embed::EmbeddingsProvider;
pub use embed::llm::LlmEmbedder;
pub use errors::RagError;
pub use handle::SharedIndex;
pub use index::{IndexConnector, RemoteIndexConnector, VectorIndex};
pub use record::{IndexMatch, Metadata, RetrievedDocument};
pub use retrieve::Retriever;

use std::sync::Arc;

use tracing::debug;

/// High-level facade that owns the configuration and the shared index handle.
///
/// Construct once at startup; building it does not touch the network.
pub struct RagStore {
    cfg: RagConfig,
    index: Arc<SharedIndex>,
}

impl RagStore {
    /// Validates `cfg` and prepares a lazily connected handle to the remote index.
    ///
    /// # Errors
    /// Returns [`RagError::Config`] if the configuration is invalid.
    pub fn new(cfg: RagConfig) -> Result<Self, RagError> {
        cfg.validate()?;
        debug!(provider = ?cfg.provider, index = %cfg.index_name, "RagStore::new");
        let connector = Arc::new(RemoteIndexConnector::new(cfg.clone()));
        Ok(Self::with_connector(cfg, connector))
    }

    /// Same as [`RagStore::new`] with a caller-supplied connector.
    pub fn with_connector(cfg: RagConfig, connector: Arc<dyn IndexConnector>) -> Self {
        Self {
            cfg,
            index: Arc::new(SharedIndex::new(connector)),
        }
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// The shared index handle.
    pub fn index(&self) -> Arc<SharedIndex> {
        Arc::clone(&self.index)
    }

    /// Builds a retriever over the shared index using the configured `top_k`.
    ///
    /// # Errors
    /// Returns [`RagError::Config`] if `top_k` is zero.
    pub fn retriever(&self, embedder: Arc<dyn EmbeddingsProvider>) -> Result<Retriever, RagError> {
        Retriever::new(embedder, self.index(), self.cfg.top_k)
    }
}
