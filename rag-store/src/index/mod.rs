//! Vector index seam and the remote connectors behind it.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::config::{IndexProvider, RagConfig};
use crate::errors::RagError;
use crate::record::IndexMatch;

pub mod pinecone;
pub mod qdrant;

/// A connected similarity-search index.
pub trait VectorIndex: Send + Sync {
    /// Returns at most `top_k` matches, best first, in the order the service
    /// reports them.
    fn query<'a>(
        &'a self,
        vector: Vec<f32>,
        top_k: usize,
        include_metadata: bool,
    ) -> BoxFuture<'a, Result<Vec<IndexMatch>, RagError>>;
}

/// Opens a connection to the configured index.
///
/// Fails with [`RagError::IndexNotFound`] when the named index does not exist.
pub trait IndexConnector: Send + Sync {
    fn connect(&self) -> BoxFuture<'_, Result<Arc<dyn VectorIndex>, RagError>>;
}

/// Connector dispatching on [`RagConfig::provider`].
pub struct RemoteIndexConnector {
    cfg: RagConfig,
}

impl RemoteIndexConnector {
    pub fn new(cfg: RagConfig) -> Self {
        Self { cfg }
    }
}

impl IndexConnector for RemoteIndexConnector {
    fn connect(&self) -> BoxFuture<'_, Result<Arc<dyn VectorIndex>, RagError>> {
        Box::pin(async move {
            let index: Arc<dyn VectorIndex> = match self.cfg.provider {
                IndexProvider::Qdrant => Arc::new(qdrant::QdrantIndex::connect(&self.cfg).await?),
                IndexProvider::Pinecone => {
                    Arc::new(pinecone::PineconeIndex::connect(&self.cfg).await?)
                }
            };
            Ok(index)
        })
    }
}
