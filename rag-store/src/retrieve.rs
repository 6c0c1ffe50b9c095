//! Query-to-documents retrieval: embed, look up the index, take the top K.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::handle::SharedIndex;
use crate::record::RetrievedDocument;

/// Retrieves the `k` passages most similar to a query.
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingsProvider>,
    index: Arc<SharedIndex>,
    k: usize,
}

impl Retriever {
    /// # Errors
    /// [`RagError::Config`] when `k` is zero.
    pub fn new(
        embedder: Arc<dyn EmbeddingsProvider>,
        index: Arc<SharedIndex>,
        k: usize,
    ) -> Result<Self, RagError> {
        if k == 0 {
            return Err(RagError::Config("k must be >= 1".into()));
        }
        Ok(Self { embedder, index, k })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Retrieves with the configured `k`.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<RetrievedDocument>, RagError> {
        self.retrieve_k(query, self.k).await
    }

    /// Embeds `query`, then asks the index for the `k` nearest items.
    ///
    /// The embedding happens before the index handle is touched, so an
    /// embedding failure never reaches the index. Documents keep the index's
    /// order (best first) and there are never more than `k` of them.
    #[instrument(skip_all, fields(k = k))]
    pub async fn retrieve_k(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<RetrievedDocument>, RagError> {
        if k == 0 {
            return Err(RagError::Config("k must be >= 1".into()));
        }

        let vector = self.embedder.embed(query).await?;
        let index = self.index.get().await?;
        let mut matches = index.query(vector, k, true).await?;
        matches.truncate(k);

        debug!(hits = matches.len(), "retrieval completed");
        Ok(matches.into_iter().map(RetrievedDocument::from).collect())
    }
}
