//! Process-wide lazy handle to the vector index.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::errors::RagError;
use crate::index::{IndexConnector, VectorIndex};

/// Connects to the index on first use and shares the connection afterwards.
///
/// Concurrent first callers wait on a single connection attempt. A failed
/// attempt is not cached: the next caller tries again.
pub struct SharedIndex {
    connector: Arc<dyn IndexConnector>,
    cell: OnceCell<Arc<dyn VectorIndex>>,
}

impl SharedIndex {
    pub fn new(connector: Arc<dyn IndexConnector>) -> Self {
        Self {
            connector,
            cell: OnceCell::new(),
        }
    }

    /// Returns the shared index, connecting if this is the first call.
    pub async fn get(&self) -> Result<Arc<dyn VectorIndex>, RagError> {
        let index = self
            .cell
            .get_or_try_init(|| async {
                info!("connecting to vector index");
                self.connector.connect().await.inspect_err(|e| {
                    warn!(error = %e, "vector index connection failed");
                })
            })
            .await?;
        Ok(Arc::clone(index))
    }

    /// `true` once a connection has been established.
    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_use_connects_once() {
        let connector = Arc::new(CountingConnector::ok(Arc::new(StaticIndex::default())));
        let shared = Arc::new(SharedIndex::new(connector.clone()));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let shared = shared.clone();
                tokio::spawn(async move { shared.get().await.map(|_| ()) })
            })
            .collect();
        for t in tasks {
            t.await.unwrap().unwrap();
        }

        assert_eq!(connector.calls(), 1);
        assert!(shared.is_connected());
    }

    #[tokio::test]
    async fn failed_connection_is_retried_on_next_call() {
        let connector = Arc::new(CountingConnector {
            fail_first: 1,
            ..CountingConnector::ok(Arc::new(StaticIndex::default()))
        });
        let shared = SharedIndex::new(connector.clone());

        assert!(matches!(shared.get().await, Err(RagError::Retrieval(_))));
        assert!(!shared.is_connected());
        assert!(shared.get().await.is_ok());
        assert!(shared.get().await.is_ok());
        assert_eq!(connector.calls(), 2);
    }

    #[tokio::test]
    async fn missing_index_surfaces_index_not_found() {
        let connector = Arc::new(CountingConnector {
            not_found: true,
            ..CountingConnector::ok(Arc::new(StaticIndex::default()))
        });
        let shared = SharedIndex::new(connector);
        assert!(matches!(shared.get().await, Err(RagError::IndexNotFound(_))));
    }
}
