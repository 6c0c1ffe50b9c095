//! Process-wide QA pipeline: built lazily on first use, shared afterwards.

use std::sync::Arc;

use ai_llm_service::{LlmServiceProfiles, LlmSettings};
use futures::future::BoxFuture;
use rag_store::{LlmEmbedder, RagStore};
use tokio::sync::OnceCell;
use tracing::{error, info, instrument};

use crate::api_types::Answer;
use crate::chain::QaChain;
use crate::error::QaError;
use crate::llm::ChatModel;

/// Builds a ready [`QaChain`]. Called at most once per successful init.
pub trait PipelineFactory: Send + Sync {
    fn build(&self) -> BoxFuture<'_, Result<QaChain, QaError>>;
}

/// Factory wiring the configured LLM profiles to the shared vector index.
pub struct RemotePipelineFactory {
    store: Arc<RagStore>,
    settings: LlmSettings,
}

impl RemotePipelineFactory {
    pub fn new(store: Arc<RagStore>, settings: LlmSettings) -> Self {
        Self { store, settings }
    }
}

impl PipelineFactory for RemotePipelineFactory {
    fn build(&self) -> BoxFuture<'_, Result<QaChain, QaError>> {
        Box::pin(async move {
            let svc = LlmServiceProfiles::new(self.settings.clone())
                .map(Arc::new)
                .map_err(|e| QaError::PipelineInit(e.to_string()))?;

            let embedder = Arc::new(LlmEmbedder::new(svc.clone(), self.settings.embedding_dim()));
            let retriever = self
                .store
                .retriever(embedder)
                .map_err(|e| QaError::PipelineInit(e.to_string()))?;

            let llm: Arc<dyn ChatModel> = svc;
            Ok(QaChain::new(llm, retriever))
        })
    }
}

/// Answers questions through a lazily built, shared [`QaChain`].
pub struct QaService {
    factory: Arc<dyn PipelineFactory>,
    cell: OnceCell<Arc<QaChain>>,
}

impl QaService {
    pub fn new(factory: Arc<dyn PipelineFactory>) -> Self {
        Self {
            factory,
            cell: OnceCell::new(),
        }
    }

    /// Returns the shared pipeline, building it on first use.
    ///
    /// Racing first callers wait on one build. A failed build is not kept;
    /// the next call tries again.
    ///
    /// # Errors
    /// [`QaError::PipelineInit`] (or whatever the factory reports) on failure.
    pub async fn pipeline(&self) -> Result<Arc<QaChain>, QaError> {
        let chain = self
            .cell
            .get_or_try_init(|| async {
                info!("building QA pipeline");
                self.factory.build().await.map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(chain))
    }

    /// `true` once the pipeline has been built.
    pub fn is_ready(&self) -> bool {
        self.cell.initialized()
    }

    /// Answers `query` with sources.
    ///
    /// Every failure, including pipeline init, comes back as
    /// [`QaError::QueryProcessing`] wrapping the cause.
    #[instrument(skip_all)]
    pub async fn answer(&self, query: &str) -> Result<Answer, QaError> {
        let result = match self.pipeline().await {
            Ok(chain) => chain.invoke(query).await,
            Err(e) => Err(e),
        };
        result.map_err(|e| {
            error!(error = %e, "query processing failed");
            e.into_query_processing()
        })
    }
}
