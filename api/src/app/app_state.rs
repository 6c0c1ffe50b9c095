use std::sync::Arc;

use ai_llm_service::{AiLlmError, HealthService, LlmSettings};
use qa_chain::{QaService, RemotePipelineFactory};
use rag_store::{RagConfig, RagError, RagStore};
use thiserror::Error;
use tracing::info;

/// Startup configuration failures. The service refuses to boot on any of them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API_ADDRESS: {0}")]
    InvalidAddress(String),

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error(transparent)]
    Rag(#[from] RagError),
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// Lazily built QA pipeline.
    pub qa: Arc<QaService>,
    /// Vector index configuration and shared handle.
    pub store: Arc<RagStore>,
    /// LLM profiles, used by the deep health probe.
    pub llm_settings: LlmSettings,
    pub health: HealthService,
}

impl AppState {
    /// Load and validate shared state from environment variables.
    ///
    /// Nothing is connected here: the index and the pipeline are set up on
    /// first use.
    pub fn from_env() -> Result<Self, ConfigError> {
        let llm_settings = LlmSettings::from_env()?;
        let store = Arc::new(RagStore::new(RagConfig::from_env()?)?);

        info!(
            chat_model = %llm_settings.chat.model,
            embedding_model = %llm_settings.embedding.model,
            index = %store.config().index_name,
            provider = ?store.config().provider,
            "configuration loaded"
        );

        let factory = RemotePipelineFactory::new(store.clone(), llm_settings.clone());
        Ok(Self {
            qa: Arc::new(QaService::new(Arc::new(factory))),
            store,
            health: HealthService::new(Some(10))?,
            llm_settings,
        })
    }
}
