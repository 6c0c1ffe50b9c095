//! Shared LLM service with two profiles: `chat` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Provider clients are built eagerly in [`LlmServiceProfiles::new`], so a
//!   bad key or endpoint is reported at construction rather than on first use.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmServiceProfiles, LlmSettings};
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let settings = LlmSettings::from_env()?;
//! let svc = Arc::new(LlmServiceProfiles::new(settings)?);
//!
//! let txt = svc.generate("Hello world", None).await?;
//! let emb = svc.embed("Ferris").await?;
//! println!("{txt} / dim = {}", emb.len());
//! # Ok(()) }
//! ```

use std::sync::Arc;

use tracing::info;

use crate::{
    config::{default_config::LlmSettings, llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// A ready provider client for one profile.
#[derive(Clone)]
enum ProviderClient {
    Ollama(Arc<OllamaService>),
    OpenAI(Arc<OpenAiService>),
}

impl ProviderClient {
    fn build(cfg: &LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(match cfg.provider {
            LlmProvider::Ollama => ProviderClient::Ollama(Arc::new(OllamaService::new(cfg.clone())?)),
            LlmProvider::OpenAI => ProviderClient::OpenAI(Arc::new(OpenAiService::new(cfg.clone())?)),
        })
    }
}

/// Shared service that manages the **chat** and **embedding** profiles.
pub struct LlmServiceProfiles {
    chat: ProviderClient,
    embedding: ProviderClient,
}

impl LlmServiceProfiles {
    /// Creates a new service and builds one HTTP client per profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if a profile is invalid (wrong provider, missing
    /// key, bad endpoint, empty model) or a client cannot be built.
    pub fn new(settings: LlmSettings) -> Result<Self, AiLlmError> {
        let chat = ProviderClient::build(&settings.chat)?;
        let embedding = ProviderClient::build(&settings.embedding)?;

        info!(
            chat_provider = ?settings.chat.provider,
            chat_model = %settings.chat.model,
            embedding_provider = ?settings.embedding.provider,
            embedding_model = %settings.embedding.model,
            "LlmServiceProfiles initialized"
        );

        Ok(Self { chat, embedding })
    }

    /// Generates text using the **chat** profile.
    ///
    /// # Arguments
    /// - `prompt`: user message.
    /// - `system`: optional system instruction.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        match &self.chat {
            ProviderClient::Ollama(cli) => cli.generate(prompt, system).await,
            ProviderClient::OpenAI(cli) => cli.generate(prompt, system).await,
        }
    }

    /// Computes an embedding using the **embedding** profile.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        match &self.embedding {
            ProviderClient::Ollama(cli) => cli.embeddings(input).await,
            ProviderClient::OpenAI(cli) => cli.embeddings(input).await,
        }
    }
}

impl LlmSettings {
    /// Chat profile plus the embedding profile when it is a different target,
    /// so a health probe checks each target once.
    pub fn distinct_profiles(&self) -> Vec<LlmModelConfig> {
        let mut list = vec![self.chat.clone()];
        let same_target = self.embedding.provider == self.chat.provider
            && self.embedding.endpoint == self.chat.endpoint
            && self.embedding.model == self.chat.model;
        if !same_target {
            list.push(self.embedding.clone());
        }
        list
    }
}
