//! Shared LLM access for the QA backend.
//!
//! Two logical profiles are exposed through [`service_profiles::LlmServiceProfiles`]:
//! a **chat** profile used to answer questions and an **embedding** profile
//! used to vectorize queries. Both can target OpenAI or a local Ollama.

pub mod config;
pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::default_config::LlmSettings;
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ConfigError};
pub use health_service::{HealthService, HealthStatus};
pub use service_profiles::LlmServiceProfiles;
