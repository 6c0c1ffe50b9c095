//! Default LLM configs loaded strictly from environment variables.
//!
//! Two roles are supported, for either provider:
//!
//! - **Chat**      → answers questions over the retrieved context
//! - **Embedding** → vectorizes queries for similarity search
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = provider for both roles (`openai` by default, or `ollama`)
//! - `EMBEDDING_KIND`   = optional override of the embedding provider
//! - `LLM_TEMPERATURE`  = chat temperature (default `0.7`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = optional HTTP timeout (u64)
//! - `EMBEDDING_DIM`    = embedding dimensionality (default `512`)
//!
//! OpenAI-specific:
//! - `OPENAI_API_KEY`   (mandatory)
//! - `OPENAI_BASE_URL`  (default `https://api.openai.com`)
//! - `OPENAI_MODEL`     (default `gpt-3.5-turbo`)
//! - `EMBEDDING_MODEL`  (default `text-embedding-3-small`)
//!
//! Ollama-specific:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL`                = chat model (mandatory)
//! - `EMBEDDING_MODEL`             = embedding model (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, env_or,
        must_env, process_env, validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_OPENAI_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_DIM: u32 = 512;

type Env<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Chat + embedding profiles resolved from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub chat: LlmModelConfig,
    pub embedding: LlmModelConfig,
}

impl LlmSettings {
    /// Loads both profiles from the process environment.
    ///
    /// # Errors
    /// Returns [`AiLlmError::Config`] if a required variable is missing or malformed.
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::from_lookup(&process_env)
    }

    /// Loads both profiles from an arbitrary variable lookup.
    pub fn from_lookup(env: Env<'_>) -> Result<Self, AiLlmError> {
        let kind: LlmProvider = env_or(env, "LLM_KIND", "openai").parse()?;
        let embedding_kind: LlmProvider = match env_opt(env, "EMBEDDING_KIND") {
            Some(k) => k.parse()?,
            None => kind,
        };

        let chat = match kind {
            LlmProvider::OpenAI => config_openai_chat(env)?,
            LlmProvider::Ollama => config_ollama_chat(env)?,
        };
        let embedding = match embedding_kind {
            LlmProvider::OpenAI => config_openai_embedding(env)?,
            LlmProvider::Ollama => config_ollama_embedding(env)?,
        };

        Ok(Self { chat, embedding })
    }

    /// Embedding dimensionality every vector must have.
    pub fn embedding_dim(&self) -> usize {
        self.embedding
            .dimensions
            .unwrap_or(DEFAULT_EMBEDDING_DIM) as usize
    }
}

/// Resolves the OpenAI base URL (`OPENAI_BASE_URL`, default public API).
fn openai_endpoint(env: Env<'_>) -> Result<String, AiLlmError> {
    let url = env_or(env, "OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL);
    validate_http_endpoint("OPENAI_BASE_URL", &url)?;
    Ok(url)
}

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
fn ollama_endpoint(env: Env<'_>) -> Result<String, AiLlmError> {
    if let Some(url) = env_opt(env, "OLLAMA_URL") {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url);
    }
    if let Some(port) = env_opt(env, "OLLAMA_PORT") {
        port.trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{}", port.trim()));
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

fn chat_temperature(env: Env<'_>) -> Result<f32, AiLlmError> {
    let t = env_opt_f32(env, "LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("temperature", t, 0.0, 2.0)?;
    Ok(t)
}

fn embedding_dim(env: Env<'_>) -> Result<u32, AiLlmError> {
    match env_opt_u32(env, "EMBEDDING_DIM")? {
        Some(0) => Err(ConfigError::OutOfRange {
            field: "EMBEDDING_DIM",
            detail: "must be > 0",
        }
        .into()),
        Some(d) => Ok(d),
        None => Ok(DEFAULT_EMBEDDING_DIM),
    }
}

/// Chat profile for OpenAI.
///
/// # Defaults
/// - `model = gpt-3.5-turbo`
/// - `temperature = 0.7`
pub fn config_openai_chat(env: Env<'_>) -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: env_or(env, "OPENAI_MODEL", DEFAULT_CHAT_MODEL),
        endpoint: openai_endpoint(env)?,
        api_key: Some(must_env(env, "OPENAI_API_KEY")?),
        max_tokens: env_opt_u32(env, "LLM_MAX_TOKENS")?,
        temperature: Some(chat_temperature(env)?),
        top_p: None,
        timeout_secs: env_opt_u64(env, "LLM_TIMEOUT_SECS")?,
        dimensions: None,
    })
}

/// Embedding profile for OpenAI (`text-embedding-3-small`, 512 dims by default).
pub fn config_openai_embedding(env: Env<'_>) -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: env_or(env, "EMBEDDING_MODEL", DEFAULT_OPENAI_EMBEDDING_MODEL),
        endpoint: openai_endpoint(env)?,
        api_key: Some(must_env(env, "OPENAI_API_KEY")?),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: env_opt_u64(env, "LLM_TIMEOUT_SECS")?,
        dimensions: Some(embedding_dim(env)?),
    })
}

/// Chat profile for a local Ollama model (`OLLAMA_MODEL`).
pub fn config_ollama_chat(env: Env<'_>) -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: must_env(env, "OLLAMA_MODEL")?,
        endpoint: ollama_endpoint(env)?,
        api_key: None,
        max_tokens: env_opt_u32(env, "LLM_MAX_TOKENS")?,
        temperature: Some(chat_temperature(env)?),
        top_p: None,
        timeout_secs: env_opt_u64(env, "LLM_TIMEOUT_SECS")?,
        dimensions: None,
    })
}

/// Embedding profile for a local Ollama model (`EMBEDDING_MODEL`).
pub fn config_ollama_embedding(env: Env<'_>) -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: must_env(env, "EMBEDDING_MODEL")?,
        endpoint: ollama_endpoint(env)?,
        api_key: None,
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: env_opt_u64(env, "LLM_TIMEOUT_SECS")?,
        dimensions: Some(embedding_dim(env)?),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn openai_defaults_match_reference_deployment() {
        let env = lookup(&[("OPENAI_API_KEY", "sk-test")]);
        let s = LlmSettings::from_lookup(&env).unwrap();

        assert_eq!(s.chat.provider, LlmProvider::OpenAI);
        assert_eq!(s.chat.model, "gpt-3.5-turbo");
        assert_eq!(s.chat.temperature, Some(0.7));
        assert_eq!(s.chat.endpoint, "https://api.openai.com");
        assert_eq!(s.embedding.model, "text-embedding-3-small");
        assert_eq!(s.embedding.dimensions, Some(512));
        assert_eq!(s.embedding_dim(), 512);
        assert_eq!(s.chat.timeout_secs, None);
    }

    #[test]
    fn openai_requires_api_key() {
        let env = lookup(&[]);
        let err = LlmSettings::from_lookup(&env).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("OPENAI_API_KEY"))
        ));
    }

    #[test]
    fn ollama_profiles_use_port_fallback() {
        let env = lookup(&[
            ("LLM_KIND", "ollama"),
            ("OLLAMA_PORT", "11434"),
            ("OLLAMA_MODEL", "llama3"),
            ("EMBEDDING_MODEL", "nomic-embed-text"),
            ("EMBEDDING_DIM", "768"),
        ]);
        let s = LlmSettings::from_lookup(&env).unwrap();
        assert_eq!(s.chat.endpoint, "http://localhost:11434");
        assert_eq!(s.chat.model, "llama3");
        assert_eq!(s.embedding.model, "nomic-embed-text");
        assert_eq!(s.embedding_dim(), 768);
    }

    #[test]
    fn mixed_providers_and_bad_values() {
        let env = lookup(&[
            ("LLM_KIND", "ollama"),
            ("EMBEDDING_KIND", "openai"),
            ("OLLAMA_URL", "http://gpu-box:11434"),
            ("OLLAMA_MODEL", "llama3"),
            ("OPENAI_API_KEY", "sk-test"),
        ]);
        let s = LlmSettings::from_lookup(&env).unwrap();
        assert_eq!(s.chat.provider, LlmProvider::Ollama);
        assert_eq!(s.embedding.provider, LlmProvider::OpenAI);

        let env = lookup(&[("LLM_KIND", "anthropic")]);
        assert!(matches!(
            LlmSettings::from_lookup(&env),
            Err(AiLlmError::Config(ConfigError::UnsupportedProvider(_)))
        ));

        let env = lookup(&[("OPENAI_API_KEY", "sk"), ("LLM_TEMPERATURE", "3.5")]);
        assert!(matches!(
            LlmSettings::from_lookup(&env),
            Err(AiLlmError::Config(ConfigError::OutOfRange { .. }))
        ));

        let env = lookup(&[("OPENAI_API_KEY", "sk"), ("EMBEDDING_DIM", "0")]);
        assert!(LlmSettings::from_lookup(&env).is_err());
    }
}
