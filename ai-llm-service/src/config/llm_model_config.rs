use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// Shared by chat and embedding profiles; fields that do not apply to a
/// profile are left as `None` (e.g. `dimensions` for chat, `temperature`
/// for embeddings).
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenAI,
///     model: "gpt-3.5-turbo".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     max_tokens: None,
///     temperature: Some(0.7),
///     top_p: None,
///     timeout_secs: None,
///     dimensions: None,
/// };
/// assert_eq!(cfg.model, "gpt-3.5-turbo");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string (e.g., `"gpt-3.5-turbo"`, `"text-embedding-3-small"`).
    pub model: String,

    /// Base URL of the provider API (without the `/v1/...` or `/api/...` suffix).
    pub endpoint: String,

    /// Optional API key for authentication (required by OpenAI).
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (controls creativity).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds). `None` keeps the transport default.
    pub timeout_secs: Option<u64>,

    /// Requested embedding dimensionality (embedding profiles only).
    pub dimensions: Option<u32>,
}
