use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Represents the provider (backend) used for chat generation or embeddings.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// let provider: LlmProvider = "openai".parse().unwrap();
/// assert_eq!(provider, LlmProvider::OpenAI);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime for on-device inference.
    Ollama,
    /// OpenAI REST API (chat completions + embeddings).
    OpenAI,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    /// Accepts `openai`, `chatgpt` and `ollama` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
