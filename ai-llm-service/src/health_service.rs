//! Health probes for LLM backends (Ollama, OpenAI).
//!
//! - Ollama: `GET {endpoint}/api/tags` (best-effort model existence check)
//! - OpenAI: `GET {endpoint}/v1/models` with Bearer auth (best-effort model existence check)
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a `/health` endpoint.
//! [`HealthService::check`] never fails (errors mapped to `ok=false`).

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HealthError, HttpError, make_snippet};

/// A serializable health snapshot for a single provider/config.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Ollama", "OpenAI").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier relevant to the probe.
    pub model: Option<String>,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: Some(cfg.model.clone()),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// A health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds, default 10).
    ///
    /// # Errors
    /// Returns [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Checks health for a single config, routing to the provider-specific probe.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            warn!(provider = ?cfg.provider, endpoint = %cfg.endpoint, "invalid endpoint");
            return HealthStatus::new(cfg, false, 0, "endpoint is empty or missing http/https");
        }

        let start = Instant::now();
        let result = match cfg.provider {
            LlmProvider::Ollama => self.try_probe_ollama(cfg).await,
            LlmProvider::OpenAI => self.try_probe_openai(cfg).await,
        };
        let latency = start.elapsed().as_millis();

        match result {
            Ok((ok, message)) => {
                info!(
                    provider = ?cfg.provider,
                    model = %cfg.model,
                    ok,
                    latency_ms = latency,
                    "health probe completed"
                );
                HealthStatus::new(cfg, ok, latency, message)
            }
            Err(err) => {
                warn!(
                    provider = ?cfg.provider,
                    model = %cfg.model,
                    error = %err,
                    latency_ms = latency,
                    "health probe failed"
                );
                HealthStatus::new(cfg, false, latency, err.to_string())
            }
        }
    }

    /// Checks every config in order. Never fails.
    pub async fn check_many(&self, configs: &[LlmModelConfig]) -> Vec<HealthStatus> {
        debug!(count = configs.len(), "running batch health probes");
        let mut out = Vec::with_capacity(configs.len());
        for cfg in configs {
            out.push(self.check(cfg).await);
        }
        out
    }

    fn timeout_for(&self, cfg: &LlmModelConfig) -> Duration {
        cfg.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout)
    }

    /// Strict Ollama probe: `GET /api/tags`, then look for the model tag.
    async fn try_probe_ollama(&self, cfg: &LlmModelConfig) -> Result<(bool, String), AiLlmError> {
        let url = format!("{}/api/tags", cfg.endpoint.trim().trim_end_matches('/'));
        debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout_for(cfg))
            .send()
            .await?;
        let resp = ensure_success(resp, url).await?;

        #[derive(serde::Deserialize)]
        struct Tag {
            name: String,
        }
        #[derive(serde::Deserialize)]
        struct Tags {
            models: Option<Vec<Tag>>,
        }

        let tags: Tags = resp
            .json()
            .await
            .map_err(|e| HealthError::Decode(format!("/api/tags: {e}")))?;

        let latest = format!("{}:latest", cfg.model);
        Ok(match tags.models {
            Some(models) if models.iter().any(|m| m.name == cfg.model || m.name == latest) => {
                (true, "Ollama is healthy; model is available".to_string())
            }
            Some(_) => (false, "Ollama is up, but model not found in /api/tags".to_string()),
            None => (true, "Ollama is healthy; tags response without `models`".to_string()),
        })
    }

    /// Strict OpenAI probe: `GET /v1/models` with Bearer auth.
    async fn try_probe_openai(&self, cfg: &LlmModelConfig) -> Result<(bool, String), AiLlmError> {
        let url = format!("{}/v1/models", cfg.endpoint.trim().trim_end_matches('/'));

        let api_key = cfg
            .api_key
            .as_ref()
            .ok_or_else(|| HealthError::Decode("missing OpenAI API key".into()))?;
        let auth = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| HealthError::Decode(format!("invalid API key header: {e}")))?;

        debug!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout_for(cfg))
            .header(header::AUTHORIZATION, auth)
            .send()
            .await?;
        let resp = ensure_success(resp, url).await?;

        #[derive(serde::Deserialize)]
        struct ModelItem {
            id: String,
        }
        #[derive(serde::Deserialize)]
        struct Models {
            data: Vec<ModelItem>,
        }

        let models: Models = resp
            .json()
            .await
            .map_err(|e| HealthError::Decode(format!("/v1/models: {e}")))?;

        Ok(if models.data.iter().any(|m| m.id == cfg.model) {
            (true, "OpenAI is healthy; model is available".to_string())
        } else {
            (false, "OpenAI is up, but model not found in /v1/models".to_string())
        })
    }
}

async fn ensure_success(resp: reqwest::Response, url: String) -> Result<reqwest::Response, AiLlmError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    Err(HealthError::HttpStatus(HttpError {
        status,
        url,
        snippet: make_snippet(&text),
    })
    .into())
}
