//! HTTP-layer settings: listen address and CORS origins.

use std::net::SocketAddr;

use ai_llm_service::error_handler::{env_or, process_env};
use axum::http::HeaderValue;

use crate::app::app_state::ConfigError;

pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:8000";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// `API_ADDRESS`, e.g. `127.0.0.1:8000`.
    pub address: SocketAddr,
    /// `CORS_ALLOWED_ORIGINS`, comma-separated.
    pub cors_origins: Vec<HeaderValue>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&process_env)
    }

    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = env_or(env, "API_ADDRESS", DEFAULT_API_ADDRESS);
        let address = raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress(raw.clone()))?;

        let cors_origins = env_or(env, "CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| HeaderValue::from_str(s).map_err(|_| ConfigError::InvalidOrigin(s.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            address,
            cors_origins,
        })
    }
}
