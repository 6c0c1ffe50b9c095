//! Runtime configuration for the vector index and retrieval.

use ai_llm_service::error_handler::{env_opt, env_or, process_env};

use crate::errors::RagError;

pub const DEFAULT_TOP_K: usize = 4;
pub const DEFAULT_INDEX_NAME: &str = "default-index";
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";
pub const DEFAULT_PINECONE_CONTROL_URL: &str = "https://api.pinecone.io";

/// Which vector service hosts the index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexProvider {
    /// Qdrant over gRPC.
    Qdrant,
    /// Pinecone over REST.
    Pinecone,
}

impl IndexProvider {
    fn parse(s: &str) -> Result<Self, RagError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "qdrant" => Ok(IndexProvider::Qdrant),
            "pinecone" => Ok(IndexProvider::Pinecone),
            other => Err(RagError::Config(format!(
                "unsupported VECTOR_INDEX_PROVIDER: {other}"
            ))),
        }
    }
}

/// Configuration for retrieval.
#[derive(Clone, Debug, PartialEq)]
pub struct RagConfig {
    /// Vector service hosting the index.
    pub provider: IndexProvider,
    /// Index (Pinecone) or collection (Qdrant) name. Must already exist.
    pub index_name: String,
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Pinecone API key (required for Pinecone).
    pub pinecone_api_key: Option<String>,
    /// Pinecone control-plane base URL (index lookup).
    pub pinecone_control_url: String,
    /// Default number of documents returned per query.
    pub top_k: usize,
    /// Exact search flag (false = HNSW ANN). Qdrant only.
    pub exact_search: bool,
}

impl RagConfig {
    /// Creates a default Qdrant config for a given collection name and endpoint.
    pub fn new_default(url: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            provider: IndexProvider::Qdrant,
            index_name: index_name.into(),
            qdrant_url: url.into(),
            qdrant_api_key: None,
            pinecone_api_key: None,
            pinecone_control_url: DEFAULT_PINECONE_CONTROL_URL.to_string(),
            top_k: DEFAULT_TOP_K,
            exact_search: false,
        }
    }

    /// Loads and validates the config from the process environment.
    ///
    /// - `VECTOR_INDEX_PROVIDER` = `qdrant` (default) | `pinecone`
    /// - `VECTOR_INDEX_NAME` (alias `PINECONE_INDEX_NAME`, default `default-index`)
    /// - `QDRANT_URL`, `QDRANT_API_KEY`
    /// - `PINECONE_API_KEY`, `PINECONE_CONTROL_URL`
    /// - `RAG_TOP_K` (default 4), `RAG_EXACT_SEARCH` (default false)
    pub fn from_env() -> Result<Self, RagError> {
        Self::from_lookup(&process_env)
    }

    /// Same as [`RagConfig::from_env`] over an arbitrary variable lookup.
    pub fn from_lookup(env: &dyn Fn(&str) -> Option<String>) -> Result<Self, RagError> {
        let provider = IndexProvider::parse(&env_or(env, "VECTOR_INDEX_PROVIDER", "qdrant"))?;

        let index_name = env_opt(env, "VECTOR_INDEX_NAME")
            .or_else(|| env_opt(env, "PINECONE_INDEX_NAME"))
            .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());

        let top_k = match env_opt(env, "RAG_TOP_K") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .map_err(|_| RagError::Config(format!("RAG_TOP_K is not a number: {v}")))?,
            None => DEFAULT_TOP_K,
        };

        let cfg = Self {
            provider,
            index_name,
            qdrant_url: env_or(env, "QDRANT_URL", DEFAULT_QDRANT_URL),
            qdrant_api_key: env_opt(env, "QDRANT_API_KEY"),
            pinecone_api_key: env_opt(env, "PINECONE_API_KEY"),
            pinecone_control_url: env_or(env, "PINECONE_CONTROL_URL", DEFAULT_PINECONE_CONTROL_URL),
            top_k,
            exact_search: env_or(env, "RAG_EXACT_SEARCH", "false").eq_ignore_ascii_case("true"),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.index_name.trim().is_empty() {
            return Err(RagError::Config("index name is empty".into()));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be >= 1".into()));
        }
        match self.provider {
            IndexProvider::Qdrant => {
                if self.qdrant_url.trim().is_empty() {
                    return Err(RagError::Config("qdrant_url is empty".into()));
                }
            }
            IndexProvider::Pinecone => {
                if self.pinecone_api_key.is_none() {
                    return Err(RagError::Config("PINECONE_API_KEY is required".into()));
                }
                if self.pinecone_control_url.trim().is_empty() {
                    return Err(RagError::Config("pinecone_control_url is empty".into()));
                }
            }
        }
        Ok(())
    }
}
