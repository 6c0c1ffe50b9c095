//! Pinecone index over its REST API.
//!
//! - `GET  {control}/indexes/{name}` resolves the data-plane host (404 means
//!   the index does not exist)
//! - `POST https://{host}/query` runs the similarity search

use futures::future::BoxFuture;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ai_llm_service::error_handler::make_snippet;

use crate::config::RagConfig;
use crate::errors::RagError;
use crate::index::VectorIndex;
use crate::record::{IndexMatch, Metadata};

const API_VERSION: &str = "2024-07";

/// A connected Pinecone index.
pub struct PineconeIndex {
    client: reqwest::Client,
    api_key: String,
    url_query: String,
}

impl PineconeIndex {
    /// Describes the index on the control plane and keeps its query URL.
    ///
    /// # Errors
    /// - [`RagError::IndexNotFound`] if the control plane answers 404
    /// - [`RagError::Config`] if no API key is configured
    /// - [`RagError::Retrieval`] for transport or decode failures
    pub async fn connect(cfg: &RagConfig) -> Result<Self, RagError> {
        let api_key = cfg
            .pinecone_api_key
            .clone()
            .ok_or_else(|| RagError::Config("PINECONE_API_KEY is required".into()))?;

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| RagError::Retrieval(e.to_string()))?;

        let url = format!(
            "{}/indexes/{}",
            cfg.pinecone_control_url.trim().trim_end_matches('/'),
            cfg.index_name
        );
        debug!("GET {}", url);
        let resp = client
            .get(&url)
            .header("Api-Key", &api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await
            .map_err(|e| RagError::Retrieval(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(RagError::IndexNotFound(cfg.index_name.clone()));
        }
        let resp = ensure_success(resp, &url).await?;

        let desc: IndexDescription = resp
            .json()
            .await
            .map_err(|e| RagError::Retrieval(format!("describe index: {e}")))?;

        let host = desc.host.trim().trim_end_matches('/');
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };

        info!(index = %cfg.index_name, host = %base, "pinecone index connected");
        Ok(Self {
            client,
            api_key,
            url_query: format!("{base}/query"),
        })
    }
}

impl VectorIndex for PineconeIndex {
    fn query<'a>(
        &'a self,
        vector: Vec<f32>,
        top_k: usize,
        include_metadata: bool,
    ) -> BoxFuture<'a, Result<Vec<IndexMatch>, RagError>> {
        Box::pin(async move {
            let body = QueryRequest {
                vector,
                top_k,
                include_metadata,
                include_values: false,
            };

            debug!("POST {}", self.url_query);
            let resp = self
                .client
                .post(&self.url_query)
                .header("Api-Key", &self.api_key)
                .header("X-Pinecone-API-Version", API_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| RagError::Retrieval(e.to_string()))?;
            let resp = ensure_success(resp, &self.url_query).await?;

            let out: QueryResponse = resp
                .json()
                .await
                .map_err(|e| RagError::Retrieval(format!("query response: {e}")))?;

            Ok(out
                .matches
                .into_iter()
                .map(|m| IndexMatch {
                    score: m.score,
                    metadata: m.metadata.unwrap_or_default(),
                })
                .collect())
        })
    }
}

async fn ensure_success(resp: reqwest::Response, url: &str) -> Result<reqwest::Response, RagError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    Err(RagError::Retrieval(format!(
        "HTTP {status} from {url}: {}",
        make_snippet(&text)
    )))
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    score: f32,
    #[serde(default)]
    metadata: Option<Metadata>,
}
