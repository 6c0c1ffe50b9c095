//! Stub pipeline and index wired through the real router.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ai_llm_service::{HealthService, LlmModelConfig, LlmProvider, LlmSettings};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::future::BoxFuture;
use qa_chain::{ChatModel, PipelineFactory, QaChain, QaError, QaService};
use rag_store::{
    EmbeddingsProvider, IndexConnector, IndexMatch, RagConfig, RagError, RagStore, VectorIndex,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::app::api_config::ApiConfig;
use crate::app::app_state::AppState;
use crate::router;

/// Counters and failure switches shared by every stub.
#[derive(Default)]
pub struct StubPipeline {
    builds: AtomicUsize,
    embeds: AtomicUsize,
    connects: AtomicUsize,
    embed_fails: bool,
    index_missing: bool,
}

impl StubPipeline {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_embedding() -> Arc<Self> {
        Arc::new(Self {
            embed_fails: true,
            ..Self::default()
        })
    }

    pub fn missing_index() -> Arc<Self> {
        Arc::new(Self {
            index_missing: true,
            ..Self::default()
        })
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    pub fn embeds(&self) -> usize {
        self.embeds.load(Ordering::SeqCst)
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

struct StubEmbedder(Arc<StubPipeline>);

impl EmbeddingsProvider for StubEmbedder {
    fn embed<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async move {
            self.0.embeds.fetch_add(1, Ordering::SeqCst);
            if self.0.embed_fails {
                return Err(RagError::Embedding("quota exceeded".into()));
            }
            Ok(vec![0.25, 0.75])
        })
    }
}

struct StubIndex;

impl VectorIndex for StubIndex {
    fn query<'a>(
        &'a self,
        _vector: Vec<f32>,
        top_k: usize,
        _include_metadata: bool,
    ) -> BoxFuture<'a, Result<Vec<IndexMatch>, RagError>> {
        Box::pin(async move {
            let matches = [
                (0.93, json!({ "text": "Refunds within 30 days.", "page": 1 })),
                (0.81, json!({ "text": "Store credit after 30 days.", "page": 2 })),
            ];
            Ok(matches
                .into_iter()
                .take(top_k)
                .map(|(score, meta)| IndexMatch {
                    score,
                    metadata: meta.as_object().cloned().unwrap_or_default(),
                })
                .collect())
        })
    }
}

struct StubConnector(Arc<StubPipeline>);

impl IndexConnector for StubConnector {
    fn connect(&self) -> BoxFuture<'_, Result<Arc<dyn VectorIndex>, RagError>> {
        Box::pin(async move {
            self.0.connects.fetch_add(1, Ordering::SeqCst);
            if self.0.index_missing {
                return Err(RagError::IndexNotFound("support-docs".into()));
            }
            let index: Arc<dyn VectorIndex> = Arc::new(StubIndex);
            Ok(index)
        })
    }
}

struct StubModel;

impl ChatModel for StubModel {
    fn complete<'a>(&'a self, _system: &'a str, _user: &'a str) -> BoxFuture<'a, Result<String, QaError>> {
        Box::pin(async { Ok("You can get a refund within 30 days of purchase.".to_string()) })
    }
}

struct StubFactory {
    stub: Arc<StubPipeline>,
    store: Arc<RagStore>,
}

impl PipelineFactory for StubFactory {
    fn build(&self) -> BoxFuture<'_, Result<QaChain, QaError>> {
        Box::pin(async move {
            self.stub.builds.fetch_add(1, Ordering::SeqCst);
            let retriever = self
                .store
                .retriever(Arc::new(StubEmbedder(self.stub.clone())))
                .map_err(|e| QaError::PipelineInit(e.to_string()))?;
            Ok(QaChain::new(Arc::new(StubModel), retriever))
        })
    }
}

fn openai(endpoint: &str, model: &str) -> LlmModelConfig {
    LlmModelConfig {
        provider: LlmProvider::OpenAI,
        model: model.into(),
        endpoint: endpoint.into(),
        api_key: Some("sk-test".into()),
        max_tokens: None,
        temperature: Some(0.7),
        top_p: None,
        timeout_secs: Some(2),
        dimensions: Some(2),
    }
}

/// Router over stubs; LLM probes target `llm_endpoint`.
pub fn test_state_with_llm(stub: Arc<StubPipeline>, llm_endpoint: &str) -> (Router, Arc<StubPipeline>) {
    let store = Arc::new(RagStore::with_connector(
        RagConfig::new_default("http://localhost:6334", "support-docs"),
        Arc::new(StubConnector(stub.clone())),
    ));
    let factory = StubFactory {
        stub: stub.clone(),
        store: store.clone(),
    };
    let state = AppState {
        qa: Arc::new(QaService::new(Arc::new(factory))),
        store,
        llm_settings: LlmSettings {
            chat: openai(llm_endpoint, "gpt-3.5-turbo"),
            embedding: openai(llm_endpoint, "text-embedding-3-small"),
        },
        health: HealthService::new(Some(2)).unwrap(),
    };
    let cfg = ApiConfig::from_lookup(&|_| None).unwrap();
    (router(Arc::new(state), &cfg), stub)
}

pub fn test_state(stub: Arc<StubPipeline>) -> (Router, Arc<StubPipeline>) {
    test_state_with_llm(stub, "http://127.0.0.1:9")
}

/// Sends one request and returns the status with the JSON body (`Null` if empty).
pub async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
