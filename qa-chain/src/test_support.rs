//! Stubs for the seams: embedder, index, connector, chat model, factory.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ai_llm_service::error_handler::{Provider, ProviderError, ProviderErrorKind};
use futures::future::BoxFuture;
use rag_store::{
    EmbeddingsProvider, IndexConnector, IndexMatch, RagError, Retriever, SharedIndex, VectorIndex,
};
use serde_json::{Value, json};

use crate::chain::QaChain;
use crate::error::QaError;
use crate::llm::ChatModel;
use crate::service::PipelineFactory;

pub struct FixedEmbedder {
    pub fail: bool,
}

impl EmbeddingsProvider for FixedEmbedder {
    fn embed<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async move {
            if self.fail {
                return Err(RagError::Embedding("invalid api key".into()));
            }
            Ok(vec![0.1, 0.2, 0.3])
        })
    }
}

pub struct StaticIndex {
    matches: Vec<IndexMatch>,
    queries: AtomicUsize,
}

impl StaticIndex {
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl VectorIndex for StaticIndex {
    fn query<'a>(
        &'a self,
        _vector: Vec<f32>,
        top_k: usize,
        _include_metadata: bool,
    ) -> BoxFuture<'a, Result<Vec<IndexMatch>, RagError>> {
        Box::pin(async move {
            self.queries.fetch_add(1, Ordering::SeqCst);
            Ok(self.matches.iter().take(top_k).cloned().collect())
        })
    }
}

struct StaticConnector(Arc<StaticIndex>);

impl IndexConnector for StaticConnector {
    fn connect(&self) -> BoxFuture<'_, Result<Arc<dyn VectorIndex>, RagError>> {
        Box::pin(async move {
            let index: Arc<dyn VectorIndex> = self.0.clone();
            Ok(index)
        })
    }
}

/// Chat model returning a canned reply and recording the last `(system, user)` pair.
pub struct ScriptedModel {
    reply: Option<String>,
    last: Mutex<Option<(String, String)>>,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            last: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            last: Mutex::new(None),
        }
    }

    pub fn last_call(&self) -> Option<(String, String)> {
        self.last.lock().unwrap().clone()
    }
}

impl ChatModel for ScriptedModel {
    fn complete<'a>(&'a self, system: &'a str, user: &'a str) -> BoxFuture<'a, Result<String, QaError>> {
        Box::pin(async move {
            *self.last.lock().unwrap() = Some((system.to_string(), user.to_string()));
            self.reply.clone().ok_or_else(|| {
                QaError::Llm(ProviderError::new(Provider::OpenAI, ProviderErrorKind::EmptyChoices).into())
            })
        })
    }
}

fn hit(score: f32, meta: Value) -> IndexMatch {
    IndexMatch {
        score,
        metadata: meta.as_object().cloned().unwrap(),
    }
}

pub fn refund_matches() -> Vec<IndexMatch> {
    vec![
        hit(0.91, json!({ "text": "Refunds within 30 days.", "source": "policy.md" })),
        hit(0.84, json!({ "text": "Store credit after 30 days.", "source": "policy.md" })),
    ]
}

pub fn chain_with_embedder(
    llm: Arc<dyn ChatModel>,
    matches: Vec<IndexMatch>,
    embedder: FixedEmbedder,
) -> (QaChain, Arc<StaticIndex>) {
    let index = Arc::new(StaticIndex {
        matches,
        queries: AtomicUsize::new(0),
    });
    let shared = Arc::new(SharedIndex::new(Arc::new(StaticConnector(index.clone()))));
    let retriever = Retriever::new(Arc::new(embedder), shared, 4).unwrap();
    (QaChain::new(llm, retriever), index)
}

pub fn chain_with(llm: Arc<dyn ChatModel>, matches: Vec<IndexMatch>) -> (QaChain, Arc<StaticIndex>) {
    chain_with_embedder(llm, matches, FixedEmbedder { fail: false })
}

/// Factory that counts builds and fails the first `fail_first` of them.
pub struct CountingFactory {
    pub builds: AtomicUsize,
    pub fail_first: usize,
    pub embed_fails: bool,
}

impl CountingFactory {
    pub fn new(fail_first: usize) -> Self {
        Self {
            builds: AtomicUsize::new(0),
            fail_first,
            embed_fails: false,
        }
    }

    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

impl PipelineFactory for CountingFactory {
    fn build(&self) -> BoxFuture<'_, Result<QaChain, QaError>> {
        Box::pin(async move {
            let n = self.builds.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if n < self.fail_first {
                return Err(QaError::PipelineInit("bad credentials".into()));
            }
            let llm = Arc::new(ScriptedModel::replying(
                "You can get a refund within 30 days of purchase.",
            ));
            let (chain, _) = chain_with_embedder(
                llm,
                refund_matches(),
                FixedEmbedder { fail: self.embed_fails },
            );
            Ok(chain)
        })
    }
}
