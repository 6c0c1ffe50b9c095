//! Retrieval QA chain: retrieve, stuff, generate.

use std::sync::Arc;

use rag_store::Retriever;
use tracing::{debug, instrument};

use crate::api_types::{Answer, SourceDocument};
use crate::error::QaError;
use crate::llm::ChatModel;
use crate::prompt::build_system_prompt;

/// A chat model bound to a retriever.
pub struct QaChain {
    llm: Arc<dyn ChatModel>,
    retriever: Retriever,
}

impl QaChain {
    pub fn new(llm: Arc<dyn ChatModel>, retriever: Retriever) -> Self {
        Self { llm, retriever }
    }

    /// Runs one question through the chain.
    ///
    /// Errors are returned as the stage produced them; wrapping happens in
    /// [`crate::QaService::answer`].
    #[instrument(skip_all, fields(k = self.retriever.k()))]
    pub async fn invoke(&self, query: &str) -> Result<Answer, QaError> {
        let docs = self.retriever.retrieve(query).await?;
        debug!(docs = docs.len(), "context retrieved");

        let system = build_system_prompt(&docs);
        let message = self.llm.complete(&system, query).await?;

        Ok(Answer {
            message,
            query: query.to_string(),
            source_documents: docs.into_iter().map(SourceDocument::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::*;

    #[tokio::test]
    async fn refund_policy_end_to_end() {
        let llm = Arc::new(ScriptedModel::replying(
            "You can get a refund within 30 days of purchase.",
        ));
        let (chain, index) = chain_with(llm.clone(), refund_matches());

        let answer = chain.invoke("What is the refund policy?").await.unwrap();

        assert_eq!(answer.message, "You can get a refund within 30 days of purchase.");
        assert_eq!(answer.query, "What is the refund policy?");
        let texts: Vec<_> = answer.source_documents.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, ["Refunds within 30 days.", "Store credit after 30 days."]);
        assert_eq!(answer.source_documents[0].metadata.get("source"), Some(&json!("policy.md")));

        let (system, user) = llm.last_call().unwrap();
        assert!(system.ends_with("Refunds within 30 days.\n\nStore credit after 30 days."));
        assert_eq!(user, "What is the refund policy?");
        assert_eq!(index.queries(), 1);
    }

    #[tokio::test]
    async fn model_failure_is_an_llm_error() {
        let llm = Arc::new(ScriptedModel::failing());
        let (chain, _) = chain_with(llm, refund_matches());
        assert!(matches!(chain.invoke("q").await, Err(QaError::Llm(_))));
    }

    #[tokio::test]
    async fn empty_retrieval_still_asks_the_model() {
        let llm = Arc::new(ScriptedModel::replying("I don't know."));
        let (chain, _) = chain_with(llm.clone(), vec![]);

        let answer = chain.invoke("Who won in 1920?").await.unwrap();
        assert!(answer.source_documents.is_empty());
        assert_eq!(answer.message, "I don't know.");
        assert!(llm.last_call().unwrap().0.ends_with("----------------\n"));
    }
}
