//! Typed error for the qa-chain crate.

use ai_llm_service::AiLlmError;
use rag_store::RagError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    /// The chat model or retriever could not be set up.
    #[error("pipeline init error: {0}")]
    PipelineInit(String),

    /// Errors from the underlying rag-store crate.
    #[error("RAG error: {0}")]
    Rag(#[from] RagError),

    /// Errors from the chat model.
    #[error("LLM error: {0}")]
    Llm(#[from] AiLlmError),

    /// Outermost wrapper returned by [`crate::QaService::answer`].
    #[error("Error processing query: {0}")]
    QueryProcessing(#[source] Box<QaError>),
}

impl QaError {
    /// Wraps `self` for the public boundary; already wrapped errors are kept as is.
    pub fn into_query_processing(self) -> Self {
        match self {
            e @ QaError::QueryProcessing(_) => e,
            other => QaError::QueryProcessing(Box::new(other)),
        }
    }
}
