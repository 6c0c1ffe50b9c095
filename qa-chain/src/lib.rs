//! Retrieval-augmented answering over `rag-store` and `ai-llm-service`.
//!
//! Public API: [`QaService::answer`]. It builds the pipeline on first use
//! (chat model + retriever), retrieves the top-K passages, stuffs them into
//! a single prompt, and returns the model's answer with its sources.

mod api_types;
mod chain;
mod error;
pub mod llm;
pub mod prompt;
mod service;

#[cfg(test)]
mod test_support;

pub use api_types::{Answer, SourceDocument};
pub use chain::QaChain;
pub use error::QaError;
pub use llm::ChatModel;
pub use service::{PipelineFactory, QaService, RemotePipelineFactory};
