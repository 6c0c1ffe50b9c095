//! Public API types re-used by external crates (e.g., the HTTP API layer).

use rag_store::{Metadata, RetrievedDocument};
use serde::Serialize;

/// A passage the answer was grounded on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SourceDocument {
    pub text: String,
    pub metadata: Metadata,
}

impl From<RetrievedDocument> for SourceDocument {
    fn from(d: RetrievedDocument) -> Self {
        Self {
            text: d.text,
            metadata: d.metadata,
        }
    }
}

/// Generated answer, the echoed query, and the documents used, in retrieval order.
///
/// # Example
/// ```
/// use qa_chain::Answer;
/// let a = Answer {
///     message: "Refunds are accepted within 30 days.".into(),
///     query: "What is the refund policy?".into(),
///     source_documents: vec![],
/// };
/// assert!(a.source_documents.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Answer {
    pub message: String,
    pub query: String,
    pub source_documents: Vec<SourceDocument>,
}
