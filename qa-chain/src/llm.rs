//! Chat model seam used by the chain.

use ai_llm_service::LlmServiceProfiles;
use futures::future::BoxFuture;

use crate::error::QaError;

/// Sends a `(system, user)` message pair and returns the assistant's text.
pub trait ChatModel: Send + Sync {
    fn complete<'a>(&'a self, system: &'a str, user: &'a str) -> BoxFuture<'a, Result<String, QaError>>;
}

/// Uses the **chat** profile.
impl ChatModel for LlmServiceProfiles {
    fn complete<'a>(&'a self, system: &'a str, user: &'a str) -> BoxFuture<'a, Result<String, QaError>> {
        Box::pin(async move { Ok(self.generate(user, Some(system)).await?) })
    }
}
