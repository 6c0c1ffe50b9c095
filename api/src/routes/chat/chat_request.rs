use serde::Deserialize;

use crate::error_handler::AppError;

/// Request payload for `/chat`, from the query string or a JSON body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Natural language question. Must be non-empty; not trimmed.
    pub query: String,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.query.is_empty() {
            return Err(AppError::BadRequest(
                "`query` must be at least 1 character long".into(),
            ));
        }
        Ok(())
    }
}
