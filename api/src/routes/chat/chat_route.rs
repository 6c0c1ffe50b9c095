//! `/chat`: answers a question from the indexed documents.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Query, State, rejection::JsonRejection},
    http::Uri,
};
use qa_chain::Answer;
use tracing::info;

use crate::{
    app::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::chat::chat_request::ChatRequest,
};

/// Handler: GET /chat
///
/// Takes `query` from the query string, or from a JSON body when the query
/// string is empty.
///
/// # Example
/// ```bash
/// curl 'http://127.0.0.1:8000/chat?query=What%20is%20the%20refund%20policy%3F'
/// ```
pub async fn chat_get(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    body: Bytes,
) -> AppResult<Json<Answer>> {
    let req = if uri.query().is_some_and(|q| !q.is_empty()) {
        Query::<ChatRequest>::try_from_uri(&uri)?.0
    } else if !body.is_empty() {
        serde_json::from_slice::<ChatRequest>(&body)
            .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))?
    } else {
        return Err(AppError::BadRequest("missing `query`".into()));
    };
    answer(&state, req).await
}

/// Handler: POST /chat
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"query":"What is the refund policy?"}'
/// ```
pub async fn chat_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<Answer>> {
    let Json(req) = payload?;
    answer(&state, req).await
}

async fn answer(state: &AppState, req: ChatRequest) -> AppResult<Json<Answer>> {
    req.validate()?;
    info!(query_len = req.query.len(), "chat request");

    let answer = state.qa.answer(&req.query).await?;
    Ok(Json(answer))
}
