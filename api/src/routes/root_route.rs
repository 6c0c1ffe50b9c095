use axum::Json;
use serde_json::{Value, json};

/// Handler: GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello from rag-qa-backend!" }))
}
