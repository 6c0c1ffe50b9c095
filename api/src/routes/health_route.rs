//! `/health`: liveness, plus provider probes with `?deep=true`.

use std::sync::Arc;

use ai_llm_service::HealthStatus;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::{app::app_state::AppState, error_handler::AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct HealthParams {
    #[serde(default)]
    pub deep: bool,
}

#[derive(Debug, Serialize)]
pub struct IndexHealth {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when a deep probe failed.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<Vec<HealthStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_index: Option<IndexHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipeline_ready: Option<bool>,
}

/// Handler: GET /health
pub async fn health(
    State(state): State<Arc<AppState>>,
    params: Result<Query<HealthParams>, QueryRejection>,
) -> AppResult<Json<HealthResponse>> {
    let Query(params) = params?;
    if !params.deep {
        return Ok(Json(HealthResponse {
            status: "healthy",
            llm: None,
            vector_index: None,
            pipeline_ready: None,
        }));
    }

    let llm = state
        .health
        .check_many(&state.llm_settings.distinct_profiles())
        .await;
    let vector_index = match state.store.index().get().await {
        Ok(_) => IndexHealth {
            ok: true,
            message: format!("index '{}' is reachable", state.store.config().index_name),
        },
        Err(e) => IndexHealth {
            ok: false,
            message: e.to_string(),
        },
    };

    let ok = vector_index.ok && llm.iter().all(|s| s.ok);
    Ok(Json(HealthResponse {
        status: if ok { "healthy" } else { "degraded" },
        llm: Some(llm),
        vector_index: Some(vector_index),
        pipeline_ready: Some(state.qa.is_ready()),
    }))
}
