mod app;
mod error_handler;
mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::signal;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

pub use crate::app::api_config::ApiConfig;
pub use crate::app::app_state::{AppState, ConfigError};
pub use crate::error_handler::AppError;

use crate::routes::{
    chat::chat_route::{chat_get, chat_post},
    health_route::health,
    root_route::root,
};

/// Loads configuration, binds `API_ADDRESS` and serves until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let cfg = ApiConfig::from_env()?;
    let state = Arc::new(AppState::from_env()?);

    let app = router(state, &cfg);

    let listener = tokio::net::TcpListener::bind(cfg.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %cfg.address, "API listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("API stopped");
    Ok(())
}

/// Builds the application router with CORS and request tracing.
pub fn router(state: Arc<AppState>, cfg: &ApiConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(cfg.cors_origins.clone()))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/chat", get(chat_get).post(chat_post))
        .route("/chat/", get(chat_get).post(chat_post))
        .fallback(|| async { AppError::NotFound })
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
