use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file before the filter reads RUST_LOG.
    // A missing .env is fine: plain process env is used instead.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::layer())
        .init();

    if let Err(err) = dotenv {
        warn!(error = %err, ".env not loaded; using process environment only");
    }

    api::start().await?;

    Ok(())
}
