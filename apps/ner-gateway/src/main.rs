//! Entity Extraction Gateway
//!
//! `POST /extract` and `POST /extract-text` return the employment
//! certificate entities found in a text, using an OpenAI chat model.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use ner_gateway::config::Config;
use ner_gateway::ner::{EntityExtractor, OpenAiChatModel};
use ner_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    docpipe_common::telemetry::init("ner_gateway=debug,tower_http=debug");

    if dotenvy::dotenv().is_err() {
        tracing::info!("No .env file found, using process environment");
    }
    let config = Config::from_env().context("Failed to load NER gateway configuration")?;

    tracing::info!("Starting Entity Extraction Gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Model: {} at {} (max_tokens={})",
        config.openai.model,
        config.openai.base_url,
        config.openai.max_tokens
    );

    let model = OpenAiChatModel::new(
        &config.openai.base_url,
        &config.openai.api_key,
        config.openai.timeout,
    )
    .context("Failed to build OpenAI HTTP client")?;
    let extractor = EntityExtractor::new(Arc::new(model), config.openai.extraction_settings());
    let app = ner_gateway::app(AppState::new(extractor));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid NER_HOST/NER_PORT")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Entity Extraction Gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(docpipe_common::shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
