//! Extraction UI
//!
//! Serves the upload page and drives the OCR and entity extraction
//! gateways for each submitted document.

use std::net::SocketAddr;

use anyhow::Context;

use extraction_ui::config::Config;
use extraction_ui::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    docpipe_common::telemetry::init("extraction_ui=debug,tower_http=info");

    if dotenvy::dotenv().is_err() {
        tracing::info!("No .env file found, using process environment");
    }
    let config = Config::from_env().context("Failed to load UI configuration")?;

    tracing::info!("Starting Extraction UI v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("OCR gateway: {}", config.gateways.ocr_api_url);
    tracing::info!("Entity gateway: {}", config.gateways.ner_api_url);
    tracing::info!("Gateway timeout: {}s", config.gateways.timeout.as_secs());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid UI_HOST/UI_PORT")?;

    let state = AppState::new(config).context("Failed to build gateway HTTP client")?;
    let app = extraction_ui::app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Extraction UI listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(docpipe_common::shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
