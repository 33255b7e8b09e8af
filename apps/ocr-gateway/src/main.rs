//! OCR Gateway
//!
//! `POST /extract` turns a base64 PDF or image into newline-joined text
//! using AWS Textract.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;

use ocr_gateway::config::Config;
use ocr_gateway::ocr::{OcrService, TextractDetector};
use ocr_gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    docpipe_common::telemetry::init("ocr_gateway=debug,tower_http=debug");

    // Load configuration
    if dotenvy::dotenv().is_err() {
        tracing::info!("No .env file found, using process environment");
    }
    let config = Config::from_env().context("Failed to load OCR gateway configuration")?;

    tracing::info!("Starting OCR Gateway v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Textract region: {}", config.textract.region);
    if let Some(endpoint) = &config.textract.endpoint {
        tracing::info!("Textract endpoint override: {}", endpoint);
    }
    if config.textract.credentials.is_none() {
        tracing::info!("No static AWS credentials configured, using default provider chain");
    }

    let detector = TextractDetector::new(&config.textract).await;
    let state = AppState::new(OcrService::new(Arc::new(detector)));
    let app = ocr_gateway::app(state, config.server.max_body_bytes);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid OCR_HOST/OCR_PORT")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("OCR Gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(docpipe_common::shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
