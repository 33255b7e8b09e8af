//! OCR Gateway Library
//!
//! Stateless HTTP relay between a base64-encoded document and AWS Textract.
//! The binary in main.rs wires configuration, tracing and the server loop.
//!
//! # Modules
//!
//! - `config`: Environment configuration loaded once at startup
//! - `ocr`: Payload decoding, detection providers and line joining
//! - `routes`: HTTP handlers

pub mod config;
pub mod ocr;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the gateway router
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::extract::router())
        .merge(docpipe_common::health::router(
            "ocr-gateway",
            env!("CARGO_PKG_VERSION"),
        ))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
