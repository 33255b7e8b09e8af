//! Extraction UI Library
//!
//! Browser front end for the document pipeline: an operator uploads a PDF
//! or image, the server relays it to the OCR gateway, then sends the text
//! to the entity extraction gateway and renders both results.
//!
//! # Modules
//!
//! - `client`: HTTP client for both gateways
//! - `pipeline`: Sequential upload → OCR → extraction run
//! - `upload`: Multipart parsing and file validation
//! - `template`: HTML pages

pub mod client;
pub mod config;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod template;
pub mod upload;

#[cfg(test)]
mod testing;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Multipart framing allowance on top of the file size limit
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the UI router
pub fn app(state: AppState) -> Router {
    let body_limit = state.config().server.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES);

    Router::new()
        .merge(routes::index::router())
        .merge(routes::process::router())
        .merge(docpipe_common::health::router(
            "extraction-ui",
            env!("CARGO_PKG_VERSION"),
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
