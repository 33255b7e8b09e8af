//! Entity Extraction Gateway Library
//!
//! Stateless HTTP relay that turns plain text into a fixed set of
//! employment-certificate entities with one chat-completion call.
//!
//! # Modules
//!
//! - `config`: Environment configuration loaded once at startup
//! - `ner`: Entity schema, prompt construction, model providers
//! - `routes`: HTTP handlers

pub mod config;
pub mod ner;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the gateway router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::ping::router())
        .merge(routes::extract::router())
        .merge(docpipe_common::health::router(
            "ner-gateway",
            env!("CARGO_PKG_VERSION"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
