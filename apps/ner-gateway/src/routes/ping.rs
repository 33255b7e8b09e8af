//! Liveness probe

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
}

pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { status: "ok" })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}
