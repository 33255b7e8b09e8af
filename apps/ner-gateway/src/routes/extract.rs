//! Entity extraction routes
//!
//! - `POST /extract` with `{"text": "..."}`
//! - `POST /extract-text` with the text as the raw request body
//!
//! Both answer `{"entities": {...}}`.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::ner::{EntityResult, NerError};
use crate::state::AppState;

/// Create the extract router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract", post(extract_entities))
        .route("/extract-text", post(extract_entities_raw))
}

/// Plain-text document wrapped in JSON
#[derive(Debug, Deserialize)]
pub struct DocumentIn {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct EntitiesOut {
    pub entities: EntityResult,
}

async fn extract_entities(
    State(state): State<AppState>,
    payload: Result<Json<DocumentIn>, JsonRejection>,
) -> Result<Json<EntitiesOut>, NerError> {
    let Json(document) = payload.map_err(|e| NerError::InvalidInput(e.body_text()))?;

    let entities = state.extractor().extract(&document.text).await?;
    Ok(Json(EntitiesOut { entities }))
}

/// Accepts `text/plain` or `application/octet-stream` bodies
async fn extract_entities_raw(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<EntitiesOut>, NerError> {
    let text = std::str::from_utf8(&body)
        .map_err(|e| NerError::InvalidInput(format!("Request body is not valid UTF-8: {}", e)))?;

    if text.trim().is_empty() {
        return Err(NerError::InvalidInput("Request body is empty".to_string()));
    }

    let entities = state.extractor().extract(text).await?;
    Ok(Json(EntitiesOut { entities }))
}
