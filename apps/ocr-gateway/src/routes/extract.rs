//! Text extraction route
//!
//! `POST /extract` with `{"file_base64": "..."}` returns
//! `{"rawText": "...", "status": "success"}`.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::ocr::{DocumentPayload, OcrError};
use crate::state::AppState;

/// Create the extract router
pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(extract_text))
}

/// Request body
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    pub file_base64: String,
}

/// Successful response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub raw_text: String,
    pub status: String,
}

async fn extract_text(
    State(state): State<AppState>,
    payload: Result<Json<DocumentRequest>, JsonRejection>,
) -> Result<Json<ExtractResponse>, OcrError> {
    let Json(request) = payload.map_err(|e| OcrError::InvalidInput(e.body_text()))?;

    let document = DocumentPayload::from_base64(&request.file_base64)?;
    let text = state.ocr().extract(&document).await?;

    Ok(Json(ExtractResponse {
        raw_text: text.joined(),
        status: "success".to_string(),
    }))
}
