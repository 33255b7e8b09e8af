//! Document processing route
//!
//! `POST /process` takes the multipart upload, runs the pipeline and renders
//! the result page. Gateway failures are reported on the page with a 200;
//! only a rejected upload answers 400.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Html,
    routing::post,
    Router,
};

use crate::state::AppState;
use crate::template;
use crate::upload::{parse_multipart, UploadError};

pub fn router() -> Router<AppState> {
    Router::new().route("/process", post(process_document))
}

async fn process_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> (StatusCode, Html<String>) {
    let gateways = &state.config().gateways;

    let upload = match multipart {
        Ok(multipart) => parse_multipart(multipart, state.config().server.max_upload_bytes).await,
        Err(rejection) => Err(UploadError::Malformed(rejection.body_text())),
    };

    let document = match upload {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Rejected upload: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Html(template::render_upload_error(&e, gateways)),
            );
        }
    };

    let run = state.pipeline().run(&document).await;
    (
        StatusCode::OK,
        Html(template::render_result(&document, &run, gateways)),
    )
}
