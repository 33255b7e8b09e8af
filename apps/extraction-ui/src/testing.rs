//! Throwaway gateway servers for tests

use std::sync::{Arc, Mutex};

use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::Value;

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a port nobody listens on
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub struct FakeGateways {
    pub ocr_url: String,
    pub ner_url: String,
    ocr_requests: Arc<Mutex<Vec<Value>>>,
    ner_requests: Arc<Mutex<Vec<Value>>>,
}

impl FakeGateways {
    pub fn ocr_requests(&self) -> Vec<Value> {
        self.ocr_requests.lock().unwrap().clone()
    }

    pub fn ner_requests(&self) -> Vec<Value> {
        self.ner_requests.lock().unwrap().clone()
    }
}

/// Recording `/extract` endpoint with a canned reply
fn recording_router(reply: (StatusCode, Value), log: Arc<Mutex<Vec<Value>>>) -> Router {
    Router::new().route(
        "/extract",
        post(move |Json(body): Json<Value>| {
            let reply = reply.clone();
            let log = log.clone();
            async move {
                log.lock().unwrap().push(body);
                (reply.0, Json(reply.1))
            }
        }),
    )
}

/// Start fake OCR and NER gateways with canned replies
pub async fn fake_gateways(ocr: (StatusCode, Value), ner: (StatusCode, Value)) -> FakeGateways {
    let ocr_requests = Arc::new(Mutex::new(Vec::new()));
    let ner_requests = Arc::new(Mutex::new(Vec::new()));

    FakeGateways {
        ocr_url: spawn(recording_router(ocr, ocr_requests.clone())).await,
        ner_url: spawn(recording_router(ner, ner_requests.clone())).await,
        ocr_requests,
        ner_requests,
    }
}
