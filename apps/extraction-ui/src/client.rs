//! HTTP client for the two gateways

use std::fmt;
use std::time::Duration;

use base64::Engine;
use docpipe_common::ErrorDetail;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::GatewayConfig;

/// Which gateway a call went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gateway {
    Ocr,
    Ner,
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gateway::Ocr => f.write_str("Text extraction service"),
            Gateway::Ner => f.write_str("Entity extraction service"),
        }
    }
}

/// Gateway call failures, shown verbatim to the operator
#[derive(Debug, thiserror::Error)]
pub enum GatewayCallError {
    #[error("{gateway} returned HTTP {status}: {detail}")]
    Status {
        gateway: Gateway,
        status: u16,
        detail: String,
    },

    #[error("Could not reach {gateway}: {message}")]
    Transport { gateway: Gateway, message: String },

    #[error("{gateway} sent an unexpected response: {message}")]
    Decode { gateway: Gateway, message: String },
}

impl GatewayCallError {
    pub fn gateway(&self) -> Gateway {
        match self {
            Self::Status { gateway, .. }
            | Self::Transport { gateway, .. }
            | Self::Decode { gateway, .. } => *gateway,
        }
    }
}

#[derive(Serialize)]
struct OcrRequest<'a> {
    file_base64: &'a str,
}

#[derive(Deserialize)]
struct OcrResponse {
    #[serde(rename = "rawText", default)]
    raw_text: String,
}

#[derive(Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct NerResponse {
    #[serde(default)]
    entities: Map<String, Value>,
}

/// Client for the OCR and entity extraction gateways
#[derive(Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    ocr_url: String,
    ner_url: String,
    timeout: Duration,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            ocr_url: config.ocr_api_url.clone(),
            ner_url: config.ner_api_url.clone(),
            timeout: config.timeout,
        })
    }

    /// `POST {ocr}/extract` with the base64-encoded document
    pub async fn extract_text(&self, document: &[u8]) -> Result<String, GatewayCallError> {
        let file_base64 = base64::engine::general_purpose::STANDARD.encode(document);
        let url = format!("{}/extract", self.ocr_url);

        let response: OcrResponse = self
            .post_json(Gateway::Ocr, &url, &OcrRequest { file_base64: &file_base64 })
            .await?;
        Ok(response.raw_text)
    }

    /// `POST {ner}/extract` with the OCR text
    pub async fn extract_entities(&self, text: &str) -> Result<Map<String, Value>, GatewayCallError> {
        let url = format!("{}/extract", self.ner_url);

        let response: NerResponse = self
            .post_json(Gateway::Ner, &url, &NerRequest { text })
            .await?;
        Ok(response.entities)
    }

    async fn post_json<B, T>(&self, gateway: Gateway, url: &str, body: &B) -> Result<T, GatewayCallError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(gateway, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(gateway, e))?;

        if !status.is_success() {
            return Err(GatewayCallError::Status {
                gateway,
                status: status.as_u16(),
                detail: error_detail(&text, status.canonical_reason()),
            });
        }

        serde_json::from_str(&text).map_err(|e| GatewayCallError::Decode {
            gateway,
            message: e.to_string(),
        })
    }

    fn transport_error(&self, gateway: Gateway, e: reqwest::Error) -> GatewayCallError {
        let message = if e.is_timeout() {
            format!("request timed out after {} seconds", self.timeout.as_secs())
        } else {
            e.to_string()
        };
        GatewayCallError::Transport { gateway, message }
    }
}

/// Use the gateway's `detail` when present, otherwise the raw body
fn error_detail(body: &str, reason: Option<&str>) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorDetail>(body) {
        return parsed.detail;
    }
    let body = body.trim();
    if body.is_empty() {
        reason.unwrap_or("no response body").to_string()
    } else {
        body.to_string()
    }
}
