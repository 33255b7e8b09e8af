//! Text detection providers
//!
//! Defines the provider trait and the AWS Textract implementation.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::{timeout::TimeoutConfig, BehaviorVersion};
use aws_sdk_textract::{
    config::{Credentials, Region},
    error::DisplayErrorContext,
    primitives::Blob,
    types::{Block, BlockType, Document},
    Client,
};

use super::types::{BlockKind, OcrError, TextBlock};
use crate::config::TextractConfig;

/// Text detection provider trait
#[async_trait]
pub trait TextDetector: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &'static str;

    /// Detect text blocks in a document, in reading order
    async fn detect(&self, document: &[u8]) -> Result<Vec<TextBlock>, OcrError>;
}

/// AWS Textract `DetectDocumentText` provider
#[derive(Clone)]
pub struct TextractDetector {
    client: Client,
}

impl TextractDetector {
    /// Build a Textract client from configuration
    ///
    /// Static credentials are used when configured; otherwise the default
    /// AWS credential chain is loaded.
    pub async fn new(config: &TextractConfig) -> Self {
        let region = Region::new(config.region.clone());

        let mut builder = match &config.credentials {
            Some(static_credentials) => {
                let credentials = Credentials::new(
                    &static_credentials.access_key_id,
                    &static_credentials.secret_access_key,
                    static_credentials.session_token.clone(),
                    None,
                    "ocr-gateway",
                );
                aws_sdk_textract::Config::builder()
                    .behavior_version(BehaviorVersion::latest())
                    .credentials_provider(credentials)
            }
            None => {
                let shared = aws_config::defaults(BehaviorVersion::latest())
                    .region(region.clone())
                    .load()
                    .await;
                aws_sdk_textract::config::Builder::from(&shared)
            }
        };

        builder = builder
            .region(region)
            .timeout_config(operation_timeout(config.timeout));

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

fn operation_timeout(timeout: Duration) -> TimeoutConfig {
    TimeoutConfig::builder().operation_timeout(timeout).build()
}

#[async_trait]
impl TextDetector for TextractDetector {
    fn name(&self) -> &'static str {
        "textract"
    }

    async fn detect(&self, document: &[u8]) -> Result<Vec<TextBlock>, OcrError> {
        let output = self
            .client
            .detect_document_text()
            .document(Document::builder().bytes(Blob::new(document)).build())
            .send()
            .await
            .map_err(|e| OcrError::Dependency(DisplayErrorContext(&e).to_string()))?;

        Ok(output.blocks().iter().map(TextBlock::from).collect())
    }
}

impl From<&Block> for TextBlock {
    fn from(block: &Block) -> Self {
        let kind = match block.block_type() {
            Some(BlockType::Page) => BlockKind::Page,
            Some(BlockType::Line) => BlockKind::Line,
            Some(BlockType::Word) => BlockKind::Word,
            Some(other) => BlockKind::Other(other.as_str().to_string()),
            None => BlockKind::Other(String::new()),
        };

        TextBlock {
            kind,
            text: block.text().map(str::to_string),
        }
    }
}

/// Scripted provider for tests
#[cfg(test)]
pub struct FakeDetector {
    pub outcome: Result<Vec<TextBlock>, OcrError>,
    pub calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl FakeDetector {
    pub fn returning(blocks: Vec<TextBlock>) -> Self {
        Self {
            outcome: Ok(blocks),
            calls: Default::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(OcrError::Dependency(message.to_string())),
            calls: Default::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl TextDetector for FakeDetector {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn detect(&self, _document: &[u8]) -> Result<Vec<TextBlock>, OcrError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.outcome.clone()
    }
}
