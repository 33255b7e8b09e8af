//! Upload → OCR → entity extraction
//!
//! Strictly sequential: extraction only runs once OCR has returned
//! non-blank text, and the first failure ends the run.

use serde_json::{Map, Value};

use crate::client::{GatewayCallError, GatewayClient};
use crate::upload::{FileDetails, UploadedDocument};

/// How far a run got
#[derive(Debug)]
pub enum PipelineOutcome {
    /// OCR call failed; nothing else was attempted
    OcrFailed(GatewayCallError),
    /// OCR succeeded but found no text; extraction was skipped
    NoText,
    /// Text was found but entity extraction failed
    ExtractionFailed {
        text: String,
        error: GatewayCallError,
    },
    Completed {
        text: String,
        entities: Map<String, Value>,
    },
}

impl PipelineOutcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::ExtractionFailed { text, .. } | Self::Completed { text, .. } => Some(text),
            Self::OcrFailed(_) | Self::NoText => None,
        }
    }

    pub fn error(&self) -> Option<&GatewayCallError> {
        match self {
            Self::OcrFailed(error) | Self::ExtractionFailed { error, .. } => Some(error),
            Self::NoText | Self::Completed { .. } => None,
        }
    }
}

/// One processed upload
#[derive(Debug)]
pub struct PipelineRun {
    pub details: FileDetails,
    pub outcome: PipelineOutcome,
}

#[derive(Clone)]
pub struct Pipeline {
    client: GatewayClient,
}

impl Pipeline {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    pub async fn run(&self, document: &UploadedDocument) -> PipelineRun {
        let details = document.details();
        tracing::info!(
            "Processing {} ({}, {})",
            details.name,
            details.mime_type,
            details.size_kb()
        );

        let outcome = self.process(document).await;
        match &outcome {
            PipelineOutcome::OcrFailed(e) | PipelineOutcome::ExtractionFailed { error: e, .. } => {
                tracing::warn!("Pipeline stopped for {}: {}", details.name, e)
            }
            PipelineOutcome::NoText => tracing::info!("No text found in {}", details.name),
            PipelineOutcome::Completed { entities, .. } => {
                tracing::info!("Extracted {} entities from {}", entities.len(), details.name)
            }
        }

        PipelineRun { details, outcome }
    }

    async fn process(&self, document: &UploadedDocument) -> PipelineOutcome {
        let text = match self.client.extract_text(document.bytes()).await {
            Ok(text) => text,
            Err(e) => return PipelineOutcome::OcrFailed(e),
        };

        if text.trim().is_empty() {
            return PipelineOutcome::NoText;
        }

        match self.client.extract_entities(&text).await {
            Ok(entities) => PipelineOutcome::Completed { text, entities },
            Err(error) => PipelineOutcome::ExtractionFailed { text, error },
        }
    }
}
