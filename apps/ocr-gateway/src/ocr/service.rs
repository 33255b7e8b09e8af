//! OCR Service
//!
//! Single-attempt relay from a decoded document to its joined line text.

use std::sync::Arc;

use super::{
    provider::TextDetector,
    types::{DocumentPayload, ExtractedText, OcrError},
};

/// OCR service backed by one detection provider
#[derive(Clone)]
pub struct OcrService {
    detector: Arc<dyn TextDetector>,
}

impl OcrService {
    pub fn new(detector: Arc<dyn TextDetector>) -> Self {
        Self { detector }
    }

    /// Detect text and keep line blocks in provider order
    ///
    /// No retries: a provider failure is returned as-is.
    pub async fn extract(&self, document: &DocumentPayload) -> Result<ExtractedText, OcrError> {
        tracing::debug!(
            "Sending {} byte document to {}",
            document.len(),
            self.detector.name()
        );

        let blocks = self.detector.detect(document.as_bytes()).await?;
        let block_count = blocks.len();
        let text = ExtractedText::from_blocks(blocks);

        tracing::info!(
            "Detected {} blocks, {} lines",
            block_count,
            text.lines().len()
        );

        Ok(text)
    }
}
