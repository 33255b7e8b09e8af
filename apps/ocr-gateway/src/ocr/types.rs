//! OCR Types
//!
//! Document payloads, detected blocks and the joined text result.

use base64::Engine;

/// Raw document bytes (PDF or image)
///
/// The gateway never looks inside the payload; it is handed to the
/// detection provider as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPayload {
    bytes: Vec<u8>,
}

impl DocumentPayload {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Decode a base64 string, ignoring embedded ASCII whitespace
    pub fn from_base64(encoded: &str) -> Result<Self, OcrError> {
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| OcrError::InvalidInput(format!("Failed to decode base64 document: {}", e)))?;

        if bytes.is_empty() {
            return Err(OcrError::InvalidInput(
                "Failed to decode base64 document: payload is empty".to_string(),
            ));
        }

        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Block granularity reported by the detection provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Page,
    Line,
    Word,
    Other(String),
}

/// One detected block, in provider order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub text: Option<String>,
}

impl TextBlock {
    pub fn line(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Line,
            text: Some(text.into()),
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Word,
            text: Some(text.into()),
        }
    }

    pub fn page() -> Self {
        Self {
            kind: BlockKind::Page,
            text: None,
        }
    }
}

/// Detected lines in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    lines: Vec<String>,
}

impl ExtractedText {
    /// Keep only line blocks, preserving their order
    pub fn from_blocks(blocks: impl IntoIterator<Item = TextBlock>) -> Self {
        let lines = blocks
            .into_iter()
            .filter(|block| block.kind == BlockKind::Line)
            .filter_map(|block| block.text)
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every line followed by `\n`; empty when nothing was detected
    pub fn joined(&self) -> String {
        let capacity = self.lines.iter().map(|line| line.len() + 1).sum();
        self.lines
            .iter()
            .fold(String::with_capacity(capacity), |mut out, line| {
                out.push_str(line);
                out.push('\n');
                out
            })
    }
}

/// OCR error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum OcrError {
    /// Client sent something that is not a usable document
    #[error("{0}")]
    InvalidInput(String),

    /// The detection provider failed
    #[error("{0}")]
    Dependency(String),
}

impl OcrError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Dependency(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for OcrError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            Self::InvalidInput(msg) => tracing::warn!("Rejected document: {}", msg),
            Self::Dependency(msg) => tracing::error!("Error processing document: {}", msg),
        }
        let status = self.status_code();
        docpipe_common::ErrorDetail::new(self.to_string()).with_status(status)
    }
}
