//! OCR Module
//!
//! Turns a base64 document into raw text by relaying its bytes to a text
//! detection provider and joining the detected lines.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ocr_gateway::ocr::{DocumentPayload, OcrService, TextractDetector};
//!
//! let detector = TextractDetector::new(&config.textract).await;
//! let service = OcrService::new(Arc::new(detector));
//!
//! let document = DocumentPayload::from_base64(&request.file_base64)?;
//! let text = service.extract(&document).await?;
//! println!("{}", text.joined());
//! ```

mod provider;
mod service;
mod types;

pub use provider::{TextDetector, TextractDetector};
pub use service::OcrService;
pub use types::{BlockKind, DocumentPayload, ExtractedText, OcrError, TextBlock};

#[cfg(test)]
pub use provider::FakeDetector;
