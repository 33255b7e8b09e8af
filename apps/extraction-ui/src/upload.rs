//! Uploaded document handling

use axum::extract::Multipart;
use base64::Engine;

/// Multipart field carrying the document
pub const FILE_FIELD: &str = "document";

/// MIME types the pipeline accepts
pub const ACCEPTED_TYPES: [&str; 3] = ["application/pdf", "image/jpeg", "image/png"];

/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Could not read the upload: {0}")]
    Malformed(String),

    #[error("Choose a document to upload")]
    MissingFile,

    #[error("Upload one document at a time")]
    MultipleFiles,

    #[error("{0} is empty")]
    EmptyFile(String),

    #[error("{name} is {size} bytes; the limit is {max} bytes")]
    TooLarge { name: String, size: usize, max: usize },

    #[error("{name} has unsupported type {mime}; upload a PDF, JPEG or PNG")]
    UnsupportedType { name: String, mime: String },
}

/// A validated upload held for the duration of one request
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

/// Metadata shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDetails {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

impl FileDetails {
    /// Size in kilobytes with two decimals, e.g. `12.50 KB`
    pub fn size_kb(&self) -> String {
        format!("{:.2} KB", self.size_bytes as f64 / 1024.0)
    }
}

impl UploadedDocument {
    /// Validate an upload; the declared type wins unless it is missing or generic
    pub fn new(file_name: &str, declared_type: Option<&str>, bytes: Vec<u8>) -> Result<Self, UploadError> {
        let file_name = if file_name.trim().is_empty() {
            "document".to_string()
        } else {
            file_name.to_string()
        };

        if bytes.is_empty() {
            return Err(UploadError::EmptyFile(file_name));
        }

        let mime_type = resolve_mime(&file_name, declared_type);
        if !ACCEPTED_TYPES.contains(&mime_type.as_str()) {
            return Err(UploadError::UnsupportedType {
                name: file_name,
                mime: mime_type,
            });
        }

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    pub fn details(&self) -> FileDetails {
        FileDetails {
            name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.bytes.len(),
        }
    }

    /// `data:` URI for inline previews
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

fn resolve_mime(file_name: &str, declared_type: Option<&str>) -> String {
    let declared = declared_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty() && value != "application/octet-stream");

    let mime = declared.unwrap_or_else(|| {
        mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string()
    });

    match mime.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        _ => mime,
    }
}

/// Read the `document` field out of a multipart form
pub async fn parse_multipart(mut multipart: Multipart, max_bytes: usize) -> Result<UploadedDocument, UploadError> {
    let mut document = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Malformed(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let declared_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Malformed(e.body_text()))?;

        // Browsers submit an unnamed empty part when no file was chosen
        if file_name.is_empty() && bytes.is_empty() {
            continue;
        }

        if bytes.len() > max_bytes {
            return Err(UploadError::TooLarge {
                name: file_name,
                size: bytes.len(),
                max: max_bytes,
            });
        }

        if document.is_some() {
            return Err(UploadError::MultipleFiles);
        }

        document = Some(UploadedDocument::new(&file_name, declared_type.as_deref(), bytes.to_vec())?);
    }

    document.ok_or(UploadError::MissingFile)
}
