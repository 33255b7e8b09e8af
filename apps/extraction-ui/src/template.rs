//! HTML rendering
//!
//! Pages are assembled with `format!`; every piece of user or gateway data
//! goes through `html_escape` first.

use html_escape::{encode_double_quoted_attribute as escape_attr, encode_text as escape};
use serde_json::{Map, Value};

use crate::config::GatewayConfig;
use crate::pipeline::{PipelineOutcome, PipelineRun};
use crate::upload::{UploadError, UploadedDocument, FILE_FIELD};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 72rem; padding: 0 1rem; color: #1f2933; }
h1 { margin-bottom: 0.25rem; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }
.notice { padding: 0.75rem 1rem; border-radius: 4px; margin: 1rem 0; }
.notice.error { background: #fde8e8; border: 1px solid #f8b4b4; }
.notice.warning { background: #fdf6b2; border: 1px solid #faca15; }
dl { display: grid; grid-template-columns: max-content 1fr; gap: 0.25rem 1rem; }
dt { font-weight: 600; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #cbd2d9; padding: 0.4rem 0.6rem; text-align: left; vertical-align: top; }
td.missing { color: #7b8794; font-style: italic; }
textarea { width: 100%; height: 24rem; font-family: ui-monospace, monospace; }
pre { background: #f5f7fa; padding: 1rem; overflow-x: auto; }
img.preview { max-width: 100%; border: 1px solid #cbd2d9; }
footer { margin-top: 3rem; color: #7b8794; font-size: 0.85rem; }
"#;

const PREVIEW_SCRIPT: &str = r#"
document.getElementById('document').addEventListener('change', function (event) {
  var file = event.target.files[0];
  var details = document.getElementById('selected-details');
  var preview = document.getElementById('selected-preview');
  details.textContent = '';
  preview.removeAttribute('src');
  preview.hidden = true;
  if (!file) { return; }
  details.textContent = file.name + ' (' + (file.type || 'unknown type') + ', ' + (file.size / 1024).toFixed(2) + ' KB)';
  if (file.type.indexOf('image/') === 0) {
    preview.src = URL.createObjectURL(file);
    preview.hidden = false;
  }
});
"#;

fn layout(title: &str, body: &str, gateways: &GatewayConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>Document entity extractor</h1>
<p>Upload a document to extract its text and entities.</p>
{body}
<footer>OCR gateway: {ocr} &middot; Entity gateway: {ner}</footer>
<script>{PREVIEW_SCRIPT}</script>
</body>
</html>
"#,
        title = escape(title),
        body = body,
        ocr = escape(&gateways.ocr_api_url),
        ner = escape(&gateways.ner_api_url),
    )
}

fn upload_form() -> String {
    format!(
        r#"<form method="post" action="/process" enctype="multipart/form-data">
<label for="{FILE_FIELD}">Choose a document (PDF, JPG, PNG)</label>
<input type="file" id="{FILE_FIELD}" name="{FILE_FIELD}" accept=".pdf,.jpg,.jpeg,.png,application/pdf,image/jpeg,image/png" required>
<button type="submit">Process document</button>
<p id="selected-details"></p>
<img id="selected-preview" class="preview" alt="Selected document preview" hidden>
</form>"#
    )
}

fn notice(kind: &str, message: &str) -> String {
    format!(
        r#"<div class="notice {}" role="alert">{}</div>"#,
        kind,
        escape(message)
    )
}

fn file_details(document: &UploadedDocument) -> String {
    let details = document.details();
    format!(
        r#"<section class="details">
<h2>File details</h2>
<dl><dt>Name</dt><dd>{}</dd><dt>Type</dt><dd>{}</dd><dt>Size</dt><dd>{}</dd></dl>
</section>"#,
        escape(&details.name),
        escape(&details.mime_type),
        details.size_kb()
    )
}

fn image_preview(document: &UploadedDocument) -> String {
    if !document.is_image() {
        return String::new();
    }
    format!(
        r#"<h2>Original document</h2>
<img class="preview" src="{}" alt="{}">"#,
        escape_attr(&document.data_uri()),
        escape_attr(document.file_name())
    )
}

fn extracted_text(raw: &str) -> String {
    format!(
        r#"<h2>Extracted text</h2>
<textarea readonly aria-label="Extracted text">
{}</textarea>"#,
        escape(raw)
    )
}

fn value_cell(value: &Value) -> String {
    match value {
        Value::Null => r#"<td class="missing">not found</td>"#.to_string(),
        Value::String(s) => format!("<td>{}</td>", escape(s)),
        other => format!("<td>{}</td>", escape(&other.to_string())),
    }
}

fn entities_section(entities: &Map<String, Value>) -> String {
    if entities.is_empty() {
        return notice("warning", "No entities were found in the document.");
    }

    let rows: String = entities
        .iter()
        .map(|(key, value)| format!("<tr><th scope=\"row\">{}</th>{}</tr>\n", escape(key), value_cell(value)))
        .collect();

    let json = serde_json::to_string_pretty(entities).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"<h2>Extracted entities</h2>
<table>
<thead><tr><th>Entity</th><th>Value</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<h2>Entities JSON</h2>
<pre><code>{json}</code></pre>"#,
        rows = rows,
        json = escape(&json)
    )
}

/// Landing page with the upload form
pub fn render_index(gateways: &GatewayConfig) -> String {
    layout("Document entity extractor", &upload_form(), gateways)
}

/// Page shown when the upload itself was rejected
pub fn render_upload_error(error: &UploadError, gateways: &GatewayConfig) -> String {
    let body = format!("{}\n{}", upload_form(), notice("error", &error.to_string()));
    layout("Upload rejected", &body, gateways)
}

/// Results of one pipeline run
pub fn render_result(document: &UploadedDocument, run: &PipelineRun, gateways: &GatewayConfig) -> String {
    let (left, right) = match &run.outcome {
        PipelineOutcome::OcrFailed(error) => (notice("error", &error.to_string()), String::new()),
        PipelineOutcome::NoText => (
            notice("warning", "No text was found in the document."),
            String::new(),
        ),
        PipelineOutcome::ExtractionFailed { text, error } => {
            (extracted_text(text), notice("error", &error.to_string()))
        }
        PipelineOutcome::Completed { text, entities } => {
            (extracted_text(text), entities_section(entities))
        }
    };

    let body = format!(
        r#"{form}
{details}
<div class="columns">
<div>
{preview}
{left}
</div>
<div>
{right}
</div>
</div>"#,
        form = upload_form(),
        details = file_details(document),
        preview = image_preview(document),
        left = left,
        right = right,
    );

    layout(&format!("Results for {}", run.details.name), &body, gateways)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::client::{Gateway, GatewayCallError};
    use serde_json::json;

    fn gateways() -> GatewayConfig {
        GatewayConfig {
            ocr_api_url: "http://localhost:5000".to_string(),
            ner_api_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    fn pdf() -> UploadedDocument {
        UploadedDocument::new("letter.pdf", Some("application/pdf"), b"%PDF".to_vec()).unwrap()
    }

    fn run_for(document: &UploadedDocument, outcome: PipelineOutcome) -> PipelineRun {
        PipelineRun {
            details: document.details(),
            outcome,
        }
    }

    fn entities(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_index_has_upload_form() {
        let html = render_index(&gateways());
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(html.contains(r#"name="document""#));
        assert!(html.contains("Process document"));
        assert!(html.contains("http://localhost:5000"));
    }

    #[test]
    fn test_completed_renders_table_and_json() {
        let doc = pdf();
        let run = run_for(
            &doc,
            PipelineOutcome::Completed {
                text: "Jane Doe, Software Engineer\n".to_string(),
                entities: entities(json!({ "employee_name": "Jane Doe", "salary": 5000, "end_date": null })),
            },
        );

        let html = render_result(&doc, &run, &gateways());

        assert!(html.contains(r#"<tr><th scope="row">employee_name</th><td>Jane Doe</td></tr>"#));
        assert!(html.contains(r#"<tr><th scope="row">salary</th><td>5000</td></tr>"#));
        assert!(html.contains(r#"<td class="missing">not found</td>"#));
        assert!(html.contains("Entities JSON"));
        assert!(html.contains(r#""employee_name": "Jane Doe""#));
        assert!(html.contains("<dd>0.00 KB</dd>"));
    }

    #[test]
    fn test_empty_entities_show_notice_not_table() {
        let doc = pdf();
        let run = run_for(
            &doc,
            PipelineOutcome::Completed {
                text: "hello\n".to_string(),
                entities: Map::new(),
            },
        );

        let html = render_result(&doc, &run, &gateways());

        assert!(html.contains("No entities were found in the document."));
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_no_text_notice() {
        let doc = pdf();
        let html = render_result(&doc, &run_for(&doc, PipelineOutcome::NoText), &gateways());

        assert!(html.contains("No text was found in the document."));
        assert!(!html.contains("Extracted text"));
    }

    #[test]
    fn test_leading_newline_survives_textarea() {
        let doc = pdf();
        let run = run_for(
            &doc,
            PipelineOutcome::Completed {
                text: "\nJane Doe\n".to_string(),
                entities: Map::new(),
            },
        );

        let html = render_result(&doc, &run, &gateways());

        assert!(html.contains("aria-label=\"Extracted text\">\n\nJane Doe\n</textarea>"));
    }

    #[test]
    fn test_errors_are_shown() {
        let doc = pdf();
        let run = run_for(
            &doc,
            PipelineOutcome::ExtractionFailed {
                text: "letter\n".to_string(),
                error: GatewayCallError::Status {
                    gateway: Gateway::Ner,
                    status: 502,
                    detail: "Unparseable response from model: EOF".to_string(),
                },
            },
        );

        let html = render_result(&doc, &run, &gateways());

        assert!(html.contains("Extracted text"));
        assert!(html.contains(
            "Entity extraction service returned HTTP 502: Unparseable response from model: EOF"
        ));
    }

    #[test]
    fn test_gateway_data_is_escaped() {
        let doc = pdf();
        let run = run_for(
            &doc,
            PipelineOutcome::Completed {
                text: "<script>alert(1)</script>".to_string(),
                entities: entities(json!({ "employer_name": "<b>Acme</b>" })),
            },
        );

        let html = render_result(&doc, &run, &gateways());

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<td>&lt;b&gt;Acme&lt;/b&gt;</td>"));
    }

    #[test]
    fn test_image_preview_only_for_images() {
        let png = UploadedDocument::new("scan.png", Some("image/png"), b"PNG".to_vec()).unwrap();
        let html = render_result(&png, &run_for(&png, PipelineOutcome::NoText), &gateways());
        assert!(html.contains(r#"src="data:image/png;base64,UE5H""#));

        let doc = pdf();
        let html = render_result(&doc, &run_for(&doc, PipelineOutcome::NoText), &gateways());
        assert!(!html.contains("Original document"));
    }

    #[test]
    fn test_upload_error_page() {
        let html = render_upload_error(&UploadError::MissingFile, &gateways());
        assert!(html.contains("Choose a document to upload"));
        assert!(html.contains(r#"role="alert""#));
    }
}
