//! Entity extraction service

use std::sync::Arc;

use super::prompt::build_request;
use super::provider::ChatModel;
use super::types::{EntityResult, NerError};

/// Model parameters fixed at startup
#[derive(Debug, Clone)]
pub struct ExtractionSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 512,
        }
    }
}

/// Extracts schema entities from plain text with one model call
#[derive(Clone)]
pub struct EntityExtractor {
    model: Arc<dyn ChatModel>,
    settings: ExtractionSettings,
}

impl EntityExtractor {
    pub fn new(model: Arc<dyn ChatModel>, settings: ExtractionSettings) -> Self {
        Self { model, settings }
    }

    /// Run extraction on `text`
    ///
    /// Whitespace-only text is rejected before the model is contacted. The
    /// parsed object is returned as-is; keys outside the schema are only
    /// logged.
    pub async fn extract(&self, text: &str) -> Result<EntityResult, NerError> {
        if text.trim().is_empty() {
            return Err(NerError::InvalidInput("Text must not be empty".to_string()));
        }

        let request = build_request(text, &self.settings.model, self.settings.max_tokens);
        tracing::debug!(
            "Sending {} characters to {} ({})",
            text.len(),
            self.model.name(),
            self.settings.model
        );

        let reply = self.model.complete(&request).await?;
        let entities = EntityResult::parse(&reply).map_err(|e| {
            tracing::debug!("Unparseable model reply: {:?}", reply);
            e
        })?;

        let unknown = entities.unknown_keys();
        if !unknown.is_empty() {
            tracing::warn!("Model returned keys outside the schema: {:?}", unknown);
        }
        tracing::info!("Extracted {} entities", entities.len());

        Ok(entities)
    }
}
